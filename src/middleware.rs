//! Redirects unauthenticated browser traffic to the sign-in page.

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{StatusCode, header};
use actix_web::{Error, HttpResponse};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

const SIGNIN_LOCATION: &str = "/auth/signin";

/// Wraps a scope so any `401 Unauthorized` outcome, whether produced by a
/// handler or by the identity extractor, becomes a redirect to the auth
/// service sign-in page.
pub struct RedirectUnauthorized;

impl<S, B> Transform<S, ServiceRequest> for RedirectUnauthorized
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RedirectUnauthorizedMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectUnauthorizedMiddleware { service }))
    }
}

pub struct RedirectUnauthorizedMiddleware<S> {
    service: S,
}

fn signin_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SIGNIN_LOCATION))
        .finish()
}

impl<S, B> Service<ServiceRequest> for RedirectUnauthorizedMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let (request, payload) = req.into_parts();
        let fut = self
            .service
            .call(ServiceRequest::from_parts(request.clone(), payload));

        Box::pin(async move {
            match fut.await {
                Ok(res) if res.status() == StatusCode::UNAUTHORIZED => {
                    let (req, _) = res.into_parts();
                    Ok(ServiceResponse::new(
                        req,
                        signin_redirect().map_into_right_body(),
                    ))
                }
                Ok(res) => Ok(res.map_into_left_body()),
                Err(err) => {
                    if err.as_response_error().status_code() == StatusCode::UNAUTHORIZED {
                        Ok(ServiceResponse::new(
                            request,
                            signin_redirect().map_into_right_body(),
                        ))
                    } else {
                        Err(err)
                    }
                }
            }
        })
    }
}
