//! JWT-backed request identity.
//!
//! The external auth service issues the token; the identity cookie carries
//! it. Extraction validates the signature with the shared secret and exposes
//! the claims to handlers.

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims of the signed-in account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Local account id, as issued by the auth service.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

fn extract(req: &HttpRequest, payload: &mut Payload) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = Identity::from_request(req, payload)
        .into_inner()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;
    let token = identity
        .id()
        .map_err(|_| ErrorUnauthorized("missing identity"))?;

    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ErrorInternalServerError("server config missing"))?;

    let decoded = decode::<AuthenticatedUser>(
        &token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ErrorUnauthorized("invalid token"))?;

    Ok(decoded.claims)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        std::future::ready(extract(req, payload))
    }
}
