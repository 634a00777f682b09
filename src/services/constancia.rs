use chrono::NaiveDate;
use tera::Tera;
use validator::Validate;

use crate::domain::constancia::{Constancia, ConstanciaEstado, ConstanciaTipo, NewConstancia};
use crate::forms::constancia::CreateConstanciaForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::zmq::ZmqEmailMessage;
use crate::pdf;
use crate::pdf::DocumentDefinition;
use crate::repository::{ConstanciaReader, ConstanciaWriter};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::{ADMIN_ROLE, PLANILLERO_ROLE};

fn is_reviewer(user: &AuthenticatedUser) -> bool {
    check_role(ADMIN_ROLE, &user.roles) || check_role(PLANILLERO_ROLE, &user.roles)
}

/// Files a new request on behalf of the signed-in user. The request always
/// starts out `pendiente`.
pub fn create_constancia<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateConstanciaForm,
) -> ServiceResult<Constancia>
where
    R: ConstanciaWriter + ?Sized,
{
    form.validate()?;

    let user_id = user.user_id().ok_or(ServiceError::Unauthorized)?;
    let tipo = ConstanciaTipo::try_from(form.tipo.as_str())?;
    let nueva = NewConstancia::new(
        form.nombre,
        form.apellidos,
        form.documento,
        tipo,
        form.motivo,
        user_id,
        user.email.clone(),
    )?;

    repo.create(&nueva).map_err(ServiceError::from)
}

/// Fetches one request, enforcing ownership: reviewers may read any request,
/// a regular user only their own.
pub fn get_constancia<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<Constancia>
where
    R: ConstanciaReader + ?Sized,
{
    let constancia = repo
        .get_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if !is_reviewer(user) && user.user_id() != Some(constancia.user_id) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(constancia)
}

/// Applies a review decision, which is either `aprobada` or `rechazada`;
/// a request cannot be sent back to `pendiente`. Only reviewers may change
/// the estado.
pub fn set_estado<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    estado: ConstanciaEstado,
) -> ServiceResult<Constancia>
where
    R: ConstanciaWriter + ?Sized,
{
    if !is_reviewer(user) {
        return Err(ServiceError::Unauthorized);
    }
    if estado == ConstanciaEstado::Pendiente {
        return Err(ServiceError::Form(
            "Una decisión debe ser aprobada o rechazada".to_string(),
        ));
    }

    repo.set_estado(id, estado).map_err(ServiceError::from)
}

/// Removes a request. Admin only.
pub fn delete_constancia<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ConstanciaWriter + ?Sized,
{
    if !check_role(ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete(id).map_err(ServiceError::from)
}

/// Builds the certificate document for an approved request, together with
/// its download filename.
pub fn certificate_document(
    user: &AuthenticatedUser,
    constancia: &Constancia,
    issued_on: NaiveDate,
) -> ServiceResult<(String, DocumentDefinition)> {
    if !is_reviewer(user) && user.user_id() != Some(constancia.user_id) {
        return Err(ServiceError::Unauthorized);
    }
    if !constancia.is_printable() {
        return Err(ServiceError::Form(
            "Solo se pueden generar PDF de constancias aprobadas".to_string(),
        ));
    }

    Ok((
        pdf::certificate_filename(constancia),
        pdf::certificate(constancia, issued_on),
    ))
}

/// Builds the approval notification handed to the emailer: rendered HTML
/// body plus the certificate definition so the emailer can attach the PDF.
pub fn approval_message(
    tera: &Tera,
    constancia: &Constancia,
    issued_on: NaiveDate,
) -> ServiceResult<ZmqEmailMessage> {
    let mut context = tera::Context::new();
    context.insert("nombre_completo", &constancia.full_name());
    context.insert("tipo", constancia.tipo.as_str());
    context.insert("documento", &constancia.documento);
    context.insert("motivo", &constancia.motivo);
    context.insert("fecha", &issued_on.format("%d/%m/%Y").to_string());

    let body_html = tera
        .render("email/approved.html", &context)
        .map_err(|e| ServiceError::Internal(format!("Failed to render email body: {e}")))?;

    let document = serde_json::to_value(pdf::certificate(constancia, issued_on))
        .map_err(|e| ServiceError::Internal(format!("Failed to serialize certificate: {e}")))?;

    Ok(ZmqEmailMessage {
        to_email: constancia.user_email.clone(),
        to_name: constancia.full_name(),
        subject: "Constancia Aprobada".to_string(),
        body_html,
        document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryResult;

    /// Writer that must never be reached; used to assert rejections happen
    /// before the store is touched.
    struct RejectingRepo;

    impl ConstanciaWriter for RejectingRepo {
        fn create(&self, _nueva: &NewConstancia) -> RepositoryResult<Constancia> {
            unreachable!("create must not be called")
        }

        fn set_estado(&self, _id: i32, _estado: ConstanciaEstado) -> RepositoryResult<Constancia> {
            unreachable!("set_estado must not be called")
        }

        fn delete(&self, _id: i32) -> RepositoryResult<()> {
            unreachable!("delete must not be called")
        }
    }

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec![ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    #[test]
    fn pendiente_is_not_a_valid_decision() {
        let err = set_estado(&RejectingRepo, &admin_user(), 1, ConstanciaEstado::Pendiente)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn regular_user_cannot_decide() {
        let user = AuthenticatedUser {
            roles: vec!["usuario".to_string()],
            ..admin_user()
        };
        let err = set_estado(&RejectingRepo, &user, 1, ConstanciaEstado::Aprobada).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }
}
