use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::db::DbPool;
use crate::domain::user::UserRole;
use crate::forms::user::{AddUserForm, SaveUserForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::user::DieselUserRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::user::{self as user_service, UsersQuery};

#[get("/users")]
pub async fn show_users(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<UsersQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = DieselUserRepository::new(&pool);

    let users = match user_service::load_users_page(&repo, &user, query.into_inner()) {
        Ok(users) => users,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(e) => {
            log::error!("Failed to load users: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "users",
        &server_config.auth_service_url,
    );
    context.insert("users", &users);
    context.insert(
        "roles",
        &UserRole::ALL.iter().map(UserRole::as_str).collect::<Vec<_>>(),
    );

    render_template(&tera, "users/index.html", &context)
}

#[post("/users/add")]
pub async fn add_user(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<AddUserForm>,
) -> impl Responder {
    let repo = DieselUserRepository::new(&pool);

    match user_service::add_user(&repo, &user, form) {
        Ok(_) => FlashMessage::success("Usuario registrado.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::Form(msg)) | Err(ServiceError::TypeConstraint(msg)) => {
            FlashMessage::error(msg).send();
        }
        Err(e) => {
            log::error!("Failed to add user: {e}");
            FlashMessage::error("Error al registrar el usuario").send();
        }
    }

    redirect("/users")
}

#[post("/users/save")]
pub async fn save_user(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<SaveUserForm>,
) -> impl Responder {
    let repo = DieselUserRepository::new(&pool);

    match user_service::save_user(&repo, &user, form) {
        Ok(saved) => FlashMessage::success(format!("Usuario {} actualizado.", saved.name)).send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Usuario no encontrado.").send(),
        Err(ServiceError::Form(msg)) | Err(ServiceError::TypeConstraint(msg)) => {
            FlashMessage::error(msg).send();
        }
        Err(e) => {
            log::error!("Failed to save user: {e}");
            FlashMessage::error("Error al actualizar el usuario").send();
        }
    }

    redirect("/users")
}

#[post("/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselUserRepository::new(&pool);

    match user_service::delete_user(&repo, &user, user_id.into_inner()) {
        Ok(()) => FlashMessage::success("Usuario eliminado.").send(),
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => FlashMessage::error("Usuario no encontrado.").send(),
        Err(ServiceError::Form(msg)) => FlashMessage::error(msg).send(),
        Err(e) => {
            log::error!("Failed to delete user: {e}");
            FlashMessage::error("Error al eliminar el usuario").send();
        }
    }

    redirect("/users")
}
