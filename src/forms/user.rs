use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveUserForm {
    pub id: i32,
    #[validate(length(min = 1, message = "El nombre no puede estar vacío"))]
    pub name: String,
    /// One of `admin`, `planillero`, `usuario`.
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddUserForm {
    #[validate(email(message = "Correo inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "El nombre no puede estar vacío"))]
    pub name: String,
    pub role: String,
}
