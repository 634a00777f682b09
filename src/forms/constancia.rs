use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateConstanciaForm {
    #[validate(length(min = 3, message = "El nombre debe tener al menos 3 caracteres"))]
    pub nombre: String,
    #[validate(length(min = 3, message = "Los apellidos deben tener al menos 3 caracteres"))]
    pub apellidos: String,
    #[validate(length(min = 8, message = "El documento debe tener al menos 8 caracteres"))]
    pub documento: String,
    /// One of the canonical tipo values, e.g. `LABORAL`.
    pub tipo: String,
    #[validate(length(min = 10, message = "El motivo debe tener al menos 10 caracteres"))]
    pub motivo: String,
}

/// Review decision posted from the admin table.
#[derive(Debug, Deserialize)]
pub struct UpdateEstadoForm {
    pub id: i32,
    /// `aprobada` or `rechazada`.
    pub estado: String,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn short_motivo_fails_validation() {
        let form = CreateConstanciaForm {
            nombre: "Ana".to_string(),
            apellidos: "García".to_string(),
            documento: "12345678".to_string(),
            tipo: "LABORAL".to_string(),
            motivo: "corto".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn complete_form_passes_validation() {
        let form = CreateConstanciaForm {
            nombre: "Ana".to_string(),
            apellidos: "García".to_string(),
            documento: "12345678".to_string(),
            tipo: "LABORAL".to_string(),
            motivo: "Trámite bancario personal".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
