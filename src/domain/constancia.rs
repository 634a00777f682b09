//! Constancia (certificate request) aggregate.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{DocumentNumber, Email, Motivo, NonEmptyString, PublicId, TypeConstraintError};
use crate::listing::Filterable;

/// Kind of certificate being requested.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConstanciaTipo {
    Laboral,
    Estudios,
    Residencia,
}

impl ConstanciaTipo {
    pub const ALL: [ConstanciaTipo; 3] = [
        ConstanciaTipo::Laboral,
        ConstanciaTipo::Estudios,
        ConstanciaTipo::Residencia,
    ];

    /// Canonical stored form, matching the values shown in filter selectors.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConstanciaTipo::Laboral => "LABORAL",
            ConstanciaTipo::Estudios => "ESTUDIOS",
            ConstanciaTipo::Residencia => "RESIDENCIA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConstanciaTipo::Laboral => "Laboral",
            ConstanciaTipo::Estudios => "Estudios",
            ConstanciaTipo::Residencia => "Residencia",
        }
    }
}

impl Display for ConstanciaTipo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ConstanciaTipo {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "LABORAL" => Ok(ConstanciaTipo::Laboral),
            "ESTUDIOS" => Ok(ConstanciaTipo::Estudios),
            "RESIDENCIA" => Ok(ConstanciaTipo::Residencia),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown constancia tipo: {other}"
            ))),
        }
    }
}

/// Review status of a request.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConstanciaEstado {
    Pendiente,
    Aprobada,
    Rechazada,
}

impl ConstanciaEstado {
    pub const ALL: [ConstanciaEstado; 3] = [
        ConstanciaEstado::Pendiente,
        ConstanciaEstado::Aprobada,
        ConstanciaEstado::Rechazada,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ConstanciaEstado::Pendiente => "pendiente",
            ConstanciaEstado::Aprobada => "aprobada",
            ConstanciaEstado::Rechazada => "rechazada",
        }
    }

    /// Badge color used by the templates for this status.
    pub const fn color(&self) -> &'static str {
        match self {
            ConstanciaEstado::Pendiente => "warning",
            ConstanciaEstado::Aprobada => "success",
            ConstanciaEstado::Rechazada => "danger",
        }
    }
}

impl Display for ConstanciaEstado {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ConstanciaEstado {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pendiente" => Ok(ConstanciaEstado::Pendiente),
            "aprobada" => Ok(ConstanciaEstado::Aprobada),
            "rechazada" => Ok(ConstanciaEstado::Rechazada),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown constancia estado: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Constancia {
    pub id: i32,
    /// Folio printed on the certificate and shown to the requester.
    pub public_id: PublicId,
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    pub tipo: ConstanciaTipo,
    pub motivo: String,
    pub estado: ConstanciaEstado,
    pub user_id: i32,
    pub user_email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Constancia {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellidos)
    }

    /// Only approved requests may be exported as certificates.
    pub fn is_printable(&self) -> bool {
        self.estado == ConstanciaEstado::Aprobada
    }
}

impl Filterable for Constancia {
    fn searchable_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.nombre.as_str()),
            Cow::Borrowed(self.apellidos.as_str()),
            Cow::Borrowed(self.documento.as_str()),
        ]
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "tipo" => Some(self.tipo.as_str()),
            "estado" => Some(self.estado.as_str()),
            _ => None,
        }
    }
}

/// Validated payload for a new request. Construction normalizes every field,
/// so a stored constancia never carries untrimmed or unsanitized input.
#[derive(Clone, Debug, Deserialize)]
pub struct NewConstancia {
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    pub tipo: ConstanciaTipo,
    pub motivo: String,
    pub user_id: i32,
    pub user_email: String,
}

impl NewConstancia {
    pub fn new(
        nombre: String,
        apellidos: String,
        documento: String,
        tipo: ConstanciaTipo,
        motivo: String,
        user_id: i32,
        user_email: String,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            nombre: NonEmptyString::new(nombre)?.into_inner(),
            apellidos: NonEmptyString::new(apellidos)?.into_inner(),
            documento: DocumentNumber::new(documento)?.into_inner(),
            tipo,
            motivo: Motivo::new(motivo)?.into_inner(),
            user_id,
            user_email: Email::new(user_email)?.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_round_trips_through_str() {
        for tipo in ConstanciaTipo::ALL {
            assert_eq!(ConstanciaTipo::try_from(tipo.as_str()).unwrap(), tipo);
        }
        assert!(ConstanciaTipo::try_from("OTRA").is_err());
    }

    #[test]
    fn estado_colors_match_review_flow() {
        assert_eq!(ConstanciaEstado::Pendiente.color(), "warning");
        assert_eq!(ConstanciaEstado::Aprobada.color(), "success");
        assert_eq!(ConstanciaEstado::Rechazada.color(), "danger");
    }

    #[test]
    fn new_constancia_normalizes_fields() {
        let nueva = NewConstancia::new(
            "  Ana ".into(),
            "Lopez".into(),
            "12345678".into(),
            ConstanciaTipo::Laboral,
            "tramite bancario personal".into(),
            3,
            "ANA@example.com".into(),
        )
        .unwrap();
        assert_eq!(nueva.nombre, "Ana");
        assert_eq!(nueva.user_email, "ana@example.com");
    }

    #[test]
    fn new_constancia_rejects_short_document() {
        let result = NewConstancia::new(
            "Ana".into(),
            "Lopez".into(),
            "123".into(),
            ConstanciaTipo::Laboral,
            "tramite bancario personal".into(),
            3,
            "ana@example.com".into(),
        );
        assert!(result.is_err());
    }
}
