use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::constancia::{
    Constancia as DomainConstancia, ConstanciaEstado, ConstanciaTipo,
    NewConstancia as DomainNewConstancia,
};
use crate::domain::types::{PublicId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::constancias)]
/// Diesel model for [`crate::domain::constancia::Constancia`].
pub struct Constancia {
    pub id: i32,
    pub public_id: String,
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    pub tipo: String,
    pub motivo: String,
    pub estado: String,
    pub user_id: i32,
    pub user_email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::constancias)]
/// Insertable form of [`Constancia`].
pub struct NewConstancia<'a> {
    pub public_id: String,
    pub nombre: &'a str,
    pub apellidos: &'a str,
    pub documento: &'a str,
    pub tipo: &'a str,
    pub motivo: &'a str,
    pub estado: &'a str,
    pub user_id: i32,
    pub user_email: &'a str,
}

impl TryFrom<Constancia> for DomainConstancia {
    type Error = TypeConstraintError;

    fn try_from(row: Constancia) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            public_id: row.public_id.parse::<PublicId>()?,
            tipo: ConstanciaTipo::try_from(row.tipo.as_str())?,
            estado: ConstanciaEstado::try_from(row.estado.as_str())?,
            nombre: row.nombre,
            apellidos: row.apellidos,
            documento: row.documento,
            motivo: row.motivo,
            user_id: row.user_id,
            user_email: row.user_email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewConstancia> for NewConstancia<'a> {
    fn from(nueva: &'a DomainNewConstancia) -> Self {
        Self {
            public_id: PublicId::new().to_string(),
            nombre: nueva.nombre.as_str(),
            apellidos: nueva.apellidos.as_str(),
            documento: nueva.documento.as_str(),
            tipo: nueva.tipo.as_str(),
            motivo: nueva.motivo.as_str(),
            estado: ConstanciaEstado::Pendiente.as_str(),
            user_id: nueva.user_id,
            user_email: nueva.user_email.as_str(),
        }
    }
}
