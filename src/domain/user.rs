//! User accounts and their roles.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, NonEmptyString, TypeConstraintError};
use crate::listing::Filterable;

/// Access level of an account. `Admin` can do everything, `Planillero` can
/// review requests and export reports, `Usuario` can only file and follow
/// their own requests.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Planillero,
    Usuario,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Planillero, UserRole::Usuario];

    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Planillero => "planillero",
            UserRole::Usuario => "usuario",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "planillero" => Ok(UserRole::Planillero),
            "usuario" => Ok(UserRole::Usuario),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Filterable for User {
    fn searchable_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.email.as_str()),
        ]
    }

    fn category(&self, name: &str) -> Option<&str> {
        (name == "role").then_some(self.role.as_str())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn new(email: String, name: String, role: UserRole) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            email: Email::new(email)?.into_inner(),
            name: NonEmptyString::new(name)?.into_inner(),
            role,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateUser {
    pub name: String,
    pub role: UserRole,
}

impl UpdateUser {
    pub fn new(name: String, role: UserRole) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: NonEmptyString::new(name)?.into_inner(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::try_from(role.as_str()).unwrap(), role);
        }
        assert!(UserRole::try_from("root").is_err());
    }

    #[test]
    fn new_user_normalizes_email() {
        let user = NewUser::new("Ana@Example.com ".into(), "Ana".into(), UserRole::Usuario).unwrap();
        assert_eq!(user.email, "ana@example.com");
    }
}
