use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser, UserRole,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub role: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(row: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            role: UserRole::try_from(row.role.as_str())?,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            email: user.email.as_str(),
            name: user.name.as_str(),
            role: user.role.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn row_converts_into_domain() {
        let now = Utc::now().naive_utc();
        let row = User {
            id: 1,
            email: "ana@example.com".into(),
            name: "Ana".into(),
            role: "planillero".into(),
            created_at: now,
            updated_at: now,
        };
        let domain = DomainUser::try_from(row).unwrap();
        assert_eq!(domain.role, UserRole::Planillero);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let now = Utc::now().naive_utc();
        let row = User {
            id: 1,
            email: "ana@example.com".into(),
            name: "Ana".into(),
            role: "root".into(),
            created_at: now,
            updated_at: now,
        };
        assert!(DomainUser::try_from(row).is_err());
    }

    #[test]
    fn update_changeset_borrows_domain_values() {
        let update = DomainUpdateUser::new("Ana Maria".into(), UserRole::Admin).unwrap();
        let changeset = UpdateUser {
            name: update.name.as_str(),
            role: update.role.as_str(),
            updated_at: Utc::now().naive_utc(),
        };
        assert_eq!(changeset.role, "admin");
    }
}
