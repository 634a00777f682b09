use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{UserReader, UserWriter};

/// Diesel implementation of the user repository traits.
pub struct DieselUserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselUserRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl UserReader for DieselUserRepository<'_> {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let row = users::table.find(id).first::<DbUser>(&mut conn).optional()?;

        row.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let row = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        row.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list(&self) -> RepositoryResult<Vec<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        users::table
            .order(users::name.asc())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(|row| User::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl UserWriter for DieselUserRepository<'_> {
    fn create_or_update(&self, user: &NewUser) -> RepositoryResult<User> {
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.pool.get()?;

        let existing = users::table
            .filter(users::email.eq(&user.email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let row = match existing {
            Some(current) => diesel::update(users::table.find(current.id))
                .set((
                    users::name.eq(&user.name),
                    users::updated_at.eq(Utc::now().naive_utc()),
                ))
                .get_result::<DbUser>(&mut conn)?,
            None => {
                let insertable: DbNewUser = user.into();
                diesel::insert_into(users::table)
                    .values(&insertable)
                    .get_result::<DbUser>(&mut conn)?
            }
        };

        User::try_from(row).map_err(RepositoryError::from)
    }

    fn update(&self, id: i32, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::models::user::{UpdateUser as DbUpdateUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let changeset = DbUpdateUser {
            name: updates.name.as_str(),
            role: updates.role.as_str(),
            updated_at: Utc::now().naive_utc(),
        };

        let row = diesel::update(users::table.find(id))
            .set(&changeset)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(row).map_err(RepositoryError::from)
    }

    fn delete(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::{products, users};

        let mut conn = self.pool.get()?;

        // a user's products go with the account
        diesel::delete(products::table.filter(products::user_id.eq(id))).execute(&mut conn)?;
        let affected = diesel::delete(users::table.find(id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
