use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::constancia::{Constancia, ConstanciaEstado, NewConstancia};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ConstanciaListQuery, ConstanciaReader, ConstanciaWriter};

/// Diesel implementation of the constancia repository traits.
pub struct DieselConstanciaRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselConstanciaRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl ConstanciaReader for DieselConstanciaRepository<'_> {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Constancia>> {
        use crate::models::constancia::Constancia as DbConstancia;
        use crate::schema::constancias;

        let mut conn = self.pool.get()?;
        let row = constancias::table
            .find(id)
            .first::<DbConstancia>(&mut conn)
            .optional()?;

        row.map(Constancia::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list(&self, query: ConstanciaListQuery) -> RepositoryResult<Vec<Constancia>> {
        use crate::models::constancia::Constancia as DbConstancia;
        use crate::schema::constancias;

        let mut conn = self.pool.get()?;

        let mut statement = constancias::table
            .order(constancias::created_at.desc())
            .into_boxed();
        if let Some(user_id) = query.user_id {
            statement = statement.filter(constancias::user_id.eq(user_id));
        }

        statement
            .load::<DbConstancia>(&mut conn)?
            .into_iter()
            .map(|row| Constancia::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ConstanciaWriter for DieselConstanciaRepository<'_> {
    fn create(&self, nueva: &NewConstancia) -> RepositoryResult<Constancia> {
        use crate::models::constancia::{Constancia as DbConstancia, NewConstancia as DbNew};
        use crate::schema::constancias;

        let mut conn = self.pool.get()?;
        let insertable: DbNew = nueva.into();

        let created = diesel::insert_into(constancias::table)
            .values(&insertable)
            .get_result::<DbConstancia>(&mut conn)?;

        Constancia::try_from(created).map_err(RepositoryError::from)
    }

    fn set_estado(&self, id: i32, estado: ConstanciaEstado) -> RepositoryResult<Constancia> {
        use crate::models::constancia::Constancia as DbConstancia;
        use crate::schema::constancias;

        let mut conn = self.pool.get()?;
        let updated = diesel::update(constancias::table.find(id))
            .set((
                constancias::estado.eq(estado.as_str()),
                constancias::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbConstancia>(&mut conn)?;

        Constancia::try_from(updated).map_err(RepositoryError::from)
    }

    fn delete(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::constancias;

        let mut conn = self.pool.get()?;
        let affected = diesel::delete(constancias::table.find(id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
