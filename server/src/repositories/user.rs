//! UserRepository - Repository per la gestione degli utenti

use super::{Read, ReadMany, push_id_list};
use crate::entities::User;
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

// USER REPO
#[derive(Clone)]
pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }
}

impl Read<User, i64> for UserRepository {
    #[instrument(skip(self))]
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, firstname, lastname, picture, deleted FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl ReadMany<User, i64> for UserRepository {
    /// Usato per risolvere gli autori delle lettere in un'unica query
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn read_many(&self, ids: &[i64]) -> Result<Vec<User>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, username, firstname, lastname, picture, deleted FROM users WHERE id IN ",
        );
        push_id_list(&mut query, ids);
        let users = query
            .build_query_as::<User>()
            .fetch_all(&self.connection_pool)
            .await?;
        debug!("Resolved {} of {} users", users.len(), ids.len());
        Ok(users)
    }
}
