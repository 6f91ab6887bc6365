//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.
//! Le query usano le funzioni runtime di sqlx (`query_as` + `FromRow`), quindi la
//! compilazione non richiede un database raggiungibile.

pub mod course;
pub mod preference;
pub mod traits;
pub mod user;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Delete, Read, ReadMany, Upsert};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use course::CourseRepository;
pub use preference::PreferenceRepository;
pub use user::UserRepository;

/// Migrazioni dello schema, incluse nel binario
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DB_BUSY_TIMEOUT_SECS: u64 = 5;

/// Apre il pool SQLite (creando il file se manca) e applica le migrazioni
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(DB_BUSY_TIMEOUT_SECS));

    debug!("Creating connection pool...");
    let pool = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(DB_ACQUIRE_TIMEOUT_SECS))
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// Aggiunge `(?, ?, ...)` con un bind per ogni id
pub(crate) fn push_id_list(query: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    query.push("(");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

/// Pool in memoria con una sola connessione: ogni connessione `:memory:` e' un database distinto
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}
