//! PreferenceRepository - Repository per le preferenze dei filtri
//!
//! Invariante: al massimo una riga per utente. Se vengono trovati duplicati
//! (inserimenti concorrenti) tutte le righe dell'utente vengono cancellate e
//! la preferenza viene trattata come assente, per essere ricreata al prossimo salvataggio.

use super::{Delete, Read, Upsert};
use crate::dtos::UserSettingsDTO;
use crate::entities::UserFilterPreference;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument, warn};

// PREFERENCE REPOSITORY
#[derive(Clone)]
pub struct PreferenceRepository {
    connection_pool: SqlitePool,
}

impl PreferenceRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Numero di righe presenti per l'utente (normalmente 0 o 1)
    pub async fn count_for_user(&self, userid: &i64) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_filter_preferences WHERE userid = ?",
        )
        .bind(userid)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Read<UserFilterPreference, i64> for PreferenceRepository {
    /// Legge la preferenza dell'utente, riparando eventuali duplicati
    #[instrument(skip(self))]
    async fn read(&self, userid: &i64) -> Result<Option<UserFilterPreference>, Error> {
        let mut rows = sqlx::query_as::<_, UserFilterPreference>(
            r#"
            SELECT id, userid, timefilterpast, timefilterfuture, basicletter, completionletter, postletter
            FROM user_filter_preferences
            WHERE userid = ?
            "#,
        )
        .bind(userid)
        .fetch_all(&self.connection_pool)
        .await?;

        match rows.len() {
            0 => {
                debug!("No stored preference");
                Ok(None)
            }
            1 => Ok(rows.pop()),
            n => {
                warn!("Found {} preference rows for one user, resetting", n);
                self.delete(userid).await?;
                Ok(None)
            }
        }
    }
}

impl Upsert<UserFilterPreference, UserSettingsDTO> for PreferenceRepository {
    /// Crea la riga al primo salvataggio, poi la aggiorna sul posto.
    /// Lettura e scrittura avvengono nella stessa transazione.
    #[instrument(skip(self, data), fields(userid = %data.userid))]
    async fn upsert(&self, data: &UserSettingsDTO) -> Result<UserFilterPreference, Error> {
        // IMMEDIATE: il lock di scrittura viene preso subito, cosi' i salvataggi
        // concorrenti attendono il busy timeout invece di fallire all'upgrade
        let mut tx = self.connection_pool.begin_with("BEGIN IMMEDIATE").await?;

        let existing: Vec<i64> =
            sqlx::query_scalar("SELECT id FROM user_filter_preferences WHERE userid = ?")
                .bind(data.userid)
                .fetch_all(&mut *tx)
                .await?;

        let id = match existing.as_slice() {
            [id] => {
                sqlx::query(
                    r#"
                    UPDATE user_filter_preferences
                    SET timefilterpast = ?, timefilterfuture = ?, basicletter = ?, completionletter = ?, postletter = ?
                    WHERE id = ?
                    "#,
                )
                .bind(data.timefilterpast)
                .bind(data.timefilterfuture)
                .bind(data.basicletter)
                .bind(data.completionletter)
                .bind(data.postletter)
                .bind(*id)
                .execute(&mut *tx)
                .await?;
                debug!("Preference {} updated", id);
                *id
            }
            rows => {
                if !rows.is_empty() {
                    warn!("Found {} preference rows for one user, recreating", rows.len());
                    sqlx::query("DELETE FROM user_filter_preferences WHERE userid = ?")
                        .bind(data.userid)
                        .execute(&mut *tx)
                        .await?;
                }
                let result = sqlx::query(
                    r#"
                    INSERT INTO user_filter_preferences
                        (userid, timefilterpast, timefilterfuture, basicletter, completionletter, postletter)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(data.userid)
                .bind(data.timefilterpast)
                .bind(data.timefilterfuture)
                .bind(data.basicletter)
                .bind(data.completionletter)
                .bind(data.postletter)
                .execute(&mut *tx)
                .await?;
                info!("Preference created");
                result.last_insert_rowid()
            }
        };

        tx.commit().await?;

        Ok(UserFilterPreference {
            id,
            userid: data.userid,
            timefilterpast: data.timefilterpast,
            timefilterfuture: data.timefilterfuture,
            basicletter: data.basicletter,
            completionletter: data.completionletter,
            postletter: data.postletter,
        })
    }
}

impl Delete<i64> for PreferenceRepository {
    #[instrument(skip(self))]
    async fn delete(&self, userid: &i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM user_filter_preferences WHERE userid = ?")
            .bind(userid)
            .execute(&self.connection_pool)
            .await?;
        debug!("Deleted {} preference rows", result.rows_affected());
        Ok(())
    }
}
