//! EventSource - Interfaccia delle sorgenti di contenuto del feed

use super::Event;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Finestra temporale chiusa `[from, to]` in secondi unix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
}

impl TimeWindow {
    pub fn around(now: i64, lookback: i64, lookahead: i64) -> Self {
        Self {
            from: now.saturating_sub(lookback),
            to: now.saturating_add(lookahead),
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.from <= timestamp && timestamp <= self.to
    }
}

/// Parametri di una singola richiesta di eventi
#[derive(Debug, Clone)]
pub struct FetchScope {
    pub userid: i64,
    /// Insieme dei corsi iscritti: limita ogni query
    pub courseids: Vec<i64>,
    pub window: TimeWindow,
    /// Istante usato per le regole di disponibilità
    pub now: i64,
}

/// Sorgente opzionale di eventi grezzi.
/// Una sorgente non disponibile (modulo non installato) contribuisce zero eventi.
#[async_trait]
pub trait EventSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn is_available(&self) -> Result<bool, sqlx::Error> {
        Ok(true)
    }

    /// Eventi gia' filtrati per visibilità e normalizzati
    async fn fetch(&self, scope: &FetchScope) -> Result<Vec<Event>, sqlx::Error>;
}

/// Verifica che tutte le tabelle richieste da una sorgente esistano
pub(crate) async fn tables_exist(pool: &SqlitePool, tables: &[&str]) -> Result<bool, sqlx::Error> {
    for table in tables {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(*table)
        .fetch_one(pool)
        .await?;
        if count == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}
