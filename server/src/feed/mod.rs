//! Feed module - Pipeline di aggregazione degli eventi e costruzione delle lettere
//!
//! Flusso: le sorgenti producono eventi normalizzati, l'aggregatore li unisce
//! in un'unica sequenza ordinata (piu' recente prima), il builder li converte
//! in lettere inserendo il marcatore di orientamento tra futuro e passato.

pub mod aggregator;
pub mod builder;
pub mod event;
pub mod letter;
pub mod sort;
pub mod source;
pub mod sources;

use thiserror::Error;

pub use aggregator::{Aggregation, Aggregator};
pub use builder::{LetterBuilder, LetterContext};
pub use event::{CalendarEvent, CompletionEvent, Event, EventKind, PostEvent};
pub use letter::{Letter, LetterExport, LetterType};
pub use source::{EventSource, FetchScope, TimeWindow};

/// Radice del sito per i link generati e orizzonte temporale del feed
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub wwwroot: String,
    pub lookback_secs: i64,
    pub lookahead_secs: i64,
}

impl FeedSettings {
    /// Circa sei mesi
    pub const DEFAULT_HORIZON_SECS: i64 = 180 * 24 * 60 * 60;
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            wwwroot: "http://localhost".to_string(),
            lookback_secs: Self::DEFAULT_HORIZON_SECS,
            lookahead_secs: Self::DEFAULT_HORIZON_SECS,
        }
    }
}

/// Errori dell'aggregazione: solo la risoluzione dei corsi iscritti e' bloccante
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errori del builder delle lettere
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LetterError {
    #[error("unsupported module `{module}` on post event")]
    UnknownModule { module: String },
}
