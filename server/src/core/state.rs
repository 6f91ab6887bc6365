//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository, l'aggregatore degli eventi e la configurazione
//! condivisa necessaria per servire il feed.

use crate::feed::{Aggregator, FeedSettings};
use crate::repositories::{CourseRepository, PreferenceRepository, UserRepository};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti (identita' e autori)
    pub user: UserRepository,

    /// Repository per corsi e iscrizioni
    pub course: CourseRepository,

    /// Repository per le preferenze dei filtri
    pub preference: PreferenceRepository,

    /// Aggregatore delle sorgenti di eventi registrate
    pub aggregator: Aggregator,

    /// Radice del sito e finestra temporale del feed
    pub settings: FeedSettings,

    /// Secret key per JWT token
    pub jwt_secret: String,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// e registrando le sorgenti di eventi standard sullo stesso pool.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    /// * `settings` - Radice del sito e orizzonte temporale del feed
    pub fn new(pool: SqlitePool, jwt_secret: String, settings: FeedSettings) -> Self {
        let course = CourseRepository::new(pool.clone());
        Self {
            user: UserRepository::new(pool.clone()),
            aggregator: Aggregator::with_default_sources(pool.clone(), course.clone(), &settings),
            preference: PreferenceRepository::new(pool),
            course,
            settings,
            jwt_secret,
        }
    }
}
