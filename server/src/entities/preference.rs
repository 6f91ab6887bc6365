//! UserFilterPreference entity - Ultima combinazione di filtri salvata da un utente

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserFilterPreference {
    pub id: i64,
    pub userid: i64,
    /// Durata nel passato a partire da ora, in secondi
    pub timefilterpast: i64,
    /// Durata nel futuro a partire da ora, in secondi
    pub timefilterfuture: i64,
    pub basicletter: i64,
    pub completionletter: i64,
    pub postletter: i64,
}
