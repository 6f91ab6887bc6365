//! User entity - Entità utente con i dati di profilo usati dalle lettere

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    /// 0 se l'utente non ha caricato un'immagine di profilo
    pub picture: i64,
    pub deleted: i64,
}

impl User {
    pub fn fullname(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    pub fn has_picture(&self) -> bool {
        self.picture > 0
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted != 0
    }
}
