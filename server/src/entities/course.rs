//! Course entity - Entità corso

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Course {
    pub id: i64,
    pub shortname: String,
    pub fullname: String,
    pub visible: i64,
}
