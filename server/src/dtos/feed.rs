//! Feed DTOs - Risposta del feed per il renderer e il motore dei filtri

use super::UserSettingsDTO;
use crate::entities::Course;
use crate::feed::LetterExport;
use serde::{Deserialize, Serialize};

/// Corso mostrato tra le checkbox del filtro per corso
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CourseDTO {
    pub id: i64,
    pub shortname: String,
    pub fullname: String,
}

impl From<Course> for CourseDTO {
    fn from(value: Course) -> Self {
        Self {
            id: value.id,
            shortname: value.shortname,
            fullname: value.fullname,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FeedDTO {
    /// Istante usato per il marcatore di orientamento
    pub now: i64,
    pub courses: Vec<CourseDTO>,
    /// Lettere esportate, nell'ordine di visualizzazione
    pub letters: Vec<LetterExport>,
    pub settings: Option<UserSettingsDTO>,
}
