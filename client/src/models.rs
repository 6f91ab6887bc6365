//! Models - Dati ricevuti dal server e inviati al salvataggio delle preferenze

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LetterType {
    Basic,
    Post,
    ActivityCompletion,
    OrientationMarker,
}

impl LetterType {
    /// Tipi selezionabili dal filtro (il marcatore non lo e')
    pub const FILTERABLE: [LetterType; 3] = [
        LetterType::Basic,
        LetterType::ActivityCompletion,
        LetterType::Post,
    ];
}

/// La parte di una lettera esportata che serve al motore dei filtri.
/// Le altre chiavi del dizionario restano al renderer e vengono ignorate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeedLetter {
    pub contentid: usize,
    pub lettertype: LetterType,
    pub timestamp: i64,
    #[serde(default)]
    pub courseid: Option<i64>,
}

impl FeedLetter {
    pub fn is_marker(&self) -> bool {
        self.lettertype == LetterType::OrientationMarker
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeedCourse {
    pub id: i64,
    pub shortname: String,
    pub fullname: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feed {
    pub now: i64,
    pub courses: Vec<FeedCourse>,
    pub letters: Vec<FeedLetter>,
    pub settings: Option<UserSettings>,
}

/// Preferenza salvata: finestre in secondi, flag dei tipi in {0,1}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSettings {
    pub userid: i64,
    pub timefilterpast: i64,
    pub timefilterfuture: i64,
    pub basicletter: i64,
    pub completionletter: i64,
    pub postletter: i64,
}

impl UserSettings {
    pub fn letter_enabled(&self, lettertype: LetterType) -> bool {
        match lettertype {
            LetterType::Basic => self.basicletter != 0,
            LetterType::ActivityCompletion => self.completionletter != 0,
            LetterType::Post => self.postletter != 0,
            LetterType::OrientationMarker => true,
        }
    }
}
