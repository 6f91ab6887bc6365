//! Event - Rappresentazione normalizzata di un evento del feed

use crate::entities::AnonymityLevel;

/// Evento proveniente da una qualsiasi sorgente, con un'unica chiave di ordinamento
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub courseid: i64,
    pub modulename: String,
    pub kind: EventKind,
}

/// Payload specifico del tipo di evento.
/// Ogni variante porta esattamente un timestamp: `postcreated` per i post, `timestart` per il resto.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Post(PostEvent),
    ExpectCompletionOn(CompletionEvent),
    Calendar(CalendarEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostEvent {
    pub postid: i64,
    pub discussionid: i64,
    pub discussionname: String,
    /// Id dell'istanza del forum
    pub instanceid: i64,
    pub cmid: i64,
    pub authorid: i64,
    pub subject: String,
    pub message: String,
    pub postcreated: i64,
    pub anonymity: AnonymityLevel,
    pub first_post: bool,
}

impl PostEvent {
    pub fn is_anonymous(&self) -> bool {
        self.anonymity.redacts(self.first_post)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEvent {
    pub cmid: i64,
    pub instance: i64,
    pub name: String,
    pub authorid: Option<i64>,
    pub timestart: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub eventid: i64,
    pub name: String,
    /// Tipo originale del calendario (due, course, user, ...)
    pub eventtype: String,
    pub cmid: Option<i64>,
    pub timestart: i64,
}

impl Event {
    pub fn eventtype(&self) -> &str {
        match &self.kind {
            EventKind::Post(_) => "post",
            EventKind::ExpectCompletionOn(_) => "expectcompletionon",
            EventKind::Calendar(calendar) => &calendar.eventtype,
        }
    }

    /// Chiave di ordinamento: `postcreated` per i post, `timestart` altrimenti
    pub fn ordering_key(&self) -> i64 {
        match &self.kind {
            EventKind::Post(post) => post.postcreated,
            EventKind::ExpectCompletionOn(completion) => completion.timestart,
            EventKind::Calendar(calendar) => calendar.timestart,
        }
    }

    /// Utente da risolvere per il nome dell'autore, se l'evento ne ha uno visibile
    pub fn author_id(&self) -> Option<i64> {
        match &self.kind {
            EventKind::Post(post) if !post.is_anonymous() => Some(post.authorid),
            EventKind::Post(_) => None,
            EventKind::ExpectCompletionOn(completion) => completion.authorid,
            EventKind::Calendar(_) => None,
        }
    }
}
