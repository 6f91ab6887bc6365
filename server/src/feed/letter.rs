//! Letter - Voce renderizzabile del feed
//!
//! Ogni variante porta solo i propri campi; l'export e' una funzione pura
//! verso un dizionario piatto consumato dal renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dizionario piatto chiave/valore di una lettera esportata
pub type LetterExport = Map<String, Value>;

/// Nome mostrato al posto dell'autore nei post anonimi
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LetterType {
    Basic,
    Post,
    ActivityCompletion,
    OrientationMarker,
}

impl LetterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Post => "post",
            Self::ActivityCompletion => "activitycompletion",
            Self::OrientationMarker => "orientationmarker",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRef {
    pub id: i64,
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRef {
    pub id: i64,
    pub name: String,
    pub link: String,
    /// Presente solo se l'utente ha un'immagine di profilo
    pub picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostAuthor {
    Visible(AuthorRef),
    Anonymous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicLetter {
    pub contentid: usize,
    pub timestamp: i64,
    pub course: CourseRef,
    pub modulename: String,
    pub name: String,
    pub eventtype: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostLetter {
    pub contentid: usize,
    pub timestamp: i64,
    pub course: CourseRef,
    pub modulename: String,
    pub postid: i64,
    pub discussionid: i64,
    pub discussionname: String,
    pub discussionlink: String,
    pub postlink: String,
    pub modulelink: String,
    pub subject: String,
    pub message: String,
    pub author: PostAuthor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionLetter {
    pub contentid: usize,
    pub timestamp: i64,
    pub course: CourseRef,
    pub modulename: String,
    pub name: String,
    pub activitylink: String,
    pub author: Option<AuthorRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrientationMarker {
    pub contentid: usize,
    /// L'istante "ora" al momento della costruzione
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Letter {
    Basic(BasicLetter),
    Post(PostLetter),
    ActivityCompletion(CompletionLetter),
    OrientationMarker(OrientationMarker),
}

impl Letter {
    pub fn contentid(&self) -> usize {
        match self {
            Self::Basic(l) => l.contentid,
            Self::Post(l) => l.contentid,
            Self::ActivityCompletion(l) => l.contentid,
            Self::OrientationMarker(l) => l.contentid,
        }
    }

    pub fn lettertype(&self) -> LetterType {
        match self {
            Self::Basic(_) => LetterType::Basic,
            Self::Post(_) => LetterType::Post,
            Self::ActivityCompletion(_) => LetterType::ActivityCompletion,
            Self::OrientationMarker(_) => LetterType::OrientationMarker,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Self::Basic(l) => l.timestamp,
            Self::Post(l) => l.timestamp,
            Self::ActivityCompletion(l) => l.timestamp,
            Self::OrientationMarker(l) => l.timestamp,
        }
    }

    pub fn export(&self) -> LetterExport {
        let mut map = Map::new();
        put(&mut map, "contentid", self.contentid());
        put(&mut map, "lettertype", self.lettertype().as_str());
        put(&mut map, "timestamp", self.timestamp());

        match self {
            Self::Basic(letter) => export_basic(&mut map, letter),
            Self::Post(letter) => export_post(&mut map, letter),
            Self::ActivityCompletion(letter) => export_completion(&mut map, letter),
            Self::OrientationMarker(_) => {}
        }
        map
    }
}

fn put(map: &mut LetterExport, key: &str, value: impl Into<Value>) {
    map.insert(key.to_string(), value.into());
}

fn put_course(map: &mut LetterExport, course: &CourseRef, modulename: &str) {
    put(map, "courseid", course.id);
    put(map, "coursename", course.name.as_str());
    put(map, "courselink", course.link.as_str());
    put(map, "modulename", modulename);
}

fn put_author(map: &mut LetterExport, author: &AuthorRef) {
    put(map, "authorid", author.id);
    put(map, "authorname", author.name.as_str());
    put(map, "authorlink", author.link.as_str());
    if let Some(picture) = &author.picture {
        put(map, "authorpicture", picture.as_str());
    }
}

fn export_basic(map: &mut LetterExport, letter: &BasicLetter) {
    put_course(map, &letter.course, &letter.modulename);
    put(map, "name", letter.name.as_str());
    put(map, "eventtype", letter.eventtype.as_str());
}

fn export_post(map: &mut LetterExport, letter: &PostLetter) {
    put_course(map, &letter.course, &letter.modulename);
    put(map, "postid", letter.postid);
    put(map, "discussionid", letter.discussionid);
    put(map, "discussionname", letter.discussionname.as_str());
    put(map, "discussionlink", letter.discussionlink.as_str());
    put(map, "postlink", letter.postlink.as_str());
    put(map, "modulelink", letter.modulelink.as_str());
    put(map, "subject", letter.subject.as_str());
    put(map, "message", letter.message.as_str());
    match &letter.author {
        PostAuthor::Visible(author) => {
            put(map, "anonymous", false);
            put_author(map, author);
        }
        PostAuthor::Anonymous => {
            put(map, "anonymous", true);
            put(map, "authorname", ANONYMOUS_AUTHOR);
        }
    }
}

fn export_completion(map: &mut LetterExport, letter: &CompletionLetter) {
    put_course(map, &letter.course, &letter.modulename);
    put(map, "name", letter.name.as_str());
    put(map, "activitylink", letter.activitylink.as_str());
    if let Some(author) = &letter.author {
        put(map, "authorname", author.name.as_str());
        put(map, "authorlink", author.link.as_str());
    }
}
