//! Sorgenti di eventi basate sulle tabelle del database

pub mod calendar;
pub mod completion;
pub mod posts;

pub use calendar::CalendarSource;
pub use completion::CompletionSource;
pub use posts::PostSource;
