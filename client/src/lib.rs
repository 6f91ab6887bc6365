//! Client library - motore dei filtri del feed e client HTTP verso il server

pub mod api;
pub mod filter;
pub mod group;
pub mod models;

// Re-export dei tipi principali per facilitare l'import
pub use api::{ClientError, FeedClient};
pub use filter::{FilterEngine, FilterFlags, TimeSpan};
pub use group::{CollapsibleGroup, HeightTransition};
pub use models::{Feed, FeedCourse, FeedLetter, LetterType, UserSettings};
