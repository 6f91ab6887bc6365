//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod feed;
pub mod preference;

// Re-exports per facilitare l'import
pub use feed::{CourseDTO, FeedDTO};
pub use preference::{ResetSettingsDTO, UserSettingsDTO};
