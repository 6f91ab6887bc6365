//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.

pub mod course;
pub mod course_module;
pub mod enums;
pub mod preference;
pub mod user;

// Re-exports per facilitare l'import
pub use course::Course;
pub use course_module::ModuleAccess;
pub use enums::{AnonymityLevel, PostModule};
pub use preference::UserFilterPreference;
pub use user::User;
