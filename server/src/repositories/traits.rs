//! Common repository traits
//!
//! This module defines generic interfaces for database operations.

/// Trait for reading a single entity by key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the key (e.g. `i64` for a user id)
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that key
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Trait for reading multiple entities by list of keys
pub trait ReadMany<Entity, Id> {
    /// Reads multiple entities from the database by their keys
    ///
    /// # Note
    /// Missing keys are silently skipped and the result order is not
    /// guaranteed to match the order of `ids`.
    async fn read_many(&self, ids: &[Id]) -> Result<Vec<Entity>, sqlx::Error>;
}

/// Trait for inserting-or-updating the single entity identified by the DTO
///
/// # Type Parameters
/// * `Entity` - Type of the stored entity
/// * `UpsertDTO` - DTO carrying the key and the new values
pub trait Upsert<Entity, UpsertDTO> {
    /// Creates the entity if missing, otherwise overwrites it in place
    async fn upsert(&self, data: &UpsertDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for deleting entities
///
/// # Type Parameters
/// * `Id` - Type of the key
pub trait Delete<Id> {
    /// Deletes every row matching the key; deleting nothing is not an error
    async fn delete(&self, id: &Id) -> Result<(), sqlx::Error>;
}
