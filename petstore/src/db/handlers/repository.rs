//! Base repository trait for database operations.

/// Contains the Repository trait.
///
/// A repository is a data access layer for a postgres table. It provides
/// methods for creating, reading, updating, and deleting entities, as well
/// as listing them.
use crate::db::errors::Result;

/// Base repository trait providing common database operations.
///
/// Saves in this service are whole-row field copies, so a single write
/// request type serves both `create` and `update`.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for writing entities (create and update)
    type WriteRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Create a new entity; the database assigns the key
    async fn create(&mut self, request: &Self::WriteRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List all entities
    async fn list(&mut self) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID
    async fn update(&mut self, id: Self::Id, request: &Self::WriteRequest) -> Result<Self::Response>;

    /// Delete an entity by ID, reporting whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;
}
