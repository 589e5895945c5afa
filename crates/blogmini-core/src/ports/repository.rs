use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Post, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Append a new entity. Fails with `RepoError::Duplicate` when its ID
    /// is already stored; the existing entity is left untouched.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository over an ordered sequence of posts.
///
/// Implementations keep creation order: `insert` appends, `update` edits in
/// place, `delete` removes in place.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, String> {
    /// All posts in stored order.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Apply `patch` to the post with `id` in a single read-modify-write.
    ///
    /// Returns `Ok(None)` when no such post exists.
    async fn update(
        &self,
        id: String,
        patch: &PostPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError>;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;
}
