//! In-memory post store - used when no data file is wanted, and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blogmini_core::domain::{Post, PostPatch};
use blogmini_core::error::RepoError;
use blogmini_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a `Vec` behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, String> for InMemoryPostRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Duplicate(post.id));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn delete(&self, id: String) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn update(
        &self,
        id: String,
        patch: &PostPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.apply(patch, now);
            post.clone()
        }))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
