//! Post service - the five post operations on top of the storage ports.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostPatch, timestamp};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, IdGenerator, PostRepository};

const ENTITY: &str = "Post";

/// Fresh ids drawn before a create gives up on collisions.
const MAX_ID_ATTEMPTS: usize = 3;

/// Post operations shared by every transport.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    /// Name of the storage backend in use.
    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    /// Every post, in creation order.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id.to_string())
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Validate the draft, assign an id and creation time, and append it.
    ///
    /// An id that is already stored is never overwritten; a fresh one is
    /// drawn instead, and the create fails once the attempts run out.
    pub async fn create(
        &self,
        title: Option<String>,
        content: Option<String>,
        author: Option<String>,
    ) -> Result<Post, DomainError> {
        let draft = NewPost::try_new(title, content, author)?;
        let now = timestamp::now();

        for _ in 0..MAX_ID_ATTEMPTS {
            let post = Post::new(self.ids.next_id(), draft.clone(), now);
            match self.repo.insert(post).await {
                Ok(saved) => {
                    tracing::debug!(post_id = %saved.id, "Post created");
                    return Ok(saved);
                }
                Err(RepoError::Duplicate(id)) => {
                    tracing::warn!(post_id = %id, "Generated id already stored, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(DomainError::Internal(format!(
            "no unused id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    /// Overwrite the provided fields and stamp `updated_at`.
    pub async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, DomainError> {
        let updated = self
            .repo
            .update(id.to_string(), &patch, timestamp::now())
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::debug!(post_id = %updated.id, "Post updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        match self.repo.delete(id.to_string()).await {
            Ok(()) => {
                tracing::debug!(post_id = %id, "Post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(not_found(id)),
            Err(e) => Err(e.into()),
        }
    }
}

fn not_found(id: &str) -> DomainError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    struct VecRepo {
        posts: Mutex<Vec<Post>>,
    }

    #[async_trait]
    impl BaseRepository<Post, String> for VecRepo {
        async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            if posts.iter().any(|p| p.id == post.id) {
                return Err(RepoError::Duplicate(post.id));
            }
            posts.push(post.clone());
            Ok(post)
        }

        async fn delete(&self, id: String) -> Result<(), RepoError> {
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            if posts.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for VecRepo {
        async fn list(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().clone())
        }

        async fn update(
            &self,
            id: String,
            patch: &PostPatch,
            now: DateTime<Utc>,
        ) -> Result<Option<Post>, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            Ok(posts.iter_mut().find(|p| p.id == id).map(|p| {
                p.apply(patch, now);
                p.clone()
            }))
        }

        fn backend(&self) -> &'static str {
            "vec"
        }
    }

    struct Counter(AtomicU64);

    impl IdGenerator for Counter {
        fn next_id(&self) -> String {
            self.0.fetch_add(1, Ordering::SeqCst).to_string()
        }
    }

    struct Fixed(&'static str);

    impl IdGenerator for Fixed {
        fn next_id(&self) -> String {
            self.0.to_string()
        }
    }

    fn service() -> PostService {
        PostService::new(Arc::new(VecRepo::default()), Arc::new(Counter(AtomicU64::new(1))))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let svc = service();
        let post = svc
            .create(Some("Hi".into()), Some("World".into()), None)
            .await
            .unwrap();

        assert_eq!(post.id, "1");
        assert_eq!(post.author, "Anonymous");
        assert_eq!(svc.get("1").await.unwrap(), post);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let svc = service();
        let err = svc.create(Some("Hi".into()), None, None).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found_everywhere() {
        let svc = service();

        assert!(matches!(svc.get("nope").await, Err(DomainError::NotFound { .. })));
        assert!(matches!(
            svc.update("nope", PostPatch::default()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(svc.delete("nope").await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_title_only() {
        let svc = service();
        let created = svc
            .create(Some("Hi".into()), Some("World".into()), Some("Ann".into()))
            .await
            .unwrap();

        let updated = svc
            .update(&created.id, PostPatch::new(Some("Hello".into()), None, None))
            .await
            .unwrap();

        assert_eq!(updated.title, "Hello");
        assert_eq!(updated.content, "World");
        assert_eq!(updated.author, "Ann");
        assert!(updated.updated_at.unwrap() > updated.created_at);
    }

    #[tokio::test]
    async fn test_delete_shrinks_list_by_one() {
        let svc = service();
        let a = svc.create(Some("a".into()), Some("a".into()), None).await.unwrap();
        svc.create(Some("b".into()), Some("b".into()), None).await.unwrap();

        svc.delete(&a.id).await.unwrap();

        assert_eq!(svc.list().await.unwrap().len(), 1);
        assert!(matches!(svc.get(&a.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_never_overwrites_a_stored_id() {
        let repo = Arc::new(VecRepo::default());
        let first = PostService::new(repo.clone(), Arc::new(Counter(AtomicU64::new(1))));
        first.create(Some("original".into()), Some("a".into()), None).await.unwrap();

        let svc = PostService::new(repo, Arc::new(Fixed("1")));
        let err = svc.create(Some("second".into()), Some("b".into()), None).await.unwrap_err();

        assert!(matches!(err, DomainError::Internal(_)));
        let titles: Vec<_> = svc.list().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["original"]);
    }

    #[tokio::test]
    async fn test_create_retries_past_a_colliding_id() {
        let repo = Arc::new(VecRepo::default());
        let first = PostService::new(repo.clone(), Arc::new(Counter(AtomicU64::new(1))));
        first.create(Some("a".into()), Some("a".into()), None).await.unwrap();

        let svc = PostService::new(repo, Arc::new(Counter(AtomicU64::new(1))));
        let post = svc.create(Some("b".into()), Some("b".into()), None).await.unwrap();

        assert_eq!(post.id, "2");
        assert_eq!(svc.list().await.unwrap().len(), 2);
    }
}
