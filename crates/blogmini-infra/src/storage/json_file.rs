//! JSON file post store.
//!
//! The whole post list lives in one file as a pretty-printed JSON array.
//! Every operation reads and parses the entire file, applies one linear
//! operation, and (for mutations) rewrites the entire file. This is fine
//! for the small datasets a single blog holds and keeps the file
//! hand-editable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::sync::Mutex;

use blogmini_core::domain::{Post, PostPatch};
use blogmini_core::error::RepoError;
use blogmini_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a single JSON file.
///
/// Mutations inside this process are serialized, so concurrent requests
/// cannot lose each other's writes. Separate processes sharing the file
/// are not coordinated.
pub struct JsonFilePostRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePostRepository {
    /// Open the store at `path`, creating the parent directory and an empty
    /// `[]` file when they do not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let path = path.into();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await.map_err(|e| io_error(dir, e))?;
        }

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        if !exists {
            fs::write(&path, b"[]").await.map_err(|e| io_error(&path, e))?;
            tracing::info!(path = %path.display(), "Created empty post store");
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_posts(&self) -> Result<Vec<Post>, RepoError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Post store is not valid JSON");
            RepoError::Corrupt(e.to_string())
        })
    }

    /// Replace the file contents. Written to a sibling temp file first and
    /// renamed into place, so readers see either the old or the new list.
    async fn write_posts(&self, posts: &[Post]) -> Result<(), RepoError> {
        let bytes =
            serde_json::to_vec_pretty(posts).map_err(|e| RepoError::Corrupt(e.to_string()))?;

        let tmp = self.temp_path();
        fs::write(&tmp, &bytes).await.map_err(|e| io_error(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_error(&self.path, e));
        }

        tracing::trace!(path = %self.path.display(), count = posts.len(), "Post store written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RepoError {
    RepoError::Io(format!("{}: {}", path.display(), err))
}

#[async_trait]
impl BaseRepository<Post, String> for JsonFilePostRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        let posts = self.read_posts().await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.read_posts().await?;

        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Duplicate(post.id));
        }
        posts.push(post.clone());

        self.write_posts(&posts).await?;
        Ok(post)
    }

    async fn delete(&self, id: String) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock().await;
        let posts = self.read_posts().await?;
        let before = posts.len();

        let remaining: Vec<Post> = posts.into_iter().filter(|p| p.id != id).collect();
        if remaining.len() == before {
            return Err(RepoError::NotFound);
        }

        self.write_posts(&remaining).await
    }
}

#[async_trait]
impl PostRepository for JsonFilePostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        self.read_posts().await
    }

    async fn update(
        &self,
        id: String,
        patch: &PostPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.read_posts().await?;

        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.apply(patch, now);
        let updated = post.clone();

        self.write_posts(&posts).await?;
        Ok(Some(updated))
    }

    fn backend(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogmini_core::domain::{NewPost, timestamp};
    use blogmini_core::error::DomainError;
    use blogmini_core::ports::IdGenerator;
    use blogmini_core::service::PostService;
    use std::sync::Arc;

    struct FixedId(&'static str);

    impl IdGenerator for FixedId {
        fn next_id(&self) -> String {
            self.0.to_string()
        }
    }

    fn post(id: &str, title: &str) -> Post {
        let draft = NewPost::try_new(Some(title.into()), Some("body".into()), None).unwrap();
        Post::new(id.to_string(), draft, timestamp::now())
    }

    #[tokio::test]
    async fn test_open_creates_directory_and_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("posts.json");

        let repo = JsonFilePostRepository::open(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let existing = serde_json::to_vec(&vec![post("1", "kept")]).unwrap();
        std::fs::write(&path, existing).unwrap();

        let repo = JsonFilePostRepository::open(&path).await.unwrap();

        let posts = repo.list().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "kept");
    }

    #[tokio::test]
    async fn test_writes_pretty_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let repo = JsonFilePostRepository::open(&path).await.unwrap();

        repo.insert(post("1", "Hi")).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": \"1\""));
        assert!(raw.contains("\"createdAt\""));
        assert!(!raw.contains("updatedAt"));
        assert!(!dir.path().join("posts.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_order_survives_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFilePostRepository::open(dir.path().join("posts.json"))
            .await
            .unwrap();
        for (id, title) in [("a", "A"), ("b", "B"), ("c", "C")] {
            repo.insert(post(id, title)).await.unwrap();
        }

        let patch = PostPatch::new(Some("B2".into()), None, None);
        let updated = repo
            .update("b".to_string(), &patch, timestamp::now())
            .await
            .unwrap()
            .unwrap();
        assert!(updated.updated_at.is_some());

        repo.delete("a".to_string()).await.unwrap();

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["B2", "C"]);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFilePostRepository::open(dir.path().join("posts.json"))
            .await
            .unwrap();

        assert!(repo.find_by_id("x".to_string()).await.unwrap().is_none());
        assert!(
            repo.update("x".to_string(), &PostPatch::default(), timestamp::now())
                .await
                .unwrap()
                .is_none()
        );
        assert!(matches!(
            repo.delete("x".to_string()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "not json").unwrap();

        let repo = JsonFilePostRepository::open(&path).await.unwrap();

        assert!(matches!(repo.list().await, Err(RepoError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(
            JsonFilePostRepository::open(dir.path().join("posts.json"))
                .await
                .unwrap(),
        );

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(post(&i.to_string(), "t")).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.list().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_insert_rejects_stored_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFilePostRepository::open(dir.path().join("posts.json"))
            .await
            .unwrap();
        repo.insert(post("1", "original")).await.unwrap();

        let err = repo.insert(post("1", "second")).await.unwrap_err();

        assert!(matches!(err, RepoError::Duplicate(id) if id == "1"));
        assert_eq!(repo.list().await.unwrap()[0].title, "original");
    }

    #[tokio::test]
    async fn test_create_with_colliding_id_keeps_stored_post() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(
            JsonFilePostRepository::open(dir.path().join("posts.json"))
                .await
                .unwrap(),
        );
        repo.insert(post("1", "original")).await.unwrap();
        let svc = PostService::new(repo.clone(), Arc::new(FixedId("1")));

        let err = svc
            .create(Some("second".into()), Some("b".into()), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal(_)));
        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["original"]);
    }

    #[tokio::test]
    async fn test_unknown_keys_survive_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            r#"[{"id":"1","title":"Hi","content":"World","author":"Ann",
                "createdAt":"2023-11-14T22:13:20.000Z","tags":["rust"],"draft":false}]"#,
        )
        .unwrap();
        let repo = JsonFilePostRepository::open(&path).await.unwrap();

        let patch = PostPatch::new(Some("Hello".into()), None, None);
        repo.update("1".to_string(), &patch, timestamp::now())
            .await
            .unwrap()
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["title"], "Hello");
        assert_eq!(raw[0]["tags"], serde_json::json!(["rust"]));
        assert_eq!(raw[0]["draft"], false);
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let repo = JsonFilePostRepository::open(&path).await.unwrap();

        // A non-empty directory cannot be replaced by a file rename.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        assert!(matches!(repo.write_posts(&[]).await, Err(RepoError::Io(_))));
        assert!(!dir.path().join("posts.json.tmp").exists());
    }
}
