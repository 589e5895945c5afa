//! Application state - shared across all handlers.

use std::sync::Arc;

use blogmini_core::PostService;
use blogmini_core::error::RepoError;
use blogmini_core::ports::{IdGenerator, PostRepository};
use blogmini_infra::{
    InMemoryPostRepository, JsonFilePostRepository, TimestampIdGenerator, UuidIdGenerator,
};

use crate::config::{AppConfig, IdStrategy, StorageBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state with the configured implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        let repo: Arc<dyn PostRepository> = match config.storage {
            StorageBackend::File => {
                let repo = JsonFilePostRepository::open(&config.data_path).await?;
                tracing::info!(path = %repo.path().display(), "Using JSON file post store");
                Arc::new(repo)
            }
            StorageBackend::Memory => {
                tracing::warn!("STORAGE=memory. Posts will be lost on restart.");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        let ids: Arc<dyn IdGenerator> = match config.id_strategy {
            IdStrategy::Timestamp => Arc::new(seeded_timestamp_ids(repo.as_ref()).await),
            IdStrategy::Uuid => Arc::new(UuidIdGenerator),
        };

        tracing::info!("Application state initialized");

        Ok(Self::with_parts(repo, ids))
    }

    pub fn with_parts(repo: Arc<dyn PostRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            posts: PostService::new(repo, ids),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::with_parts(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(TimestampIdGenerator::new()),
        )
    }
}

/// Timestamp ids that start past every numeric id already stored.
async fn seeded_timestamp_ids(repo: &dyn PostRepository) -> TimestampIdGenerator {
    match repo.list().await {
        Ok(posts) => TimestampIdGenerator::after_ids(posts.iter().map(|p| p.id.as_str())),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read stored ids, ids start from the clock");
            TimestampIdGenerator::new()
        }
    }
}
