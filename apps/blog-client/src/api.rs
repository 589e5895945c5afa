//! HTTP client for the post API.

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use blogmini_core::domain::Post;
use blogmini_shared::MessageResponse;
use blogmini_shared::dto::{CreatePostRequest, UpdatePostRequest};

pub const FETCH_POSTS: &str = "Failed to fetch posts";
pub const FETCH_POST: &str = "Failed to fetch post";
pub const SAVE_POST: &str = "Failed to save post";
pub const DELETE_POST: &str = "Failed to delete post";

/// Client-side failures.
///
/// Transport errors, error statuses and undecodable bodies all collapse into
/// `Failed` with one message per action; the cause is only logged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Failed(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Thin wrapper over the REST surface rooted at `base_url` (e.g.
/// `http://localhost:5000/api`).
#[derive(Debug, Clone)]
pub struct BlogApi {
    client: Client,
    base_url: Url,
}

impl BlogApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::Invalid(format!("Invalid API URL: {base_url}")))?;

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn posts_url(&self) -> Url {
        self.url_with(&["posts"])
    }

    /// The id is pushed as one path segment, so `/`, `?` and `#` in it are
    /// percent-encoded rather than changing the target.
    pub fn post_url(&self, id: &str) -> Url {
        self.url_with(&["posts", id])
    }

    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn list(&self) -> Result<Vec<Post>, ClientError> {
        self.send(self.client.get(self.posts_url()), FETCH_POSTS)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Post, ClientError> {
        self.send(self.client.get(self.post_url(id)), FETCH_POST)
            .await
    }

    pub async fn create(&self, body: &CreatePostRequest) -> Result<Post, ClientError> {
        self.send(self.client.post(self.posts_url()).json(body), SAVE_POST)
            .await
    }

    pub async fn update(&self, id: &str, body: &UpdatePostRequest) -> Result<Post, ClientError> {
        self.send(self.client.put(self.post_url(id)).json(body), SAVE_POST)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ClientError> {
        self.send(self.client.delete(self.post_url(id)), DELETE_POST)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &'static str,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "{}", action);
            ClientError::Failed(action)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "{}", action);
            return Err(ClientError::Failed(action));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::debug!(error = %e, "{}", action);
            ClientError::Failed(action)
        })
    }
}
