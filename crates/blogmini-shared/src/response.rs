//! Message bodies returned alongside non-entity responses.

use serde::{Deserialize, Serialize};

/// `{"message": ...}` body used for confirmations and errors.
///
/// Internal failures also carry the underlying error text in `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    // Common bodies
    pub fn post_not_found() -> Self {
        Self::new("Post not found")
    }

    pub fn post_deleted() -> Self {
        Self::new("Post deleted successfully")
    }
}
