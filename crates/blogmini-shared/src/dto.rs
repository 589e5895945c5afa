//! Data Transfer Objects - request bodies for the post API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/posts`.
///
/// Every field is optional on the wire so that a missing title or content
/// can be reported as a validation failure rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Body of `PUT /api/posts/{id}`. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_body() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("New"));
        assert!(req.content.is_none());
        assert!(req.author.is_none());
    }

    #[test]
    fn test_create_body_omits_missing_author() {
        let req = CreatePostRequest {
            title: Some("Hi".into()),
            content: Some("World".into()),
            author: None,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"title":"Hi","content":"World"}"#
        );
    }
}
