//! The create/edit form.

use blogmini_core::domain::Post;
use blogmini_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::api::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Create New Post",
            FormMode::Edit { .. } => "Edit Post",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Post created successfully! Redirecting to home...",
            FormMode::Edit { .. } => "Post updated successfully! Redirecting to home...",
        }
    }
}

/// Field values as submitted. Author may be blank; the service then
/// records "Anonymous".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl PostForm {
    /// Form pre-loaded with an existing post's values.
    pub fn prefilled(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
        }
    }

    /// Replace the fields that were given.
    pub fn overlay(
        mut self,
        title: Option<String>,
        content: Option<String>,
        author: Option<String>,
    ) -> Self {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(author) = author {
            self.author = author;
        }
        self
    }

    /// Title and content are required.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.title.is_empty() {
            return Err(ClientError::Invalid("Title is required".to_string()));
        }
        if self.content.is_empty() {
            return Err(ClientError::Invalid("Content is required".to_string()));
        }
        Ok(())
    }

    pub fn to_create(&self) -> CreatePostRequest {
        CreatePostRequest {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            author: Some(self.author.clone()),
        }
    }

    pub fn to_update(&self) -> UpdatePostRequest {
        UpdatePostRequest {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            author: Some(self.author.clone()),
        }
    }
}
