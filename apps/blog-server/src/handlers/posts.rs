//! Post handlers.

use actix_web::{HttpResponse, web};

use blogmini_core::domain::PostPatch;
use blogmini_shared::MessageResponse;
use blogmini_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::middleware::error::{AppResult, DomainResultExt};
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await.or_fail("Error reading posts")?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&id).await.or_fail("Error retrieving post")?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(req.title, req.content, req.author)
        .await
        .or_fail("Error creating post")?;

    tracing::info!(post_id = %post.id, "Created post");
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = PostPatch::new(req.title, req.content, req.author);
    let post = state
        .posts
        .update(&id, patch)
        .await
        .or_fail("Error updating post")?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(&id)
        .await
        .or_fail("Error deleting post")?;

    tracing::info!(post_id = %id.as_str(), "Deleted post");
    Ok(HttpResponse::Ok().json(MessageResponse::post_deleted()))
}
