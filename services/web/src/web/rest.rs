//! services/web/src/web/rest.rs
//!
//! Contains the Axum handlers for the JSON API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::{AppState, SessionContext};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use bulletin_core::domain::{sort_newest_first, Post};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_posts_handler,
        session_handler,
    ),
    components(
        schemas(PostResponse, SessionResponse)
    ),
    tags(
        (name = "Bulletin Board API", description = "Read-only JSON endpoints for the bulletin board.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// A post as returned by the JSON API. Text fields are returned as stored.
#[derive(Serialize, ToSchema)]
pub struct PostResponse {
    id: i64,
    title: String,
    content: String,
    author_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    comment_count: u64,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        let comment_count = post.comments();
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: post.created_at,
            comment_count,
        }
    }
}

/// The session state of the caller.
#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List all posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [PostResponse]),
        (status = 502, description = "The backend could not be queried")
    )
)]
pub async fn list_posts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut posts = state.backend.list_posts().await.map_err(|e| {
        error!("Failed to load posts: {:?}", e);
        (StatusCode::BAD_GATEWAY, "Failed to load posts".to_string())
    })?;
    sort_newest_first(&mut posts);

    let response: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(Json(response))
}

/// Report whether the session cookie belongs to a logged-in user.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current session state", body = SessionResponse)
    )
)]
pub async fn session_handler(session: SessionContext) -> Json<SessionResponse> {
    let response = match session.user {
        Some(user) => SessionResponse {
            authenticated: true,
            user_id: Some(user.user_id),
            email: user.email,
        },
        None => SessionResponse {
            authenticated: false,
            user_id: None,
            email: None,
        },
    };
    Json(response)
}

/// GET /health - Liveness probe
pub async fn health_handler() -> &'static str {
    "ok"
}
