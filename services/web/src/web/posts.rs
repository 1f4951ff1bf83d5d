//! services/web/src/web/posts.rs
//!
//! Listing page and the gated post-creation page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension, Form,
};
use bulletin_core::messages;
use bulletin_core::navigation::{ScheduledRedirect, INDEX_PATH, NEW_POST_PATH};
use bulletin_core::render::{render_load_error, render_post_list};
use bulletin_core::validation::validate_post;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::web::auth::REFRESH;
use crate::web::pages::{index_page, new_post_page, Feedback, PostFormView};
use crate::web::state::{AppState, AuthenticatedUser, SessionContext};

#[derive(Deserialize, Default)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// GET / - List all posts, newest first
///
/// A failed query renders the error placeholder; the page itself still loads.
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> Html<String> {
    let posts_html = match state.backend.list_posts().await {
        Ok(posts) => render_post_list(&posts, &state.config.display_offset),
        Err(e) => {
            error!("Failed to load posts: {:?}", e);
            render_load_error()
        }
    };
    Html(index_page(&session.nav(), &posts_html))
}

/// GET /posts/new - Empty post form (behind `require_session`)
pub async fn new_post_page_handler(Extension(auth): Extension<AuthenticatedUser>) -> Html<String> {
    Html(new_post_page(&auth.nav(), &PostFormView::default(), None))
}

/// POST /posts/new - Validate and insert a post (behind `require_session`)
pub async fn create_post_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Form(form): Form<PostForm>,
) -> Response {
    let nav = auth.nav();
    let typed = PostFormView {
        title: form.title.clone(),
        content: form.content.clone(),
    };

    // 1. Validate before touching the backend
    let new_post = match validate_post(&form.title, &form.content, auth.user.user_id) {
        Ok(post) => post,
        Err(e) => {
            let feedback = Feedback::error(e.to_string());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(new_post_page(&nav, &typed, Some(&feedback))),
            )
                .into_response();
        }
    };

    // 2. Insert
    match state.backend.create_post(&auth.access_token, &new_post).await {
        Ok(post) => {
            info!("User {} created post {}", auth.user.user_id, post.id);
            let redirect = ScheduledRedirect::new(INDEX_PATH, state.config.redirect_delay);
            let feedback = Feedback::success(messages::POST_CREATED).with_stay_link(NEW_POST_PATH);
            (
                StatusCode::OK,
                [(REFRESH, redirect.header_value())],
                Html(new_post_page(&nav, &PostFormView::default(), Some(&feedback))),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to create post: {:?}", e);
            let feedback = Feedback::error(e.user_message());
            (
                StatusCode::BAD_REQUEST,
                Html(new_post_page(&nav, &typed, Some(&feedback))),
            )
                .into_response()
        }
    }
}
