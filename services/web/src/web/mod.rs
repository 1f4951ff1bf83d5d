pub mod auth;
pub mod middleware;
pub mod pages;
pub mod posts;
pub mod rest;
pub mod session;
pub mod state;


use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use bulletin_core::navigation::{INDEX_PATH, LOGIN_PATH, NEW_POST_PATH};
use std::sync::Arc;

pub use middleware::require_session;
use state::AppState;

/// Builds every route of the application around the shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Public routes (session optional)
    let public_routes = Router::new()
        .route(INDEX_PATH, get(posts::index_handler))
        .route(
            LOGIN_PATH,
            get(auth::login_page_handler).post(auth::login_handler),
        )
        .route("/logout", post(auth::logout_handler))
        .route("/api/posts", get(rest::list_posts_handler))
        .route("/api/session", get(rest::session_handler))
        .route("/health", get(rest::health_handler));

    // Gated routes (session required, otherwise redirect to login)
    let protected_routes = Router::new()
        .route(
            NEW_POST_PATH,
            get(posts::new_post_page_handler).post(posts::create_post_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
}
