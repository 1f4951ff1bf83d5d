//! services/web/src/web/middleware.rs
//!
//! Session middleware for pages that need a logged-in user.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use bulletin_core::navigation::LOGIN_PATH;
use std::sync::Arc;

use crate::web::session::check_session;
use crate::web::state::{AppState, AuthenticatedUser};

/// Middleware that resolves the session before the handler runs.
///
/// If a user is logged in, inserts an `AuthenticatedUser` into request extensions.
/// Otherwise redirects to the login page without running the handler, so none of
/// the gated page is rendered.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = check_session(&state, req.headers()).await;

    let (Some(user), Some(access_token)) = (session.user, session.access_token) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    req.extensions_mut()
        .insert(AuthenticatedUser { user, access_token });
    next.run(req).await
}
