//! services/web/src/web/auth.rs
//!
//! Login page, sign-up / sign-in submission, and logout.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use bulletin_core::domain::{Credentials, SignUpOutcome};
use bulletin_core::messages;
use bulletin_core::navigation::{ScheduledRedirect, INDEX_PATH, LOGIN_PATH};
use bulletin_core::ports::PortResult;
use bulletin_core::validation::validate_credentials;
use bulletin_core::view::{AuthMode, NavView};
use bulletin_core::AuthSession;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::web::pages::{login_page, Feedback, LoginFormView};
use crate::web::session::{clear_session_cookie, session_cookie, session_token};
use crate::web::state::{AppState, SessionContext};

pub(crate) const REFRESH: HeaderName = HeaderName::from_static("refresh");

//=========================================================================================
// Request Types
//=========================================================================================

#[derive(Deserialize, Default)]
pub struct LoginQuery {
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /login - Show the login / sign-up form
pub async fn login_page_handler(
    session: SessionContext,
    Query(query): Query<LoginQuery>,
) -> Html<String> {
    let form = LoginFormView {
        mode: query.mode.as_deref().map(AuthMode::parse).unwrap_or_default(),
        email: String::new(),
    };
    Html(login_page(&session.nav(), &form, None))
}

/// POST /login - Sign up or log in, depending on the selected mode
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    Form(form): Form<LoginForm>,
) -> Response {
    let mode = AuthMode::parse(&form.mode);
    let view = LoginFormView {
        mode,
        email: form.email.trim().to_string(),
    };

    // 1. Validate before touching the backend
    let credentials = match validate_credentials(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(e) => {
            let feedback = Feedback::error(e.to_string());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(login_page(&session.nav(), &view, Some(&feedback))),
            )
                .into_response();
        }
    };

    // 2. Dispatch to the backend
    let outcome = match mode {
        AuthMode::Login => sign_in(&state, &credentials).await,
        AuthMode::SignUp => state.backend.sign_up(&credentials).await,
    };

    // 3. Render the outcome
    match outcome {
        Ok(SignUpOutcome::SignedIn(auth)) => {
            info!("User {} authenticated ({})", auth.user.user_id, mode.as_str());
            let text = match mode {
                AuthMode::Login => messages::LOGIN_SUCCESS,
                AuthMode::SignUp => messages::SIGNUP_SUCCESS,
            };
            signed_in_response(&state, &auth, view, text)
        }
        Ok(SignUpOutcome::ConfirmationPending { email }) => {
            info!("Sign-up for {} is waiting for email confirmation", email);
            let feedback =
                Feedback::success(messages::SIGNUP_CONFIRM_EMAIL).with_stay_link(LOGIN_PATH);
            let view = LoginFormView {
                mode: AuthMode::Login,
                email,
            };
            let redirect = ScheduledRedirect::new(INDEX_PATH, state.config.redirect_delay);
            (
                StatusCode::OK,
                [(REFRESH, redirect.header_value())],
                Html(login_page(&session.nav(), &view, Some(&feedback))),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to {}: {:?}", mode.as_str(), e);
            let feedback = Feedback::error(e.user_message());
            (
                StatusCode::BAD_REQUEST,
                Html(login_page(&session.nav(), &view, Some(&feedback))),
            )
                .into_response()
        }
    }
}

async fn sign_in(state: &AppState, credentials: &Credentials) -> PortResult<SignUpOutcome> {
    state
        .backend
        .sign_in(credentials)
        .await
        .map(SignUpOutcome::SignedIn)
}

/// Sets the cookie, shows the success message and schedules the move to the listing.
fn signed_in_response(
    state: &AppState,
    auth: &AuthSession,
    view: LoginFormView,
    text: &str,
) -> Response {
    let redirect = ScheduledRedirect::new(INDEX_PATH, state.config.redirect_delay);
    let cookie = session_cookie(&auth.access_token, auth.expires_in, state.config.cookie_secure);
    let feedback = Feedback::success(text).with_stay_link(LOGIN_PATH);
    let nav = NavView::project(Some(&auth.user));

    (
        StatusCode::OK,
        [
            (header::SET_COOKIE, cookie),
            (REFRESH, redirect.header_value()),
        ],
        Html(login_page(&nav, &view, Some(&feedback))),
    )
        .into_response()
}

/// POST /logout - Sign out and return to the listing
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // 1. Tell the backend, if there is anything to revoke
    if let Some(token) = session_token(&headers) {
        if let Err(e) = state.backend.sign_out(&token).await {
            warn!("Backend sign-out failed, clearing the cookie anyway: {:?}", e);
        }
    }

    // 2. Clear cookie and go to the listing regardless of the outcome
    let cookie = clear_session_cookie(state.config.cookie_secure);
    ([(header::SET_COOKIE, cookie)], Redirect::to(INDEX_PATH))
}
