//! services/web/src/web/state.rs
//!
//! Defines the application's shared state and the per-request session context.

use crate::config::Config;
use bulletin_core::domain::User;
use bulletin_core::ports::BackendService;
use bulletin_core::view::NavView;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
/// It owns the only backend client in the process.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendService>,
    pub config: Arc<Config>,
}

//=========================================================================================
// SessionContext (Specific to One Request)
//=========================================================================================

/// The result of checking the session for one request.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<User>,
    pub access_token: Option<String>,
}

impl SessionContext {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn nav(&self) -> NavView {
        NavView::project(self.user.as_ref())
    }
}

/// A request that passed `require_session`. Inserted into request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub access_token: String,
}

impl AuthenticatedUser {
    pub fn nav(&self) -> NavView {
        NavView::project(Some(&self.user))
    }
}
