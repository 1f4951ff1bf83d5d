//! crates/bulletin_core/src/ports.rs
//!
//! Defines the service contract (trait) for the hosted backend.
//! This trait forms the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete HTTP client and the backend vendor.

use async_trait::async_trait;

use crate::domain::{AuthSession, Credentials, NewPost, Post, SignUpOutcome, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the backend (e.g., network, decoding).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The backend refused the request and gave a human readable reason.
    #[error("{0}")]
    Rejected(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl PortError {
    /// The text shown to the user next to the form that triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            PortError::Rejected(msg) => msg.clone(),
            PortError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait BackendService: Send + Sync {
    // --- Auth Methods ---
    /// Resolves the user owning `access_token`.
    async fn get_user(&self, access_token: &str) -> PortResult<User>;

    async fn sign_up(&self, credentials: &Credentials) -> PortResult<SignUpOutcome>;

    async fn sign_in(&self, credentials: &Credentials) -> PortResult<AuthSession>;

    async fn sign_out(&self, access_token: &str) -> PortResult<()>;

    // --- Content ---
    /// All posts with their comment counts, newest first.
    async fn list_posts(&self) -> PortResult<Vec<Post>>;

    async fn create_post(&self, access_token: &str, post: &NewPost) -> PortResult<Post>;
}
