//! crates/bulletin_core/src/domain.rs
//!
//! Defines the pure, core data structures for the bulletin board.
//! These structs are independent of the backend's wire format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum length of a post title, counted in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Minimum length of a password accepted by the login form.
pub const MIN_PASSWORD_CHARS: usize = 6;

// Represents an authenticated user - used throughout app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: Uuid,
    pub email: Option<String>,
}

/// Email and password as typed into the login form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Represents a backend-issued login session (stored in the auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

/// Result of a sign-up request.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The account is usable immediately.
    SignedIn(AuthSession),
    /// The backend wants the address confirmed before the first login.
    ConfirmationPending { email: String },
}

/// A post as stored by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub comment_count: Option<u64>,
}

impl Post {
    /// Comment count with a missing aggregate treated as zero.
    pub fn comments(&self) -> u64 {
        self.comment_count.unwrap_or(0)
    }
}

/// A validated post ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Orders posts newest first by creation time.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
