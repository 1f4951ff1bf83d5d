//! crates/bulletin_core/src/messages.rs
//!
//! User-visible strings shown by the pages.

pub const NO_POSTS: &str = "No posts yet.";
pub const LOAD_POSTS_FAILED: &str = "Failed to load posts.";
pub const UNTITLED: &str = "Untitled";

pub const LOGIN_SUCCESS: &str = "Logged in successfully. Redirecting...";
pub const SIGNUP_SUCCESS: &str = "Account created. Redirecting...";
pub const SIGNUP_CONFIRM_EMAIL: &str =
    "Account created. Check your email to confirm the address, then log in.";
pub const POST_CREATED: &str = "Post created. Redirecting...";
pub const STAY_ON_PAGE: &str = "Stay on this page";

pub const EMAIL_REQUIRED: &str = "Please enter your email address.";
pub const PASSWORD_REQUIRED: &str = "Please enter your password.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const TITLE_REQUIRED: &str = "Please enter a title.";
pub const CONTENT_REQUIRED: &str = "Please enter some content.";
pub const TITLE_TOO_LONG: &str = "Title must be 100 characters or fewer.";
