//! crates/bulletin_core/src/navigation.rs
//!
//! Fixed page routes and the delayed redirect shown after a successful action.

use std::time::Duration;

pub const INDEX_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const NEW_POST_PATH: &str = "/posts/new";

/// Delay between a success message and the follow-up navigation.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// A navigation to `target` that fires after `delay` unless the page is left first.
///
/// Rendering it as a `Refresh` header hands the timer to the browser, where any
/// other navigation or closing the page cancels it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRedirect {
    pub target: &'static str,
    pub delay: Duration,
}

impl ScheduledRedirect {
    pub fn new(target: &'static str, delay: Duration) -> Self {
        Self { target, delay }
    }

    /// Value for the HTTP `Refresh` header.
    pub fn header_value(&self) -> String {
        format!("{}; url={}", self.delay.as_secs(), self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delay_is_two_seconds() {
        assert_eq!(DEFAULT_REDIRECT_DELAY, Duration::from_secs(2));
    }

    #[test]
    fn header_value_format() {
        let redirect = ScheduledRedirect::new(INDEX_PATH, DEFAULT_REDIRECT_DELAY);
        assert_eq!(redirect.header_value(), "2; url=/");
    }
}
