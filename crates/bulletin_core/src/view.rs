//! crates/bulletin_core/src/view.rs
//!
//! Projection of the session state onto the navigation controls every page shows.

use crate::domain::User;

/// Which navigation controls are visible for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub show_user_email: bool,
    pub show_logout_button: bool,
    pub show_login_button: bool,
    pub show_new_post_link: bool,
    pub user_email: String,
}

impl NavView {
    /// Pure function of session presence. No I/O.
    pub fn project(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self {
                show_user_email: true,
                show_logout_button: true,
                show_login_button: false,
                show_new_post_link: true,
                user_email: user.email.clone().unwrap_or_default(),
            },
            None => Self {
                show_user_email: false,
                show_logout_button: false,
                show_login_button: true,
                show_new_post_link: false,
                user_email: String::new(),
            },
        }
    }
}

/// The two actions offered by the login form. Only one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    Login,
    #[default]
    SignUp,
}

impl AuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::SignUp => "signup",
        }
    }

    /// Unknown values fall back to the default, signing up.
    pub fn parse(value: &str) -> Self {
        match value {
            "login" => AuthMode::Login,
            _ => AuthMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn logged_in_shows_logout_and_new_post() {
        let user = User {
            user_id: Uuid::new_v4(),
            email: Some("a@b.com".to_string()),
        };
        let view = NavView::project(Some(&user));
        assert!(view.show_user_email);
        assert!(view.show_logout_button);
        assert!(view.show_new_post_link);
        assert!(!view.show_login_button);
        assert_eq!(view.user_email, "a@b.com");
    }

    #[test]
    fn logged_out_shows_only_login() {
        let view = NavView::project(None);
        assert!(view.show_login_button);
        assert!(!view.show_user_email);
        assert!(!view.show_logout_button);
        assert!(!view.show_new_post_link);
        assert!(view.user_email.is_empty());
    }

    #[test]
    fn mode_parsing_defaults_to_signup() {
        assert_eq!(AuthMode::default(), AuthMode::SignUp);
        assert_eq!(AuthMode::parse("signup"), AuthMode::SignUp);
        assert_eq!(AuthMode::parse("login"), AuthMode::Login);
        assert_eq!(AuthMode::parse("bogus"), AuthMode::SignUp);
        assert_eq!(AuthMode::parse(""), AuthMode::SignUp);
    }
}
