//! crates/bulletin_core/src/validation.rs
//!
//! Form checks that run before any backend request is made.

use uuid::Uuid;

use crate::domain::{Credentials, NewPost, MAX_TITLE_CHARS, MIN_PASSWORD_CHARS};
use crate::messages;
use crate::render::escape_html;

/// A rejected form submission. `Display` is the inline message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", messages::EMAIL_REQUIRED)]
    EmailRequired,
    #[error("{}", messages::PASSWORD_REQUIRED)]
    PasswordRequired,
    #[error("{}", messages::PASSWORD_TOO_SHORT)]
    PasswordTooShort,
    #[error("{}", messages::TITLE_REQUIRED)]
    TitleRequired,
    #[error("{}", messages::CONTENT_REQUIRED)]
    ContentRequired,
    #[error("{}", messages::TITLE_TOO_LONG)]
    TitleTooLong,
}

/// Checks login form input. The email is trimmed, the password is taken as typed.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Checks the new-post form and produces the escaped record to insert.
pub fn validate_post(
    title: &str,
    content: &str,
    author_id: Uuid,
) -> Result<NewPost, ValidationError> {
    let title = title.trim();
    let content = content.trim();

    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if content.is_empty() {
        return Err(ValidationError::ContentRequired);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }

    Ok(NewPost {
        title: escape_html(title),
        content: escape_html(content),
        author_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            validate_credentials("a@b.com", "12345").unwrap_err(),
            ValidationError::PasswordTooShort
        );
    }

    #[test]
    fn six_char_password_is_accepted() {
        let creds = validate_credentials("  a@b.com ", "123456").unwrap();
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, "123456");
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            validate_credentials("   ", "secret1").unwrap_err(),
            ValidationError::EmailRequired
        );
        assert_eq!(
            validate_credentials("a@b.com", "").unwrap_err(),
            ValidationError::PasswordRequired
        );
    }

    #[test]
    fn title_over_limit_is_rejected() {
        let title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(
            validate_post(&title, "body", Uuid::nil()).unwrap_err(),
            ValidationError::TitleTooLong
        );
    }

    #[test]
    fn title_limit_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_CHARS);
        assert!(validate_post(&title, "body", Uuid::nil()).is_ok());
    }

    #[test]
    fn blank_title_or_content_is_rejected() {
        assert_eq!(
            validate_post("  ", "body", Uuid::nil()).unwrap_err(),
            ValidationError::TitleRequired
        );
        assert_eq!(
            validate_post("title", "\n\t", Uuid::nil()).unwrap_err(),
            ValidationError::ContentRequired
        );
    }

    #[test]
    fn valid_post_is_trimmed_and_escaped() {
        let author = Uuid::new_v4();
        let post = validate_post("  <b>Hi</b> ", " a & b ", author).unwrap();
        assert_eq!(post.title, "&lt;b&gt;Hi&lt;/b&gt;");
        assert_eq!(post.content, "a &amp; b");
        assert_eq!(post.author_id, author);
    }

    #[test]
    fn message_is_the_display_text() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            messages::PASSWORD_TOO_SHORT
        );
    }
}
