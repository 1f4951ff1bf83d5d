//! services/web/src/web/session.rs
//!
//! Session lookup and the auth cookie.
//!
//! The access token issued by the backend lives in an `HttpOnly` cookie. Every page
//! resolves it into a `SessionContext`; any failure along the way means "logged out".

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::warn;

use crate::web::state::{AppState, SessionContext};

pub const SESSION_COOKIE: &str = "session";

/// Reads the access token from the `Cookie` header, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            let c = c.trim();
            c.strip_prefix("session=")
        })
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// `Set-Cookie` value storing `access_token` for `max_age` seconds.
pub fn session_cookie(access_token: &str, max_age: i64, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly;{} SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        access_token,
        if secure { " Secure;" } else { "" },
        max_age.max(0)
    )
}

/// `Set-Cookie` value that removes the auth cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Asks the backend who owns the cookie's token.
///
/// Never fails: a missing cookie skips the backend call, and any backend error
/// (network, expired token, malformed response) is logged and treated as logged out.
pub async fn check_session(state: &AppState, headers: &HeaderMap) -> SessionContext {
    let Some(token) = session_token(headers) else {
        return SessionContext::logged_out();
    };

    match state.backend.get_user(&token).await {
        Ok(user) => SessionContext {
            user: Some(user),
            access_token: Some(token),
        },
        Err(e) => {
            warn!("Session check failed, continuing as logged out: {:?}", e);
            SessionContext::logged_out()
        }
    }
}

impl FromRequestParts<Arc<AppState>> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(check_session(state, &parts.headers).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc.def.ghi; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn empty_or_missing_cookie_has_no_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn cookie_attributes() {
        assert_eq!(
            session_cookie("tok", 3600, false),
            "session=tok; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
        );
        assert_eq!(
            clear_session_cookie(true),
            "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0"
        );
    }
}
