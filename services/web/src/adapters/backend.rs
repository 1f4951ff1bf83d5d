//! services/web/src/adapters/backend.rs
//!
//! This module contains the backend adapter, which is the concrete implementation
//! of the `BackendService` port from the `core` crate. It talks to a hosted
//! Supabase-compatible backend: the auth API under `/auth/v1` and the tabular
//! REST API under `/rest/v1`.

use async_trait::async_trait;
use bulletin_core::domain::{AuthSession, Credentials, NewPost, Post, SignUpOutcome, User};
use bulletin_core::ports::{BackendService, PortError, PortResult};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::config::BackendConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const POSTS_SELECT: &str = "*,comments(count)";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A backend adapter that implements the `BackendService` port.
#[derive(Clone)]
pub struct SupabaseAdapter {
    client: Client,
    config: BackendConfig,
}

impl SupabaseAdapter {
    /// Creates a new `SupabaseAdapter`. The HTTP client is built once here and reused.
    pub fn new(config: BackendConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }

    /// Attaches the project key and, when given, the user's bearer token.
    fn authorize(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.config.access_key);
        request
            .header("apikey", &self.config.access_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, request: RequestBuilder) -> PortResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Backend returned {}: {}", status, body);
        Err(error_from_response(status, &body))
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Deserialize)]
struct UserRecord {
    id: Uuid,
    email: Option<String>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            user_id: self.id,
            email: self.email,
        }
    }
}

#[derive(Deserialize)]
struct TokenRecord {
    access_token: String,
    expires_in: i64,
    user: UserRecord,
}
impl TokenRecord {
    fn to_domain(self) -> PortResult<AuthSession> {
        // A non-positive lifetime would make the cookie expire on arrival.
        if self.expires_in <= 0 {
            return Err(PortError::Unexpected(format!(
                "Token response has an invalid expires_in: {}",
                self.expires_in
            )));
        }
        Ok(AuthSession {
            access_token: self.access_token,
            expires_in: self.expires_in,
            user: self.user.to_domain(),
        })
    }
}

/// Sign-up answers with a full session when email confirmation is off, and with
/// the bare user object when it is on.
#[derive(Deserialize)]
struct SignUpRecord {
    access_token: Option<String>,
    expires_in: Option<i64>,
    user: Option<UserRecord>,
    id: Option<Uuid>,
    email: Option<String>,
}
impl SignUpRecord {
    fn to_domain(self, requested_email: &str) -> PortResult<SignUpOutcome> {
        match (self.access_token, self.user) {
            (Some(access_token), Some(user)) => {
                let expires_in = self.expires_in.filter(|secs| *secs > 0).ok_or_else(|| {
                    PortError::Unexpected("Sign-up session has no expires_in".to_string())
                })?;
                Ok(SignUpOutcome::SignedIn(AuthSession {
                    access_token,
                    expires_in,
                    user: user.to_domain(),
                }))
            }
            (None, user) => {
                let email = user
                    .and_then(|u| u.email)
                    .or(self.email)
                    .unwrap_or_else(|| requested_email.to_string());
                if self.id.is_none() && email.is_empty() {
                    return Err(PortError::Unexpected("Empty sign-up response".to_string()));
                }
                Ok(SignUpOutcome::ConfirmationPending { email })
            }
            (Some(_), None) => Err(PortError::Unexpected(
                "Sign-up response has a token but no user".to_string(),
            )),
        }
    }
}

#[derive(Deserialize)]
struct CountRecord {
    count: Option<u64>,
}

#[derive(Deserialize)]
struct PostRecord {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    comments: Option<Vec<CountRecord>>,
}
impl PostRecord {
    fn to_domain(self) -> Post {
        Post {
            id: self.id,
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            author_id: self.user_id,
            created_at: self.created_at,
            comment_count: self
                .comments
                .and_then(|counts| counts.into_iter().next())
                .and_then(|c| c.count),
        }
    }
}

#[derive(Serialize)]
struct InsertPostRecord<'a> {
    title: &'a str,
    content: &'a str,
    user_id: Uuid,
}

#[derive(Serialize)]
struct CredentialsRecord<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for CredentialsRecord<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: &credentials.email,
            password: &credentials.password,
        }
    }
}

/// Error bodies from the auth and REST APIs use different field names.
#[derive(Deserialize, Default)]
struct ErrorRecord {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

fn error_from_response(status: StatusCode, body: &str) -> PortError {
    if status == StatusCode::UNAUTHORIZED {
        return PortError::Unauthorized;
    }

    let record: ErrorRecord = serde_json::from_str(body).unwrap_or_default();
    let message = record
        .error_description
        .or(record.msg)
        .or(record.message)
        .or(record.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    if status == StatusCode::NOT_FOUND {
        PortError::NotFound(message)
    } else {
        PortError::Rejected(message)
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> PortResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| PortError::Unexpected(format!("Malformed backend response: {}", e)))
}

//=========================================================================================
// `BackendService` Trait Implementation
//=========================================================================================

#[async_trait]
impl BackendService for SupabaseAdapter {
    async fn get_user(&self, access_token: &str) -> PortResult<User> {
        let request = self.authorize(self.client.get(self.url("/auth/v1/user")), Some(access_token));
        let record: UserRecord = decode(self.send(request).await?).await?;
        Ok(record.to_domain())
    }

    async fn sign_up(&self, credentials: &Credentials) -> PortResult<SignUpOutcome> {
        let request = self
            .authorize(self.client.post(self.url("/auth/v1/signup")), None)
            .json(&CredentialsRecord::from(credentials));
        let record: SignUpRecord = decode(self.send(request).await?).await?;
        record.to_domain(&credentials.email)
    }

    async fn sign_in(&self, credentials: &Credentials) -> PortResult<AuthSession> {
        let request = self
            .authorize(
                self.client
                    .post(self.url("/auth/v1/token"))
                    .query(&[("grant_type", "password")]),
                None,
            )
            .json(&CredentialsRecord::from(credentials));
        // Wrong credentials come back as 400, which `send` maps to `Rejected`.
        let record: TokenRecord = decode(self.send(request).await?).await?;
        record.to_domain()
    }

    async fn sign_out(&self, access_token: &str) -> PortResult<()> {
        let request = self.authorize(self.client.post(self.url("/auth/v1/logout")), Some(access_token));
        self.send(request).await?;
        Ok(())
    }

    async fn list_posts(&self) -> PortResult<Vec<Post>> {
        let request = self
            .authorize(self.client.get(self.url("/rest/v1/posts")), None)
            .query(&[("select", POSTS_SELECT), ("order", "created_at.desc")]);
        let records: Vec<PostRecord> = decode(self.send(request).await?).await?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_post(&self, access_token: &str, post: &NewPost) -> PortResult<Post> {
        let request = self
            .authorize(self.client.post(self.url("/rest/v1/posts")), Some(access_token))
            .header("Prefer", "return=representation")
            .json(&InsertPostRecord {
                title: &post.title,
                content: &post.content,
                user_id: post.author_id,
            });
        let records: Vec<PostRecord> = decode(self.send(request).await?).await?;
        records
            .into_iter()
            .next()
            .map(|r| r.to_domain())
            .ok_or_else(|| PortError::Unexpected("Insert returned no rows".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_record_reads_comment_aggregate() {
        let json = r#"[
            {"id": 2, "title": "b", "content": "x", "user_id": null,
             "created_at": "2024-05-01T10:00:00+00:00", "comments": [{"count": 3}]},
            {"id": 1, "title": null, "content": "y",
             "created_at": "2024-04-01T10:00:00Z", "comments": []}
        ]"#;
        let records: Vec<PostRecord> = serde_json::from_str(json).unwrap();
        let posts: Vec<Post> = records.into_iter().map(|r| r.to_domain()).collect();
        assert_eq!(posts[0].comment_count, Some(3));
        assert_eq!(posts[1].comment_count, None);
        assert_eq!(posts[1].comments(), 0);
        assert_eq!(posts[1].title, "");
    }

    #[test]
    fn sign_up_with_session_signs_in() {
        let json = r#"{"access_token": "tok", "expires_in": 3600,
            "user": {"id": "6f1c1b8e-3c6a-4c57-9d0e-2a7e9b1b2c3d", "email": "a@b.com"}}"#;
        let record: SignUpRecord = serde_json::from_str(json).unwrap();
        match record.to_domain("a@b.com").unwrap() {
            SignUpOutcome::SignedIn(session) => {
                assert_eq!(session.access_token, "tok");
                assert_eq!(session.expires_in, 3600);
                assert_eq!(session.user.email.as_deref(), Some("a@b.com"));
            }
            other => panic!("expected a session, got {:?}", other),
        }
    }

    #[test]
    fn token_without_lifetime_is_malformed() {
        let json = r#"{"access_token": "t",
            "user": {"id": "6f1c1b8e-3c6a-4c57-9d0e-2a7e9b1b2c3d", "email": "a@b.com"}}"#;
        assert!(serde_json::from_str::<TokenRecord>(json).is_err());

        let record: SignUpRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record.to_domain("a@b.com"),
            Err(PortError::Unexpected(_))
        ));
    }

    #[test]
    fn token_with_lifetime_decodes() {
        let json = r#"{"access_token": "t", "expires_in": 3600,
            "user": {"id": "6f1c1b8e-3c6a-4c57-9d0e-2a7e9b1b2c3d", "email": null}}"#;
        let session = serde_json::from_str::<TokenRecord>(json)
            .unwrap()
            .to_domain()
            .unwrap();
        assert_eq!(session.access_token, "t");
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.email, None);

        let expired = json.replace("3600", "0");
        let record = serde_json::from_str::<TokenRecord>(&expired).unwrap();
        assert!(matches!(record.to_domain(), Err(PortError::Unexpected(_))));
    }

    #[test]
    fn sign_up_without_session_needs_confirmation() {
        let json = r#"{"id": "6f1c1b8e-3c6a-4c57-9d0e-2a7e9b1b2c3d", "email": "a@b.com"}"#;
        let record: SignUpRecord = serde_json::from_str(json).unwrap();
        match record.to_domain("a@b.com").unwrap() {
            SignUpOutcome::ConfirmationPending { email } => assert_eq!(email, "a@b.com"),
            other => panic!("expected confirmation, got {:?}", other),
        }
    }

    #[test]
    fn error_message_fields_are_tried_in_order() {
        let err = error_from_response(
            StatusCode::BAD_REQUEST,
            r#"{"error": "invalid_grant", "error_description": "Invalid login credentials"}"#,
        );
        assert!(matches!(err, PortError::Rejected(m) if m == "Invalid login credentials"));

        let err = error_from_response(StatusCode::UNPROCESSABLE_ENTITY, r#"{"msg": "User already registered"}"#);
        assert!(matches!(err, PortError::Rejected(m) if m == "User already registered"));

        let err = error_from_response(StatusCode::CONFLICT, r#"{"message": "duplicate key"}"#);
        assert!(matches!(err, PortError::Rejected(m) if m == "duplicate key"));
    }

    #[test]
    fn unreadable_error_body_uses_status_text() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(matches!(err, PortError::Rejected(m) if m == "Bad Gateway"));
    }

    #[test]
    fn unauthorized_status_maps_to_unauthorized() {
        let err = error_from_response(StatusCode::UNAUTHORIZED, r#"{"msg": "JWT expired"}"#);
        assert!(matches!(err, PortError::Unauthorized));
    }

    #[test]
    fn urls_are_joined_to_the_endpoint() {
        let adapter = SupabaseAdapter::new(BackendConfig {
            endpoint: "https://project.supabase.co".to_string(),
            access_key: "anon".to_string(),
        })
        .unwrap();
        assert_eq!(adapter.url("/rest/v1/posts"), "https://project.supabase.co/rest/v1/posts");
    }
}
