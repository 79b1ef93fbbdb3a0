//! Email/password and OAuth sign-in against a GoTrue-compatible auth API.
//!
//! Every request carries the public `apikey` header. Provider-side
//! rejections are reported as [`AuthOutcome::Failed`]; [`AuthError`] is
//! reserved for transport failures and unusable responses.

use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, ConfigError};

/// OAuth providers offered on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    GitHub,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::GitHub => "github",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// Result of a sign-in or sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn(Session),
    /// Account created; the provider sent a confirmation email first.
    AwaitingConfirmation { email: String },
    /// The provider rejected the attempt.
    Failed { message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered a non-credential call with a non-2xx status.
    #[error("Auth provider error ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid auth URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected auth response: {0}")]
    UnexpectedResponse(String),
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// HTTP client for the auth provider.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    auth_url: String,
    api_key: String,
}

impl AuthClient {
    /// * `auth_url` - Base URL of the auth API, e.g. `https://host/auth/v1`.
    /// * `api_key` - Public key sent as the `apikey` header.
    pub fn new(auth_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let (url, key) = config.auth()?;
        Ok(Self::new(url, key))
    }

    /// Exchange email and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        let response = self
            .client
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        match Self::json_or_failure(response, "Sign-in failed").await? {
            Ok(value) => {
                let session = parse_session(value)?;
                tracing::info!(email, "Signed in");
                Ok(AuthOutcome::SignedIn(session))
            }
            Err(message) => Ok(AuthOutcome::Failed { message }),
        }
    }

    /// Register a new account.
    ///
    /// Providers with email confirmation enabled answer with the user only;
    /// that case is [`AuthOutcome::AwaitingConfirmation`].
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let response = self
            .client
            .post(format!("{}/signup", self.auth_url))
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        match Self::json_or_failure(response, "Sign-up failed").await? {
            Ok(value) if value.get("access_token").is_some() => {
                tracing::info!(email, "Signed up and signed in");
                Ok(AuthOutcome::SignedIn(parse_session(value)?))
            }
            Ok(_) => {
                tracing::info!(email, "Signed up, awaiting email confirmation");
                Ok(AuthOutcome::AwaitingConfirmation {
                    email: email.to_string(),
                })
            }
            Err(message) => Ok(AuthOutcome::Failed { message }),
        }
    }

    /// Revoke the session's tokens.
    pub async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or(body),
            });
        }
        tracing::info!("Signed out");
        Ok(())
    }

    /// The user an access token belongs to, or `None` if the provider no
    /// longer accepts the token.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let response = self
            .client
            .get(format!("{}/user", self.auth_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if matches!(status.as_u16(), 401 | 403) {
            tracing::debug!(status = status.as_u16(), "Access token rejected");
            return Ok(None);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or(body),
            });
        }
        let user = serde_json::from_str(&body)
            .map_err(|e| AuthError::UnexpectedResponse(e.to_string()))?;
        Ok(Some(user))
    }

    /// URL the browser is sent to for an OAuth sign-in.
    pub fn provider_authorize_url(
        &self,
        provider: Provider,
        redirect_to: &str,
    ) -> Result<String, AuthError> {
        let mut url = reqwest::Url::parse(&format!("{}/authorize", self.auth_url))
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url.to_string())
    }

    // ---- private helpers ----

    /// Split a response into its JSON body (`Ok`) or the provider's error
    /// message (`Err`), using `fallback` when the error body has none.
    async fn json_or_failure(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<Result<serde_json::Value, String>, AuthError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let value = serde_json::from_str(&body)
                .map_err(|e| AuthError::UnexpectedResponse(e.to_string()))?;
            return Ok(Ok(value));
        }

        tracing::warn!(status = status.as_u16(), "Auth provider rejected request");
        Ok(Err(error_message(&body).unwrap_or_else(|| fallback.to_string())))
    }
}

fn parse_session(value: serde_json::Value) -> Result<Session, AuthError> {
    serde_json::from_value(value).map_err(|e| AuthError::UnexpectedResponse(e.to_string()))
}

/// Human-readable message from a GoTrue error body.
///
/// Different endpoints use `msg`, `error_description`, `message` or `error`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_provider_and_redirect() {
        let auth = AuthClient::new("https://auth.roehrenboerse.de/auth/v1/", "anon");
        let url = auth
            .provider_authorize_url(Provider::GitHub, "https://roehrenboerse.de/")
            .unwrap();
        assert_eq!(
            url,
            "https://auth.roehrenboerse.de/auth/v1/authorize?provider=github&redirect_to=https%3A%2F%2Froehrenboerse.de%2F"
        );
    }

    #[test]
    fn error_message_prefers_msg() {
        assert_eq!(
            error_message(r#"{"code":422,"msg":"User already registered"}"#).as_deref(),
            Some("User already registered")
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(error_message("<html>"), None);
    }
}
