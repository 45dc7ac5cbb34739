//! Error types for the auth and data services.
//!
//! ERROR HANDLING
//! ==============
//! Both errors are caught at the view boundary and turned into notifications.
//! `AuthError` carries a structured code so views never branch on wording.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Classified cause of an authentication failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthErrorCode {
    InvalidCredentials,
    EmailNotConfirmed,
    UserAlreadyExists,
    WeakPassword,
    RateLimited,
    Network,
    Unavailable,
    Unknown,
}

impl AuthErrorCode {
    /// Map a service error code (or legacy `error` field) onto a known cause.
    #[must_use]
    pub fn from_wire(code: &str) -> Self {
        match code {
            "invalid_credentials" | "invalid_grant" => Self::InvalidCredentials,
            "email_not_confirmed" => Self::EmailNotConfirmed,
            "user_already_exists" | "email_exists" => Self::UserAlreadyExists,
            "weak_password" => Self::WeakPassword,
            "over_request_rate_limit" | "over_email_send_rate_limit" => Self::RateLimited,
            _ => Self::Unknown,
        }
    }
}

/// Failure from sign-in, sign-up, or sign-out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::Network, message)
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(AuthErrorCode::Unavailable, "auth service not available")
    }

    /// Decode an error body returned by the auth service.
    ///
    /// Accepts both the current `{error_code, msg}` shape and the legacy
    /// `{error, error_description}` shape; anything else becomes `Unknown`
    /// with a status-derived message.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: AuthErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed
            .error_code
            .as_deref()
            .or(parsed.error.as_deref())
            .map_or(AuthErrorCode::Unknown, AuthErrorCode::from_wire);
        let message = parsed
            .msg
            .or(parsed.error_description)
            .or(parsed.message)
            .unwrap_or_else(|| format!("auth request failed: {status}"));
        if status == 429 && code == AuthErrorCode::Unknown {
            return Self::new(AuthErrorCode::RateLimited, message);
        }
        Self::new(code, message)
    }
}

#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    error_code: Option<String>,
    error: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

/// Failure while reading assessments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("no active session")]
    Unauthenticated,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("data service not available")]
    Unavailable,
}
