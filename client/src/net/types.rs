//! Shared DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the hosted auth and table payloads so serde decoding
//! stays lossless, while `Identity` gives views an exhaustive view of who is
//! signed in without touching raw session data.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Seconds before `expires_at` at which a session is already treated as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// Public backend connection settings served by the host at `/api/config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted service, without a trailing slash.
    pub supabase_url: String,
    /// Anonymous (publishable) API key sent as the `apikey` header.
    pub supabase_anon_key: String,
    /// Public origin of this site, used for email-verification redirects.
    pub site_url: String,
}

/// The authenticated user carried inside a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// An authenticated-identity token issued by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
    pub user: SessionUser,
}

impl Session {
    /// True once `now` is within [`EXPIRY_MARGIN_SECS`] of expiry.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }
}

/// Who the current visitor is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Identity {
    Authenticated { id: String, email: String },
    #[default]
    Anonymous,
}

impl Identity {
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Authenticated { email, .. } => Some(email),
            Self::Anonymous => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl From<Option<&Session>> for Identity {
    fn from(session: Option<&Session>) -> Self {
        match session {
            Some(s) => Self::Authenticated { id: s.user.id.clone(), email: s.user.email.clone() },
            None => Self::Anonymous,
        }
    }
}

/// Session lifecycle event delivered to session-change listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
}

impl AuthChange {
    /// The session in effect after this change, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(s) | Self::TokenRefreshed(s) => Some(s),
            Self::SignedOut => None,
        }
    }
}

/// Categorical risk label stored alongside each score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    #[must_use]
    pub fn lowercase(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One persisted risk evaluation, as stored in the `assessments` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub user_id: String,
    /// Percentage in `0..=100`.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Sort assessments newest first. Ties keep their incoming order.
pub fn sort_newest_first(items: &mut [Assessment]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
