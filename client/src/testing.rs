//! Shared fixtures for unit tests.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::net::types::{Assessment, RiskLevel};

pub(crate) use futures::executor::block_on;

pub(crate) fn assessment(id: &str, user_id: &str, score: f64, level: RiskLevel, created_at: &str) -> Assessment {
    Assessment {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        risk_score: score,
        risk_level: level,
        created_at: OffsetDateTime::parse(created_at, &Rfc3339).expect("fixture timestamp"),
    }
}
