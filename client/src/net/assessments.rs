//! Read-only access to the `assessments` table.

use async_trait::async_trait;

use super::error::FetchError;
use super::types::{Assessment, SessionUser};

/// Owner-scoped queries over persisted assessments.
#[async_trait(?Send)]
pub trait AssessmentRepository: Send + Sync {
    /// Every assessment owned by `owner`, newest first.
    async fn list_assessments(&self, owner: &SessionUser) -> Result<Vec<Assessment>, FetchError>;

    /// A single assessment by id, only if `owner` owns it.
    async fn find_assessment(&self, owner: &SessionUser, id: &str) -> Result<Option<Assessment>, FetchError>;
}
