use async_trait::async_trait;
use futures_util::stream::BoxStream;
use thiserror::Error;
use crate::core::{attributes::AttributeIndex, intervals::IntervalIndex};
use crate::models::{CandidateDetail, CandidateIdentity, TimeSlot};

/// Errors raised by a candidate store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Read-only view of the candidate pool used by the matcher
///
/// Implementations answer restricted lookups so the matcher never loads full
/// candidate records for the whole pool. No retries happen above this trait;
/// a backend that wants them does them itself.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Candidates owning at least one of `skills` (folded lower-case keys),
    /// each mapped to its matching skill labels
    async fn candidates_by_skills(&self, skills: &[String]) -> Result<AttributeIndex, StoreError>;

    /// Candidates with slots intersecting `window`, each mapped to those slots
    async fn candidates_by_window(&self, window: TimeSlot) -> Result<IntervalIndex, StoreError>;

    /// Stream every candidate's id and display name
    fn list_identities(&self) -> BoxStream<'_, Result<CandidateIdentity, StoreError>>;

    /// Bulk-load full records for `ids`; unknown ids are simply absent
    async fn candidate_details(&self, ids: &[String]) -> Result<Vec<CandidateDetail>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
