// cv_repository.rs
use crate::cv::domain::entities::{CVInfo, CvContent, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CVRepositoryError {
    #[error("CV not found")]
    NotFound,

    /// The row changed after it was read; the write was not applied.
    #[error("CV was modified concurrently")]
    Conflict,

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored document could not be mapped to or from JSON.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Write side of CV storage. Content handed to it has already passed
/// validation; the adapter stores it as one document per CV.
#[async_trait]
pub trait CVRepository: Send + Sync {
    async fn fetch_cv_by_id(&self, cv_id: Uuid) -> Result<Option<CVInfo>, CVRepositoryError>;

    async fn create_cv(
        &self,
        user_id: UserId,
        content: CvContent,
    ) -> Result<CVInfo, CVRepositoryError>;

    /// Replaces the whole content of an existing CV, but only while its
    /// `updated_at` still equals `expected_updated_at`. Returns `Conflict`
    /// when the row moved on and `NotFound` when it is gone. Owner and
    /// creation timestamp are never changed.
    async fn update_cv(
        &self,
        cv_id: Uuid,
        expected_updated_at: DateTime<Utc>,
        content: CvContent,
    ) -> Result<CVInfo, CVRepositoryError>;

    /// Permanently removes the document. Returns `NotFound` if nothing was deleted.
    async fn delete_cv(&self, cv_id: Uuid) -> Result<(), CVRepositoryError>;
}
