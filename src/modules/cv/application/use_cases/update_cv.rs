use crate::cv::application::ports::outgoing::{CVRepository, CVRepositoryError};
use crate::cv::domain::drafts::CvDraft;
use crate::cv::domain::entities::{CVInfo, UserId};
use crate::cv::domain::validation::CvValidationError;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateCVError {
    #[error(transparent)]
    Validation(#[from] CvValidationError),

    #[error("CV not found")]
    CVNotFound,

    #[error("CV was modified concurrently, reload and retry")]
    Conflict,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<CVRepositoryError> for UpdateCVError {
    fn from(err: CVRepositoryError) -> Self {
        match err {
            CVRepositoryError::NotFound => UpdateCVError::CVNotFound,
            CVRepositoryError::Conflict => UpdateCVError::Conflict,
            CVRepositoryError::DatabaseError(msg) | CVRepositoryError::SerializationError(msg) => {
                UpdateCVError::RepositoryError(msg)
            }
        }
    }
}

#[async_trait::async_trait]
pub trait IUpdateCVUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        cv_id: Uuid,
        draft: CvDraft,
    ) -> Result<CVInfo, UpdateCVError>;
}

/// Full replacement of a CV's content. Missing lists become empty lists.
#[derive(Debug, Clone)]
pub struct UpdateCVUseCase<R: CVRepository> {
    repository: R,
}

impl<R: CVRepository> UpdateCVUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl<R> IUpdateCVUseCase for UpdateCVUseCase<R>
where
    R: CVRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        cv_id: Uuid,
        draft: CvDraft,
    ) -> Result<CVInfo, UpdateCVError> {
        let content = draft.validate().inspect_err(|e| {
            warn!(cv_id = %cv_id, violations = e.violations.len(), "CV update rejected: {}", e);
        })?;

        let existing = self
            .repository
            .fetch_cv_by_id(cv_id)
            .await?
            .ok_or(UpdateCVError::CVNotFound)?;

        if !existing.is_owned_by(user_id) {
            return Err(UpdateCVError::CVNotFound);
        }

        let updated = self
            .repository
            .update_cv(cv_id, existing.updated_at, content)
            .await
            .inspect_err(|e| {
                if matches!(e, CVRepositoryError::Conflict) {
                    warn!(cv_id = %cv_id, "CV update lost a race with another write");
                }
            })?;

        info!(cv_id = %cv_id, user_id = %user_id, "CV updated");
        Ok(updated)
    }
}
