use uuid::Uuid;

use crate::cv::application::ports::outgoing::{CVRepository, CVRepositoryError};
use crate::cv::domain::entities::UserId;
use tracing::info;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HardDeleteCVError {
    #[error("CV not found")]
    CVNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<CVRepositoryError> for HardDeleteCVError {
    fn from(err: CVRepositoryError) -> Self {
        match err {
            CVRepositoryError::NotFound => HardDeleteCVError::CVNotFound,
            CVRepositoryError::Conflict => {
                HardDeleteCVError::RepositoryError("unexpected conflict while deleting CV".to_string())
            }
            CVRepositoryError::DatabaseError(msg) | CVRepositoryError::SerializationError(msg) => {
                HardDeleteCVError::RepositoryError(msg)
            }
        }
    }
}

#[async_trait::async_trait]
pub trait IHardDeleteCVUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, cv_id: Uuid) -> Result<(), HardDeleteCVError>;
}

/// Removes the record for good. There is no archive step.
#[derive(Debug, Clone)]
pub struct HardDeleteCVUseCase<R: CVRepository> {
    repository: R,
}

impl<R: CVRepository> HardDeleteCVUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl<R> IHardDeleteCVUseCase for HardDeleteCVUseCase<R>
where
    R: CVRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId, cv_id: Uuid) -> Result<(), HardDeleteCVError> {
        let cv = self
            .repository
            .fetch_cv_by_id(cv_id)
            .await?
            .ok_or(HardDeleteCVError::CVNotFound)?;

        if !cv.is_owned_by(user_id) {
            return Err(HardDeleteCVError::CVNotFound);
        }

        self.repository.delete_cv(cv_id).await?;

        info!(cv_id = %cv_id, user_id = %user_id, "CV deleted");
        Ok(())
    }
}
