use crate::cv::application::ports::outgoing::{CVRepository, CVRepositoryError, UserQuery};
use crate::cv::domain::drafts::CvDraft;
use crate::cv::domain::entities::{CVInfo, UserId};
use crate::cv::domain::validation::CvValidationError;
use async_trait::async_trait;
use tracing::{error, info, warn};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateCVError {
    #[error(transparent)]
    Validation(#[from] CvValidationError),

    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// An interface for the create CV use case
#[async_trait]
pub trait ICreateCVUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, draft: CvDraft) -> Result<CVInfo, CreateCVError>;
}

/// Validates the draft, checks the owner exists, then stores the document.
pub struct CreateCVUseCase<R, U>
where
    R: CVRepository,
    U: UserQuery,
{
    cv_repository: R,
    user_query: U,
}

impl<R, U> CreateCVUseCase<R, U>
where
    R: CVRepository,
    U: UserQuery,
{
    pub fn new(cv_repository: R, user_query: U) -> Self {
        Self {
            cv_repository,
            user_query,
        }
    }
}

#[async_trait]
impl<R, U> ICreateCVUseCase for CreateCVUseCase<R, U>
where
    R: CVRepository + Sync + Send,
    U: UserQuery + Sync + Send,
{
    async fn execute(&self, user_id: UserId, draft: CvDraft) -> Result<CVInfo, CreateCVError> {
        let content = draft.validate().inspect_err(|e| {
            warn!(user_id = %user_id, violations = e.violations.len(), "CV create rejected: {}", e);
        })?;

        let owner_exists = self
            .user_query
            .exists(user_id)
            .await
            .map_err(|e| CreateCVError::RepositoryError(e.to_string()))?;

        if !owner_exists {
            warn!(user_id = %user_id, "CV create rejected: owner does not exist");
            return Err(CreateCVError::UserNotFound);
        }

        let created = self
            .cv_repository
            .create_cv(user_id, content)
            .await
            .map_err(|e| match e {
                CVRepositoryError::DatabaseError(msg)
                | CVRepositoryError::SerializationError(msg) => {
                    error!(user_id = %user_id, error = %msg, "Failed to store CV");
                    CreateCVError::RepositoryError(msg)
                }
                CVRepositoryError::NotFound | CVRepositoryError::Conflict => {
                    CreateCVError::RepositoryError("unexpected not found while creating CV".to_string())
                }
            })?;

        info!(user_id = %user_id, cv_id = %created.id, "CV created");
        Ok(created)
    }
}
