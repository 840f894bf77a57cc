use async_trait::async_trait;
use tracing::error;

use crate::cv::application::ports::outgoing::{CVQuery, CVQueryError};
use crate::cv::domain::entities::{CVInfo, UserId};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchCVError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<CVQueryError> for FetchCVError {
    fn from(e: CVQueryError) -> Self {
        match e {
            CVQueryError::DatabaseError(msg) => FetchCVError::QueryFailed(msg),
            CVQueryError::MalformedDocument(msg) => FetchCVError::QueryFailed(msg),
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

#[async_trait]
pub trait IFetchCVUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<Vec<CVInfo>, FetchCVError>;
}

pub struct FetchCVService<Q>
where
    Q: CVQuery,
{
    query: Q,
}

impl<Q> FetchCVService<Q>
where
    Q: CVQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IFetchCVUseCase for FetchCVService<Q>
where
    Q: CVQuery + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<Vec<CVInfo>, FetchCVError> {
        self.query
            .fetch_cvs_by_user_id(user_id)
            .await
            .inspect_err(|e| error!(user_id = %user_id, error = %e, "Failed to list CVs"))
            .map_err(FetchCVError::from)
    }
}
