// cv_query.rs
use crate::cv::domain::entities::{CVInfo, UserId};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CVQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Stored CV is malformed: {0}")]
    MalformedDocument(String),
}

#[async_trait]
pub trait CVQuery: Send + Sync {
    /// All CVs of one owner, oldest first.
    async fn fetch_cvs_by_user_id(&self, user_id: UserId) -> Result<Vec<CVInfo>, CVQueryError>;
    async fn fetch_cv_by_id(&self, cv_id: Uuid) -> Result<Option<CVInfo>, CVQueryError>;
}
