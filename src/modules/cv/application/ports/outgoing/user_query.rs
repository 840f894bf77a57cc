// user_query.rs
use crate::cv::domain::entities::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Lookup into the user accounts owned by another part of the system.
/// CVs reference users by id only.
#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn exists(&self, user_id: UserId) -> Result<bool, UserQueryError>;
}
