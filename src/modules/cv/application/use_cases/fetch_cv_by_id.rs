use crate::cv::application::ports::outgoing::{CVQuery, CVQueryError};
use crate::cv::domain::entities::{CVInfo, UserId};
use tracing::error;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchCVByIdError {
    #[error("CV not found")]
    CVNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone)]
pub struct FetchCVByIdUseCase<Q>
where
    Q: CVQuery,
{
    query: Q,
}

impl<Q> FetchCVByIdUseCase<Q>
where
    Q: CVQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait::async_trait]
pub trait IFetchCVByIdUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, cv_id: Uuid) -> Result<CVInfo, FetchCVByIdError>;
}

#[async_trait::async_trait]
impl<Q> IFetchCVByIdUseCase for FetchCVByIdUseCase<Q>
where
    Q: CVQuery + Send + Sync,
{
    async fn execute(&self, user_id: UserId, cv_id: Uuid) -> Result<CVInfo, FetchCVByIdError> {
        let cv = self
            .query
            .fetch_cv_by_id(cv_id)
            .await
            .map_err(|e| {
                error!(cv_id = %cv_id, error = %e, "Failed to fetch CV");
                match e {
                    CVQueryError::DatabaseError(msg) | CVQueryError::MalformedDocument(msg) => {
                        FetchCVByIdError::RepositoryError(msg)
                    }
                }
            })?
            .ok_or(FetchCVByIdError::CVNotFound)?;

        // Do not leak existence of CVs belonging to other users
        if !cv.is_owned_by(user_id) {
            return Err(FetchCVByIdError::CVNotFound);
        }

        Ok(cv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::cv_fixtures::sample_cv;
    use crate::tests::support::stubs::InMemoryCvStore;

    #[tokio::test]
    async fn test_fetch_cv_by_id_success() {
        let user_id = UserId::from(Uuid::new_v4());
        let cv = sample_cv(user_id);
        let store = InMemoryCvStore::with_cvs(vec![cv.clone()]);

        let use_case = FetchCVByIdUseCase::new(store);
        let fetched = use_case.execute(user_id, cv.id).await.unwrap();

        assert_eq!(fetched, cv);
    }

    #[tokio::test]
    async fn test_fetch_cv_by_id_not_found() {
        let use_case = FetchCVByIdUseCase::new(InMemoryCvStore::default());

        let result = use_case
            .execute(UserId::from(Uuid::new_v4()), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(FetchCVByIdError::CVNotFound)));
    }

    #[tokio::test]
    async fn test_fetch_cv_by_id_hides_other_owners_cv() {
        let cv = sample_cv(UserId::from(Uuid::new_v4()));
        let store = InMemoryCvStore::with_cvs(vec![cv.clone()]);

        let use_case = FetchCVByIdUseCase::new(store);
        let result = use_case.execute(UserId::from(Uuid::new_v4()), cv.id).await;

        assert!(matches!(result, Err(FetchCVByIdError::CVNotFound)));
    }

    #[tokio::test]
    async fn test_fetch_cv_by_id_query_error() {
        let store = InMemoryCvStore::default();
        store.fail_reads_with("connection reset");

        let use_case = FetchCVByIdUseCase::new(store);
        let result = use_case
            .execute(UserId::from(Uuid::new_v4()), Uuid::new_v4())
            .await;

        assert!(
            matches!(result, Err(FetchCVByIdError::RepositoryError(msg)) if msg == "connection reset")
        );
    }
}
