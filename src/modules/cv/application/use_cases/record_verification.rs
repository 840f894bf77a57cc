use crate::cv::application::ports::outgoing::{CVRepository, CVRepositoryError};
use crate::cv::domain::entities::{CVInfo, VerifiableSection, Verification};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RecordVerificationError {
    #[error("CV not found")]
    CVNotFound,

    #[error("No {section} item with id `{item_id}`")]
    ItemNotFound {
        section: VerifiableSection,
        item_id: String,
    },

    #[error("CV was modified concurrently, reload and retry")]
    Conflict,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<CVRepositoryError> for RecordVerificationError {
    fn from(err: CVRepositoryError) -> Self {
        match err {
            CVRepositoryError::NotFound => RecordVerificationError::CVNotFound,
            CVRepositoryError::Conflict => RecordVerificationError::Conflict,
            CVRepositoryError::DatabaseError(msg) | CVRepositoryError::SerializationError(msg) => {
                RecordVerificationError::RepositoryError(msg)
            }
        }
    }
}

/// Issuer-side transitions on a single education, experience or award.
///
/// These are keyed by CV id only. The caller is the verification flow, not
/// the CV owner, so no ownership check applies here.
#[async_trait::async_trait]
pub trait IRecordVerificationUseCase: Send + Sync {
    /// Notes that a verification email went out to `issuer_email`.
    async fn mark_email_sent(
        &self,
        cv_id: Uuid,
        section: VerifiableSection,
        item_id: &str,
        issuer_email: &str,
    ) -> Result<CVInfo, RecordVerificationError>;

    /// Sets `verified` and moves `status` to `verified` together.
    async fn mark_verified(
        &self,
        cv_id: Uuid,
        section: VerifiableSection,
        item_id: &str,
    ) -> Result<CVInfo, RecordVerificationError>;
}

#[derive(Debug, Clone)]
pub struct RecordVerificationUseCase<R: CVRepository> {
    repository: R,
}

impl<R: CVRepository> RecordVerificationUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn transition<F>(
        &self,
        cv_id: Uuid,
        section: VerifiableSection,
        item_id: &str,
        apply: F,
    ) -> Result<CVInfo, RecordVerificationError>
    where
        F: FnOnce(&mut Verification) + Send,
    {
        let mut cv = self
            .repository
            .fetch_cv_by_id(cv_id)
            .await?
            .ok_or(RecordVerificationError::CVNotFound)?;

        match cv.verification_mut(section, item_id) {
            Some(verification) => apply(verification),
            None => {
                warn!(cv_id = %cv_id, section = %section, item_id, "Verification target missing");
                return Err(RecordVerificationError::ItemNotFound {
                    section,
                    item_id: item_id.to_string(),
                });
            }
        }

        // Conflict if the row changed since it was read.
        Ok(self
            .repository
            .update_cv(cv_id, cv.updated_at, cv.content())
            .await?)
    }
}

#[async_trait::async_trait]
impl<R> IRecordVerificationUseCase for RecordVerificationUseCase<R>
where
    R: CVRepository + Send + Sync,
{
    async fn mark_email_sent(
        &self,
        cv_id: Uuid,
        section: VerifiableSection,
        item_id: &str,
        issuer_email: &str,
    ) -> Result<CVInfo, RecordVerificationError> {
        let updated = self
            .transition(cv_id, section, item_id, |v| v.mark_email_sent(issuer_email))
            .await?;
        info!(cv_id = %cv_id, section = %section, item_id, "Verification email recorded");
        Ok(updated)
    }

    async fn mark_verified(
        &self,
        cv_id: Uuid,
        section: VerifiableSection,
        item_id: &str,
    ) -> Result<CVInfo, RecordVerificationError> {
        let updated = self
            .transition(cv_id, section, item_id, Verification::mark_verified)
            .await?;
        info!(cv_id = %cv_id, section = %section, item_id, "Item verified");
        Ok(updated)
    }
}
