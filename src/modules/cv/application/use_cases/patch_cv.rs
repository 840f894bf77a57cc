use crate::cv::application::ports::outgoing::{CVRepository, CVRepositoryError};
use crate::cv::domain::drafts::{
    AwardDraft, CvDraft, EducationDraft, ExperienceDraft, PersonalDraft, ProjectDraft, SkillDraft,
};
use crate::cv::domain::entities::{CVInfo, UserId};
use crate::cv::domain::validation::CvValidationError;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

/// Partial update. A field left as `None` keeps the stored value; a list that
/// is present replaces the stored list as a whole.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchCVData {
    pub title: Option<String>,
    pub personal: Option<PersonalDraft>,
    pub educations: Option<Vec<EducationDraft>>,
    pub experiences: Option<Vec<ExperienceDraft>>,
    pub skills: Option<Vec<SkillDraft>>,
    pub projects: Option<Vec<ProjectDraft>>,
    pub awards: Option<Vec<AwardDraft>>,
}

impl PatchCVData {
    fn apply_to(self, mut draft: CvDraft) -> CvDraft {
        if self.title.is_some() {
            draft.title = self.title;
        }
        if self.personal.is_some() {
            draft.personal = self.personal;
        }
        if self.educations.is_some() {
            draft.educations = self.educations;
        }
        if self.experiences.is_some() {
            draft.experiences = self.experiences;
        }
        if self.skills.is_some() {
            draft.skills = self.skills;
        }
        if self.projects.is_some() {
            draft.projects = self.projects;
        }
        if self.awards.is_some() {
            draft.awards = self.awards;
        }
        draft
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PatchCVError {
    #[error(transparent)]
    Validation(#[from] CvValidationError),

    #[error("CV not found")]
    CVNotFound,

    #[error("CV was modified concurrently, reload and retry")]
    Conflict,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<CVRepositoryError> for PatchCVError {
    fn from(err: CVRepositoryError) -> Self {
        match err {
            CVRepositoryError::NotFound => PatchCVError::CVNotFound,
            CVRepositoryError::Conflict => PatchCVError::Conflict,
            CVRepositoryError::DatabaseError(msg) | CVRepositoryError::SerializationError(msg) => {
                PatchCVError::RepositoryError(msg)
            }
        }
    }
}

#[async_trait::async_trait]
pub trait IPatchCVUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        cv_id: Uuid,
        data: PatchCVData,
    ) -> Result<CVInfo, PatchCVError>;
}

#[derive(Debug, Clone)]
pub struct PatchCVUseCase<R: CVRepository> {
    repository: R,
}

impl<R: CVRepository> PatchCVUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl<R> IPatchCVUseCase for PatchCVUseCase<R>
where
    R: CVRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        cv_id: Uuid,
        data: PatchCVData,
    ) -> Result<CVInfo, PatchCVError> {
        let existing = self
            .repository
            .fetch_cv_by_id(cv_id)
            .await?
            .ok_or(PatchCVError::CVNotFound)?;

        if !existing.is_owned_by(user_id) {
            return Err(PatchCVError::CVNotFound);
        }

        // The merged document goes through the same rules as a create.
        let merged = data.apply_to(CvDraft::from(existing.content()));
        let content = merged.validate().inspect_err(|e| {
            warn!(cv_id = %cv_id, violations = e.violations.len(), "CV patch rejected: {}", e);
        })?;

        let updated = self
            .repository
            .update_cv(cv_id, existing.updated_at, content)
            .await
            .inspect_err(|e| {
                if matches!(e, CVRepositoryError::Conflict) {
                    warn!(cv_id = %cv_id, "CV patch lost a race with another write");
                }
            })?;

        info!(cv_id = %cv_id, user_id = %user_id, "CV patched");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::domain::drafts::DurationDraft;
    use crate::cv::domain::validation::ViolationKind;
    use crate::tests::support::cv_fixtures::sample_cv;
    use crate::tests::support::stubs::InMemoryCvStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_patch_title_keeps_everything_else() {
        let user_id = UserId::from(Uuid::new_v4());
        let cv = sample_cv(user_id);
        let store = InMemoryCvStore::with_cvs(vec![cv.clone()]);
        let use_case = PatchCVUseCase::new(store.clone());

        let patch = PatchCVData {
            title: Some("Principal Engineer".to_string()),
            ..Default::default()
        };

        let updated = use_case.execute(user_id, cv.id, patch).await.unwrap();

        assert_eq!(updated.title, "Principal Engineer");
        assert_eq!(updated.personal, cv.personal);
        assert_eq!(updated.educations, cv.educations);
        assert_eq!(updated.skills, cv.skills);
    }

    #[tokio::test]
    async fn test_patch_list_replaces_whole_list() {
        let user_id = UserId::from(Uuid::new_v4());
        let cv = sample_cv(user_id);
        let store = InMemoryCvStore::with_cvs(vec![cv.clone()]);
        let use_case = PatchCVUseCase::new(store);

        let patch = PatchCVData {
            projects: Some(vec![ProjectDraft {
                id: Some("p-9".to_string()),
                project_name: Some("Ledger".to_string()),
                duration: Some(DurationDraft {
                    from: Some("2023".to_string()),
                    to: None,
                }),
                skills: Some("Rust, Postgres".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let updated = use_case.execute(user_id, cv.id, patch).await.unwrap();

        assert_eq!(updated.projects.len(), 1);
        assert_eq!(updated.projects[0].id, "p-9");
        assert_eq!(updated.projects[0].project_url, "");
        assert_eq!(updated.projects[0].duration.to, "");
        assert!(!updated.projects[0].self_attested);
    }

    #[tokio::test]
    async fn test_patch_revalidates_merged_document() {
        let user_id = UserId::from(Uuid::new_v4());
        let cv = sample_cv(user_id);
        let store = InMemoryCvStore::with_cvs(vec![cv.clone()]);
        let use_case = PatchCVUseCase::new(store.clone());

        let patch = PatchCVData {
            educations: Some(vec![EducationDraft {
                id: Some("e-2".to_string()),
                level: Some("Master".to_string()),
                board_name_or_degree: Some("M.Sc.".to_string()),
                institution_name: Some("Tech".to_string()),
                gpa: Some("3.9".to_string()),
                duration: Some(DurationDraft::default()),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let result = use_case.execute(user_id, cv.id, patch).await;

        match result {
            Err(PatchCVError::Validation(err)) => {
                assert_eq!(err.paths(), vec!["educations.0.duration.from"]);
                assert_eq!(err.violations[0].kind, ViolationKind::Required);
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert_eq!(store.get(cv.id).unwrap(), cv);
    }

    #[tokio::test]
    async fn test_patch_does_not_undo_a_concurrent_verification() {
        let user_id = UserId::from(Uuid::new_v4());
        let cv = sample_cv(user_id);
        let store = InMemoryCvStore::with_cvs(vec![cv.clone()]);
        store.interleave_write_after_next_read(|stored| {
            stored.educations[0].verification.mark_verified();
        });
        let use_case = PatchCVUseCase::new(store.clone());

        let patch = PatchCVData {
            title: Some("Principal Engineer".to_string()),
            ..Default::default()
        };
        let result = use_case.execute(user_id, cv.id, patch).await;

        assert!(matches!(result, Err(PatchCVError::Conflict)));
        let stored = store.get(cv.id).unwrap();
        assert_eq!(stored.title, cv.title);
        assert!(stored.educations[0].verification.verified);
    }

    #[tokio::test]
    async fn test_patch_other_owner_is_not_found() {
        let cv = sample_cv(UserId::from(Uuid::new_v4()));
        let store = InMemoryCvStore::with_cvs(vec![cv.clone()]);
        let use_case = PatchCVUseCase::new(store);

        let result = use_case
            .execute(UserId::from(Uuid::new_v4()), cv.id, PatchCVData::default())
            .await;

        assert!(matches!(result, Err(PatchCVError::CVNotFound)));
    }

    #[test]
    fn test_patch_data_reads_camel_case_payload() {
        let patch: PatchCVData = serde_json::from_value(json!({
            "title": "New title",
            "personal": { "fullName": "Grace Hopper" }
        }))
        .unwrap();

        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert_eq!(
            patch.personal.and_then(|p| p.full_name).as_deref(),
            Some("Grace Hopper")
        );
        assert!(patch.skills.is_none());
    }
}
