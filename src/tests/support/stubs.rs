use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cv::application::ports::outgoing::{
    CVQuery, CVQueryError, CVRepository, CVRepositoryError, UserQuery, UserQueryError,
};
use crate::cv::domain::entities::{CVInfo, CvContent, UserId};

type InterleavedWrite = Box<dyn FnOnce(&mut CVInfo) + Send>;

#[derive(Default)]
struct StoreState {
    cvs: Vec<CVInfo>,
    write_error: Option<CVRepositoryError>,
    read_error: Option<String>,
    interleaved: Option<InterleavedWrite>,
}

/// Shared in-memory CV storage implementing both the repository and the
/// query port. Clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryCvStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryCvStore {
    pub fn with_cvs(cvs: Vec<CVInfo>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().cvs = cvs;
        store
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().cvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, cv_id: Uuid) -> Option<CVInfo> {
        self.state
            .lock()
            .unwrap()
            .cvs
            .iter()
            .find(|cv| cv.id == cv_id)
            .cloned()
    }

    /// Every later create, update and delete fails with `err`.
    pub fn fail_writes_with(&self, err: CVRepositoryError) {
        self.state.lock().unwrap().write_error = Some(err);
    }

    /// Every later read fails with a database error carrying `msg`.
    pub fn fail_reads_with(&self, msg: &str) {
        self.state.lock().unwrap().read_error = Some(msg.to_string());
    }

    /// Applies `write` to the stored CV right after the next repository read
    /// hands out its snapshot, as if another request saved in between.
    pub fn interleave_write_after_next_read<F>(&self, write: F)
    where
        F: FnOnce(&mut CVInfo) + Send + 'static,
    {
        self.state.lock().unwrap().interleaved = Some(Box::new(write));
    }

    fn check_write(&self) -> Result<(), CVRepositoryError> {
        match &self.state.lock().unwrap().write_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn read_error(&self) -> Option<String> {
        self.state.lock().unwrap().read_error.clone()
    }
}

#[async_trait]
impl CVRepository for InMemoryCvStore {
    async fn fetch_cv_by_id(&self, cv_id: Uuid) -> Result<Option<CVInfo>, CVRepositoryError> {
        if let Some(msg) = self.read_error() {
            return Err(CVRepositoryError::DatabaseError(msg));
        }
        let snapshot = self.get(cv_id);

        let mut state = self.state.lock().unwrap();
        if let Some(write) = state.interleaved.take() {
            if let Some(cv) = state.cvs.iter_mut().find(|cv| cv.id == cv_id) {
                write(cv);
                cv.updated_at = Utc::now().max(cv.updated_at + chrono::Duration::microseconds(1));
            }
        }
        Ok(snapshot)
    }

    async fn create_cv(
        &self,
        user_id: UserId,
        content: CvContent,
    ) -> Result<CVInfo, CVRepositoryError> {
        self.check_write()?;
        let now = Utc::now();
        let cv = CVInfo {
            id: Uuid::new_v4(),
            user_id,
            title: content.title,
            personal: content.personal,
            educations: content.educations,
            experiences: content.experiences,
            skills: content.skills,
            projects: content.projects,
            awards: content.awards,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().cvs.push(cv.clone());
        Ok(cv)
    }

    async fn update_cv(
        &self,
        cv_id: Uuid,
        expected_updated_at: DateTime<Utc>,
        content: CvContent,
    ) -> Result<CVInfo, CVRepositoryError> {
        self.check_write()?;
        let mut state = self.state.lock().unwrap();
        let cv = state
            .cvs
            .iter_mut()
            .find(|cv| cv.id == cv_id)
            .ok_or(CVRepositoryError::NotFound)?;
        if cv.updated_at != expected_updated_at {
            return Err(CVRepositoryError::Conflict);
        }
        cv.title = content.title;
        cv.personal = content.personal;
        cv.educations = content.educations;
        cv.experiences = content.experiences;
        cv.skills = content.skills;
        cv.projects = content.projects;
        cv.awards = content.awards;
        cv.updated_at = Utc::now();
        Ok(cv.clone())
    }

    async fn delete_cv(&self, cv_id: Uuid) -> Result<(), CVRepositoryError> {
        self.check_write()?;
        let mut state = self.state.lock().unwrap();
        let before = state.cvs.len();
        state.cvs.retain(|cv| cv.id != cv_id);
        if state.cvs.len() == before {
            return Err(CVRepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CVQuery for InMemoryCvStore {
    async fn fetch_cvs_by_user_id(&self, user_id: UserId) -> Result<Vec<CVInfo>, CVQueryError> {
        if let Some(msg) = self.read_error() {
            return Err(CVQueryError::DatabaseError(msg));
        }
        let mut cvs: Vec<CVInfo> = self
            .state
            .lock()
            .unwrap()
            .cvs
            .iter()
            .filter(|cv| cv.is_owned_by(user_id))
            .cloned()
            .collect();
        cvs.sort_by_key(|cv| cv.created_at);
        Ok(cvs)
    }

    async fn fetch_cv_by_id(&self, cv_id: Uuid) -> Result<Option<CVInfo>, CVQueryError> {
        if let Some(msg) = self.read_error() {
            return Err(CVQueryError::DatabaseError(msg));
        }
        Ok(self.get(cv_id))
    }
}

/// Fixed set of known user accounts.
pub struct StubUserQuery {
    users: HashSet<UserId>,
    error: Option<UserQueryError>,
}

impl StubUserQuery {
    pub fn with_user(user_id: UserId) -> Self {
        Self {
            users: HashSet::from([user_id]),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            users: HashSet::new(),
            error: None,
        }
    }

    pub fn failing(err: UserQueryError) -> Self {
        Self {
            users: HashSet::new(),
            error: Some(err),
        }
    }
}

#[async_trait]
impl UserQuery for StubUserQuery {
    async fn exists(&self, user_id: UserId) -> Result<bool, UserQueryError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.users.contains(&user_id)),
        }
    }
}
