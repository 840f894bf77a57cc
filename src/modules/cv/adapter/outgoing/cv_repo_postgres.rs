use crate::cv::application::ports::outgoing::{CVRepository, CVRepositoryError};
use crate::cv::domain::entities::{CVInfo, CvContent, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::sea_orm_entity::{
    ActiveModel as CvActiveModel, Column as CvColumn, Entity as CvEntity, Model as CvModel,
};

#[derive(Debug, Clone)]
pub struct CVRepoPostgres {
    db: Arc<DatabaseConnection>,
}

impl CVRepoPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_error(err: DbErr) -> CVRepositoryError {
    error!(error = %err, "CV storage query failed");
    CVRepositoryError::DatabaseError(err.to_string())
}

fn to_domain(model: &CvModel) -> Result<CVInfo, CVRepositoryError> {
    model.to_domain().map_err(|e| {
        error!(cv_id = %model.id, error = %e, "Stored CV does not match the document shape");
        CVRepositoryError::SerializationError(e.to_string())
    })
}

fn serialization_error(err: serde_json::Error) -> CVRepositoryError {
    CVRepositoryError::SerializationError(err.to_string())
}

#[async_trait]
impl CVRepository for CVRepoPostgres {
    async fn fetch_cv_by_id(&self, cv_id: Uuid) -> Result<Option<CVInfo>, CVRepositoryError> {
        let model = CvEntity::find_by_id(cv_id)
            .one(&*self.db)
            .await
            .map_err(db_error)?;

        model.as_ref().map(to_domain).transpose()
    }

    async fn create_cv(
        &self,
        user_id: UserId,
        content: CvContent,
    ) -> Result<CVInfo, CVRepositoryError> {
        let active_model =
            CvActiveModel::for_insert(user_id, &content).map_err(serialization_error)?;

        let inserted: CvModel = CvEntity::insert(active_model)
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_error)?;

        debug!(cv_id = %inserted.id, user_id = %user_id, "CV row inserted");
        to_domain(&inserted)
    }

    async fn update_cv(
        &self,
        cv_id: Uuid,
        expected_updated_at: DateTime<Utc>,
        content: CvContent,
    ) -> Result<CVInfo, CVRepositoryError> {
        let active_model = CvActiveModel::for_update(cv_id, &content).map_err(serialization_error)?;

        let result = CvEntity::update(active_model)
            .filter(CvColumn::UpdatedAt.eq(expected_updated_at.fixed_offset()))
            .exec(&*self.db)
            .await;

        match result {
            Ok(updated) => to_domain(&updated),
            Err(DbErr::RecordNotUpdated) => {
                // Either the row is gone or its timestamp moved on.
                let still_there = CvEntity::find_by_id(cv_id)
                    .one(&*self.db)
                    .await
                    .map_err(db_error)?
                    .is_some();
                if still_there {
                    warn!(cv_id = %cv_id, "CV changed since it was read, update skipped");
                    Err(CVRepositoryError::Conflict)
                } else {
                    Err(CVRepositoryError::NotFound)
                }
            }
            Err(other) => Err(db_error(other)),
        }
    }

    async fn delete_cv(&self, cv_id: Uuid) -> Result<(), CVRepositoryError> {
        let result = CvEntity::delete_by_id(cv_id)
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(CVRepositoryError::NotFound);
        }

        debug!(cv_id = %cv_id, "CV row deleted");
        Ok(())
    }
}
