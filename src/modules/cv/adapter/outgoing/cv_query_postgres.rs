use crate::cv::{
    application::ports::outgoing::{CVQuery, CVQueryError},
    domain::entities::{CVInfo, UserId},
};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use super::sea_orm_entity::{Column as CvColumn, Entity as CvEntity, Model as CvModel};

#[derive(Debug, Clone)]
pub struct CVQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CVQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: &CvModel) -> Result<CVInfo, CVQueryError> {
    model.to_domain().map_err(|e| {
        error!(cv_id = %model.id, error = %e, "Stored CV does not match the document shape");
        CVQueryError::MalformedDocument(format!("cv {}: {}", model.id, e))
    })
}

#[async_trait]
impl CVQuery for CVQueryPostgres {
    // Served by idx_cvs_user_id.
    async fn fetch_cvs_by_user_id(&self, user_id: UserId) -> Result<Vec<CVInfo>, CVQueryError> {
        let models: Vec<CvModel> = CvEntity::find()
            .filter(CvColumn::UserId.eq(user_id.value()))
            .order_by_asc(CvColumn::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|err| CVQueryError::DatabaseError(err.to_string()))?;

        models.iter().map(to_domain).collect()
    }

    async fn fetch_cv_by_id(&self, cv_id: Uuid) -> Result<Option<CVInfo>, CVQueryError> {
        let model: Option<CvModel> = CvEntity::find_by_id(cv_id)
            .one(&*self.db)
            .await
            .map_err(|err| CVQueryError::DatabaseError(err.to_string()))?;

        model.as_ref().map(to_domain).transpose()
    }
}
