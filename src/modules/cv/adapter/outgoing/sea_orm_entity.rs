use crate::cv::domain::entities::{CVInfo, CvContent, UserId};
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// One row per CV. Nested sections are stored as jsonb documents in their
// camelCase wire shape.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cvs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub personal: JsonValue,
    #[sea_orm(column_type = "JsonBinary")]
    pub educations: JsonValue,
    #[sea_orm(column_type = "JsonBinary")]
    pub experiences: JsonValue,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills: JsonValue,
    #[sea_orm(column_type = "JsonBinary")]
    pub projects: JsonValue,
    #[sea_orm(column_type = "JsonBinary")]
    pub awards: JsonValue,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Fails when a stored document no longer matches the domain shape.
    pub fn to_domain(&self) -> Result<CVInfo, serde_json::Error> {
        Ok(CVInfo {
            id: self.id,
            user_id: UserId::from(self.user_id),
            title: self.title.clone(),
            personal: serde_json::from_value(self.personal.clone())?,
            educations: serde_json::from_value(self.educations.clone())?,
            experiences: serde_json::from_value(self.experiences.clone())?,
            skills: serde_json::from_value(self.skills.clone())?,
            projects: serde_json::from_value(self.projects.clone())?,
            awards: serde_json::from_value(self.awards.clone())?,
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
        })
    }
}

impl ActiveModel {
    /// Active model for a brand new row owned by `user_id`.
    pub fn for_insert(user_id: UserId, content: &CvContent) -> Result<Self, serde_json::Error> {
        let now = Utc::now().fixed_offset();
        Ok(Self {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.value()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Self::with_content(content)?
        })
    }

    /// Active model replacing the content of row `cv_id`. Owner and
    /// `created_at` are left untouched.
    pub fn for_update(cv_id: Uuid, content: &CvContent) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Set(cv_id),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Self::with_content(content)?
        })
    }

    fn with_content(content: &CvContent) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: NotSet,
            user_id: NotSet,
            title: Set(content.title.clone()),
            personal: Set(serde_json::to_value(&content.personal)?),
            educations: Set(serde_json::to_value(&content.educations)?),
            experiences: Set(serde_json::to_value(&content.experiences)?),
            skills: Set(serde_json::to_value(&content.skills)?),
            projects: Set(serde_json::to_value(&content.projects)?),
            awards: Set(serde_json::to_value(&content.awards)?),
            created_at: NotSet,
            updated_at: NotSet,
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
