use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Reference to the owning user account. The account lives outside this
/// crate; a CV only remembers its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
}

impl VerificationStatus {
    pub const ALLOWED: &'static [&'static str] = &["pending", "verified"];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Duration {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

/// Issuer verification state shared by educations, experiences and awards.
///
/// `verified` and `status` are stored side by side because existing readers
/// consume both. Nothing derives one from the other on write; the transition
/// methods below are the only code that changes them and they keep the pair
/// in step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(default)]
    pub self_attested: bool,
    #[serde(default)]
    pub doc_uri: String,
    #[serde(default)]
    pub issuer_email_id: String,
    #[serde(default)]
    pub is_email_send: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub status: VerificationStatus,
}

impl Verification {
    /// Records that a verification request went out to `issuer_email`.
    pub fn mark_email_sent(&mut self, issuer_email: &str) {
        self.issuer_email_id = issuer_email.to_string();
        self.is_email_send = true;
    }

    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.status = VerificationStatus::Verified;
    }

    pub fn is_consistent(&self) -> bool {
        self.verified == (self.status == VerificationStatus::Verified)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub level: String,
    pub board_name_or_degree: String,
    pub institution_name: String,
    pub gpa: String,
    pub duration: Duration,
    #[serde(flatten)]
    pub verification: Verification,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company_name: String,
    pub job_role: String,
    pub duration: Duration,
    pub skills: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub verification: Verification,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub skill_name: String,
    pub level: String,
    #[serde(default)]
    pub self_attested: bool,
    #[serde(default)]
    pub endores_by: String,
    #[serde(default)]
    pub endores_through: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_name: String,
    #[serde(default)]
    pub project_url: String,
    pub duration: Duration,
    pub skills: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub self_attested: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub id: String,
    pub level: String,
    pub name: String,
    pub organisation: String,
    pub duration: Duration,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub verification: Verification,
}

/// Everything the owner can write. Only produced by draft validation, so a
/// value of this type already satisfies the schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CvContent {
    pub title: String,
    pub personal: Personal,
    pub educations: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub awards: Vec<Award>,
}

/// A stored CV aggregate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CVInfo {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub personal: Personal,
    pub educations: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub awards: Vec<Award>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CVInfo {
    pub fn content(&self) -> CvContent {
        CvContent {
            title: self.title.clone(),
            personal: self.personal.clone(),
            educations: self.educations.clone(),
            experiences: self.experiences.clone(),
            skills: self.skills.clone(),
            projects: self.projects.clone(),
            awards: self.awards.clone(),
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Verification state of one item in a verifiable list.
    pub fn verification_mut(
        &mut self,
        section: VerifiableSection,
        item_id: &str,
    ) -> Option<&mut Verification> {
        match section {
            VerifiableSection::Education => self
                .educations
                .iter_mut()
                .find(|e| e.id == item_id)
                .map(|e| &mut e.verification),
            VerifiableSection::Experience => self
                .experiences
                .iter_mut()
                .find(|e| e.id == item_id)
                .map(|e| &mut e.verification),
            VerifiableSection::Award => self
                .awards
                .iter_mut()
                .find(|a| a.id == item_id)
                .map(|a| &mut a.verification),
        }
    }
}

/// Lists whose items go through issuer verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerifiableSection {
    Education,
    Experience,
    Award,
}

impl VerifiableSection {
    pub fn field_name(&self) -> &'static str {
        match self {
            VerifiableSection::Education => "educations",
            VerifiableSection::Experience => "experiences",
            VerifiableSection::Award => "awards",
        }
    }
}

impl fmt::Display for VerifiableSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
