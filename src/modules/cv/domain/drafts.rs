//! Unvalidated CV payloads.
//!
//! Every field is optional at this stage so that a missing value turns into a
//! path-qualified violation instead of a bare deserialization failure.
//! `CvDraft::validate` applies the schema defaults and produces a [`CvContent`].

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_path_to_error::{Path, Segment};
use std::fmt;

use super::entities::{
    Award, CvContent, Duration, Education, Experience, Personal, Project, Skill, Verification,
    VerificationStatus,
};
use super::validation::{CvValidationError, Validator, ViolationKind};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CvDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    pub personal: Option<PersonalDraft>,
    pub educations: Option<Vec<EducationDraft>>,
    pub experiences: Option<Vec<ExperienceDraft>>,
    pub skills: Option<Vec<SkillDraft>>,
    pub projects: Option<Vec<ProjectDraft>>,
    pub awards: Option<Vec<AwardDraft>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub to: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub img_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDraft {
    pub self_attested: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub doc_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issuer_email_id: Option<String>,
    pub is_email_send: Option<bool>,
    pub verified: Option<bool>,
    /// Kept as raw text so an unknown literal can be reported with its path.
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EducationDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub board_name_or_degree: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gpa: Option<String>,
    pub duration: Option<DurationDraft>,
    #[serde(flatten)]
    pub verification: VerificationDraft,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_role: Option<String>,
    pub duration: Option<DurationDraft>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub verification: VerificationDraft,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub skill_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub level: Option<String>,
    pub self_attested: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub endores_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub endores_through: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub project_url: Option<String>,
    pub duration: Option<DurationDraft>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    pub self_attested: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AwardDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub organisation: Option<String>,
    pub duration: Option<DurationDraft>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub verification: VerificationDraft,
}

impl CvDraft {
    /// Reads a JSON payload. A value of the wrong shape (a string where a list
    /// belongs, text where a flag belongs) is reported as a validation failure
    /// at the path of that value.
    pub fn from_json(value: JsonValue) -> Result<Self, CvValidationError> {
        serde_path_to_error::deserialize(value).map_err(|e| {
            let path = dotted_path(e.path());
            CvValidationError::single(path, ViolationKind::InvalidType(e.into_inner().to_string()))
        })
    }

    pub fn validate(self) -> Result<CvContent, CvValidationError> {
        let mut v = Validator::new();

        let title = v.required_text(self.title, "title");
        let personal = match v.required(self.personal, "personal") {
            Some(p) => p.validate(&mut v, "personal"),
            None => empty_personal(),
        };

        let educations: Vec<Education> = self
            .educations
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.validate(&mut v, &format!("educations.{i}")))
            .collect();
        let experiences: Vec<Experience> = self
            .experiences
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.validate(&mut v, &format!("experiences.{i}")))
            .collect();
        let skills: Vec<Skill> = self
            .skills
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.validate(&mut v, &format!("skills.{i}")))
            .collect();
        let projects: Vec<Project> = self
            .projects
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.validate(&mut v, &format!("projects.{i}")))
            .collect();
        let awards: Vec<Award> = self
            .awards
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.validate(&mut v, &format!("awards.{i}")))
            .collect();

        v.unique_ids("educations", educations.iter().map(|e| e.id.as_str()));
        v.unique_ids("experiences", experiences.iter().map(|e| e.id.as_str()));
        v.unique_ids("skills", skills.iter().map(|s| s.id.as_str()));
        v.unique_ids("projects", projects.iter().map(|p| p.id.as_str()));
        v.unique_ids("awards", awards.iter().map(|a| a.id.as_str()));

        v.finish(CvContent {
            title,
            personal,
            educations,
            experiences,
            skills,
            projects,
            awards,
        })
    }
}

impl PersonalDraft {
    fn validate(self, v: &mut Validator, path: &str) -> Personal {
        Personal {
            full_name: v.required_text(self.full_name, &format!("{path}.fullName")),
            email: v.required_text(self.email, &format!("{path}.email")),
            phone: v.required_text(self.phone, &format!("{path}.phone")),
            city: v.required_text(self.city, &format!("{path}.city")),
            linkedin: self.linkedin,
            github: self.github,
            summary: self.summary,
            img_url: self.img_url,
        }
    }
}

/// `educations.0.gpa` style path; `$` for the payload itself.
fn dotted_path(path: &Path) -> String {
    let segments: Vec<String> = path
        .iter()
        .filter_map(|segment| match segment {
            Segment::Seq { index } => Some(index.to_string()),
            Segment::Map { key } => Some(key.clone()),
            Segment::Enum { variant } => Some(variant.clone()),
            Segment::Unknown => None,
        })
        .collect();

    if segments.is_empty() {
        "$".to_string()
    } else {
        segments.join(".")
    }
}

/// Text fields also take numbers and booleans, kept in their JSON spelling
/// (`3.8` is stored as `"3.8"`). `null` reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("text, a number or a boolean")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_option(TextVisitor)
}

fn empty_personal() -> Personal {
    Personal {
        full_name: String::new(),
        email: String::new(),
        phone: String::new(),
        city: String::new(),
        linkedin: None,
        github: None,
        summary: None,
        img_url: None,
    }
}

fn validate_duration(draft: Option<DurationDraft>, v: &mut Validator, path: &str) -> Duration {
    match v.required(draft, path) {
        Some(d) => Duration {
            from: v.required_text(d.from, &format!("{path}.from")),
            to: d.to.unwrap_or_default(),
        },
        None => Duration {
            from: String::new(),
            to: String::new(),
        },
    }
}

impl VerificationDraft {
    fn validate(self, v: &mut Validator, path: &str) -> Verification {
        Verification {
            self_attested: self.self_attested.unwrap_or(false),
            doc_uri: self.doc_uri.unwrap_or_default(),
            issuer_email_id: self.issuer_email_id.unwrap_or_default(),
            is_email_send: self.is_email_send.unwrap_or(false),
            verified: self.verified.unwrap_or(false),
            status: v.enum_value::<VerificationStatus>(self.status, &format!("{path}.status")),
        }
    }
}

impl EducationDraft {
    fn validate(self, v: &mut Validator, path: &str) -> Education {
        Education {
            id: v.required_text(self.id, &format!("{path}.id")),
            level: v.required_text(self.level, &format!("{path}.level")),
            board_name_or_degree: v.required_text(
                self.board_name_or_degree,
                &format!("{path}.boardNameOrDegree"),
            ),
            institution_name: v
                .required_text(self.institution_name, &format!("{path}.institutionName")),
            gpa: v.required_text(self.gpa, &format!("{path}.gpa")),
            duration: validate_duration(self.duration, v, &format!("{path}.duration")),
            verification: self.verification.validate(v, path),
        }
    }
}

impl ExperienceDraft {
    fn validate(self, v: &mut Validator, path: &str) -> Experience {
        Experience {
            id: v.required_text(self.id, &format!("{path}.id")),
            company_name: v.required_text(self.company_name, &format!("{path}.companyName")),
            job_role: v.required_text(self.job_role, &format!("{path}.jobRole")),
            duration: validate_duration(self.duration, v, &format!("{path}.duration")),
            skills: v.required_text(self.skills, &format!("{path}.skills")),
            description: self.description.unwrap_or_default(),
            verification: self.verification.validate(v, path),
        }
    }
}

impl SkillDraft {
    fn validate(self, v: &mut Validator, path: &str) -> Skill {
        Skill {
            id: v.required_text(self.id, &format!("{path}.id")),
            skill_name: v.required_text(self.skill_name, &format!("{path}.skillName")),
            level: v.required_text(self.level, &format!("{path}.level")),
            self_attested: self.self_attested.unwrap_or(false),
            endores_by: self.endores_by.unwrap_or_default(),
            endores_through: self.endores_through.unwrap_or_default(),
        }
    }
}

impl ProjectDraft {
    fn validate(self, v: &mut Validator, path: &str) -> Project {
        Project {
            id: v.required_text(self.id, &format!("{path}.id")),
            project_name: v.required_text(self.project_name, &format!("{path}.projectName")),
            project_url: self.project_url.unwrap_or_default(),
            duration: validate_duration(self.duration, v, &format!("{path}.duration")),
            skills: v.required_text(self.skills, &format!("{path}.skills")),
            description: self.description.unwrap_or_default(),
            self_attested: self.self_attested.unwrap_or(false),
        }
    }
}

impl AwardDraft {
    fn validate(self, v: &mut Validator, path: &str) -> Award {
        Award {
            id: v.required_text(self.id, &format!("{path}.id")),
            level: v.required_text(self.level, &format!("{path}.level")),
            name: v.required_text(self.name, &format!("{path}.name")),
            organisation: v.required_text(self.organisation, &format!("{path}.organisation")),
            duration: validate_duration(self.duration, v, &format!("{path}.duration")),
            description: self.description.unwrap_or_default(),
            verification: self.verification.validate(v, path),
        }
    }
}

// ---------------------------------------------------------------------------
// Stored values back to drafts, used when a patch is merged over a stored CV
// ---------------------------------------------------------------------------

impl From<Duration> for DurationDraft {
    fn from(d: Duration) -> Self {
        Self {
            from: Some(d.from),
            to: Some(d.to),
        }
    }
}

impl From<Personal> for PersonalDraft {
    fn from(p: Personal) -> Self {
        Self {
            full_name: Some(p.full_name),
            email: Some(p.email),
            phone: Some(p.phone),
            city: Some(p.city),
            linkedin: p.linkedin,
            github: p.github,
            summary: p.summary,
            img_url: p.img_url,
        }
    }
}

impl From<Verification> for VerificationDraft {
    fn from(v: Verification) -> Self {
        Self {
            self_attested: Some(v.self_attested),
            doc_uri: Some(v.doc_uri),
            issuer_email_id: Some(v.issuer_email_id),
            is_email_send: Some(v.is_email_send),
            verified: Some(v.verified),
            status: Some(v.status.as_str().to_string()),
        }
    }
}

impl From<Education> for EducationDraft {
    fn from(e: Education) -> Self {
        Self {
            id: Some(e.id),
            level: Some(e.level),
            board_name_or_degree: Some(e.board_name_or_degree),
            institution_name: Some(e.institution_name),
            gpa: Some(e.gpa),
            duration: Some(e.duration.into()),
            verification: e.verification.into(),
        }
    }
}

impl From<Experience> for ExperienceDraft {
    fn from(e: Experience) -> Self {
        Self {
            id: Some(e.id),
            company_name: Some(e.company_name),
            job_role: Some(e.job_role),
            duration: Some(e.duration.into()),
            skills: Some(e.skills),
            description: Some(e.description),
            verification: e.verification.into(),
        }
    }
}

impl From<Skill> for SkillDraft {
    fn from(s: Skill) -> Self {
        Self {
            id: Some(s.id),
            skill_name: Some(s.skill_name),
            level: Some(s.level),
            self_attested: Some(s.self_attested),
            endores_by: Some(s.endores_by),
            endores_through: Some(s.endores_through),
        }
    }
}

impl From<Project> for ProjectDraft {
    fn from(p: Project) -> Self {
        Self {
            id: Some(p.id),
            project_name: Some(p.project_name),
            project_url: Some(p.project_url),
            duration: Some(p.duration.into()),
            skills: Some(p.skills),
            description: Some(p.description),
            self_attested: Some(p.self_attested),
        }
    }
}

impl From<Award> for AwardDraft {
    fn from(a: Award) -> Self {
        Self {
            id: Some(a.id),
            level: Some(a.level),
            name: Some(a.name),
            organisation: Some(a.organisation),
            duration: Some(a.duration.into()),
            description: Some(a.description),
            verification: a.verification.into(),
        }
    }
}

impl From<CvContent> for CvDraft {
    fn from(c: CvContent) -> Self {
        Self {
            title: Some(c.title),
            personal: Some(c.personal.into()),
            educations: Some(c.educations.into_iter().map(Into::into).collect()),
            experiences: Some(c.experiences.into_iter().map(Into::into).collect()),
            skills: Some(c.skills.into_iter().map(Into::into).collect()),
            projects: Some(c.projects.into_iter().map(Into::into).collect()),
            awards: Some(c.awards.into_iter().map(Into::into).collect()),
        }
    }
}
