use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use crate::cv::domain::drafts::{
    CvDraft, DurationDraft, EducationDraft, PersonalDraft, SkillDraft,
};
use crate::cv::domain::entities::{CVInfo, UserId};

pub fn sample_personal() -> PersonalDraft {
    PersonalDraft {
        full_name: Some("Ada Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        phone: Some("+44 20 7946 0000".to_string()),
        city: Some("London".to_string()),
        github: Some("https://github.com/ada".to_string()),
        ..Default::default()
    }
}

fn skill(id: &str, name: &str, level: &str) -> SkillDraft {
    SkillDraft {
        id: Some(id.to_string()),
        skill_name: Some(name.to_string()),
        level: Some(level.to_string()),
        ..Default::default()
    }
}

/// Title and personal block only. Every list is left out.
pub fn minimal_draft() -> CvDraft {
    CvDraft {
        title: Some("Backend Developer".to_string()),
        personal: Some(sample_personal()),
        ..Default::default()
    }
}

pub fn sample_draft() -> CvDraft {
    CvDraft {
        title: Some("Senior Rust Engineer".to_string()),
        personal: Some(sample_personal()),
        educations: Some(vec![EducationDraft {
            id: Some("edu-1".to_string()),
            level: Some("Bachelor".to_string()),
            board_name_or_degree: Some("B.Sc. Mathematics".to_string()),
            institution_name: Some("University of London".to_string()),
            gpa: Some("3.8".to_string()),
            duration: Some(DurationDraft {
                from: Some("2010".to_string()),
                to: Some("2014".to_string()),
            }),
            ..Default::default()
        }]),
        skills: Some(vec![
            skill("s-1", "Rust", "Expert"),
            skill("s-2", "PostgreSQL", "Advanced"),
            skill("s-3", "Kubernetes", "Intermediate"),
        ]),
        ..Default::default()
    }
}

/// A stored CV built from [`sample_draft`].
pub fn sample_cv(user_id: UserId) -> CVInfo {
    let content = sample_draft().validate().expect("sample draft is valid");
    let now = Utc::now();
    CVInfo {
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
    }
}

/// The same document as [`sample_draft`] in its wire shape.
pub fn sample_payload() -> JsonValue {
    json!({
        "title": "Senior Rust Engineer",
        "personal": {
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0000",
            "city": "London",
            "github": "https://github.com/ada"
        },
        "educations": [{
            "id": "edu-1",
            "level": "Bachelor",
            "boardNameOrDegree": "B.Sc. Mathematics",
            "institutionName": "University of London",
            "gpa": "3.8",
            "duration": { "from": "2010", "to": "2014" }
        }],
        "skills": [
            { "id": "s-1", "skillName": "Rust", "level": "Expert" },
            { "id": "s-2", "skillName": "PostgreSQL", "level": "Advanced" },
            { "id": "s-3", "skillName": "Kubernetes", "level": "Intermediate" }
        ]
    })
}
