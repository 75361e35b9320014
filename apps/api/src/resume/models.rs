use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::models::present;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub position: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    /// Absent means current role.
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub field: Option<String>,
    pub school: Option<String>,
    pub year: Option<String>,
    pub gpa: Option<String>,
}

/// Body of `POST /api/resume/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    /// Markdown with `##` section headers.
    pub resume: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated input
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub position: String,
    pub company: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Degree {
    pub degree: String,
    pub field: String,
    pub school: String,
    pub year: String,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeInput {
    pub contact: Contact,
    pub experience: Vec<Role>,
    pub education: Vec<Degree>,
    pub skills: Vec<String>,
}

impl ResumeRequest {
    /// Requires contact basics plus at least one experience, education and
    /// skill entry. Incomplete list entries are dropped, not rejected.
    pub fn validate(self) -> Result<ResumeInput, AppError> {
        let info = self.personal_info.unwrap_or_default();
        let (Some(name), Some(email), Some(phone), Some(location)) = (
            present(info.name),
            present(info.email),
            present(info.phone),
            present(info.location),
        ) else {
            return Err(AppError::Validation(
                "Please provide name, email, phone and location".to_string(),
            ));
        };

        let experience: Vec<Role> = self
            .experience
            .into_iter()
            .filter_map(|e| {
                Some(Role {
                    position: present(e.position)?,
                    company: present(e.company)?,
                    start_date: present(e.start_date).unwrap_or_default(),
                    end_date: present(e.end_date),
                    description: present(e.description).unwrap_or_default(),
                })
            })
            .collect();

        let education: Vec<Degree> = self
            .education
            .into_iter()
            .filter_map(|e| {
                Some(Degree {
                    degree: present(e.degree)?,
                    school: present(e.school)?,
                    field: present(e.field).unwrap_or_default(),
                    year: present(e.year).unwrap_or_default(),
                    gpa: present(e.gpa),
                })
            })
            .collect();

        let skills: Vec<String> = self
            .skills
            .into_iter()
            .filter_map(|s| present(Some(s)))
            .collect();

        if experience.is_empty() {
            return Err(AppError::Validation(
                "Please add at least one work experience entry".to_string(),
            ));
        }
        if education.is_empty() {
            return Err(AppError::Validation(
                "Please add at least one education entry".to_string(),
            ));
        }
        if skills.is_empty() {
            return Err(AppError::Validation(
                "Please add at least one skill".to_string(),
            ));
        }

        Ok(ResumeInput {
            contact: Contact {
                name,
                email,
                phone,
                location,
                linkedin: present(info.linkedin),
                website: present(info.website),
                summary: present(info.summary),
            },
            experience,
            education,
            skills,
        })
    }
}
