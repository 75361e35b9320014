use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const DEFAULT_EXPERIENCE_LEVEL: &str = "mid-level";
const DEFAULT_QUESTION_COUNT: u32 = 5;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/interview/questions`. Everything optional on the wire;
/// `validate` enforces what is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsRequest {
    pub role: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<String>,
    pub question_count: Option<u32>,
}

/// Body of `POST /api/interview/feedback`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub role: Option<String>,
    pub industry: Option<String>,
}

/// A generated interview question.
///
/// `kind` is one of behavioral / technical / situational, or "general" when
/// the question was recovered from free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
}

/// Coaching feedback on one answer. `score` is 1–10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub sample_answer: String,
    pub overall_feedback: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: Feedback,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated inputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionsInput {
    pub role: String,
    pub industry: String,
    pub experience_level: String,
    /// Forwarded to the prompt as-is; no upper bound.
    pub question_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackInput {
    pub question: String,
    pub answer: String,
    pub role: Option<String>,
    pub industry: Option<String>,
}

impl QuestionsRequest {
    pub fn validate(self) -> Result<QuestionsInput, AppError> {
        let (Some(role), Some(industry)) = (present(self.role), present(self.industry)) else {
            return Err(AppError::Validation(
                "Please provide role and industry".to_string(),
            ));
        };

        Ok(QuestionsInput {
            role,
            industry,
            experience_level: present(self.experience_level)
                .unwrap_or_else(|| DEFAULT_EXPERIENCE_LEVEL.to_string()),
            question_count: self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
        })
    }
}

impl FeedbackRequest {
    pub fn validate(self) -> Result<FeedbackInput, AppError> {
        let (Some(question), Some(answer)) = (present(self.question), present(self.answer)) else {
            return Err(AppError::Validation(
                "Please provide both question and answer".to_string(),
            ));
        };

        Ok(FeedbackInput {
            question,
            answer,
            role: present(self.role),
            industry: present(self.industry),
        })
    }
}

/// Blank strings count as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
