//! Prompt builders for the interview features.
//! Temperature and output caps are fixed policy, not tuned per request.

use crate::interview::models::{FeedbackInput, QuestionsInput};
use crate::llm_client::GenerationRequest;

pub const TEMPERATURE: f32 = 0.7;
pub const QUESTIONS_MAX_OUTPUT: u32 = 2000;
pub const FEEDBACK_MAX_OUTPUT: u32 = 1500;

pub const QUESTIONS_SYSTEM: &str = "You are an expert interview coach. \
    Generate relevant, realistic interview questions that help candidates prepare effectively.";

pub const FEEDBACK_SYSTEM: &str = "You are an expert interview coach providing constructive, \
    helpful feedback to help candidates improve their interview skills.";

pub fn questions_request(input: &QuestionsInput) -> GenerationRequest {
    let user_prompt = format!(
        r#"Generate {count} interview questions for a {level} {role} position in the {industry} industry.

The questions should be:
1. Relevant to the role and industry
2. A mix of behavioral, technical, and situational questions
3. Appropriate for the experience level
4. Challenging but fair

Format the response as a JSON array of question objects with this structure:
[
  {{
    "id": 1,
    "question": "Question text here",
    "type": "behavioral|technical|situational",
    "category": "leadership|problem-solving|communication|technical-skills|culture-fit"
  }}
]

Return ONLY the JSON array, no additional text or markdown."#,
        count = input.question_count,
        level = input.experience_level,
        role = input.role,
        industry = input.industry,
    );

    GenerationRequest {
        system_instruction: QUESTIONS_SYSTEM.to_string(),
        user_prompt,
        temperature: TEMPERATURE,
        max_output_size: Some(QUESTIONS_MAX_OUTPUT),
    }
}

pub fn feedback_request(input: &FeedbackInput) -> GenerationRequest {
    let mut context = String::new();
    if let Some(role) = &input.role {
        context.push_str(&format!("ROLE: {role}\n"));
    }
    if let Some(industry) = &input.industry {
        context.push_str(&format!("INDUSTRY: {industry}\n"));
    }

    let user_prompt = format!(
        r#"You are an expert interview coach providing feedback on an interview answer.

INTERVIEW QUESTION:
{question}

CANDIDATE'S ANSWER:
{answer}

{context}
Provide constructive feedback in the following JSON format:
{{
  "score": 1-10,
  "strengths": ["strength1", "strength2"],
  "improvements": ["suggestion1", "suggestion2"],
  "sampleAnswer": "A better example answer...",
  "overallFeedback": "Overall assessment..."
}}

Be constructive and helpful. Return ONLY the JSON object, no additional text or markdown."#,
        question = input.question,
        answer = input.answer,
    );

    GenerationRequest {
        system_instruction: FEEDBACK_SYSTEM.to_string(),
        user_prompt,
        temperature: TEMPERATURE,
        max_output_size: Some(FEEDBACK_MAX_OUTPUT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions_input() -> QuestionsInput {
        QuestionsInput {
            role: "Data Engineer".into(),
            industry: "Logistics".into(),
            experience_level: "senior".into(),
            question_count: 7,
        }
    }

    #[test]
    fn test_questions_prompt_mentions_inputs_and_schema() {
        let request = questions_request(&questions_input());
        assert!(request
            .user_prompt
            .starts_with("Generate 7 interview questions for a senior Data Engineer position in the Logistics industry."));
        assert!(request.user_prompt.contains("\"type\": \"behavioral|technical|situational\""));
        assert!(request.user_prompt.contains("Return ONLY the JSON array"));
        assert_eq!(request.max_output_size, Some(2000));
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.system_instruction, QUESTIONS_SYSTEM);
    }

    #[test]
    fn test_feedback_prompt_omits_absent_context() {
        let request = feedback_request(&FeedbackInput {
            question: "Why this company?".into(),
            answer: "I like the mission.".into(),
            role: None,
            industry: None,
        });
        assert!(request.user_prompt.contains("INTERVIEW QUESTION:\nWhy this company?"));
        assert!(request.user_prompt.contains("CANDIDATE'S ANSWER:\nI like the mission."));
        assert!(!request.user_prompt.contains("ROLE:"));
        assert!(!request.user_prompt.contains("INDUSTRY:"));
        assert_eq!(request.max_output_size, Some(1500));
    }

    #[test]
    fn test_feedback_prompt_includes_present_context() {
        let request = feedback_request(&FeedbackInput {
            question: "Q".into(),
            answer: "A".into(),
            role: Some("Nurse".into()),
            industry: Some("Healthcare".into()),
        });
        assert!(request.user_prompt.contains("ROLE: Nurse\nINDUSTRY: Healthcare\n"));
        assert!(request.user_prompt.contains("\"sampleAnswer\""));
    }

    #[test]
    fn test_user_text_with_braces_is_not_substituted() {
        let request = feedback_request(&FeedbackInput {
            question: "What does {answer} mean?".into(),
            answer: "literal".into(),
            role: None,
            industry: None,
        });
        assert!(request.user_prompt.contains("What does {answer} mean?"));
    }
}
