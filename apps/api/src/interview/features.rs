//! `Feature` impls wiring the interview prompts to their output schemas.

use crate::interview::fallback::{
    default_feedback, feedback_from_json_value, questions_from_json_value, questions_from_lines,
};
use crate::interview::models::{Feedback, FeedbackInput, Question, QuestionsInput};
use crate::interview::prompts::{feedback_request, questions_request};
use crate::llm_client::GenerationRequest;
use crate::pipeline::parser::{strict_json, OutputSchema, ParseStrategy};
use crate::pipeline::Feature;

pub struct InterviewQuestions;

impl Feature for InterviewQuestions {
    type Input = QuestionsInput;
    type Output = Vec<Question>;

    const NAME: &'static str = "questions";
    const SCHEMA: OutputSchema<Vec<Question>> = OutputSchema {
        name: "questions",
        strip_fences: true,
        strategies: &[
            ParseStrategy {
                name: "strict-json",
                apply: strict_json::<Vec<Question>>,
            },
            ParseStrategy {
                name: "lenient-json",
                apply: questions_from_json_value,
            },
            ParseStrategy {
                name: "question-lines",
                apply: questions_from_lines,
            },
        ],
    };

    fn build_request(input: &QuestionsInput) -> GenerationRequest {
        questions_request(input)
    }
}

pub struct AnswerFeedback;

impl Feature for AnswerFeedback {
    type Input = FeedbackInput;
    type Output = Feedback;

    const NAME: &'static str = "feedback";
    const SCHEMA: OutputSchema<Feedback> = OutputSchema {
        name: "feedback",
        strip_fences: true,
        strategies: &[
            ParseStrategy {
                name: "strict-json",
                apply: strict_json::<Feedback>,
            },
            ParseStrategy {
                name: "lenient-json",
                apply: feedback_from_json_value,
            },
            ParseStrategy {
                name: "default-feedback",
                apply: default_feedback,
            },
        ],
    };

    fn build_request(input: &FeedbackInput) -> GenerationRequest {
        feedback_request(input)
    }
}
