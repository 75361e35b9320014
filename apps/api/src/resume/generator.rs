//! Resume generation feature. The model's Markdown is the result; no JSON
//! parsing and no fence stripping.

use crate::llm_client::GenerationRequest;
use crate::pipeline::parser::{OutputSchema, ParseFailure, ParseStrategy};
use crate::pipeline::Feature;
use crate::resume::models::ResumeInput;
use crate::resume::prompts::resume_request;

pub struct ResumeMarkdown;

fn markdown_verbatim(text: &str) -> Result<String, ParseFailure> {
    Ok(text.to_string())
}

impl Feature for ResumeMarkdown {
    type Input = ResumeInput;
    type Output = String;

    const NAME: &'static str = "resume";
    const SCHEMA: OutputSchema<String> = OutputSchema {
        name: "resume",
        strip_fences: false,
        strategies: &[ParseStrategy {
            name: "markdown-verbatim",
            apply: markdown_verbatim,
        }],
    };

    fn build_request(input: &ResumeInput) -> GenerationRequest {
        resume_request(input)
    }
}
