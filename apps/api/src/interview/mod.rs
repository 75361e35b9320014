//! Interview preparation: question generation and answer feedback.
//! Both features run through the shared generation pipeline.

pub mod fallback;
pub mod features;
pub mod handlers;
pub mod models;
pub mod prompts;
