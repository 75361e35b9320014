//! Resume builder: structured profile in, Markdown resume out.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
