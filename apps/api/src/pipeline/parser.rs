//! Structured Output Parser. Turns model text into a schema-typed value.
//!
//! Each schema is an ordered list of pure strategies tried in turn. The first
//! strategy is the strict one; any later success counts as a fallback.
//! Every schema ends with a strategy that cannot fail, so callers always get
//! a fully-shaped value.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct ParseFailure {
    pub reason: String,
}

impl ParseFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A named pure function `text -> Result<T, ParseFailure>`.
pub struct ParseStrategy<T: 'static> {
    pub name: &'static str,
    pub apply: fn(&str) -> Result<T, ParseFailure>,
}

/// Describes how one feature's output is recovered from model text.
pub struct OutputSchema<T: 'static> {
    pub name: &'static str,
    /// Remove Markdown code fences before the strategies see the text.
    pub strip_fences: bool,
    pub strategies: &'static [ParseStrategy<T>],
}

#[derive(Debug)]
pub struct Parsed<T> {
    pub value: T,
    pub strategy: &'static str,
    /// True when a strategy other than the first produced `value`.
    pub fallback_applied: bool,
}

impl<T: 'static> OutputSchema<T> {
    pub fn parse(&self, text: &str) -> Result<Parsed<T>, ParseFailure> {
        let text = if self.strip_fences {
            strip_code_fences(text)
        } else {
            text.to_string()
        };

        let mut last_failure = ParseFailure::new(format!("{}: no parse strategies", self.name));
        for (index, strategy) in self.strategies.iter().enumerate() {
            match (strategy.apply)(&text) {
                Ok(value) => {
                    return Ok(Parsed {
                        value,
                        strategy: strategy.name,
                        fallback_applied: index > 0,
                    })
                }
                Err(failure) => {
                    last_failure = ParseFailure::new(format!(
                        "{} / {}: {}",
                        self.name, strategy.name, failure.reason
                    ));
                }
            }
        }
        Err(last_failure)
    }
}

/// Strips every "```json" and "```" delimiter (plus one newline directly after
/// each), wherever it appears, then trims.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Strict JSON parse straight into the target type.
pub fn strict_json<T: DeserializeOwned>(text: &str) -> Result<T, ParseFailure> {
    serde_json::from_str(text).map_err(|e| ParseFailure::new(e.to_string()))
}
