//! Recovery strategies used when the model ignores the JSON instructions.
//! Deterministic: the same text always yields the same result.

use serde_json::{Map, Value};

use crate::interview::models::{Feedback, Question};
use crate::pipeline::parser::ParseFailure;

pub const GENERAL: &str = "general";

const DEFAULT_SCORE: u8 = 5;
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;
const DEFAULT_STRENGTH: &str = "You provided an answer";
const DEFAULT_IMPROVEMENTS: [&str; 2] = ["Could be more specific", "Consider adding examples"];
const DEFAULT_SAMPLE_ANSWER: &str = "A strong answer would include specific examples and results.";
const DEFAULT_OVERALL: &str = "Consider practicing your answer and adding more specific examples.";

/// Accepts any JSON document and coerces it into questions.
///
/// Takes a top-level array or an object with a `questions` array. Ids may be
/// numbers or numeric strings; a missing or unusable id becomes the 1-based
/// position. Items without question text are skipped. JSON that holds no
/// questions gives an empty list, so JSON syntax never reaches the line
/// heuristic. Fails only when the text is not JSON.
pub fn questions_from_json_value(text: &str) -> Result<Vec<Question>, ParseFailure> {
    let value: Value = serde_json::from_str(text).map_err(|e| ParseFailure::new(e.to_string()))?;

    let items: &[Value] = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("questions") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    let questions = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let position = index as u32 + 1;
            match item {
                Value::String(text) => {
                    non_blank(text).map(|question| general_question(position, question))
                }
                Value::Object(fields) => {
                    let question = ["question", "text"]
                        .iter()
                        .find_map(|key| fields.get(*key).and_then(Value::as_str))
                        .and_then(non_blank)?;
                    Some(Question {
                        id: fields.get("id").and_then(coerce_id).unwrap_or(position),
                        question: question.to_string(),
                        kind: string_field(fields, "type").unwrap_or_else(|| GENERAL.to_string()),
                        category: string_field(fields, "category")
                            .unwrap_or_else(|| GENERAL.to_string()),
                    })
                }
                _ => None,
            }
        })
        .collect();

    Ok(questions)
}

/// Coerces a JSON object with off-type fields into feedback.
///
/// Scores may be fractional or numeric strings; they are rounded and clamped
/// to 1-10. Missing fields take the placeholder values. Fails when the text
/// is not a JSON object or carries none of the feedback fields.
pub fn feedback_from_json_value(text: &str) -> Result<Feedback, ParseFailure> {
    let value: Value = serde_json::from_str(text).map_err(|e| ParseFailure::new(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ParseFailure::new("feedback JSON is not an object"));
    };

    const KEYS: [&str; 5] = [
        "score",
        "strengths",
        "improvements",
        "sampleAnswer",
        "overallFeedback",
    ];
    if !KEYS.iter().any(|key| fields.contains_key(*key)) {
        return Err(ParseFailure::new("feedback JSON has no feedback fields"));
    }

    Ok(Feedback {
        score: fields
            .get("score")
            .and_then(coerce_score)
            .unwrap_or(DEFAULT_SCORE),
        strengths: string_list(&fields, "strengths")
            .unwrap_or_else(|| vec![DEFAULT_STRENGTH.to_string()]),
        improvements: string_list(&fields, "improvements")
            .unwrap_or_else(|| DEFAULT_IMPROVEMENTS.iter().map(|s| s.to_string()).collect()),
        sample_answer: string_field(&fields, "sampleAnswer")
            .unwrap_or_else(|| DEFAULT_SAMPLE_ANSWER.to_string()),
        overall_feedback: string_field(&fields, "overallFeedback")
            .unwrap_or_else(|| DEFAULT_OVERALL.to_string()),
    })
}

/// Builds questions from free text, one per line that either contains a `?`
/// or starts with a list marker (`1.` / `1)`). Inline markers such as
/// "... role? 2. Describe ..." are treated as line breaks first.
/// Never fails; no usable lines gives an empty list.
pub fn questions_from_lines(text: &str) -> Result<Vec<Question>, ParseFailure> {
    let questions = text
        .lines()
        .flat_map(split_inline_markers)
        .map(str::trim)
        .filter(|line| !line.is_empty() && (line.contains('?') || list_marker_len(line).is_some()))
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| general_question(index as u32 + 1, line))
        .collect();

    Ok(questions)
}

/// Placeholder feedback. The raw model text, if any, becomes `overallFeedback`.
pub fn default_feedback(text: &str) -> Result<Feedback, ParseFailure> {
    let text = text.trim();
    let overall_feedback = if text.is_empty() {
        DEFAULT_OVERALL.to_string()
    } else {
        text.to_string()
    };

    Ok(Feedback {
        score: DEFAULT_SCORE,
        strengths: vec![DEFAULT_STRENGTH.to_string()],
        improvements: DEFAULT_IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        sample_answer: DEFAULT_SAMPLE_ANSWER.to_string(),
        overall_feedback,
    })
}

fn general_question(id: u32, question: &str) -> Question {
    Question {
        id,
        question: question.to_string(),
        kind: GENERAL.to_string(),
        category: GENERAL.to_string(),
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .and_then(non_blank)
        .map(str::to_string)
}

/// A list of strings, or a single string promoted to a one-item list.
fn string_list(fields: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match fields.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(non_blank)
                .map(str::to_string)
                .collect(),
        ),
        Value::String(text) => non_blank(text).map(|text| vec![text.to_string()]),
        _ => None,
    }
}

fn coerce_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|id| u32::try_from(id).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(MIN_SCORE, MAX_SCORE) as u8)
}

/// Length of a leading `digits` + `.`/`)` marker.
fn list_marker_len(text: &str) -> Option<usize> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    match text.as_bytes().get(digits) {
        Some(b'.') | Some(b')') if digits > 0 => Some(digits + 1),
        _ => None,
    }
}

fn strip_list_marker(line: &str) -> &str {
    match list_marker_len(line) {
        Some(len) => line[len..].trim(),
        None => line,
    }
}

/// Splits before every list marker that follows whitespace and is itself
/// followed by whitespace, so "3.5 years" stays intact.
fn split_inline_markers(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;

    for i in 1..bytes.len() {
        if !bytes[i - 1].is_ascii_whitespace() || i == start {
            continue;
        }
        let Some(len) = list_marker_len(&line[i..]) else {
            continue;
        };
        let followed_by_space = bytes
            .get(i + len)
            .map_or(true, |b| b.is_ascii_whitespace());
        if followed_by_space {
            pieces.push(&line[start..i]);
            start = i;
        }
    }

    pieces.push(&line[start..]);
    pieces
}
