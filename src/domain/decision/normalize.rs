//! Best-effort extraction of a Decision from free-text model output.
//!
//! Models asked for "JSON only" still wrap answers in Markdown fences or add
//! a sentence of prose around the object. Decoding goes in two steps:
//!
//! 1. strip fence markers and decode the whole text;
//! 2. if the text is not valid JSON at all, decode the first balanced
//!    `{...}` block.
//!
//! Text that is valid JSON but not an object (an array, a string, a number)
//! is rejected outright; objects nested inside it are never promoted.
//! If no step yields a non-empty JSON object the result is an error. Callers
//! must surface it as an upstream failure and never treat it as an escalation.

use serde_json::{Map, Value};
use thiserror::Error;

use super::Decision;

/// The model output contained no usable JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionParseError {
    #[error("model response was empty")]
    Empty,

    #[error("model response contained no JSON object")]
    NoJsonObject,

    #[error("model response was an empty JSON object")]
    EmptyObject,
}

/// Parses raw model output into a normalized decision.
pub fn parse_decision(raw: &str) -> Result<Decision, DecisionParseError> {
    let payload = decode_payload(raw)?;
    Ok(Decision::from_payload(&payload))
}

/// Removes Markdown code-fence markers anywhere in the text.
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn decode_payload(raw: &str) -> Result<Map<String, Value>, DecisionParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(DecisionParseError::Empty);
    }

    let object = match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(_) => first_brace_block(&cleaned).and_then(decode_object),
    };

    match object {
        Some(map) if map.is_empty() => Err(DecisionParseError::EmptyObject),
        Some(map) => Ok(map),
        None => Err(DecisionParseError::NoJsonObject),
    }
}

fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Returns the first balanced brace-delimited substring.
///
/// Braces inside JSON string literals do not count toward nesting.
fn first_brace_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
