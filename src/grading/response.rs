//! Grading model reply schema and parsing
//!
//! The model is asked to answer with a JSON object; in practice it may wrap
//! that object in prose or code fences, so parsing starts from the outermost
//! braces.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::span::MatchMethod;

/// Errors while reading a model reply
#[derive(Debug, Error)]
pub enum GradingError {
    #[error("Model reply contains no JSON object")]
    NoJsonObject,

    #[error("Failed to parse model reply as JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// The full reply for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingResponse {
    #[serde(default)]
    pub criteria_results: Vec<CriterionResult>,
    /// Total as reported by the model (not trusted, recomputed on annotate)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_feedback: Option<String>,
}

/// Score and quotes for one rubric criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: String,
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// A quoted passage, annotated with its location once resolved
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Highlight {
    /// Quote from the model; after annotation, the matched document text
    #[serde(deserialize_with = "coerce_text")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<MatchMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Highlight {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Accept scalar quote values from sloppy model output
fn coerce_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "highlight text must be a string, got {}",
            other
        ))),
    }
}

/// Slice from the first `{` to the last `}`
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse a model reply into criterion records
pub fn parse_response(raw: &str) -> Result<GradingResponse, GradingError> {
    let json = extract_json_object(raw).ok_or(GradingError::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
}
