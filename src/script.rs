//! VideoScript struct - the core structured output from the LLM agent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required field that came back empty or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid field `{field}`: {reason}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What was wrong with it
    pub reason: String,
}

impl ValidationError {
    fn empty(field: &'static str) -> Self {
        Self {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}

/// Structured video script output from the LLM.
///
/// Deserialisation enforces presence of every field; `validate` enforces
/// that none of them came back blank.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoScript {
    /// Video title
    pub title: String,
    /// Opening hook, one or two sentences
    pub hook: String,
    /// Full introduction paragraph
    pub introduction: String,
    /// Main talking points, in presentation order
    pub main_points: Vec<String>,
    /// Closing with a call-to-action
    pub conclusion: String,
    /// YouTube tags for discoverability
    pub tags: Vec<String>,
    /// Free-form length estimate (e.g. "5 minutes")
    pub estimated_duration: String,
}

impl VideoScript {
    /// Check every required field is populated.
    ///
    /// Deserialisation already rejects missing fields; this rejects fields
    /// that are present but blank, naming the first offender.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty("title"));
        }
        if self.hook.trim().is_empty() {
            return Err(ValidationError::empty("hook"));
        }
        if self.introduction.trim().is_empty() {
            return Err(ValidationError::empty("introduction"));
        }
        if self.main_points.is_empty() {
            return Err(ValidationError {
                field: "main_points",
                reason: "must contain at least one point".to_string(),
            });
        }
        if self.main_points.iter().any(|p| p.trim().is_empty()) {
            return Err(ValidationError {
                field: "main_points",
                reason: "points must not be blank".to_string(),
            });
        }
        if self.conclusion.trim().is_empty() {
            return Err(ValidationError::empty("conclusion"));
        }
        if self.tags.is_empty() {
            return Err(ValidationError {
                field: "tags",
                reason: "must contain at least one tag".to_string(),
            });
        }
        if self.estimated_duration.trim().is_empty() {
            return Err(ValidationError::empty("estimated_duration"));
        }
        Ok(())
    }

    /// Number of main talking points
    pub fn point_count(&self) -> usize {
        self.main_points.len()
    }
}
