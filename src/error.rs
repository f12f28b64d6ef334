use serde::Serialize;
use thiserror::Error;

pub type EstimateResult<T> = Result<T, EstimateError>;

/// Failures surfaced by the estimation engine.
///
/// Distance lookup problems never show up here: the resolver recovers
/// from them locally by falling back to the configured default distance.
#[derive(Debug, Clone, Error, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimateError {
    /// The project description breaks the input contract.
    #[error("invalid project: {field} {reason}")]
    InvalidProject { field: String, reason: String },

    /// Something went wrong while computing an otherwise valid project.
    #[error("estimate generation failed: {reason}")]
    GenerationFailed { reason: String },
}

impl EstimateError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProject {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::GenerationFailed {
            reason: reason.into(),
        }
    }

    pub fn is_invalid_project(&self) -> bool {
        matches!(self, Self::InvalidProject { .. })
    }
}
