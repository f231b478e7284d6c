use thiserror::Error;

use crate::language::Language;

/// A backend failed to render part of its output.
///
/// Backends catch their own internal rendering faults and re-signal them
/// through this type so callers always see the failing language and cause.
#[derive(Debug, Clone, Error)]
#[error("{language} generation failed: {reason}")]
pub struct GenerationError {
    pub language: Language,
    pub reason: String,
}

impl GenerationError {
    pub fn new(language: Language, reason: impl Into<String>) -> Self {
        Self {
            language,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the generation orchestrator.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    #[error("unsupported language: {id} (supported: {supported})")]
    UnsupportedLanguage { id: String, supported: String },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl GenerateError {
    /// Build the error for an unregistered language id, listing every
    /// registered id.
    pub fn unsupported(id: &str) -> Self {
        GenerateError::UnsupportedLanguage {
            id: id.to_string(),
            supported: Language::supported_ids(),
        }
    }
}
