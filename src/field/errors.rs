//! Error types for the field pipeline.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Empty particle list or unusable parameters; raised before any grid work
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FieldError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FieldError::InvalidInput(message.into())
    }
}
