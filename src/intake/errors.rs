//! Error types for particle intake.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("no particles were supplied")]
    Empty,

    #[error("duplicate particle position ({x}, {y}); only unique coordinates are accepted")]
    DuplicatePosition { x: f64, y: f64 },

    #[error("particle {index} has a non-finite coordinate or charge")]
    NonFinite { index: usize },

    #[error("could not parse '{0}'")]
    Parse(String),

    #[error("gave up after {0} invalid entries")]
    TooManyAttempts(usize),

    #[error("input ended before all particles were entered")]
    EndOfInput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
