//! Errors raised by graph loading and the two flow computations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrafficError>;

#[derive(Debug, Error)]
pub enum TrafficError {
    /// Bad input: unreadable or malformed graph file, unknown node, invalid coefficients.
    #[error("{0}")]
    InputValidation(String),

    #[error("no path from '{origin}' to '{destination}'")]
    NoPath { origin: String, destination: String },

    #[error("social optimum solver failed: {diagnostic}")]
    Optimization { diagnostic: String },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl TrafficError {
    pub fn input(message: impl Into<String>) -> Self {
        TrafficError::InputValidation(message.into())
    }
}
