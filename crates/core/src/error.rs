use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by core domain parsing and validation
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid operation kind: {0}")]
    InvalidOperation(String),

    #[error("{operation} operation is missing required field `{field}`")]
    MissingField { operation: &'static str, field: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, CoreError>;
