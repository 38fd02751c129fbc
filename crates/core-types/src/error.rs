use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Missing value for required field '{column}' on line {line}")]
    MissingField { line: usize, column: String },

    #[error("Invalid number '{value}' in field '{column}' on line {line}")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Unknown label for {0}: {1}")]
    UnknownLabel(&'static str, String),
}
