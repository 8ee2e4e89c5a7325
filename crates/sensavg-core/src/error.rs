//! Error types for the pipeline stages.

use thiserror::Error;

/// Which side of the comma a numeric field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    A,
    B,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::A => write!(f, "a"),
            Field::B => write!(f, "b"),
        }
    }
}

/// Numeric conversion failure for one field of a comma-delimited record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("field {field} has no convertible digits")]
    NoDigits { field: Field },
    #[error("field {field} does not fit in a 32-bit integer")]
    OutOfRange { field: Field },
}

/// A delivery aborted under [`NumericPolicy::Strict`](crate::parser::NumericPolicy::Strict).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {line:?}: {source}")]
pub struct PipelineError {
    pub line: String,
    #[source]
    pub source: ParseError,
}

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown {key} {value:?}")]
    UnknownVariant { key: &'static str, value: String },
    #[error(transparent)]
    Load(#[from] config::ConfigError),
}
