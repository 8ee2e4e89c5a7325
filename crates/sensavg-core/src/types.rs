//! Core types for sensavg-core.
//!
//! This module defines the data structures shared across every pipeline
//! stage: the parsed [`Reading`], the timestamped [`Emission`] handed to
//! the output sink, and the [`OutputFormat`] discriminant.

use serde::Serialize;

/// A pair of signed integer sensor readings, `(a, b)`.
///
/// The same type is used for a single parsed record and for the reduced
/// batch average. [`Reading::INVALID`] marks a record that failed to parse
/// or a batch too small to reduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Reading {
    pub a: i32,
    pub b: i32,
}

impl Reading {
    /// The `(-1, -1)` sentinel.
    ///
    /// The reducer does not filter it out: a sentinel inside the trimmed
    /// interior is averaged like any other reading.
    pub const INVALID: Reading = Reading { a: -1, b: -1 };

    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    pub fn is_invalid(&self) -> bool {
        *self == Self::INVALID
    }
}

impl From<(i32, i32)> for Reading {
    fn from((a, b): (i32, i32)) -> Self {
        Self { a, b }
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.a, self.b)
    }
}

/// A reduced reading stamped with the local wall-clock time at which the
/// emission gate let it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Emission {
    /// Local date-time, no zone attached.
    pub ts: chrono::NaiveDateTime,
    #[serde(flatten)]
    pub reading: Reading,
}

/// How an [`Emission`] is rendered as one output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `<YYYY-Mon-DD HH:MM:SS>,<a>,<b>`
    #[default]
    Csv,
    /// One JSON object per line: `{"ts":"…","a":…,"b":…}`
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" => Ok(OutputFormat::Jsonl),
            other => Err(crate::error::ConfigError::UnknownVariant {
                key: "output_format",
                value: other.to_string(),
            }),
        }
    }
}
