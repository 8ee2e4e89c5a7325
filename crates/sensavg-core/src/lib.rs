//! sensavg-core: serial sensor telemetry pipeline.
//!
//! This crate holds the pure stages of the ingestion pipeline plus the
//! shared types used across them.
//!
//! # Architecture
//!
//! ```text
//! chunk ──► Framer ──► Parser ──► Reducer ──► Gate ──► Emission
//!  (bytes)   (lines)   (readings)  (reading)   (maybe)
//! ```
//!
//! Every delivery is reduced on its own. The transport and the output sink
//! live in `sensavg-feeds`.

pub mod config;
pub mod error;
pub mod framer;
pub mod gate;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod reducer;
pub mod types;

pub use error::{ConfigError, ParseError, PipelineError};
pub use gate::{Clock, EmissionGate, ManualClock, SystemClock};
pub use pipeline::{ChunkOutcome, Pipeline};
pub use types::{Emission, OutputFormat, Reading};
