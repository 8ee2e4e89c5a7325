//! sensavg: serial sensor telemetry averaging.
//!
//! Reads newline-delimited `<a>,<b>` records from a serial device, reduces
//! each delivered chunk to a positional-trim average and prints at most one
//! timestamped result per interval. This crate re-exports the pipeline and
//! feed layers so that integration harnesses can import them directly.
//!
//! # Architecture
//!
//! ```text
//! serial ──► ingest loop ──► Pipeline (framer → parser → reducer → gate)
//!                 │
//!                 └──► mpsc ──► sink (stdout)
//! ```

pub use sensavg_core::*;
pub use sensavg_feeds as feeds;
