//! sensavg-feeds: transport and sink adapters for sensavg.
//!
//! The serial feed opens the device and hands raw chunks to the ingestion
//! loop, which drives a [`sensavg_core::Pipeline`] and pushes emissions onto
//! a `tokio` channel. The sink drains that channel into any line-oriented
//! writer (stdout in the binary).

pub mod error;
pub mod ingest;
pub mod serial;
pub mod sink;

pub use error::IngestError;
pub use ingest::{run_ingest, run_with_sink, IngestStats};
pub use serial::{open_serial, BAUD_RATE};
pub use sink::write_emissions;
