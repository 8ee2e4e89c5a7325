//! Errors surfaced by the feed layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("error trying to read {path}")]
    DeviceOpen {
        path: String,
        #[source]
        source: tokio_serial::Error,
    },
    #[error("transport read failed: {0}")]
    Transport(#[source] std::io::Error),
    #[error(transparent)]
    Pipeline(#[from] sensavg_core::PipelineError),
    #[error("output sink closed")]
    SinkClosed,
    #[error("output write failed: {0}")]
    Sink(#[source] std::io::Error),
}
