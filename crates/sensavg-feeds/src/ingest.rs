//! Ingestion loop: reads chunks from the transport and drives the pipeline.
//!
//! Exactly one read is outstanding at a time: the next read is issued only
//! after the previous chunk went through the whole pipeline, so deliveries
//! are processed strictly in arrival order without locking.
//!
//! A zero-byte read is an empty poll, not end of stream. The loop backs off
//! for [`IDLE_BACKOFF`] and reads again. It stops when the
//! [`CancellationToken`] is cancelled, when the transport fails, or (under
//! the strict numeric policy) when a record cannot be converted.

use std::time::Duration;

use sensavg_core::framer::CHUNK_CAPACITY;
use sensavg_core::{Clock, Emission, OutputFormat, Pipeline};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::IngestError;
use crate::sink::write_emissions;

/// Emissions buffered between the ingestion loop and the sink.
pub const EMISSION_QUEUE: usize = 64;

/// Pause after an empty poll before the next read.
pub const IDLE_BACKOFF: Duration = Duration::from_millis(10);

/// Counters kept across the lifetime of one ingestion loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Non-empty deliveries processed.
    pub chunks: u64,
    pub empty_polls: u64,
    pub lines: u64,
    /// Readings that came out of the parser as the sentinel.
    pub invalid: u64,
    pub emissions: u64,
}

/// Run the ingestion loop until cancelled or a fatal error occurs.
///
/// Emissions are sent on `tx`; if the receiving sink has gone away the loop
/// stops with [`IngestError::SinkClosed`].
pub async fn run_ingest<R, C>(
    mut source: R,
    mut pipeline: Pipeline<C>,
    tx: mpsc::Sender<Emission>,
    cancel: CancellationToken,
) -> Result<IngestStats, IngestError>
where
    R: AsyncRead + Unpin,
    C: Clock,
{
    let mut buf = [0u8; CHUNK_CAPACITY];
    let mut stats = IngestStats::default();

    tracing::info!(
        interval = pipeline.gate().interval_secs(),
        framing = %pipeline.framer().mode(),
        "ingestion started"
    );

    loop {
        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            read = source.read(&mut buf) => read,
        };
        let n = read.map_err(|err| {
            tracing::error!(%err, "transport read failed");
            IngestError::Transport(err)
        })?;

        if n == 0 {
            stats.empty_polls += 1;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(IDLE_BACKOFF) => continue,
            }
        }

        let outcome = pipeline.process(&buf[..n]).map_err(|err| {
            tracing::error!(%err, "record conversion failed; stopping ingestion");
            err
        })?;
        tracing::debug!(
            bytes = n,
            lines = outcome.lines,
            invalid = outcome.invalid,
            reduced = ?outcome.reduced,
            "chunk processed"
        );

        stats.chunks += 1;
        stats.lines += outcome.lines as u64;
        stats.invalid += outcome.invalid as u64;

        if let Some(emission) = outcome.emission {
            tx.send(emission).await.map_err(|_| IngestError::SinkClosed)?;
            stats.emissions += 1;
        }
    }

    tracing::info!(?stats, "ingestion stopped");
    Ok(stats)
}

/// Run the ingestion loop and the sink side by side until the loop ends.
///
/// The sink always drains every queued emission before this returns, so a
/// fatal ingestion error never swallows output produced before it. An
/// ingestion error takes precedence over a sink error.
pub async fn run_with_sink<R, C, W>(
    source: R,
    pipeline: Pipeline<C>,
    writer: W,
    format: OutputFormat,
    cancel: CancellationToken,
) -> Result<(IngestStats, u64), IngestError>
where
    R: AsyncRead + Unpin,
    C: Clock,
    W: AsyncWrite + Unpin,
{
    let (tx, rx) = mpsc::channel(EMISSION_QUEUE);
    let (ingested, written) = tokio::join!(
        run_ingest(source, pipeline, tx, cancel),
        write_emissions(rx, writer, format),
    );
    if let (Err(_), Ok(lines)) = (&ingested, &written) {
        tracing::debug!(lines, "sink drained after ingestion failure");
    }
    Ok((ingested?, written?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
