//! Per-delivery pipeline: framer → parser → reducer → gate.
//!
//! [`Pipeline::process`] is called once for every chunk the transport
//! delivers. Each chunk is reduced on its own; the only state carried
//! between calls is the gate's last emission time and, in carry-over
//! framing mode, the held line fragment.

use crate::error::PipelineError;
use crate::framer::{FramingMode, LineFramer};
use crate::gate::{Clock, EmissionGate};
use crate::parser::{parse_record_with, NumericPolicy};
use crate::reducer::positional_trim_average;
use crate::types::{Emission, Reading};

/// What one delivery produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkOutcome {
    pub lines: usize,
    pub invalid: usize,
    pub reduced: Option<Reading>,
    pub emission: Option<Emission>,
}

/// Frame and parse `chunk` in isolation. Pure: no framer state is involved.
pub fn parse_chunk(chunk: &[u8], policy: NumericPolicy) -> Result<Vec<Reading>, PipelineError> {
    crate::framer::split_lines(&String::from_utf8_lossy(chunk))
        .into_iter()
        .map(|line| parse_line(line, policy))
        .collect()
}

fn parse_line(line: &str, policy: NumericPolicy) -> Result<Reading, PipelineError> {
    parse_record_with(line, policy).map_err(|source| PipelineError {
        line: line.to_string(),
        source,
    })
}

/// The stateful ingestion pipeline.
#[derive(Debug)]
pub struct Pipeline<C> {
    framer: LineFramer,
    policy: NumericPolicy,
    gate: EmissionGate<C>,
}

impl<C: Clock> Pipeline<C> {
    pub fn new(framing: FramingMode, policy: NumericPolicy, gate: EmissionGate<C>) -> Self {
        Self {
            framer: LineFramer::new(framing),
            policy,
            gate,
        }
    }

    pub fn gate(&self) -> &EmissionGate<C> {
        &self.gate
    }

    pub fn framer(&self) -> &LineFramer {
        &self.framer
    }

    /// Run one delivered chunk through the pipeline.
    ///
    /// An empty chunk is an empty poll: nothing is framed and the gate is
    /// not consulted. Under [`NumericPolicy::Strict`] the first
    /// non-numeric field aborts the delivery before the gate runs.
    pub fn process(&mut self, chunk: &[u8]) -> Result<ChunkOutcome, PipelineError> {
        if chunk.is_empty() {
            return Ok(ChunkOutcome::default());
        }

        let lines = self.framer.frame(chunk);
        if lines.is_empty() {
            // Carry-over mode is still waiting for a delimiter.
            return Ok(ChunkOutcome::default());
        }

        let readings = lines
            .iter()
            .map(|line| parse_line(line, self.policy))
            .collect::<Result<Vec<_>, _>>()?;
        let invalid = readings.iter().filter(|r| r.is_invalid()).count();
        if invalid > 0 {
            tracing::debug!(invalid, total = readings.len(), "batch contains sentinel readings");
        }

        let reduced = positional_trim_average(&readings);
        let emission = self.gate.offer(reduced);

        Ok(ChunkOutcome {
            lines: lines.len(),
            invalid,
            reduced: Some(reduced),
            emission,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
