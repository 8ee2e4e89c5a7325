//! Line framer: splits delivered byte chunks into `\n`-delimited text lines.
//!
//! Two framing modes are supported:
//!
//! - [`FramingMode::PerChunk`] treats every chunk in isolation. Empty lines
//!   are preserved and the final fragment is always a line, so a chunk with
//!   `n` delimiters yields exactly `n + 1` lines. A record split across two
//!   deliveries becomes two malformed fragments.
//! - [`FramingMode::CarryOver`] holds the trailing fragment that has no
//!   delimiter yet and prepends it to the next chunk, so records survive
//!   chunk boundaries.
//!
//! Bytes are converted to text with UTF-8 lossy conversion; no input is
//! rejected.

use serde::Deserialize;

/// Default receive buffer size of the transport.
pub const CHUNK_CAPACITY: usize = 1024;

/// Split `text` on `\n`, keeping empty lines and the final fragment.
///
/// Carriage returns are not stripped; the record parser ignores them as
/// trailing garbage.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Cross-chunk framing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingMode {
    #[default]
    PerChunk,
    CarryOver,
}

impl std::fmt::Display for FramingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FramingMode::PerChunk => write!(f, "per_chunk"),
            FramingMode::CarryOver => write!(f, "carry_over"),
        }
    }
}

impl std::str::FromStr for FramingMode {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_chunk" => Ok(FramingMode::PerChunk),
            "carry_over" => Ok(FramingMode::CarryOver),
            other => Err(crate::error::ConfigError::UnknownVariant {
                key: "framing",
                value: other.to_string(),
            }),
        }
    }
}

/// Stateful framer applying a [`FramingMode`] to successive deliveries.
#[derive(Debug, Clone)]
pub struct LineFramer {
    mode: FramingMode,
    carry: Vec<u8>,
    max_carry: usize,
}

impl LineFramer {
    pub fn new(mode: FramingMode) -> Self {
        Self::with_max_carry(mode, CHUNK_CAPACITY)
    }

    /// A held fragment longer than `max_carry` bytes is emitted as a line
    /// instead of growing without bound.
    pub fn with_max_carry(mode: FramingMode, max_carry: usize) -> Self {
        Self {
            mode,
            carry: Vec::new(),
            max_carry,
        }
    }

    pub fn mode(&self) -> FramingMode {
        self.mode
    }

    /// Bytes held back for the next delivery (always empty in per-chunk mode).
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }

    /// Frame one delivered chunk into owned lines.
    pub fn frame(&mut self, chunk: &[u8]) -> Vec<String> {
        match self.mode {
            FramingMode::PerChunk => split_lines(&String::from_utf8_lossy(chunk))
                .into_iter()
                .map(str::to_owned)
                .collect(),
            FramingMode::CarryOver => self.frame_carry_over(chunk),
        }
    }

    fn frame_carry_over(&mut self, chunk: &[u8]) -> Vec<String> {
        self.carry.extend_from_slice(chunk);

        let Some(last) = self.carry.iter().rposition(|&b| b == b'\n') else {
            if self.carry.len() > self.max_carry {
                tracing::warn!(
                    held = self.carry.len(),
                    max = self.max_carry,
                    "no delimiter within carry limit; flushing fragment as a line"
                );
                let fragment = std::mem::take(&mut self.carry);
                return vec![String::from_utf8_lossy(&fragment).into_owned()];
            }
            return Vec::new();
        };

        let rest = self.carry.split_off(last + 1);
        let complete = std::mem::replace(&mut self.carry, rest);
        String::from_utf8_lossy(&complete[..last])
            .split('\n')
            .map(str::to_owned)
            .collect()
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new(FramingMode::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
