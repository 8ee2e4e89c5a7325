#![allow(dead_code)]
//! Test builders: chunk payloads and ready-made pipelines.
//!
//! These are for readability in test assertions, not for production use.
//! They panic on invalid input rather than returning `Result`.

use chrono::NaiveDateTime;
use sensavg::framer::FramingMode;
use sensavg::parser::NumericPolicy;
use sensavg::{EmissionGate, ManualClock, Pipeline, Reading};

/// Ten records `(1,2) … (19,20)`, each newline-terminated.
pub const TEN_RECORDS: &[u8] =
    b"1,2\n3,4\n5,6\n7,8\n9,10\n11,12\n13,14\n15,16\n17,18\n19,20\n";

/// Fixed start time for manual clocks: 2024-01-15 10:00:00.
pub fn t0() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("valid fixed date")
}

/// Render readings as a newline-terminated chunk.
pub fn chunk_of(readings: &[Reading]) -> Vec<u8> {
    readings
        .iter()
        .map(|r| format!("{r}\n"))
        .collect::<String>()
        .into_bytes()
}

/// `(i, i)` for every `i` in `range`.
pub fn ramp(range: std::ops::RangeInclusive<i32>) -> Vec<Reading> {
    range.map(|i| Reading::new(i, i)).collect()
}

/// Fluent builder for a [`Pipeline`] on a shared [`ManualClock`].
///
/// ```rust
/// let (pipeline, clock) = PipelineBuilder::new().interval(5).carry_over().build();
/// ```
pub struct PipelineBuilder {
    interval: u32,
    framing: FramingMode,
    policy: NumericPolicy,
    start: NaiveDateTime,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            interval: 5,
            framing: FramingMode::PerChunk,
            policy: NumericPolicy::Sentinel,
            start: t0(),
        }
    }

    pub fn interval(mut self, secs: u32) -> Self {
        self.interval = secs;
        self
    }

    pub fn carry_over(mut self) -> Self {
        self.framing = FramingMode::CarryOver;
        self
    }

    pub fn strict(mut self) -> Self {
        self.policy = NumericPolicy::Strict;
        self
    }

    pub fn build(self) -> (Pipeline<ManualClock>, ManualClock) {
        let clock = ManualClock::new(self.start);
        let gate = EmissionGate::new(clock.clone(), self.interval);
        (Pipeline::new(self.framing, self.policy, gate), clock)
    }
}
