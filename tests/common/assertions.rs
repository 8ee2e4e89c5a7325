//! Domain-specific assertion macros for sensavg harnesses.
//!
//! These add context-rich failure messages that make it clear which stage
//! of the pipeline produced the unexpected value.

/// Assert that an emission carries the expected reduced pair.
///
/// ```rust
/// assert_emitted!(emission, 11, 12);
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($emission:expr, $a:expr, $b:expr) => {{
        let emission: &sensavg::Emission = &$emission;
        let expected = sensavg::Reading::new($a, $b);
        if emission.reading != expected {
            panic!(
                "assert_emitted! failed:\n  expected: {}\n  actual:   {}\n  ts: {}",
                expected, emission.reading, emission.ts
            );
        }
    }};
}

/// Assert that a chunk outcome did not pass the emission gate.
#[macro_export]
macro_rules! assert_suppressed {
    ($outcome:expr) => {{
        let outcome: &sensavg::ChunkOutcome = &$outcome;
        if let Some(emission) = &outcome.emission {
            panic!(
                "assert_suppressed! failed: gate emitted {} at {}",
                emission.reading, emission.ts
            );
        }
    }};
}
