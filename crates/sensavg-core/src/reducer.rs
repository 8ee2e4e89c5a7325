//! Positional-trim average.
//!
//! Drops the first and last 10% of a batch *by position* (input order, no
//! sorting) and takes the truncating integer mean of what remains. This
//! only behaves like a statistical trimmed mean when arrival order tracks
//! magnitude; the positional semantics are kept deliberately.

use crate::types::Reading;

/// Number of readings trimmed from each end of a batch of `len` readings.
pub fn trim_count(len: usize) -> usize {
    len / 10
}

/// Reduce `batch` to one reading.
///
/// Returns [`Reading::INVALID`] when the trim count is zero (fewer than 10
/// readings) or when nothing survives the trim. Sentinels inside the batch
/// are averaged like any other reading.
pub fn positional_trim_average(batch: &[Reading]) -> Reading {
    let k = trim_count(batch.len());
    if k == 0 || 2 * k >= batch.len() {
        return Reading::INVALID;
    }

    let interior = &batch[k..batch.len() - k];
    let (sum_a, sum_b) = interior.iter().fold((0i64, 0i64), |(sa, sb), r| {
        (sa + i64::from(r.a), sb + i64::from(r.b))
    });
    let n = interior.len() as i64;

    // Both means lie within the i32 range of their inputs.
    Reading::new((sum_a / n) as i32, (sum_b / n) as i32)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
