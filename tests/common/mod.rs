//! Shared test utilities for sensavg integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Timing-sensitive helpers are deterministic: the gate is
//! driven by a [`sensavg::ManualClock`] instead of the wall clock.

pub mod assertions;
pub mod builders;
pub mod fake_serial;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use fake_serial::*;
