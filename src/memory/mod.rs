//! Memory guard subsystem
//!
//! Tracks process memory against a configured ceiling and signals when
//! continued accumulation of records is unsafe.

mod guard;
mod probe;

pub use guard::{GuardReading, MemoryGuard, MemoryThreshold};
pub use probe::{MemoryProbe, ProcessMemoryProbe};
