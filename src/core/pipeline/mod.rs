//! Pipeline latches, hazard detection, and per-stage semantics.

pub mod hazards;
pub mod latches;
pub mod stages;

pub use latches::{DecodeLatch, ExecLatch, FetchLatch, MemLatch, WritebackLatch};
