//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch is a single entry (this machine is not superscalar): a
//! validity flag plus whatever payload the next stage downstream needs.
//! All five latches are read only at the start of a cycle and written
//! only at the end, mirroring edge-triggered flip-flops.

use crate::isa::Instruction;

/// Fetch/Decode latch: the instruction fetched last cycle, awaiting decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchLatch {
    pub valid: bool,
    pub inst: Option<Instruction>,
}

/// Decode/Execute latch: operand values captured at the decode-to-execute
/// handoff.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeLatch {
    pub valid: bool,
    pub inst: Option<Instruction>,
}

/// Decode/Execute latch payload once hazard-free decode has issued.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecLatch {
    pub valid: bool,
    pub inst: Option<Instruction>,
    pub rs_val: i32,
    pub rt_val: i32,
    pub rd_val: i32,
}

/// Execute/Memory latch.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemLatch {
    pub valid: bool,
    pub inst: Option<Instruction>,
    /// ALU result, for non-memory instructions.
    pub alu_result: i32,
    /// Effective 20-bit address, for LW/SW.
    pub mem_addr: u32,
    /// Value to store, for SW.
    pub store_data: i32,
    /// Set while a cache miss's bus request is outstanding.
    pub waiting: bool,
    /// Set once a bus request has been enqueued for this access, so a
    /// stalled retry does not enqueue a second one.
    pub request_queued: bool,
    /// Set once this access's hit/miss counters have been scored, so a
    /// stalled retry does not double-count.
    pub miss_counted: bool,
    /// Value loaded from the cache, for LW.
    pub loaded_value: i32,
}

/// Memory/Writeback latch.
#[derive(Clone, Copy, Debug, Default)]
pub struct WritebackLatch {
    pub valid: bool,
    pub inst: Option<Instruction>,
    pub value: i32,
}
