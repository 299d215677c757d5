//! Memory stage: cache probing.

use crate::cache::{BusCommand, Cache, Probe};
use crate::isa::Opcode;

/// Result of probing the cache for the memory-stage instruction.
pub enum Access {
    /// Non-memory instruction; nothing to do.
    NotMemory,
    /// The access is satisfied locally this cycle.
    Hit,
    /// The access cannot be satisfied locally; a bus request is needed.
    Miss { command: BusCommand },
}

/// Classifies a memory-stage access.
///
/// A store that finds its line in `Shared` state is reported as
/// [`Access::Miss`] even though the data is physically present, since a
/// coherence upgrade to `Modified` is required before the store commits.
pub fn classify(cache: &Cache, opcode: Opcode, addr: u32) -> Access {
    match opcode {
        Opcode::Lw => match cache.probe_load(addr) {
            Probe::Hit => Access::Hit,
            Probe::Miss => Access::Miss {
                command: BusCommand::Rd,
            },
        },
        Opcode::Sw => match cache.probe_store(addr) {
            Probe::Hit => Access::Hit,
            Probe::Miss => Access::Miss {
                command: BusCommand::Rdx,
            },
        },
        _ => Access::NotMemory,
    }
}
