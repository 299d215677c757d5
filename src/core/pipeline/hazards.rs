//! Decode-time hazard detection.
//!
//! There is no forwarding network in this pipeline: a RAW hazard is
//! resolved purely by stalling decode until the producing instruction has
//! retired past writeback.

use crate::isa::Instruction;

/// True if `inst` must stall in decode because a register it reads is
/// still in flight in EXEC, MEM, or WB with a pending write.
pub fn has_raw_hazard(
    inst: &Instruction,
    exec_dest: Option<u8>,
    mem_dest: Option<u8>,
    wb_dest: Option<u8>,
) -> bool {
    let sources = inst.source_registers();
    sources.iter().flatten().any(|&src| {
        if src <= 1 {
            return false;
        }
        Some(src) == exec_dest || Some(src) == mem_dest || Some(src) == wb_dest
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::decode;

    fn add(rd: u8, rs: u8, rt: u8) -> Instruction {
        let raw = ((rd as u32) << 20) | ((rs as u32) << 16) | ((rt as u32) << 12);
        decode(raw, 0)
    }

    #[test]
    fn stalls_when_source_matches_inflight_destination() {
        let inst = add(2, 3, 4);
        assert!(has_raw_hazard(&inst, Some(3), None, None));
    }

    #[test]
    fn no_stall_when_sources_are_clear() {
        let inst = add(2, 3, 4);
        assert!(!has_raw_hazard(&inst, Some(9), Some(10), Some(11)));
    }

    #[test]
    fn r0_and_r1_never_cause_a_stall() {
        let inst = add(2, 0, 1);
        assert!(!has_raw_hazard(&inst, Some(0), Some(1), None));
    }
}
