//! Decode stage: branch resolution.
//!
//! Branch and jump targets resolve here, not in EXEC, so that the
//! instruction already in FETCH this same cycle — the delay slot —
//! advances into DECODE unconditionally before the redirect takes effect.

use crate::core::alu;
use crate::isa::{Instruction, Opcode};

/// If `inst` is a taken branch or a JAL, returns the 10-bit redirect
/// target. `rd_val` is the value of the register named by the `rd` field,
/// which both branches and JAL use to carry their target address.
///
/// When `debug_branch` is set, logs every branch/JAL resolution — opcode,
/// operands, whether it was taken, and the redirect target — at `debug!`.
pub fn resolve_branch(
    inst: &Instruction,
    rs_val: i32,
    rt_val: i32,
    rd_val: i32,
    debug_branch: bool,
) -> Option<u16> {
    let taken = match inst.opcode {
        Opcode::Jal => true,
        op if op.is_branch() => alu::branch_taken(op, rs_val, rt_val),
        _ => false,
    };
    let target = if taken {
        Some((rd_val as u32 & 0x3FF) as u16)
    } else {
        None
    };

    if debug_branch && (inst.opcode == Opcode::Jal || inst.opcode.is_branch()) {
        tracing::debug!(
            pc = inst.pc,
            opcode = ?inst.opcode,
            rs_val,
            rt_val,
            taken,
            redirect = target,
            "branch resolved"
        );
    }

    target
}
