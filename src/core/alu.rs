//! Arithmetic/logic execution for non-memory, non-branch opcodes.

use crate::isa::Opcode;

/// Computes the ALU result for `opcode` given its two operand values and
/// the current program counter (needed for JAL's return-link value).
///
/// Branch opcodes are not handled here: comparisons resolve in DECODE, not
/// EXEC. `Opcode::Unknown` and any opcode not covered below produce 0.
pub fn compute(opcode: Opcode, rs_val: i32, rt_val: i32, pc: u16) -> i32 {
    match opcode {
        Opcode::Add => rs_val.wrapping_add(rt_val),
        Opcode::Sub => rs_val.wrapping_sub(rt_val),
        Opcode::And => rs_val & rt_val,
        Opcode::Or => rs_val | rt_val,
        Opcode::Xor => rs_val ^ rt_val,
        Opcode::Mul => rs_val.wrapping_mul(rt_val),
        Opcode::Sll => rs_val.wrapping_shl((rt_val & 0x1F) as u32),
        Opcode::Sra => rs_val.wrapping_shr((rt_val & 0x1F) as u32),
        Opcode::Srl => ((rs_val as u32).wrapping_shr((rt_val & 0x1F) as u32)) as i32,
        Opcode::Jal => ((pc as u32).wrapping_add(1) & 0x3FF) as i32,
        _ => 0,
    }
}

/// Evaluates a branch comparison, returning whether the branch is taken.
pub fn branch_taken(opcode: Opcode, rs_val: i32, rt_val: i32) -> bool {
    match opcode {
        Opcode::Beq => rs_val == rt_val,
        Opcode::Bne => rs_val != rt_val,
        Opcode::Blt => rs_val < rt_val,
        Opcode::Bgt => rs_val > rt_val,
        Opcode::Ble => rs_val <= rt_val,
        Opcode::Bge => rs_val >= rt_val,
        _ => false,
    }
}
