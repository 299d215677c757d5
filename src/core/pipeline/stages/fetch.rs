//! Fetch stage: pulls one word from instruction memory.

use crate::isa::{decode, Instruction};

/// Fetches and decodes the instruction at `pc` from `imem`. Addresses past
/// the end of the loaded image read as zero (HALT-adjacent padding).
pub fn fetch(imem: &[u32], pc: u16) -> Instruction {
    let raw = imem.get(pc as usize).copied().unwrap_or(0);
    decode(raw, pc)
}
