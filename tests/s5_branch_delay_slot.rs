//! JAL's delay slot must execute unconditionally before the redirect to
//! its target takes effect.

mod common;

use common::*;
use mesi_cmp_sim::config::SimConfig;
use mesi_cmp_sim::sim::System;

#[test]
fn jal_delay_slot_executes_before_redirect() {
    let program0 = program(&[
        encode(ADD, 5, 0, 1, 5),   // 0: R5 = 5 (jump target)
        encode(JAL, 5, 0, 0, 0),   // 1: jump to R5; R15 = pc + 1 = 2
        encode(ADD, 2, 0, 1, 7),   // 2: delay slot, always executes: R2 = 7
        encode(ADD, 2, 0, 1, 99),  // 3: skipped
        encode(ADD, 2, 0, 1, 55),  // 4: skipped
        encode(HALT, 0, 0, 0, 0),  // 5: jump target
    ]);
    let halt_only = program(&[encode(HALT, 0, 0, 0, 0)]);
    let imems = [program0, halt_only.clone(), halt_only.clone(), halt_only];

    let mut system = System::new(imems, vec![]);
    system.run(&SimConfig::default());

    let regs = system.cores[0].regs.architectural_registers();
    assert_eq!(regs[0], 7); // R2
    assert_eq!(regs[13], 2); // R15
}
