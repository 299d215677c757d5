//! Every core's program is a single HALT. The machine should reach
//! quiescence in a handful of cycles without ever touching the bus or a
//! cache line.

mod common;

use common::*;
use mesi_cmp_sim::cache::MesiState;
use mesi_cmp_sim::config::SimConfig;
use mesi_cmp_sim::sim::System;

#[test]
fn halt_only_program_retires_one_instruction_per_core() {
    let halt_only = program(&[encode(HALT, 0, 0, 0, 0)]);
    let imems = [halt_only.clone(), halt_only.clone(), halt_only.clone(), halt_only];
    let mut system = System::new(imems, vec![]);
    system.run(&SimConfig::default());

    assert!(system.bus_trace.is_empty());
    assert!(system.memory.words().iter().all(|&w| w == 0));

    for core in &system.cores {
        assert!(core.is_done());
        assert_eq!(core.stats.instructions, 1);
        assert_eq!(core.regs.architectural_registers(), [0i32; 14]);
        for state in core.cache.dump_tag_state() {
            assert_eq!(state, MesiState::Invalid as u32);
        }
    }
}
