//! Four cores cooperatively increment a shared counter 128 times each,
//! coordinating purely through cache coherence: a token at `mem[1]` names
//! whose turn it is, and every core re-polls both words on every
//! iteration so a core that has already had its turn still notices when
//! the global counter reaches the stop condition.

mod common;

use common::*;
use mesi_cmp_sim::config::SimConfig;
use mesi_cmp_sim::sim::System;

const WAIT_LOOP: i32 = 5;
const CONTINUE: i32 = 9;
const BOUND: i32 = 512;

fn core_program(id: i32) -> Vec<u32> {
    let words = vec![
        encode(ADD, 2, 0, 1, id),        // 0: R2 = my id
        encode(ADD, 3, 0, 1, BOUND),     // 1: R3 = 512
        encode(ADD, 4, 0, 1, 1),         // 2: R4 = 1 (token address)
        encode(ADD, 8, 0, 1, WAIT_LOOP), // 3: R8 = wait_loop address
        encode(ADD, 9, 0, 1, CONTINUE),  // 4: R9 = continue address
        // wait_loop:
        encode(LW, 10, 0, 0, 0),  // 5: R10 = mem[0] (counter)
        encode(BLT, 9, 10, 3, 0), // 6: if counter < 512, goto continue
        encode(ADD, 0, 0, 0, 0),  // 7: delay slot
        encode(HALT, 0, 0, 0, 0), // 8: counter >= 512
        // continue:
        encode(LW, 7, 0, 4, 0),   // 9: R7 = mem[1] (token)
        encode(BNE, 8, 7, 2, 0),  // 10: if token != my id, goto wait_loop
        encode(ADD, 0, 0, 0, 0),  // 11: delay slot
        encode(ADD, 10, 10, 1, 1),// 12: counter + 1
        encode(SW, 10, 0, 0, 0),  // 13: mem[0] = counter + 1
        encode(ADD, 10, 7, 1, 1),// 14: token + 1
        encode(AND, 10, 10, 1, 3),// 15: (token + 1) & 3
        encode(SW, 10, 4, 0, 0), // 16: mem[1] = new token
        encode(BEQ, 8, 0, 0, 0), // 17: goto wait_loop, unconditionally
        encode(ADD, 0, 0, 0, 0), // 18: delay slot
    ];
    program(&words)
}

#[test]
fn counter_reaches_512_via_token_round_robin() {
    let imems = [core_program(0), core_program(1), core_program(2), core_program(3)];
    let mut system = System::new(imems, vec![0i32; 8]);
    system.run(&SimConfig {
        max_cycles: Some(2_000_000),
        debug_branch: false,
    });

    for core in &system.cores {
        assert!(core.is_done(), "core {} never halted", core.id);
    }

    assert_eq!(system.memory.words()[0], 512);
}
