//! Core 0 writes a fresh value to address 0x10; core 1 reads the same
//! address only once core 0's write has certainly landed (enforced with
//! a generous run of filler instructions rather than any shared flag,
//! since the point of this scenario is the RD snoop's M-to-S demotion,
//! not a second coherence handshake).

mod common;

use common::*;
use mesi_cmp_sim::cache::{locate, MesiState};
use mesi_cmp_sim::config::SimConfig;
use mesi_cmp_sim::sim::System;

const ADDR: i32 = 0x10;

fn nops(n: usize) -> Vec<u32> {
    vec![encode(ADD, 0, 0, 0, 0); n]
}

#[test]
fn rd_snoop_demotes_writer_and_shares_value() {
    let mut core0 = vec![
        encode(ADD, 2, 0, 1, 0x111),
        encode(SLL, 2, 2, 1, 12),
        encode(OR, 2, 2, 1, 0x111),
        encode(SLL, 2, 2, 1, 8),
        encode(OR, 2, 2, 1, 0x11), // R2 = 0x11111111
        encode(ADD, 4, 0, 1, ADDR),
        encode(SW, 2, 0, 4, 0),
    ];
    core0.extend(nops(80));
    core0.push(encode(HALT, 0, 0, 0, 0));

    let mut core1 = nops(80);
    core1.push(encode(ADD, 4, 0, 1, ADDR));
    core1.push(encode(LW, 7, 0, 4, 0));
    core1.push(encode(HALT, 0, 0, 0, 0));

    let halt_only = program(&[encode(HALT, 0, 0, 0, 0)]);
    let imems = [program(&core0), program(&core1), halt_only.clone(), halt_only];

    let mut system = System::new(imems, vec![0i32; 32]);
    system.run(&SimConfig::default());

    assert!(system.cores[0].is_done());
    assert!(system.cores[1].is_done());

    let index = locate(ADDR as u32).index;
    assert_eq!(system.cores[0].cache.state_at(index), MesiState::Shared);
    assert_eq!(system.cores[1].cache.state_at(index), MesiState::Shared);

    assert_eq!(system.cores[1].regs.architectural_registers()[5], 0x11111111u32 as i32); // R7
    assert_eq!(system.memory.words()[ADDR as usize], 0x11111111u32 as i32);

    assert_eq!(system.cores[0].stats.write_miss, 1);
    assert_eq!(system.cores[0].stats.write_hit, 0);
    assert_eq!(system.cores[1].stats.read_miss, 1);
    assert_eq!(system.cores[1].stats.read_hit, 0);
}
