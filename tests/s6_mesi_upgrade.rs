//! Both cores read address A into Shared; core 0 then stores to it,
//! forcing a write-miss upgrade that invalidates core 1's copy.

mod common;

use common::*;
use mesi_cmp_sim::cache::{locate, MesiState};
use mesi_cmp_sim::config::SimConfig;
use mesi_cmp_sim::sim::System;

const ADDR: i32 = 32;

#[test]
fn store_on_shared_line_upgrades_to_modified_and_invalidates_peer() {
    let mut core0 = vec![
        encode(ADD, 4, 0, 1, ADDR),
        encode(LW, 2, 0, 4, 0),
    ];
    core0.extend(vec![encode(ADD, 0, 0, 0, 0); 100]);
    core0.push(encode(SW, 2, 0, 4, 0));
    core0.push(encode(HALT, 0, 0, 0, 0));

    let core1 = program(&[
        encode(ADD, 4, 0, 1, ADDR),
        encode(LW, 6, 0, 4, 0),
        encode(HALT, 0, 0, 0, 0),
    ]);

    let halt_only = program(&[encode(HALT, 0, 0, 0, 0)]);
    let imems = [program(&core0), core1, halt_only.clone(), halt_only];

    let mut system = System::new(imems, vec![0i32; 64]);
    system.run(&SimConfig::default());

    assert!(system.cores[0].is_done());
    assert!(system.cores[1].is_done());

    let index = locate(ADDR as u32).index;
    assert_eq!(system.cores[0].cache.state_at(index), MesiState::Modified);
    assert_eq!(system.cores[1].cache.state_at(index), MesiState::Invalid);

    assert_eq!(system.cores[0].stats.write_miss, 1);
    assert_eq!(system.cores[0].stats.write_hit, 0);
    assert_eq!(system.cores[0].stats.read_miss, 1);
    assert_eq!(system.cores[1].stats.read_miss, 1);
}
