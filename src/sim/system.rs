//! Global simulation state: four cores, the shared bus, and main memory.
//!
//! [`System::tick`] implements the exact five-step per-cycle ordering the
//! architecture depends on: trace snapshot, writeback commit, next-latch
//! computation (memory, execute, decode, fetch, in that order), bus
//! arbitration/advance, then the latch copy that makes next-cycle state
//! current.

use crate::bus::Bus;
use crate::config::SimConfig;
use crate::core::Core;
use crate::memory::MainMemory;
use crate::trace::{format_bus_trace, format_core_trace};

/// The whole machine: four cores sharing one bus and one main memory.
pub struct System {
    pub cores: Vec<Core>,
    pub bus: Bus,
    pub memory: MainMemory,
    pub cycle: u64,
    pub core_traces: Vec<Vec<String>>,
    pub bus_trace: Vec<String>,
    debug_branch: bool,
}

impl System {
    /// Builds a system with four cores loaded from `imems` and main
    /// memory loaded from `mem_image`.
    pub fn new(imems: [Vec<u32>; 4], mem_image: Vec<i32>) -> Self {
        let cores = imems
            .into_iter()
            .enumerate()
            .map(|(id, imem)| Core::new(id, imem))
            .collect();
        Self {
            cores,
            bus: Bus::new(),
            memory: MainMemory::new(mem_image),
            cycle: 0,
            core_traces: vec![Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            bus_trace: Vec::new(),
            debug_branch: false,
        }
    }

    /// Runs until all cores are done and the bus is idle, or until
    /// `config.max_cycles` is reached, whichever comes first.
    pub fn run(&mut self, config: &SimConfig) {
        self.debug_branch = config.debug_branch;
        loop {
            if let Some(cap) = config.max_cycles {
                if self.cycle >= cap {
                    tracing::debug!(cycle = self.cycle, "hit SIM_MAX_CYCLES, stopping");
                    break;
                }
            }
            if self.is_quiescent() {
                break;
            }
            self.tick();
        }
    }

    fn is_quiescent(&self) -> bool {
        self.bus.is_idle() && self.cores.iter().all(Core::is_done)
    }

    fn tick(&mut self) {
        tracing::trace!(cycle = self.cycle, "begin cycle");

        for core in &self.cores {
            if core.has_activity() {
                let snapshot = core.trace_snapshot();
                self.core_traces[core.id].push(format_core_trace(self.cycle, &snapshot));
            }
        }

        for core in &mut self.cores {
            if !core.is_done() {
                core.stats.cycles += 1;
            }
            core.commit_writeback();
        }

        for core in &mut self.cores {
            core.step_memory();
            core.step_execute();
            core.step_decode(self.debug_branch);
            core.step_fetch();
        }

        if let Some(line) = self.bus.tick(&mut self.cores, &mut self.memory) {
            self.bus_trace.push(format_bus_trace(self.cycle, &line));
        }

        for core in &mut self.cores {
            core.latch_commit();
        }

        self.cycle += 1;
    }
}
