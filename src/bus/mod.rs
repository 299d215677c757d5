//! Shared snooping bus: round-robin arbitration, MESI snoop, and block
//! flush streaming.
//!
//! Exactly one transaction is live at a time. A transaction passes through
//! three phases: `Idle` (nothing outstanding), `Wait` (either draining a
//! fixed 16-cycle memory latency, or — when a peer cache can provide the
//! block directly — zero cycles), and `Flush` (eight cycles streaming the
//! block onto the bus and into the requester's cache).

use crate::cache::{BusCommand, LINE_WORDS};
use crate::core::Core;
use crate::memory::MainMemory;

const MEMORY_LATENCY: u32 = 16;

/// A core's single pending miss or upgrade request.
#[derive(Clone, Copy, Debug, Default)]
pub struct PendingRequest {
    pub active: bool,
    pub command: Option<BusCommand>,
    pub addr: u32,
}

impl PendingRequest {
    pub fn queue(&mut self, command: BusCommand, addr: u32) {
        self.active = true;
        self.command = Some(command);
        self.addr = addr;
    }

    fn take(&mut self) -> (BusCommand, u32) {
        self.active = false;
        (self.command.take().unwrap(), self.addr)
    }
}

/// Where the flushed block is sourced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Provider {
    Memory,
    Cache(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Wait,
    Flush,
}

/// One cycle's observable bus activity, emitted to the bus trace.
#[derive(Clone, Copy, Debug)]
pub struct BusTraceLine {
    pub origin: u8,
    pub command: TraceCommand,
    pub addr: u32,
    pub data: i32,
    pub shared: bool,
}

/// Bus command values as driven on the wire (distinct from
/// [`BusCommand`] because `FLUSH` has no corresponding request command).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceCommand {
    Rd = 1,
    Rdx = 2,
    Flush = 3,
}

pub struct Bus {
    phase: Phase,
    command: BusCommand,
    origin: usize,
    /// The exact word address the requester asked for (used on Wait-phase
    /// trace lines; not necessarily block-aligned).
    request_addr: u32,
    /// Block-aligned base address of the in-flight transaction.
    block_base: u32,
    shared: bool,
    provider: Provider,
    block: [i32; LINE_WORDS],
    delay: u32,
    flush_index: usize,
    rr_next: usize,
}

impl Default for Bus {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            command: BusCommand::Rd,
            origin: 0,
            request_addr: 0,
            block_base: 0,
            shared: false,
            provider: Provider::Memory,
            block: [0; LINE_WORDS],
            delay: 0,
            flush_index: 0,
            rr_next: 0,
        }
    }
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Advances the bus by one cycle. `cores` must have exactly four
    /// entries. Returns the trace line for this cycle, if any command was
    /// driven.
    pub fn tick(&mut self, cores: &mut [Core], memory: &mut MainMemory) -> Option<BusTraceLine> {
        if self.phase == Phase::Idle && !self.try_start(cores, memory) {
            return None;
        }

        match self.phase {
            Phase::Idle => unreachable!("try_start leaves the bus in Wait or Flush"),
            Phase::Wait => {
                let line = BusTraceLine {
                    origin: self.origin as u8,
                    command: trace_command(self.command),
                    addr: self.request_addr,
                    data: 0,
                    shared: self.shared,
                };
                if self.delay == 0 {
                    self.phase = Phase::Flush;
                    self.flush_index = 0;
                    Some(self.drive_flush(cores, memory))
                } else {
                    self.delay -= 1;
                    Some(line)
                }
            }
            Phase::Flush => Some(self.drive_flush(cores, memory)),
        }
    }

    fn try_start(&mut self, cores: &mut [Core], memory: &mut MainMemory) -> bool {
        let Some(winner) = self.arbitrate(cores) else {
            return false;
        };

        let (command, addr) = cores[winner].request.take();
        self.origin = winner;
        self.command = command;
        self.request_addr = addr;
        self.block_base = crate::cache::block_base(addr);
        self.rr_next = (winner + 1) % cores.len();

        let mut shared = false;
        let mut provider = None;
        for (i, core) in cores.iter_mut().enumerate() {
            if i == winner {
                continue;
            }
            let outcome = core.cache.snoop(self.block_base, command);
            if outcome.present {
                shared = true;
            }
            if let Some(block) = outcome.provided_block {
                provider = Some((i, block));
            }
        }
        self.shared = shared;

        match provider {
            Some((id, block)) => {
                self.provider = Provider::Cache(id);
                self.block = block;
                self.delay = 0;
            }
            None => {
                self.provider = Provider::Memory;
                self.block = memory.read_block(self.block_base);
                self.delay = MEMORY_LATENCY;
            }
        }

        self.phase = Phase::Wait;
        tracing::trace!(
            origin = winner,
            command = ?self.command,
            addr = self.request_addr,
            shared = self.shared,
            delay = self.delay,
            "bus transaction started"
        );
        true
    }

    fn arbitrate(&self, cores: &[Core]) -> Option<usize> {
        let n = cores.len();
        (0..n)
            .map(|offset| (self.rr_next + offset) % n)
            .find(|&i| cores[i].request.active)
    }

    fn drive_flush(&mut self, cores: &mut [Core], memory: &mut MainMemory) -> BusTraceLine {
        let data = self.block[self.flush_index];
        let addr = self.block_base + self.flush_index as u32;
        let line = BusTraceLine {
            origin: self.origin as u8,
            command: TraceCommand::Flush,
            addr,
            data,
            shared: self.shared,
        };

        self.flush_index += 1;
        if self.flush_index == LINE_WORDS {
            memory.write_block(self.block_base, self.block);
            let new_state = match (self.command, self.shared) {
                (BusCommand::Rd, true) => crate::cache::MesiState::Shared,
                (BusCommand::Rd, false) => crate::cache::MesiState::Exclusive,
                (BusCommand::Rdx, _) => crate::cache::MesiState::Modified,
            };
            if let Some((victim_addr, victim_block)) =
                cores[self.origin].complete_request(self.block_base, self.block, new_state)
            {
                memory.write_block(victim_addr, victim_block);
            }
            self.phase = Phase::Idle;
            tracing::debug!(
                origin = self.origin,
                block_base = self.block_base,
                new_state = ?new_state,
                "bus transaction complete"
            );
        }

        line
    }
}

fn trace_command(command: BusCommand) -> TraceCommand {
    match command {
        BusCommand::Rd => TraceCommand::Rd,
        BusCommand::Rdx => TraceCommand::Rdx,
    }
}
