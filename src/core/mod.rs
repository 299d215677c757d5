//! Per-core pipeline: five in-order stages, decode-time hazard stalls,
//! and delay-slot branch resolution.
//!
//! Every `step_*` method below reads only the current-cycle latches
//! (`self.f`, `self.d`, ...) and writes only the next-cycle latches
//! (`self.next_f`, ...), mirroring edge-triggered flip-flops. They must be
//! called in the order memory, execute, decode, fetch: each stage's
//! ability to accept new work depends on whether the stage downstream of
//! it is vacating this cycle, and that can only be known once the
//! downstream stage's own computation has run.

pub mod alu;
pub mod pipeline;
pub mod regfile;

use crate::bus::PendingRequest;
use crate::cache::Cache;
use crate::isa::Opcode;
use crate::stats::CoreStats;
use pipeline::latches::{DecodeLatch, ExecLatch, FetchLatch, MemLatch, WritebackLatch};
use pipeline::stages::{decode as decode_stage, execute as execute_stage, fetch as fetch_stage, memory as memory_stage};
use regfile::RegisterFile;

/// Snapshot of one cycle's five latches plus R2..R15, for the coretrace.
pub struct CoreTraceLine {
    pub f_pc: Option<u16>,
    pub d_pc: Option<u16>,
    pub e_pc: Option<u16>,
    pub m_pc: Option<u16>,
    pub w_pc: Option<u16>,
    pub registers: [i32; 14],
}

/// One core: register file, private cache, instruction memory, and the
/// five pipeline latches (current and next-cycle).
pub struct Core {
    pub id: usize,
    pub regs: RegisterFile,
    pub cache: Cache,
    pub stats: CoreStats,
    pub request: PendingRequest,

    imem: Vec<u32>,
    pc: u16,
    stop_fetch: bool,
    halted: bool,
    redirect_pending: bool,
    redirect_pc: u16,

    f: FetchLatch,
    d: DecodeLatch,
    e: ExecLatch,
    m: MemLatch,
    w: WritebackLatch,

    next_f: FetchLatch,
    next_d: DecodeLatch,
    next_e: ExecLatch,
    next_m: MemLatch,
    next_w: WritebackLatch,
}

impl Core {
    /// Builds a core with `imem` loaded and the first instruction already
    /// sitting in the fetch latch (reset state: pc=0 fetched, pc now 1).
    pub fn new(id: usize, imem: Vec<u32>) -> Self {
        let first = fetch_stage::fetch(&imem, 0);
        let stop_fetch = first.opcode == Opcode::Halt;
        Self {
            id,
            regs: RegisterFile::new(),
            cache: Cache::new(),
            stats: CoreStats::default(),
            request: PendingRequest::default(),
            imem,
            pc: 1,
            stop_fetch,
            halted: false,
            redirect_pending: false,
            redirect_pc: 0,
            f: FetchLatch {
                valid: true,
                inst: Some(first),
            },
            d: DecodeLatch::default(),
            e: ExecLatch::default(),
            m: MemLatch::default(),
            w: WritebackLatch::default(),
            next_f: FetchLatch::default(),
            next_d: DecodeLatch::default(),
            next_e: ExecLatch::default(),
            next_m: MemLatch::default(),
            next_w: WritebackLatch::default(),
        }
    }

    /// True once this core has retired HALT and drained every latch.
    pub fn is_done(&self) -> bool {
        self.halted && !self.f.valid && !self.d.valid && !self.e.valid && !self.m.valid && !self.w.valid
    }

    /// True if any latch is occupied this cycle (gates coretrace emission).
    pub fn has_activity(&self) -> bool {
        self.f.valid || self.d.valid || self.e.valid || self.m.valid || self.w.valid
    }

    pub fn trace_snapshot(&self) -> CoreTraceLine {
        CoreTraceLine {
            f_pc: self.f.inst.map(|i| i.pc),
            d_pc: self.d.inst.map(|i| i.pc),
            e_pc: self.e.inst.map(|i| i.pc),
            m_pc: self.m.inst.map(|i| i.pc),
            w_pc: self.w.inst.map(|i| i.pc),
            registers: self.regs.architectural_registers(),
        }
    }

    /// Step 2 of the cycle: commits this cycle's writeback, if any.
    pub fn commit_writeback(&mut self) {
        if self.w.valid {
            let inst = self.w.inst.expect("valid writeback latch carries an instruction");
            self.stats.instructions += 1;
            pipeline::stages::writeback::commit(&mut self.regs, &inst, self.w.value);
            if inst.opcode == Opcode::Halt {
                self.halted = true;
            }
        }
    }

    /// Step 3a: resolves MEM, producing `next_w` and (provisionally)
    /// `next_m`. Must run before [`Core::step_execute`].
    pub fn step_memory(&mut self) {
        let mut next_w = WritebackLatch::default();
        let mut next_m = MemLatch::default();

        if self.m.valid {
            let inst = self.m.inst.expect("valid mem latch carries an instruction");

            if self.m.waiting {
                next_m = self.m;
                self.stats.mem_stall += 1;
            } else {
                match memory_stage::classify(&self.cache, inst.opcode, self.m.mem_addr) {
                    memory_stage::Access::NotMemory => {
                        next_w = WritebackLatch {
                            valid: true,
                            inst: Some(inst),
                            value: self.m.alu_result,
                        };
                    }
                    memory_stage::Access::Hit => {
                        if !self.m.miss_counted {
                            match inst.opcode {
                                Opcode::Lw => self.stats.read_hit += 1,
                                Opcode::Sw => self.stats.write_hit += 1,
                                _ => {}
                            }
                        }
                        let value = match inst.opcode {
                            Opcode::Lw => self.cache.read_word(self.m.mem_addr),
                            Opcode::Sw => {
                                self.cache.write_word(self.m.mem_addr, self.m.store_data);
                                0
                            }
                            _ => 0,
                        };
                        next_w = WritebackLatch {
                            valid: true,
                            inst: Some(inst),
                            value,
                        };
                    }
                    memory_stage::Access::Miss { command } => {
                        if !self.m.miss_counted {
                            match inst.opcode {
                                Opcode::Lw => self.stats.read_miss += 1,
                                Opcode::Sw => self.stats.write_miss += 1,
                                _ => {}
                            }
                        }
                        if !self.m.request_queued {
                            self.request.queue(command, self.m.mem_addr);
                        }
                        next_m = self.m;
                        next_m.waiting = true;
                        next_m.request_queued = true;
                        next_m.miss_counted = true;
                        self.stats.mem_stall += 1;
                    }
                }
            }
        }

        self.next_w = next_w;
        self.next_m = next_m;
    }

    /// Step 3b: resolves EXEC. Reads `self.next_m` to learn whether MEM
    /// will be free next cycle; if so, issues this cycle's EXEC
    /// instruction into `next_m`, overwriting the bubble left by
    /// [`Core::step_memory`].
    pub fn step_execute(&mut self) {
        let mem_will_be_free = !self.next_m.valid;

        if self.e.valid && mem_will_be_free {
            let inst = self.e.inst.expect("valid exec latch carries an instruction");
            self.next_m = if inst.opcode.is_memory() {
                let addr = execute_stage::effective_address(self.e.rs_val, self.e.rt_val);
                MemLatch {
                    valid: true,
                    inst: Some(inst),
                    alu_result: 0,
                    mem_addr: addr,
                    store_data: self.e.rd_val,
                    waiting: false,
                    request_queued: false,
                    miss_counted: false,
                    loaded_value: 0,
                }
            } else {
                let result = execute_stage::alu_result(&inst, self.e.rs_val, self.e.rt_val);
                MemLatch {
                    valid: true,
                    inst: Some(inst),
                    alu_result: result,
                    ..MemLatch::default()
                }
            };
            self.next_e = ExecLatch::default();
        } else if self.e.valid {
            self.next_e = self.e;
        } else {
            self.next_e = ExecLatch::default();
        }
    }

    /// Step 3c: resolves DECODE. Reads `self.next_e` to learn whether
    /// EXEC will be free next cycle.
    pub fn step_decode(&mut self, debug_branch: bool) {
        if self.d.valid {
            let inst = self.d.inst.expect("valid decode latch carries an instruction");
            self.regs.set_immediate(inst.imm);
        }

        if !self.d.valid {
            self.next_d = DecodeLatch::default();
            return;
        }

        let inst = self.d.inst.expect("valid decode latch carries an instruction");
        let exec_not_free = self.next_e.valid;
        let hazard = pipeline::hazards::has_raw_hazard(
            &inst,
            self.e.inst.and_then(|i| i.dest_register()),
            self.m.inst.and_then(|i| i.dest_register()),
            self.w.inst.and_then(|i| i.dest_register()),
        );

        if hazard || exec_not_free {
            self.stats.decode_stall += 1;
            self.next_d = self.d;
            return;
        }

        let rs_val = self.regs.read(inst.rs);
        let rt_val = self.regs.read(inst.rt);
        let rd_val = self.regs.read(inst.rd);

        if let Some(target) =
            decode_stage::resolve_branch(&inst, rs_val, rt_val, rd_val, debug_branch)
        {
            self.redirect_pending = true;
            self.redirect_pc = target;
        }

        self.next_e = ExecLatch {
            valid: true,
            inst: Some(inst),
            rs_val,
            rt_val,
            rd_val,
        };
        self.next_d = DecodeLatch::default();
    }

    /// Step 3d: resolves FETCH. The instruction currently in F advances
    /// into D this cycle whenever D is about to vacate — unconditionally,
    /// even on a taken branch, which is what makes the delay slot execute.
    /// Any redirect only changes what is fetched *after* that handoff.
    pub fn step_fetch(&mut self) {
        let decode_will_be_free = !self.next_d.valid;

        if self.stop_fetch || !decode_will_be_free {
            self.next_f = self.f;
            return;
        }

        self.next_d = DecodeLatch {
            valid: self.f.valid,
            inst: self.f.inst,
        };

        let fetch_pc = if self.redirect_pending {
            self.redirect_pending = false;
            self.redirect_pc
        } else {
            self.pc
        };
        let inst = fetch_stage::fetch(&self.imem, fetch_pc);
        self.pc = ((fetch_pc as u32 + 1) & 0x3FF) as u16;
        if inst.opcode == Opcode::Halt {
            self.stop_fetch = true;
        }
        self.next_f = FetchLatch {
            valid: true,
            inst: Some(inst),
        };
    }

    /// Step 5: copies next-cycle latches into the current-cycle latches.
    /// Must run after the bus has had a chance to clear a completed
    /// request's `waiting` flag on `next_m`.
    pub fn latch_commit(&mut self) {
        self.f = self.next_f;
        self.d = self.next_d;
        self.e = self.next_e;
        self.m = self.next_m;
        self.w = self.next_w;
    }

    /// Called by the bus when this core's outstanding request completes.
    /// Fills the cache, clears the stalled MEM stage's `waiting` flag so
    /// it retries (and hits) next cycle, and returns any dirty victim
    /// line that must be written back to main memory.
    pub fn complete_request(
        &mut self,
        block_base: u32,
        block: [i32; crate::cache::LINE_WORDS],
        new_state: crate::cache::MesiState,
    ) -> Option<(u32, [i32; crate::cache::LINE_WORDS])> {
        let victim = self.cache.fill(block_base, block, new_state);
        self.next_m.waiting = false;
        victim
    }
}
