//! The top-level simulator: owns the register file and memory image
//! for its entire lifetime and drives the fetch-decode-execute loop.
//!
//! Grounded on `Platform`, which likewise owns its hart state as a
//! single struct with `&mut self` methods rather than a process-wide
//! singleton (spec.md §9 names singleton state as a re-architecture
//! target), and which gates its verbose step-by-step `println!`
//! tracing behind a `trace: bool` field toggled by `set_trace`.

use crate::exec::{self, StepOutcome};
use crate::loader;
use crate::memory::{MemoryImage, MEMORY_SIZE, PROGRAM_BASE};
use crate::registers::RegisterFile;
use crate::syscall::HostIo;
use crate::trap::{LoadError, RunOutcome, Trap};

pub struct Simulator {
    memory: MemoryImage,
    regs: RegisterFile,
    trace: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            memory: MemoryImage::new(MEMORY_SIZE),
            regs: RegisterFile::new(),
            trace: false,
        }
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Parse and load a Lite MIPS executable image, positioning `ip`
    /// at its entry point.
    pub fn load_executable(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let entry_ip = loader::load(&mut self.memory, bytes)?;
        self.regs.ip = entry_ip;
        Ok(())
    }

    /// Fetch, decode, and execute one instruction.
    pub fn step(&mut self, io: &mut dyn HostIo) -> Result<StepOutcome, Trap> {
        if self.trace {
            println!(
                "--- fetch at 0x{:08x} ---",
                PROGRAM_BASE.wrapping_add(self.regs.ip)
            );
        }
        let outcome = exec::step(&mut self.memory, &mut self.regs, io);
        if self.trace {
            match &outcome {
                Ok(step) => println!("step result: {step:?}, ip now 0x{:08x}", self.regs.ip),
                Err(trap) => println!("trap: {trap}"),
            }
        }
        outcome
    }

    /// Run until the guest exits or traps.
    pub fn run(&mut self, io: &mut dyn HostIo) -> RunOutcome {
        loop {
            match self.step(io) {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Exit) => return RunOutcome::Success,
                Err(trap) => return RunOutcome::Trap(trap),
            }
        }
    }

    /// The guest program counter, for diagnostics (spec.md §4.7:
    /// "guest PC (`PROGRAM_BASE + ip`)").
    pub fn guest_pc(&self) -> u32 {
        PROGRAM_BASE.wrapping_add(self.regs.ip)
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn memory(&self) -> &MemoryImage {
        &self.memory
    }
}
