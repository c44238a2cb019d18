//! The error taxonomy: load-time failures, run-time traps, and the
//! overall outcome of a run.
//!
//! Grounded on `riscvemu::hart::memory::{ReadError, WriteError}` and
//! `riscvemu::hart::registers::{RegisterReadError, RegisterWriteError}`:
//! small `thiserror` enums, one variant per distinct failure, no
//! catch-all "other" case. spec.md §7 calls for exactly these four
//! non-success kinds plus `Success` itself, which is modeled here as
//! `RunOutcome::Success` rather than a `Trap` variant, since it isn't
//! an error at all.

use thiserror::Error;

/// Failures that can occur while parsing and loading an executable
/// image, before the interpreter ever starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not a valid Lite MIPS executable (bad magic)")]
    BadMagic,
    #[error("executable file is truncated")]
    Truncated,
    #[error("could not read executable file: {0}")]
    Io(#[from] std::io::Error),
}

/// A synchronous exception raised by the executor that aborts the run
/// loop. Carries enough context (the faulting address or instruction
/// word) to print a useful diagnostic.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Trap {
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("memory address error at 0x{0:08x}")]
    MemoryAddress(u32),
    #[error("invalid instruction 0x{0:08x}")]
    InvalidInstruction(u32),
}

impl Trap {
    /// Distinct non-zero process exit code per trap kind, so scripts
    /// driving the simulator can tell traps apart without parsing
    /// stderr.
    pub fn exit_code(&self) -> i32 {
        match self {
            Trap::IntegerOverflow => 2,
            Trap::MemoryAddress(_) => 3,
            Trap::InvalidInstruction(_) => 4,
        }
    }
}

/// How a run of the interpreter loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The guest issued the `EXIT` syscall.
    Success,
    /// The guest triggered a trap; the run loop halted immediately.
    Trap(Trap),
}
