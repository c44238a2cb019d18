use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use litemips::simulator::Simulator;
use litemips::syscall::ProcessIo;
use litemips::trap::RunOutcome;

/// Run a Lite MIPS executable.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Path to the executable image
    input: PathBuf,

    /// Print a line for every fetched instruction and its effect
    #[arg(short, long)]
    trace: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let bytes = match fs::read(&args.input) {
        Ok(bytes) => bytes,
        Err(err) => {
            println!("Unable to open file '{}': {err}", args.input.display());
            return ExitCode::from(1);
        }
    };

    let mut sim = Simulator::new();
    sim.set_trace(args.trace);

    if let Err(err) = sim.load_executable(&bytes) {
        println!("File '{}' is not a valid executable file: {err}", args.input.display());
        return ExitCode::from(1);
    }

    let mut io = ProcessIo;
    match sim.run(&mut io) {
        RunOutcome::Success => ExitCode::SUCCESS,
        RunOutcome::Trap(trap) => {
            eprintln!("trap at guest PC 0x{:08x}: {trap}", sim.guest_pc());
            ExitCode::from(trap.exit_code() as u8)
        }
    }
}
