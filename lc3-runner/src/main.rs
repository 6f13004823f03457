//! LC-3 virtual machine CLI.

use clap::Parser;
use lc3_cpu::Lc3Cpu;
use lc3_term::TerminalBus;
use std::fs::File;
use std::process::ExitCode;

/// Run an LC-3 object image.
#[derive(Parser)]
#[command(name = "lc3-vm")]
struct Args {
    /// Path to a big-endian LC-3 image file.
    path: std::path::PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lc3-vm: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), lc3_term::TermError> {
    let mut bus = TerminalBus::new()?;
    let file = File::open(&args.path)?;
    bus.load_image(file)?;

    let mut cpu = Lc3Cpu::new();
    log::info!("starting at pc={:#06x}", cpu.pc());
    cpu.run(&mut bus);
    bus.restore_terminal();

    Ok(())
}
