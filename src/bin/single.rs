use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pointplot::app::run_single;
use pointplot::cli::SingleArgs;

fn run(args: &SingleArgs) -> Result<()> {
    let out_dir = std::env::current_dir().context("resolving the working directory")?;
    let out = run_single(&args.input_file, args.arity(), &out_dir)
        .context("plotting point file")?;
    println!("Wrote: {}", out.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = SingleArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
