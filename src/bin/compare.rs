use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pointplot::app::run_compare;
use pointplot::cli::CompareArgs;

fn run(args: &CompareArgs) -> Result<()> {
    let out_dir = std::env::current_dir().context("resolving the working directory")?;
    let out = run_compare(&args.ref_file, &args.cand_file, args.arity(), &out_dir)
        .context("comparing point files")?;
    println!("Wrote: {}", out.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CompareArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
