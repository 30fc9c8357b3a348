//! Command-line arguments for the `compare` and `single` tools.

use std::path::PathBuf;

use clap::Parser;

use crate::data::model::Arity;

/// Compare tool arguments
#[derive(Parser, Debug)]
#[command(name = "compare", version)]
#[command(about = "Plot candidate points (red) over reference points (gray)", long_about = None)]
pub struct CompareArgs {
    /// Point file with the reference points
    pub ref_file: PathBuf,

    /// Point file with the candidate points
    pub cand_file: PathBuf,

    /// Fields per point line (2 = x, y; 3 = x, y, intensity).
    /// Detected from the first data line when omitted.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(2..=3))]
    pub fields: Option<u8>,
}

impl CompareArgs {
    pub fn arity(&self) -> Option<Arity> {
        fields_to_arity(self.fields)
    }
}

/// Single-file tool arguments
#[derive(Parser, Debug)]
#[command(name = "single", version)]
#[command(about = "Plot the points of one point file", long_about = None)]
pub struct SingleArgs {
    /// Point file to plot
    pub input_file: PathBuf,

    /// Fields per point line (2 = x, y; 3 = x, y, intensity).
    /// Detected from the first data line when omitted.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(2..=3))]
    pub fields: Option<u8>,
}

impl SingleArgs {
    pub fn arity(&self) -> Option<Arity> {
        fields_to_arity(self.fields)
    }
}

fn fields_to_arity(fields: Option<u8>) -> Option<Arity> {
    fields.and_then(|n| Arity::from_field_count(n as usize))
}
