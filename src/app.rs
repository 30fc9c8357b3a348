use std::path::{Path, PathBuf};

use log::info;

use crate::color::PlotColor;
use crate::data::loader::load_file;
use crate::data::model::Arity;
use crate::error::Result;
use crate::render::{PlotConfig, ScatterPlot, Series};

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

/// File name of `input` with its last four characters (the extension,
/// for `.txt` inputs) dropped.
pub fn output_stem(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let keep = name.chars().count().saturating_sub(4);
    name.chars().take(keep).collect()
}

/// `<ref_stem>-<cand_stem>.png`
pub fn compare_output_name(reference: &Path, candidate: &Path) -> String {
    format!("{}-{}.png", output_stem(reference), output_stem(candidate))
}

/// `<stem>.png`
pub fn single_output_name(input: &Path) -> String {
    format!("{}.png", output_stem(input))
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

/// Overlay the candidate points (red) on the reference points (gray) and
/// write the PNG into `out_dir`. Returns the written path.
///
/// Both files are parsed and normalized before rendering starts, so any
/// error leaves no output behind.
pub fn run_compare(
    reference: &Path,
    candidate: &Path,
    arity: Option<Arity>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let ref_file = load_file(reference, arity)?;
    let cand_file = load_file(candidate, arity)?;

    let mut plot = ScatterPlot::new(PlotConfig::default());
    plot.add_series(Series::from_point_file(
        "reference",
        &ref_file,
        PlotColor::reference(),
    )?)
    .add_series(Series::from_point_file(
        "candidate",
        &cand_file,
        PlotColor::candidate(),
    )?);

    let out = out_dir.join(compare_output_name(reference, candidate));
    info!(
        "Comparing {} ({} points) against {} ({} points)",
        reference.display(),
        ref_file.len(),
        candidate.display(),
        cand_file.len()
    );
    plot.save_png(&out)?;
    Ok(out)
}

/// Plot one file in gray and write the PNG into `out_dir`.
pub fn run_single(input: &Path, arity: Option<Arity>, out_dir: &Path) -> Result<PathBuf> {
    let file = load_file(input, arity)?;

    let mut plot = ScatterPlot::new(PlotConfig::default());
    plot.add_series(Series::from_point_file("points", &file, PlotColor::reference())?);

    let out = out_dir.join(single_output_name(input));
    info!("Plotting {} ({} points)", input.display(), file.len());
    plot.save_png(&out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_drops_last_four_characters() {
        assert_eq!(output_stem(Path::new("./temp/ref.txt")), "ref");
        assert_eq!(output_stem(Path::new("points-0042.dat")), "points-0042");
        assert_eq!(output_stem(Path::new("abc")), "");
        assert_eq!(output_stem(Path::new("noext-file")), "noext-");
    }

    #[test]
    fn stem_counts_characters_not_bytes() {
        assert_eq!(output_stem(Path::new("größe.txt")), "größe");
    }

    #[test]
    fn compare_name_joins_both_stems() {
        assert_eq!(
            compare_output_name(Path::new("a/ref.txt"), Path::new("b/cand.txt")),
            "ref-cand.png"
        );
    }

    #[test]
    fn single_name() {
        assert_eq!(single_output_name(Path::new("/tmp/digit-7.txt")), "digit-7.png");
    }
}
