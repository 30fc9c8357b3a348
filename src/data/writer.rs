use std::fmt::Write as _;
use std::path::Path;

use log::debug;

use super::model::PointRecord;
use crate::error::{PlotError, Result, SourceLocation};

/// Decimal places written for every numeric field.
const PRECISION: usize = 5;

/// Serialize points to the point-file format.
///
/// The header is `num_lines_metadata: <n>` followed by the metadata lines
/// and one blank separator line. Points with an intensity are written as
/// three fields, others as two. All points must agree. `path` is only used
/// in error messages.
pub fn format_point_file(
    path: &Path,
    points: &[PointRecord],
    metadata: &[String],
) -> Result<String> {
    let weighted = points.first().is_some_and(|p| p.intensity.is_some());
    if let Some(idx) = points
        .iter()
        .position(|p| p.intensity.is_some() != weighted)
    {
        return Err(PlotError::format(
            SourceLocation::file(path),
            format!("point {idx} breaks the plain/weighted layout of the first point"),
        ));
    }

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "num_lines_metadata: {}", metadata.len());
    for line in metadata {
        let _ = writeln!(out, "{line}");
    }
    out.push('\n');

    for p in points {
        let _ = match p.intensity {
            Some(i) => writeln!(out, "{:.prec$}, {:.prec$}, {:.prec$}", p.x, p.y, i, prec = PRECISION),
            None => writeln!(out, "{:.prec$}, {:.prec$}", p.x, p.y, prec = PRECISION),
        };
    }
    Ok(out)
}

/// Write points to `path`, replacing any existing file.
pub fn write_point_file(path: &Path, points: &[PointRecord], metadata: &[String]) -> Result<()> {
    let text = format_point_file(path, points, metadata)?;

    std::fs::write(path, text).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("{}: wrote {} points", path.display(), points.len());
    Ok(())
}
