use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use log::{debug, warn};

use super::model::{Arity, PointFile, PointRecord};
use crate::error::{PlotError, Result, SourceLocation};

/// Separator between the fields of a point-data line.
pub const FIELD_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse a point file.
///
/// File layout:
/// ```text
/// <token> <metadata_line_count>
/// <metadata_line_count lines of metadata>
/// <separator line>
/// x, y[, intensity]
/// ...
/// ```
///
/// With `expected = None` the arity is taken from the first data line and
/// every later line must match it. With `Some(arity)` every line, the first
/// included, must have that arity.
pub fn load_file(path: &Path, expected: Option<Arity>) -> Result<PointFile> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::InvalidData => {
            PlotError::format(SourceLocation::file(path), "not valid UTF-8 text")
        }
        _ => PlotError::NotFound {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let file = parse_point_file(&text, path, expected)?;
    debug!(
        "{}: {} points, {} metadata lines, arity {:?}",
        path.display(),
        file.len(),
        file.metadata_line_count,
        file.arity
    );
    Ok(file)
}

/// Parse the text of a point file. `path` is only used in error messages.
pub fn parse_point_file(text: &str, path: &Path, expected: Option<Arity>) -> Result<PointFile> {
    let lines: Vec<&str> = text.lines().collect();

    let header = lines
        .first()
        .ok_or_else(|| PlotError::format(SourceLocation::file(path), "missing header line"))?;
    let metadata_line_count = parse_header(header)
        .map_err(|msg| PlotError::format(SourceLocation::line(path, 1), msg))?;

    // Checked before adding so a huge declared count cannot overflow.
    if metadata_line_count >= lines.len() {
        return Err(PlotError::format(
            SourceLocation::file(path),
            format!(
                "header declares {metadata_line_count} metadata lines but only {} follow it",
                lines.len() - 1
            ),
        ));
    }
    let metadata_end = 1 + metadata_line_count;

    let raw_metadata: Vec<String> = lines[1..metadata_end]
        .iter()
        .map(|l| l.to_string())
        .collect();
    let metadata = parse_metadata(&raw_metadata);

    if let Some(separator) = lines.get(metadata_end) {
        if !separator.trim().is_empty() {
            warn!(
                "{}: ignoring non-blank separator line `{separator}`",
                SourceLocation::line(path, metadata_end + 1)
            );
        }
    }

    let mut arity = expected;
    let mut points = Vec::new();

    for (idx, line) in lines.iter().enumerate().skip(metadata_end + 1) {
        if line.trim().is_empty() {
            debug!("{}: skipping blank line", SourceLocation::line(path, idx + 1));
            continue;
        }
        let (record, line_arity) = parse_point_line(line, arity)
            .map_err(|msg| PlotError::format(SourceLocation::line(path, idx + 1), msg))?;
        arity.get_or_insert(line_arity);
        points.push(record);
    }

    Ok(PointFile {
        metadata_line_count,
        metadata,
        raw_metadata,
        // A forced arity on a file without data lines still says nothing
        // about the file itself.
        arity: if points.is_empty() { None } else { arity },
        points,
    })
}

// ---------------------------------------------------------------------------
// Line parsers
// ---------------------------------------------------------------------------

/// `<token> <count>` → count. Extra trailing fields are ignored.
fn parse_header(line: &str) -> std::result::Result<usize, String> {
    let count = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| format!("header `{line}` is not of the form `<token> <metadata_line_count>`"))?;

    count
        .parse::<usize>()
        .map_err(|_| format!("metadata line count `{count}` is not a non-negative integer"))
}

fn parse_metadata(lines: &[String]) -> BTreeMap<String, String> {
    lines
        .iter()
        .filter_map(|l| {
            let (key, value) = l.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

fn parse_point_line(
    line: &str,
    expected: Option<Arity>,
) -> std::result::Result<(PointRecord, Arity), String> {
    let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();

    let arity = Arity::from_field_count(fields.len()).ok_or_else(|| {
        format!(
            "expected 2 or 3 `, `-separated fields, found {}",
            fields.len()
        )
    })?;
    if let Some(expected) = expected {
        if arity != expected {
            return Err(format!(
                "expected {} fields ({expected}), found {}",
                expected.field_count(),
                fields.len()
            ));
        }
    }

    let values = fields
        .iter()
        .map(|f| {
            let f = f.trim();
            f.parse::<f64>()
                .map_err(|_| format!("`{f}` is not a number"))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    let record = match arity {
        Arity::Plain => PointRecord::new(values[0], values[1]),
        Arity::Weighted => PointRecord::weighted(values[0], values[1], values[2]),
    };
    Ok((record, arity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<PointFile> {
        parse_point_file(text, Path::new("points.txt"), None)
    }

    fn format_line(err: &PlotError) -> Option<usize> {
        match err {
            PlotError::Format { location, .. } => location.line,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn plain_points_in_file_order() {
        let f = parse("meta 0\n\n1.0, 2.0\n3.0, 4.0\n").unwrap();
        assert_eq!(f.arity, Some(Arity::Plain));
        assert_eq!(
            f.points,
            vec![PointRecord::new(1.0, 2.0), PointRecord::new(3.0, 4.0)]
        );
        assert!(f.points.iter().all(|p| p.intensity.is_none()));
    }

    #[test]
    fn skips_header_metadata_and_separator() {
        // 1 header + 2 metadata + 1 separator = 4 skipped lines.
        let text = "meta 2\n7.0, 7.0\n8.0, 8.0\n9.0, 9.0\n1.0, 2.0\n";
        let f = parse(text).unwrap();
        assert_eq!(f.metadata_line_count, 2);
        assert_eq!(f.raw_metadata, vec!["7.0, 7.0", "8.0, 8.0"]);
        assert_eq!(f.points, vec![PointRecord::new(1.0, 2.0)]);
    }

    #[test]
    fn weighted_points() {
        let f = parse("meta 0\n\n1.0, 2.0, 0.5\n3.0, 4.0, 0.25").unwrap();
        assert_eq!(f.arity, Some(Arity::Weighted));
        assert_eq!(f.intensities(), Some(vec![0.5, 0.25]));
    }

    #[test]
    fn key_value_metadata_is_collected() {
        let text = "num_lines_metadata: 3\ntype: PIXEL_LIST\norigin: TOP_LEFT\nfree text\n\n1, 1\n";
        let f = parse(text).unwrap();
        assert_eq!(f.metadata.get("type").map(String::as_str), Some("PIXEL_LIST"));
        assert_eq!(f.metadata.get("origin").map(String::as_str), Some("TOP_LEFT"));
        assert_eq!(f.metadata.len(), 2);
        assert_eq!(f.raw_metadata.len(), 3);
    }

    #[test]
    fn non_numeric_metadata_count_is_rejected() {
        let err = parse("meta abc\n\n1.0, 2.0").unwrap_err();
        assert_eq!(format_line(&err), Some(1));
    }

    #[test]
    fn negative_metadata_count_is_rejected() {
        assert!(matches!(parse("meta -1\n\n1.0, 2.0"), Err(PlotError::Format { .. })));
    }

    #[test]
    fn header_without_count_is_rejected() {
        assert!(matches!(parse("meta\n\n1.0, 2.0"), Err(PlotError::Format { .. })));
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = parse("").unwrap_err();
        assert_eq!(format_line(&err), None);
    }

    #[test]
    fn truncated_metadata_block_is_rejected() {
        assert!(matches!(parse("meta 3\na\nb"), Err(PlotError::Format { .. })));
    }

    #[test]
    fn maximal_metadata_count_is_rejected() {
        let err = parse("meta 18446744073709551615\n\n1.0, 2.0\n").unwrap_err();
        assert!(matches!(err, PlotError::Format { .. }));
    }

    #[test]
    fn header_only_file_has_no_points() {
        let f = parse("meta 0\n").unwrap();
        assert!(f.is_empty());
        assert_eq!(f.arity, None);
    }

    #[test]
    fn mixed_arity_fails_on_first_mismatch() {
        let err = parse("meta 0\n\n1.0, 2.0\n3.0, 4.0\n5.0, 6.0, 0.1\n").unwrap_err();
        assert_eq!(format_line(&err), Some(5));
    }

    #[test]
    fn forced_arity_rejects_first_line() {
        let err = parse_point_file("meta 0\n\n1.0, 2.0\n", Path::new("p.txt"), Some(Arity::Weighted))
            .unwrap_err();
        assert_eq!(format_line(&err), Some(3));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert!(parse("meta 0\n\n1.0\n").is_err());
        assert!(parse("meta 0\n\n1.0, 2.0, 3.0, 4.0\n").is_err());
        assert!(parse("meta 0\n\n1.0,2.0\n").is_err());
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let err = parse("meta 0\n\n1.0, 2.0\n1.0, y\n").unwrap_err();
        assert_eq!(format_line(&err), Some(4));
    }

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let f = parse("meta 1\r\nkind: test\r\n\r\n1.5, 2.5\r\n\r\n3.5, 4.5\r\n").unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.points[1], PointRecord::new(3.5, 4.5));
    }

    #[test]
    fn out_of_range_coordinates_are_kept() {
        let f = parse("meta 0\n\n-5.0, 100.0\n").unwrap();
        assert_eq!(f.points, vec![PointRecord::new(-5.0, 100.0)]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = std::env::temp_dir().join("pointplot-loader-does-not-exist.txt");
        assert!(matches!(
            load_file(&path, None),
            Err(PlotError::NotFound { .. })
        ));
    }
}
