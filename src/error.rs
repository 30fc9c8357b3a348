use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// SourceLocation – where in an input file something went wrong
// ---------------------------------------------------------------------------

/// A file path plus an optional 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: PathBuf,
    pub line: Option<usize>,
}

impl SourceLocation {
    pub fn file(path: &Path) -> Self {
        SourceLocation {
            path: path.to_path_buf(),
            line: None,
        }
    }

    pub fn line(path: &Path, line: usize) -> Self {
        SourceLocation {
            path: path.to_path_buf(),
            line: Some(line),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.path.display()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// PlotError
// ---------------------------------------------------------------------------

/// Every way reading, normalizing or rendering a point file can fail.
/// All of them are terminal for an invocation.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("{}: file not found or unreadable", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{location}: {message}")]
    Format {
        location: SourceLocation,
        message: String,
    },

    #[error("cannot normalize {count} intensities: range [{min}, {max}] is degenerate")]
    DegenerateRange { count: usize, min: f64, max: f64 },

    #[error("invalid color: {0}")]
    Color(String),

    #[error("{}: write failed", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: image encoding failed", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PlotError {
    pub fn format(location: SourceLocation, message: impl Into<String>) -> Self {
        PlotError::Format {
            location,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_file_and_line() {
        let err = PlotError::format(SourceLocation::line(Path::new("a/ref.txt"), 4), "bad field");
        assert_eq!(err.to_string(), "a/ref.txt:4: bad field");
    }

    #[test]
    fn format_error_without_line() {
        let err = PlotError::format(SourceLocation::file(Path::new("ref.txt")), "missing header line");
        assert_eq!(err.to_string(), "ref.txt: missing header line");
    }
}
