use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Arity – how many numeric fields each point line carries
// ---------------------------------------------------------------------------

/// Field layout of the point-data lines in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// `x, y`
    Plain,
    /// `x, y, intensity`
    Weighted,
}

impl Arity {
    /// Number of comma-separated fields per line.
    pub fn field_count(self) -> usize {
        match self {
            Arity::Plain => 2,
            Arity::Weighted => 3,
        }
    }

    pub fn from_field_count(n: usize) -> Option<Self> {
        match n {
            2 => Some(Arity::Plain),
            3 => Some(Arity::Weighted),
            _ => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Plain => write!(f, "x, y"),
            Arity::Weighted => write!(f, "x, y, intensity"),
        }
    }
}

// ---------------------------------------------------------------------------
// PointRecord – one line of point data
// ---------------------------------------------------------------------------

/// A 2D point with an optional raw (unnormalized) intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub intensity: Option<f64>,
}

impl PointRecord {
    pub fn new(x: f64, y: f64) -> Self {
        PointRecord {
            x,
            y,
            intensity: None,
        }
    }

    pub fn weighted(x: f64, y: f64, intensity: f64) -> Self {
        PointRecord {
            x,
            y,
            intensity: Some(intensity),
        }
    }
}

// ---------------------------------------------------------------------------
// PointFile – the complete parsed file
// ---------------------------------------------------------------------------

/// A fully parsed point file. Built once by the loader, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFile {
    /// Declared on the header line; lines skipped before data is this + 2.
    pub metadata_line_count: usize,
    /// Metadata lines of the form `key: value`.
    pub metadata: BTreeMap<String, String>,
    /// Every metadata line, verbatim and in file order.
    pub raw_metadata: Vec<String>,
    /// `None` when the file has no data lines.
    pub arity: Option<Arity>,
    /// Points in file order (= render order).
    pub points: Vec<PointRecord>,
}

impl PointFile {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Raw intensities in point order, or `None` for a plain file.
    pub fn intensities(&self) -> Option<Vec<f64>> {
        match self.arity {
            Some(Arity::Weighted) => self.points.iter().map(|p| p.intensity).collect(),
            _ => None,
        }
    }

    /// Point coordinates in file order.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }
}
