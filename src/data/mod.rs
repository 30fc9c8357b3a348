/// Data layer: point-file types, reading, writing and intensity mapping.
///
/// Architecture:
/// ```text
///   points.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse header, skip metadata → PointFile
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ PointFile │  Vec<PointRecord>, arity, metadata
///   └──────────┘
///        │  (x, y, intensity)
///        ▼
///   ┌───────────┐
///   │ normalize  │  raw intensities → alphas in [0.1, 1.0]
///   └───────────┘
/// ```
///
/// `writer` is the inverse of `loader` and produces files in the same format.

pub mod loader;
pub mod model;
pub mod normalize;
pub mod writer;
