//! Render point files as scatter plots for comparing a reference point set
//! against a candidate one.

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod render;

pub use color::PlotColor;
pub use data::loader::load_file;
pub use data::model::{Arity, PointFile, PointRecord};
pub use data::normalize::normalize_intensities;
pub use error::{PlotError, SourceLocation};
pub use render::{PlotConfig, ScatterPlot, Series};
