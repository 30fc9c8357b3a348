use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use log::{debug, info};

use crate::color::PlotColor;
use crate::data::model::PointFile;
use crate::data::normalize::normalize_intensities;
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// PlotConfig – fixed figure parameters
// ---------------------------------------------------------------------------

/// Figure geometry and styling. The defaults are the only values the
/// command-line tools use.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    /// Data range shown on the horizontal axis.
    pub x_range: (f64, f64),
    /// Data range shown on the vertical axis.
    pub y_range: (f64, f64),
    /// Put `y_range.0` at the top of the plot (image-style origin).
    pub invert_y: bool,
    /// Marker radius in pixels.
    pub marker_radius: f64,
    pub tick_step: f64,
    pub tick_length: u32,
    pub background: PlotColor,
    pub frame: PlotColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin_left: 80,
            margin_right: 64,
            margin_top: 58,
            margin_bottom: 53,
            x_range: (0.0, 30.0),
            y_range: (0.0, 30.0),
            invert_y: true,
            marker_radius: 4.0,
            tick_step: 5.0,
            tick_length: 4,
            background: PlotColor::named("white"),
            frame: PlotColor::named("black"),
        }
    }
}

// ---------------------------------------------------------------------------
// Series – one point set with its colours
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub color: PlotColor,
}

/// A labelled set of markers drawn in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub markers: Vec<Marker>,
}

impl Series {
    /// Every point in the same colour.
    pub fn uniform(label: &str, points: &[(f64, f64)], color: PlotColor) -> Self {
        Series {
            label: label.to_string(),
            markers: points
                .iter()
                .map(|&(x, y)| Marker {
                    x,
                    y,
                    color: color.clone(),
                })
                .collect(),
        }
    }

    /// Markers for a parsed file. Weighted files get `base` with a per-point
    /// alpha from the normalized intensities; plain files are drawn in `base`.
    pub fn from_point_file(label: &str, file: &PointFile, base: PlotColor) -> Result<Self> {
        let Some(raw) = file.intensities() else {
            return Ok(Series::uniform(label, &file.coordinates(), base));
        };

        let alphas = normalize_intensities(&raw)?;
        let markers = file
            .points
            .iter()
            .zip(alphas)
            .map(|(p, alpha)| -> Result<Marker> {
                Ok(Marker {
                    x: p.x,
                    y: p.y,
                    color: base.with_alpha(alpha)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Series {
            label: label.to_string(),
            markers,
        })
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Plot area mapping
// ---------------------------------------------------------------------------

/// Pixel rectangle of the axes and the data → pixel transform.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
    invert_y: bool,
}

impl PlotArea {
    fn new(config: &PlotConfig) -> Self {
        let width = config
            .width
            .saturating_sub(config.margin_left + config.margin_right);
        let height = config
            .height
            .saturating_sub(config.margin_top + config.margin_bottom);
        PlotArea {
            left: config.margin_left as f64,
            top: config.margin_top as f64,
            width: width as f64,
            height: height as f64,
            x_range: config.x_range,
            y_range: config.y_range,
            invert_y: config.invert_y,
        }
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let tx = (x - self.x_range.0) / (self.x_range.1 - self.x_range.0);
        let ty = (y - self.y_range.0) / (self.y_range.1 - self.y_range.0);
        let py = if self.invert_y { ty } else { 1.0 - ty };
        (self.left + tx * self.width, self.top + py * self.height)
    }
}

// ---------------------------------------------------------------------------
// ScatterPlot
// ---------------------------------------------------------------------------

/// A scatter plot of one or more series over fixed axes. Series are drawn
/// in insertion order, so later series overplot earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ScatterPlot {
    pub config: PlotConfig,
    pub series: Vec<Series>,
}

impl ScatterPlot {
    pub fn new(config: PlotConfig) -> Self {
        ScatterPlot {
            config,
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) -> &mut Self {
        self.series.push(series);
        self
    }

    /// Rasterize the plot. All colours are resolved before any pixel is
    /// touched, so a bad colour fails without partial output.
    pub fn render(&self) -> Result<RgbaImage> {
        let background = self.config.background.to_rgba()?;
        let frame = self.config.frame.to_rgba()?;
        let resolved: Vec<Vec<(f64, f64, Rgba<u8>)>> = self
            .series
            .iter()
            .map(|s| {
                s.markers
                    .iter()
                    .map(|m| -> Result<(f64, f64, Rgba<u8>)> { Ok((m.x, m.y, m.color.to_rgba()?)) })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<_>>()?;

        let mut img: RgbaImage =
            ImageBuffer::from_pixel(self.config.width, self.config.height, background);
        let area = PlotArea::new(&self.config);

        for (series, markers) in self.series.iter().zip(&resolved) {
            debug!("drawing series `{}` ({} points)", series.label, series.len());
            for &(x, y, color) in markers {
                let (px, py) = area.to_pixel(x, y);
                draw_disc(&mut img, &area, px, py, self.config.marker_radius, color);
            }
        }

        draw_frame(&mut img, &area, &self.config, frame);
        Ok(img)
    }

    /// Render and write a PNG to `path`.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = self.render()?;
        img.save_with_format(path, ImageFormat::Png)
            .map_err(|source| PlotError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Drawing primitives
// ---------------------------------------------------------------------------

/// Source-over blend of `src` onto an opaque `dst`, scaled by `coverage`.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f64) {
    let a = (src.0[3] as f64 / 255.0) * coverage;
    if a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let mixed = src.0[c] as f64 * a + dst.0[c] as f64 * (1.0 - a);
        dst.0[c] = mixed.round().clamp(0.0, 255.0) as u8;
    }
}

/// Anti-aliased filled disc, clipped to the plot area.
fn draw_disc(img: &mut RgbaImage, area: &PlotArea, cx: f64, cy: f64, radius: f64, color: Rgba<u8>) {
    if !cx.is_finite() || !cy.is_finite() {
        return;
    }
    let x0 = (cx - radius - 1.0).floor().max(area.left);
    let x1 = (cx + radius + 1.0).ceil().min(area.right());
    let y0 = (cy - radius - 1.0).floor().max(area.top);
    let y1 = (cy + radius + 1.0).ceil().min(area.bottom());
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for py in y0 as u32..y1 as u32 {
        for px in x0 as u32..x1 as u32 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend(img.get_pixel_mut(px, py), color, coverage);
            }
        }
    }
}

/// Axes rectangle plus outward tick marks every `tick_step` data units.
fn draw_frame(img: &mut RgbaImage, area: &PlotArea, config: &PlotConfig, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let mut put = |x: i64, y: i64| {
        if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
            img.put_pixel(x as u32, y as u32, color);
        }
    };

    let left = area.left as i64;
    let top = area.top as i64;
    let right = area.right() as i64;
    let bottom = area.bottom() as i64;

    for x in left..=right {
        put(x, top);
        put(x, bottom);
    }
    for y in top..=bottom {
        put(left, y);
        put(right, y);
    }

    if config.tick_step <= 0.0 || !config.tick_step.is_finite() {
        return;
    }
    let tick = config.tick_length as i64;

    for v in tick_values(config.x_range, config.tick_step) {
        let (px, _) = area.to_pixel(v, config.y_range.0);
        let px = px.round() as i64;
        for t in 1..=tick {
            put(px, bottom + t);
        }
    }
    for v in tick_values(config.y_range, config.tick_step) {
        let (_, py) = area.to_pixel(config.x_range.0, v);
        let py = py.round() as i64;
        for t in 1..=tick {
            put(left - t, py);
        }
    }
}

/// Multiples of `step` inside `range`, inclusive.
fn tick_values(range: (f64, f64), step: f64) -> Vec<f64> {
    let (lo, hi) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}
