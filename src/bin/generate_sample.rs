use std::path::Path;

use pointplot::data::model::PointRecord;
use pointplot::data::writer::write_point_file;

/// Side length of the pixel grid the samples are drawn on.
const GRID: usize = 28;

/// Gray values of a ring-shaped blob ("a zero") on the grid, with noise.
fn generate_blob(
    center: (f64, f64),
    radius: f64,
    width: f64,
    noise_level: f64,
    rng: &mut NoiseSource,
) -> Vec<PointRecord> {
    let mut pixels = Vec::new();
    for row in 0..GRID {
        for col in 0..GRID {
            let (x, y) = (col as f64, row as f64);
            let dist = ((x - center.0).powi(2) + (y - center.1).powi(2)).sqrt();
            let ring = (-(dist - radius).powi(2) / (2.0 * width * width)).exp();
            let value = ring + rng.normal() * noise_level;
            if value > 0.2 {
                pixels.push(PointRecord::weighted(x, y, value));
            }
        }
    }

    // Gray values are stored as weights summing to one.
    let total: f64 = pixels.iter().filter_map(|p| p.intensity).sum();
    for p in &mut pixels {
        p.intensity = p.intensity.map(|v| v / total);
    }
    pixels
}

/// SplitMix64 stream, seeded so the samples are reproducible.
struct NoiseSource(u64);

impl NoiseSource {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        // Top 53 bits, shifted into (0, 1].
        ((z >> 11) as f64 + 1.0) / (1u64 << 53) as f64
    }

    /// Standard normal sample (Box-Muller, cosine branch).
    fn normal(&mut self) -> f64 {
        let r = (-2.0 * self.uniform().ln()).sqrt();
        r * (std::f64::consts::TAU * self.uniform()).cos()
    }
}

fn main() {
    let mut rng = NoiseSource(42);

    let metadata: Vec<String> = [
        "type: PIXEL_LIST",
        "origin: TOP_LEFT",
        "pos_x: RIGHT",
        "pos_y: DOWN",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let reference = generate_blob((13.5, 13.5), 7.0, 1.5, 0.05, &mut rng);

    // Candidate: the same shape shifted and slightly jittered, without weights.
    let candidate: Vec<PointRecord> = reference
        .iter()
        .map(|p| PointRecord::new(p.x + 2.0 + 0.3 * rng.normal(), p.y + 1.0 + 0.3 * rng.normal()))
        .collect();

    let ref_path = Path::new("sample-ref.txt");
    let cand_path = Path::new("sample-cand.txt");
    write_point_file(ref_path, &reference, &metadata).expect("Failed to write reference sample");
    write_point_file(cand_path, &candidate, &metadata).expect("Failed to write candidate sample");

    println!(
        "Wrote {} weighted points to {} and {} points to {}",
        reference.len(),
        ref_path.display(),
        candidate.len(),
        cand_path.display()
    );
}
