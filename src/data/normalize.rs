use crate::error::{PlotError, Result};

/// Alpha assigned to the smallest intensity.
pub const MIN_ALPHA: f64 = 0.1;
/// Alpha assigned to the largest intensity.
pub const MAX_ALPHA: f64 = 1.0;

// ---------------------------------------------------------------------------
// Intensity → alpha
// ---------------------------------------------------------------------------

/// Map raw intensities affinely onto `[MIN_ALPHA, MAX_ALPHA]`.
///
/// The smallest value maps to exactly `MIN_ALPHA`, the largest to exactly
/// `MAX_ALPHA`, and the output keeps the length and order of the input.
/// Raw intensities are typically tiny (grayscale weights that sum to one),
/// which is why they are stretched instead of used directly.
///
/// Fails with [`PlotError::DegenerateRange`] when all values are equal
/// (one value included) or any value is not finite. An empty slice
/// normalizes to an empty vector.
pub fn normalize_intensities(raw: &[f64]) -> Result<Vec<f64>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if raw.iter().any(|v| !v.is_finite()) || max == min {
        return Err(PlotError::DegenerateRange {
            count: raw.len(),
            min,
            max,
        });
    }

    // Halved operands keep the span finite even for extremes near f64::MAX.
    let half_min = min / 2.0;
    let half_span = max / 2.0 - half_min;
    Ok(raw
        .iter()
        .map(|&v| {
            if v == min {
                MIN_ALPHA
            } else if v == max {
                MAX_ALPHA
            } else {
                let t = (v / 2.0 - half_min) / half_span;
                (MIN_ALPHA + (MAX_ALPHA - MIN_ALPHA) * t).clamp(MIN_ALPHA, MAX_ALPHA)
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn maps_range_onto_alpha_bounds() {
        let alphas = normalize_intensities(&[2.0, 5.0, 8.0]).unwrap();
        assert_close(&alphas, &[0.1, 0.55, 1.0]);
        assert_eq!(alphas[0], MIN_ALPHA);
        assert_eq!(alphas[2], MAX_ALPHA);
    }

    #[test]
    fn preserves_length_and_order() {
        let raw = [0.004, 0.001, 0.010, 0.002, 0.001];
        let alphas = normalize_intensities(&raw).unwrap();
        assert_eq!(alphas.len(), raw.len());
        assert_eq!(alphas[1], MIN_ALPHA);
        assert_eq!(alphas[4], MIN_ALPHA);
        assert_eq!(alphas[2], MAX_ALPHA);
        assert!(alphas[3] > alphas[1] && alphas[0] > alphas[3] && alphas[2] > alphas[0]);
    }

    #[test]
    fn tiny_weights_still_hit_exact_bounds() {
        let raw = [1e-9, 3e-9, 2e-9];
        let alphas = normalize_intensities(&raw).unwrap();
        assert_eq!(alphas[0], 0.1);
        assert_eq!(alphas[1], 1.0);
        assert!(alphas[2] > 0.1 && alphas[2] < 1.0);
    }

    #[test]
    fn equal_values_are_degenerate() {
        assert!(matches!(
            normalize_intensities(&[3.0, 3.0]),
            Err(PlotError::DegenerateRange { count: 2, .. })
        ));
    }

    #[test]
    fn single_value_is_degenerate() {
        assert!(matches!(
            normalize_intensities(&[0.7]),
            Err(PlotError::DegenerateRange { count: 1, .. })
        ));
    }

    #[test]
    fn non_finite_values_are_degenerate() {
        assert!(normalize_intensities(&[1.0, f64::NAN, 2.0]).is_err());
        assert!(normalize_intensities(&[1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn extremes_whose_span_overflows_still_normalize() {
        let alphas = normalize_intensities(&[-1e308, 0.0, 1e308]).unwrap();
        assert_close(&alphas, &[0.1, 0.55, 1.0]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(normalize_intensities(&[]).unwrap(), Vec::<f64>::new());
    }
}
