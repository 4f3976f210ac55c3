//! Show-up-time curve math for rule previews.
//!
//! Show-up time is minutes before scheduled departure, modelled as a normal
//! distribution per rule. The chart preview needs PDF points over a
//! sensible span; the histogram preview needs reproducible samples.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Normal probability density at `x`. Returns 0 for non-positive `std`.
pub fn normal_pdf(x: f64, mean: f64, std: f64) -> f64 {
    if std <= 0.0 {
        return 0.0;
    }
    let z = (x - mean) / std;
    (-0.5 * z * z).exp() / (std * (2.0 * PI).sqrt())
}

/// One point of a show-up curve preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    /// Minutes before departure.
    pub minutes: f64,
    pub density: f64,
}

/// Evenly spaced PDF points over `mean ± 4σ`, clamped at zero minutes.
///
/// Returns an empty vector for fewer than two samples or a non-positive
/// `std` (nothing sensible to draw).
pub fn curve_points(mean: f64, std: f64, samples: usize) -> Vec<CurvePoint> {
    if samples < 2 || std <= 0.0 {
        return Vec::new();
    }

    let lo = (mean - 4.0 * std).max(0.0);
    let hi = mean + 4.0 * std;
    let step = (hi - lo) / (samples - 1) as f64;

    (0..samples)
        .map(|i| {
            let minutes = lo + step * i as f64;
            CurvePoint {
                minutes,
                density: normal_pdf(minutes, mean, std),
            }
        })
        .collect()
}

/// Sample `count` show-up offsets (minutes before departure) from
/// `N(mean, std²)`, clamped at zero. Seeded for reproducible previews.
pub fn sample_offsets(mean: f64, std: f64, count: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            // Box-Muller transform
            let u1: f64 = rng.gen::<f64>().max(1e-12);
            let u2: f64 = rng.gen();
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            (mean + std * z).max(0.0)
        })
        .collect()
}
