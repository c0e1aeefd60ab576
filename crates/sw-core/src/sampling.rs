use std::f64::consts::PI;

use rand::Rng;
use rand::rngs::StdRng;

/// Mean of the Gaussian the planet count is drawn from.
pub const PLANET_COUNT_MEAN: f64 = 7.0;

/// Standard deviation of the Gaussian the planet count is drawn from.
pub const PLANET_COUNT_STD_DEV: f64 = 5.0;

/// Sample from a Gaussian (normal) distribution using the Box-Muller transform.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `mean` - Mean of the distribution
/// * `std_dev` - Standard deviation
pub fn sample_gaussian(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    // (0, 1] keeps ln() finite.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std_dev * z
}

/// Turn a raw Gaussian sample into a planet count: floored, clamped at zero.
///
/// There is no upper clamp; a large positive sample is kept as-is.
pub fn planet_count_from_sample(sample: f64) -> usize {
    if sample.is_nan() {
        return 0;
    }
    sample.floor().max(0.0) as usize
}

/// Draw the number of planets for a new star: `max(0, floor(N(7, 5)))`.
pub fn sample_planet_count(rng: &mut StdRng) -> usize {
    planet_count_from_sample(sample_gaussian(
        rng,
        PLANET_COUNT_MEAN,
        PLANET_COUNT_STD_DEV,
    ))
}
