use rand::{distributions::Distribution, Rng};
use std::f64::consts::PI;

/// Normal distribution sampled with the Box-Muller transform.
///
/// Only one of the two values produced by the transform is used. The other
/// one is discarded so that no state is kept between samples.
///
/// The `variance` is used as the scale factor applied to the standard normal
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    variance: f64,
}

impl Normal {
    /// Create a new `Normal` distribution.
    pub fn new(mean: f64, variance: f64) -> Self {
        Normal { mean, variance }
    }
}

impl Distribution<f64> for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u1 = open_unit(rng);
        let u2 = open_unit(rng);

        let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        z0 * self.variance + self.mean
    }
}

/// Uniform value in `(0, 1)`, kept away from zero for `ln`.
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let value: f64 = rng.gen();
        if value > f64::EPSILON {
            return value;
        }
    }
}
