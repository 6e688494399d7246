//! # Latency sampling
//!
//! Derives the delay to apply before responding from the mean delay that the
//! caller asked for.
//!
//! ## Usage
//!
//! ```rust
//! use tower_fault_responder::latency::sample_delay;
//!
//! let mut rng = rand::thread_rng();
//!
//! // No mean, no delay.
//! assert!(sample_delay(0.0, &mut rng).is_zero());
//!
//! // Jittered around 200 milliseconds.
//! let _delay = sample_delay(200.0, &mut rng);
//! ```

use rand::{distributions::Distribution as _, Rng};
use std::time::Duration;

pub mod distribution;
pub use distribution::Normal;

/// Ratio between the scale of the sampled distribution and its mean.
pub const VARIANCE_RATIO: f64 = 0.25;

/// Sample a delay around `mean_ms` milliseconds.
///
/// A mean that is not strictly positive (including `NaN`) results in no
/// delay. Negative samples are floored to zero.
pub fn sample_delay<R: Rng + ?Sized>(mean_ms: f64, rng: &mut R) -> Duration {
    if mean_ms.is_nan() || mean_ms <= 0.0 {
        return Duration::ZERO;
    }

    let sample = Normal::new(mean_ms, mean_ms * VARIANCE_RATIO).sample(rng);
    millis(sample.max(0.0))
}

/// Convert a non-negative amount of milliseconds, saturating on overflow.
fn millis(value: f64) -> Duration {
    Duration::try_from_secs_f64(value / 1000.0).unwrap_or(Duration::MAX)
}
