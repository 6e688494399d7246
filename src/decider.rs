//! # Decider
//!
//! This module contains the [`Decider`] trait, which decides if a failure
//! should be simulated for a request.
//!
//! [`ErrorRate`] is the probabilistic decider used by the responder.
//!
//! ## Example
//!
//! ```rust
//! use tower_fault_responder::decider::{Decider, ErrorRate};
//!
//! let mut rng = rand::thread_rng();
//!
//! // Always.
//! assert!(ErrorRate::new(1.0).decide(&mut rng));
//!
//! // Never.
//! assert!(!ErrorRate::new(0.0).decide(&mut rng));
//!
//! // 30% of the time.
//! let _decision = ErrorRate::new(0.3).decide(&mut rng);
//! ```

use rand::Rng;

/// Trait for deciding if a failure should be simulated.
pub trait Decider {
    /// Decide if a failure should be simulated, drawing from `rng` if needed.
    fn decide<R: Rng + ?Sized>(&self, rng: &mut R) -> bool;
}

/// Probability of failing a single request.
///
/// The value is not validated: anything at or below 0 never fails, anything
/// at or above 1 always fails.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorRate(f64);

impl ErrorRate {
    /// Create a new `ErrorRate`.
    pub fn new(rate: f64) -> Self {
        ErrorRate(rate)
    }
}

impl Decider for ErrorRate {
    fn decide<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        if self.0.is_nan() || self.0 <= 0.0 {
            return false;
        }

        rng.gen::<f64>() < self.0
    }
}
