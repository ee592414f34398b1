//! Source of the random variation applied to the multipliers.
#[cfg(test)]
use mockall::automock;
use rand::Rng;

/// Draws the random part of the effective multiplier.
#[cfg_attr(test, automock)]
pub trait Jitter: Sync + Send {
    /// Returns a value in the range `[-factor, factor]`.
    fn sample(&self, factor: f64) -> f64;
}

/// A [`Jitter`] drawing from a uniform distribution.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformJitter;

impl Jitter for UniformJitter {
    fn sample(&self, factor: f64) -> f64 {
        if factor <= 0.0 || !factor.is_finite() {
            return 0.0;
        }

        rand::thread_rng().gen_range(-factor..=factor)
    }
}
