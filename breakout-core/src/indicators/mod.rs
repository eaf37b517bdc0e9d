//! Indicators over bar history.
//!
//! Indicators are pure functions: bar history in, numeric series out, one
//! value per bar. The first `lookback()` values are `f64::NAN` (warmup).
//! No value at bar t may depend on bars after t.

pub mod sma;

pub use sma::{ma_from_closes, Sma};

use crate::domain::Bar;

/// Trait for single-series indicators.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50").
    fn name(&self) -> &str;

    /// Number of bars before the first valid value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Create synthetic bars from close prices for testing.
///
/// high = close + 1.0, low = close - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .map(|&close| Bar::new(close + 1.0, close - 1.0, close, 1000.0))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
