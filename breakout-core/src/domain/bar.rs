//! Bar: one daily OHLCV observation used by the heuristic estimators.

use serde::{Deserialize, Serialize};

/// Daily OHLCV bar for a single symbol.
///
/// The exchange chart feed carries no per-bar timestamps, so bars are
/// identified purely by position (oldest first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if any price field is NaN.
    pub fn is_void(&self) -> bool {
        self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar::new(105.0, 98.0, 103.0, 50_000.0)
    }

    #[test]
    fn bar_detects_void() {
        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(bar.is_void());
        assert!(!sample_bar().is_void());
    }
}
