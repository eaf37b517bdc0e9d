//! Swing low: recent local minimum below the current price.

use super::Heuristic;
use crate::domain::Bar;

/// Lowest low of the recent window that sits strictly below a reference price.
#[derive(Debug, Clone)]
pub struct SwingLowFinder {
    pub lookback: usize,
    pub min_bars: usize,
}

impl SwingLowFinder {
    pub fn new(lookback: usize, min_bars: usize) -> Self {
        Self { lookback, min_bars }
    }

    pub fn default_params() -> Self {
        Self::new(20, 5)
    }

    /// Swing low below `price`, or `None` if history is too short or no low
    /// in the window is below it.
    pub fn find_below(&self, bars: &[Bar], price: f64) -> Option<f64> {
        let lookback = self.lookback.min(bars.len());
        if lookback < self.min_bars {
            return None;
        }
        bars[bars.len() - lookback..]
            .iter()
            .map(|b| b.low)
            .filter(|&low| low < price)
            .fold(None, |acc: Option<f64>, low| Some(acc.map_or(low, |m| m.min(low))))
    }
}

impl Heuristic for SwingLowFinder {
    type Output = f64;

    fn name(&self) -> &str {
        "swing_low"
    }

    /// Uses the latest close as the reference price.
    fn estimate(&self, bars: &[Bar]) -> Option<f64> {
        let last = bars.last()?;
        self.find_below(bars, last.close)
    }
}
