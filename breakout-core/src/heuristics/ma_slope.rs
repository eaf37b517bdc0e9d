//! MA slope: is the moving average trending up?

use super::Heuristic;
use crate::domain::Bar;
use crate::indicators::{Indicator, Sma};

/// Compares the mean of the newest three MA values against the oldest three
/// within a trailing window of MA values.
///
/// The window ends at the latest bar, so today's close is part of the
/// newest MA value.
///
/// Needs `period + window` bars.
#[derive(Debug, Clone)]
pub struct MaSlope {
    sma: Sma,
    window: usize,
}

impl MaSlope {
    pub fn new(period: usize, window: usize) -> Self {
        assert!(window >= 2, "slope window must be >= 2");
        Self {
            sma: Sma::new(period),
            window,
        }
    }

    pub fn default_params() -> Self {
        Self::new(50, 10)
    }

    pub fn min_bars(&self) -> usize {
        self.sma.period() + self.window
    }
}

impl Heuristic for MaSlope {
    type Output = bool;

    fn name(&self) -> &str {
        "ma_slope"
    }

    fn estimate(&self, bars: &[Bar]) -> Option<bool> {
        if bars.len() < self.min_bars() {
            return None;
        }

        let series = self.sma.compute(bars);
        let tail = &series[series.len() - self.window..];
        if tail.iter().any(|v| v.is_nan()) {
            return None;
        }

        let k = 3.min(self.window / 2).max(1);
        let older = tail[..k].iter().sum::<f64>() / k as f64;
        let recent = tail[tail.len() - k..].iter().sum::<f64>() / k as f64;
        Some(recent > older)
    }
}
