//! Volume surge: breakout bar volume above the recent average.

use super::Heuristic;
use crate::domain::Bar;

/// True when the latest bar's volume exceeds the mean volume of the
/// `lookback - 1` bars before it.
#[derive(Debug, Clone)]
pub struct VolumeSurge {
    pub lookback: usize,
}

impl VolumeSurge {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 2, "volume lookback must be >= 2");
        Self { lookback }
    }

    pub fn default_params() -> Self {
        Self::new(10)
    }
}

impl Heuristic for VolumeSurge {
    type Output = bool;

    fn name(&self) -> &str {
        "volume_surge"
    }

    fn estimate(&self, bars: &[Bar]) -> Option<bool> {
        if bars.len() < self.lookback {
            return None;
        }
        let (breakout, history) = bars.split_last()?;
        let prior = &history[history.len() - (self.lookback - 1)..];
        let average = prior.iter().map(|b| b.volume).sum::<f64>() / prior.len() as f64;
        Some(breakout.volume > average)
    }
}
