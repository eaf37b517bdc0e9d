//! Resistance: a recent peak that price tested more than once.

use super::Heuristic;
use crate::domain::Bar;

/// Finds the highest high of the recent window if it was touched at least
/// `min_touches` times (a touch is a high within `tolerance` of the peak).
///
/// The latest bar is the breakout candidate and is excluded from the window,
/// so resistance is always a level established before it.
#[derive(Debug, Clone)]
pub struct ResistanceFinder {
    pub lookback: usize,
    pub min_bars: usize,
    /// Relative tolerance (0.02 = within 2% of the peak).
    pub tolerance: f64,
    pub min_touches: usize,
}

impl ResistanceFinder {
    pub fn new(lookback: usize, min_bars: usize, tolerance: f64, min_touches: usize) -> Self {
        Self {
            lookback,
            min_bars,
            tolerance,
            min_touches,
        }
    }

    pub fn default_params() -> Self {
        Self::new(60, 20, 0.02, 2)
    }
}

impl Heuristic for ResistanceFinder {
    type Output = f64;

    fn name(&self) -> &str {
        "resistance"
    }

    fn estimate(&self, bars: &[Bar]) -> Option<f64> {
        let history = bars.split_last().map(|(_, rest)| rest)?;
        let lookback = self.lookback.min(history.len());
        if lookback < self.min_bars {
            return None;
        }

        let highs: Vec<f64> = history[history.len() - lookback..]
            .iter()
            .map(|b| b.high)
            .filter(|h| h.is_finite())
            .collect();
        let peak = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !peak.is_finite() {
            return None;
        }

        let band = peak * self.tolerance;
        let touches = highs.iter().filter(|&&h| (h - peak).abs() <= band).count();
        (touches >= self.min_touches).then_some(peak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars_with_highs(highs: &[f64]) -> Vec<Bar> {
        highs.iter().map(|&h| Bar::new(h, h - 2.0, h - 1.0, 1000.0)).collect()
    }

    #[test]
    fn double_top_is_resistance() {
        let mut highs = vec![95.0; 30];
        highs[10] = 104.0;
        highs[20] = 103.5; // within 2% of 104
        highs.push(106.0); // breakout bar, excluded
        let level = ResistanceFinder::default_params().estimate(&bars_with_highs(&highs));
        assert_eq!(level, Some(104.0));
    }

    #[test]
    fn single_spike_is_not_resistance() {
        let mut highs = vec![95.0; 30];
        highs[10] = 110.0;
        highs.push(96.0);
        let level = ResistanceFinder::default_params().estimate(&bars_with_highs(&highs));
        assert_eq!(level, None);
    }

    #[test]
    fn too_few_bars_is_none() {
        let highs = vec![100.0; 20]; // 19 after excluding the latest bar
        assert_eq!(
            ResistanceFinder::default_params().estimate(&bars_with_highs(&highs)),
            None
        );
        let highs = vec![100.0; 21];
        assert_eq!(
            ResistanceFinder::default_params().estimate(&bars_with_highs(&highs)),
            Some(100.0)
        );
    }

    #[test]
    fn lookback_limits_window() {
        // Old peak outside the 60-bar window is ignored
        let mut highs = vec![150.0, 150.0];
        highs.extend(vec![100.0; 61]);
        let level = ResistanceFinder::default_params().estimate(&bars_with_highs(&highs));
        assert_eq!(level, Some(100.0));
    }

    #[test]
    fn empty_history_is_none() {
        assert_eq!(ResistanceFinder::default_params().estimate(&[]), None);
    }
}
