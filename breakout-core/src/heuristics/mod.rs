//! Decision-support estimators over bar history.
//!
//! These derive checklist inputs (MA50 slope, resistance, swing low, volume
//! confirmation) from raw daily bars. They are optional: the checklist and
//! planner never call them, and callers may supply every input by hand.
//! Bars are ordered oldest first; the last bar is the candidate breakout bar.

pub mod ma_slope;
pub mod resistance;
pub mod snapshot;
pub mod swing_low;
pub mod volume;

pub use ma_slope::MaSlope;
pub use resistance::ResistanceFinder;
pub use snapshot::MarketSnapshot;
pub use swing_low::SwingLowFinder;
pub use volume::VolumeSurge;

use crate::domain::Bar;

/// A pluggable estimator: bar history in, one estimate out.
///
/// Returns `None` when there is not enough history to say anything.
pub trait Heuristic: Send + Sync {
    type Output;

    /// Estimator name for logging.
    fn name(&self) -> &str;

    fn estimate(&self, bars: &[Bar]) -> Option<Self::Output>;
}

#[cfg(test)]
pub(crate) fn bars_from(highs: &[f64], lows: &[f64], closes: &[f64], volumes: &[f64]) -> Vec<Bar> {
    highs
        .iter()
        .zip(lows)
        .zip(closes)
        .zip(volumes)
        .map(|(((&h, &l), &c), &v)| Bar::new(h, l, c, v))
        .collect()
}
