//! MarketSnapshot: run every estimator over one symbol's bar history.

use super::{Heuristic, MaSlope, ResistanceFinder, SwingLowFinder, VolumeSurge};
use crate::config::HeuristicConfig;
use crate::domain::{Bar, PartialInput};
use crate::indicators::ma_from_closes;

/// Estimates derived from bar history. Every field is optional: an estimator
/// that lacks history leaves its field unset for a later source to fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSnapshot {
    pub current_price: Option<f64>,
    pub ma50: Option<f64>,
    pub ma_uptrend: Option<bool>,
    pub resistance_level: Option<f64>,
    pub swing_low: Option<f64>,
    pub volume_confirmed: Option<bool>,
    pub bar_count: usize,
}

impl MarketSnapshot {
    /// Estimate checklist inputs from `bars` (oldest first).
    ///
    /// `quoted_price` (e.g. the exchange's last traded price) takes precedence
    /// over the latest close as the current price.
    pub fn from_bars(bars: &[Bar], quoted_price: Option<f64>, config: &HeuristicConfig) -> Self {
        let current_price = quoted_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or_else(|| bars.last().map(|b| b.close).filter(|c| c.is_finite()));

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let ma50 = ma_from_closes(&closes, config.ma_period).filter(|v| v.is_finite());

        let slope = MaSlope::new(config.ma_period, config.slope_window);
        let resistance = ResistanceFinder::new(
            config.resistance_lookback,
            config.resistance_min_bars,
            config.resistance_tolerance,
            config.resistance_min_touches,
        );
        let swing = SwingLowFinder::new(config.swing_lookback, config.swing_min_bars);
        let volume = VolumeSurge::new(config.volume_lookback);

        let snapshot = Self {
            current_price,
            ma50,
            ma_uptrend: slope.estimate(bars),
            resistance_level: resistance.estimate(bars),
            swing_low: current_price.and_then(|p| swing.find_below(bars, p)),
            volume_confirmed: volume.estimate(bars),
            bar_count: bars.len(),
        };

        tracing::debug!(
            bars = bars.len(),
            ma50 = ?snapshot.ma50,
            ma_uptrend = ?snapshot.ma_uptrend,
            resistance_level = ?snapshot.resistance_level,
            swing_low = ?snapshot.swing_low,
            volume_confirmed = ?snapshot.volume_confirmed,
            "market snapshot estimated"
        );
        snapshot
    }

    /// The snapshot as a resolution fragment (capital is never set).
    pub fn to_partial(&self) -> PartialInput {
        PartialInput {
            current_price: self.current_price,
            ma50: self.ma50,
            resistance_level: self.resistance_level,
            swing_low: self.swing_low,
            ma_uptrend: self.ma_uptrend,
            volume_confirmed: self.volume_confirmed,
            capital: None,
        }
    }
}
