//! The five checklist conditions and their fixed reporting order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One checklist condition.
///
/// Declaration order is reporting order: failures are listed in this order,
/// not by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    #[serde(rename = "priceAboveMA")]
    PriceAboveMa,
    MaUptrend,
    HasResistance,
    BreakoutClose,
    VolumeConfirmed,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::PriceAboveMa,
        Condition::MaUptrend,
        Condition::HasResistance,
        Condition::BreakoutClose,
        Condition::VolumeConfirmed,
    ];

    /// Human-readable label used when the condition fails.
    pub fn failure_label(self) -> &'static str {
        match self {
            Condition::PriceAboveMa => "Price not above MA50",
            Condition::MaUptrend => "MA50 not sloping up",
            Condition::HasResistance => "No clear resistance",
            Condition::BreakoutClose => "No breakout above resistance",
            Condition::VolumeConfirmed => "No volume confirmation",
        }
    }

    /// The question the checklist asks for this condition.
    pub fn question(self) -> &'static str {
        match self {
            Condition::PriceAboveMa => "Is price above MA50?",
            Condition::MaUptrend => "Is MA50 sloping upward?",
            Condition::HasResistance => "Is there a clear resistance level (last 1-3 months)?",
            Condition::BreakoutClose => "Did a candle CLOSE above resistance?",
            Condition::VolumeConfirmed => "Was breakout volume higher than recent days?",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::PriceAboveMa => "priceAboveMA",
            Condition::MaUptrend => "maUptrend",
            Condition::HasResistance => "hasResistance",
            Condition::BreakoutClose => "breakoutClose",
            Condition::VolumeConfirmed => "volumeConfirmed",
        };
        f.write_str(name)
    }
}

/// Outcome of the five checks for one evaluation.
///
/// `Default` is all-false, used when input was rejected before any check ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSet {
    #[serde(rename = "priceAboveMA")]
    pub price_above_ma: bool,
    pub ma_uptrend: bool,
    pub has_resistance: bool,
    pub breakout_close: bool,
    pub volume_confirmed: bool,
}

impl ConditionSet {
    pub fn get(&self, condition: Condition) -> bool {
        match condition {
            Condition::PriceAboveMa => self.price_above_ma,
            Condition::MaUptrend => self.ma_uptrend,
            Condition::HasResistance => self.has_resistance,
            Condition::BreakoutClose => self.breakout_close,
            Condition::VolumeConfirmed => self.volume_confirmed,
        }
    }

    /// Setup validity: logical AND of all five conditions.
    pub fn all_met(&self) -> bool {
        Condition::ALL.iter().all(|&c| self.get(c))
    }

    /// Failed conditions in reporting order.
    pub fn failed(&self) -> Vec<Condition> {
        Condition::ALL
            .iter()
            .copied()
            .filter(|&c| !self.get(c))
            .collect()
    }

    /// Iterate `(condition, passed)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Condition, bool)> + '_ {
        Condition::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_true() -> ConditionSet {
        ConditionSet {
            price_above_ma: true,
            ma_uptrend: true,
            has_resistance: true,
            breakout_close: true,
            volume_confirmed: true,
        }
    }

    #[test]
    fn all_met_requires_every_condition() {
        assert!(all_true().all_met());
        let mut set = all_true();
        set.volume_confirmed = false;
        assert!(!set.all_met());
    }

    #[test]
    fn failed_preserves_fixed_order() {
        let set = ConditionSet {
            price_above_ma: true,
            ma_uptrend: false,
            has_resistance: true,
            breakout_close: false,
            volume_confirmed: false,
        };
        assert_eq!(
            set.failed(),
            vec![
                Condition::MaUptrend,
                Condition::BreakoutClose,
                Condition::VolumeConfirmed
            ]
        );
    }

    #[test]
    fn serializes_with_boundary_field_names() {
        let json = serde_json::to_value(all_true()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in [
            "priceAboveMA",
            "maUptrend",
            "hasResistance",
            "breakoutClose",
            "volumeConfirmed",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
    }

    #[test]
    fn display_matches_serialized_name() {
        for condition in Condition::ALL {
            let json = serde_json::to_string(&condition).unwrap();
            assert_eq!(json.trim_matches('"'), condition.to_string());
        }
    }
}
