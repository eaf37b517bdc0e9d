//! Checklist evaluator: the five breakout conditions.
//!
//! Pure function of its inputs: a condition that does not hold simply
//! evaluates to false. Whether the setup is tradeable is decided by the
//! caller via [`ConditionSet::all_met`].

use crate::domain::{ConditionSet, PriceSet};

/// Evaluate the five checklist conditions.
///
/// 1. price above MA50 (strict)
/// 2. MA50 uptrend (caller-supplied)
/// 3. resistance level is a finite positive number
/// 4. close above resistance (strict)
/// 5. volume confirmation (caller-supplied)
pub fn evaluate(prices: &PriceSet, ma_uptrend: bool, volume_confirmed: bool) -> ConditionSet {
    let resistance = prices.resistance_level();
    ConditionSet {
        price_above_ma: prices.current_price() > prices.ma50(),
        ma_uptrend,
        has_resistance: resistance.is_finite() && resistance > 0.0,
        breakout_close: prices.current_price() > resistance,
        volume_confirmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Condition;

    fn prices(current: f64, ma50: f64, resistance: f64) -> PriceSet {
        PriceSet::new(current, ma50, resistance, 98.0).unwrap()
    }

    #[test]
    fn all_conditions_pass_on_clean_breakout() {
        let set = evaluate(&prices(105.0, 100.0, 104.0), true, true);
        assert!(set.all_met());
    }

    #[test]
    fn price_equal_to_ma_fails() {
        let set = evaluate(&prices(100.0, 100.0, 99.0), true, true);
        assert!(!set.price_above_ma);
        assert!(set.breakout_close);
    }

    #[test]
    fn price_equal_to_resistance_fails_breakout() {
        let set = evaluate(&prices(104.0, 100.0, 104.0), true, true);
        assert!(set.price_above_ma);
        assert!(!set.breakout_close);
        assert_eq!(set.failed(), vec![Condition::BreakoutClose]);
    }

    #[test]
    fn non_positive_or_nan_resistance_is_not_clear() {
        assert!(!evaluate(&prices(105.0, 100.0, 0.0), true, true).has_resistance);
        assert!(!evaluate(&prices(105.0, 100.0, -3.0), true, true).has_resistance);
        let nan = evaluate(&prices(105.0, 100.0, f64::NAN), true, true);
        assert!(!nan.has_resistance);
        assert!(!nan.breakout_close);
        assert!(!evaluate(&prices(105.0, 100.0, f64::INFINITY), true, true).has_resistance);
    }

    #[test]
    fn caller_flags_pass_through() {
        let set = evaluate(&prices(105.0, 100.0, 104.0), false, false);
        assert!(!set.ma_uptrend);
        assert!(!set.volume_confirmed);
        assert_eq!(
            set.failed(),
            vec![Condition::MaUptrend, Condition::VolumeConfirmed]
        );
    }
}
