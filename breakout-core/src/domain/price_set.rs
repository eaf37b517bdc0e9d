//! PriceSet: the four price levels a single evaluation works from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejections raised while building the typed input of an evaluation.
///
/// `MissingInput` comes from the resolution layer (a field no source could
/// supply); `InvalidPrice` from the core's own precondition check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Missing {field}")]
    MissingInput { field: &'static str },

    #[error("Invalid {field}: {value} (must be a positive number)")]
    InvalidPrice { field: &'static str, value: f64 },
}

/// Price levels for one evaluation. Immutable once built.
///
/// `current_price` and `ma50` are guaranteed finite and strictly positive.
/// `resistance_level` and `swing_low` are taken as supplied: resistance
/// validity is what the checklist itself tests, and a degenerate swing low is
/// caught by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSet {
    current_price: f64,
    ma50: f64,
    resistance_level: f64,
    swing_low: f64,
}

impl PriceSet {
    pub fn new(
        current_price: f64,
        ma50: f64,
        resistance_level: f64,
        swing_low: f64,
    ) -> Result<Self, InputError> {
        require_positive("current price", current_price)?;
        require_positive("MA50", ma50)?;
        Ok(Self {
            current_price,
            ma50,
            resistance_level,
            swing_low,
        })
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn ma50(&self) -> f64 {
        self.ma50
    }

    pub fn resistance_level(&self) -> f64 {
        self.resistance_level
    }

    pub fn swing_low(&self) -> f64 {
        self.swing_low
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidPrice { field, value })
    }
}
