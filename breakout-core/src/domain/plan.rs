//! TradePlan and PositionSizing: the planner's output.

use serde::{Deserialize, Serialize};

/// Entry, stop and target for a valid setup.
///
/// `risk_per_share` is always > 0: the planner refuses to build a plan
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePlan {
    pub entry_price: f64,
    pub stop_loss: f64,
    pub risk_per_share: f64,
    pub target_price: f64,
}

impl TradePlan {
    /// Distance from entry to target, in price units.
    pub fn reward_per_share(&self) -> f64 {
        self.target_price - self.entry_price
    }

    /// Reward-to-risk ratio (2.0 for the default 2R target).
    pub fn reward_risk_ratio(&self) -> f64 {
        self.reward_per_share() / self.risk_per_share
    }
}

/// Risk-based position size for a [`TradePlan`].
///
/// Share count is risk-based, not capital-based: `position_value` may exceed
/// the capital. `actual_risk` never exceeds `risk_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSizing {
    pub capital: f64,
    pub risk_amount: f64,
    pub share_count: u64,
    pub position_value: f64,
    pub actual_risk: f64,
    /// Profit if the target is hit (share_count × reward per share).
    pub potential_profit: f64,
    /// Set when the share count looks unrealistically large.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl PositionSizing {
    /// Position value as a fraction of capital.
    pub fn exposure_fraction(&self) -> f64 {
        self.position_value / self.capital
    }

    /// Actual risk as a fraction of capital.
    pub fn risk_fraction(&self) -> f64 {
        self.actual_risk / self.capital
    }
}
