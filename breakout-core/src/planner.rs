//! Trade planner: entry, stop, target and risk-based position size.
//!
//! Classic fixed-fractional risk sizing:
//! ```text
//! entry          = max(current_price, resistance_level)
//! stop           = swing_low * stop_buffer   (swing_low must be below entry)
//! risk_per_share = entry - stop
//! target         = entry + reward_multiple * risk_per_share
//! risk_amount    = capital * risk_fraction
//! shares         = floor(risk_amount / risk_per_share)
//! ```
//!
//! # Example
//! - Capital: 100,000; risk 1% = 1,000
//! - Entry 105, swing low 98 → stop 97.02, risk/share 7.98
//! - Shares: floor(1,000 / 7.98) = 125
//! - Target (2R): 105 + 2 × 7.98 = 120.96

use thiserror::Error;

use crate::config::PlannerConfig;
use crate::domain::{PositionSizing, PriceSet, TradePlan};

/// Recoverable planning failures. Both surface as a SKIP verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    #[error("Invalid risk: {}", risk_detail(.swing_low, .entry_price, .stop_loss))]
    InvalidRisk {
        swing_low: f64,
        entry_price: f64,
        stop_loss: f64,
    },

    #[error("Invalid capital: {capital} (must be greater than zero)")]
    InvalidCapital { capital: f64 },
}

fn risk_detail(swing_low: &f64, entry_price: &f64, stop_loss: &f64) -> String {
    if swing_low >= entry_price {
        format!("swing low {swing_low:.2} is at or above entry {entry_price:.2}")
    } else {
        format!("stop {stop_loss:.2} is not below entry {entry_price:.2}")
    }
}

/// Planner over a fixed set of tuning constants.
#[derive(Debug, Clone, Default)]
pub struct TradePlanner {
    config: PlannerConfig,
}

impl TradePlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Derive entry, stop and target from the price levels.
    pub fn trade_plan(&self, prices: &PriceSet) -> Result<TradePlan, PlanningError> {
        let entry_price = prices.current_price().max(prices.resistance_level());
        let stop_loss = prices.swing_low() * self.config.stop_buffer;
        let risk_per_share = entry_price - stop_loss;

        // A swing low at or above entry is degenerate even when the buffer
        // would leave a positive risk. NaN fails both comparisons.
        if prices.swing_low() >= entry_price || !(risk_per_share > 0.0) || !risk_per_share.is_finite() {
            return Err(PlanningError::InvalidRisk {
                swing_low: prices.swing_low(),
                entry_price,
                stop_loss,
            });
        }

        Ok(TradePlan {
            entry_price,
            stop_loss,
            risk_per_share,
            target_price: entry_price + self.config.reward_multiple * risk_per_share,
        })
    }

    /// Size a position for `plan` given the account capital.
    pub fn size(&self, plan: &TradePlan, capital: f64) -> Result<PositionSizing, PlanningError> {
        check_capital(capital)?;
        Ok(self.size_checked(plan, capital))
    }

    fn size_checked(&self, plan: &TradePlan, capital: f64) -> PositionSizing {
        let risk_amount = capital * self.config.risk_fraction;
        // Float-to-int `as` saturates, so an absurd quotient cannot wrap.
        let share_count = (risk_amount / plan.risk_per_share).floor() as u64;
        let shares = share_count as f64;

        let warning = if share_count > self.config.share_count_warn_threshold {
            tracing::warn!(
                share_count,
                risk_per_share = plan.risk_per_share,
                threshold = self.config.share_count_warn_threshold,
                "share count exceeds sanity threshold"
            );
            Some(format!(
                "Share count {share_count} exceeds {} (risk per share {:.4} is very small)",
                self.config.share_count_warn_threshold, plan.risk_per_share
            ))
        } else {
            None
        };

        PositionSizing {
            capital,
            risk_amount,
            share_count,
            position_value: shares * plan.entry_price,
            actual_risk: shares * plan.risk_per_share,
            potential_profit: shares * self.config.reward_multiple * plan.risk_per_share,
            warning,
        }
    }

    /// Plan and size in one step. Capital is checked before any price arithmetic.
    pub fn plan(
        &self,
        prices: &PriceSet,
        capital: f64,
    ) -> Result<(TradePlan, PositionSizing), PlanningError> {
        check_capital(capital)?;
        let plan = self.trade_plan(prices)?;
        let sizing = self.size_checked(&plan, capital);
        Ok((plan, sizing))
    }
}

fn check_capital(capital: f64) -> Result<(), PlanningError> {
    if capital > 0.0 && capital.is_finite() {
        Ok(())
    } else {
        Err(PlanningError::InvalidCapital { capital })
    }
}

/// Plan with the default constants (0.99 stop buffer, 2R, 1% risk).
pub fn plan(prices: &PriceSet, capital: f64) -> Result<(TradePlan, PositionSizing), PlanningError> {
    TradePlanner::default().plan(prices, capital)
}
