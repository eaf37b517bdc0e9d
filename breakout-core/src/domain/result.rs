//! AnalysisResult: the single structured output of an evaluation.

use serde::Serialize;
use std::fmt;

use super::conditions::ConditionSet;
use super::plan::{PositionSizing, TradePlan};

/// Final decision for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Skip,
    ValidTrade,
}

impl Verdict {
    /// Process exit code for CLI collaborators: 0 for a valid trade, 1 otherwise.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::ValidTrade => 0,
            Verdict::Skip => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Skip => f.write_str("SKIP"),
            Verdict::ValidTrade => f.write_str("VALID_TRADE"),
        }
    }
}

/// Outcome of one evaluation.
///
/// Built only through [`AnalysisResult::skip`] and [`AnalysisResult::valid_trade`],
/// which keeps plan and sizing present exactly when the verdict is
/// `VALID_TRADE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    symbol: String,
    conditions: ConditionSet,
    verdict: Verdict,
    reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<TradePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sizing: Option<PositionSizing>,
}

impl AnalysisResult {
    pub fn skip(symbol: impl Into<String>, conditions: ConditionSet, reason: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            conditions,
            verdict: Verdict::Skip,
            reason: reason.into(),
            plan: None,
            sizing: None,
        }
    }

    pub fn valid_trade(
        symbol: impl Into<String>,
        conditions: ConditionSet,
        plan: TradePlan,
        sizing: PositionSizing,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            conditions,
            verdict: Verdict::ValidTrade,
            reason: "All conditions met".into(),
            plan: Some(plan),
            sizing: Some(sizing),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn plan(&self) -> Option<&TradePlan> {
        self.plan.as_ref()
    }

    pub fn sizing(&self) -> Option<&PositionSizing> {
        self.sizing.as_ref()
    }

    pub fn is_valid_trade(&self) -> bool {
        self.verdict == Verdict::ValidTrade
    }
}
