//! Verdict assembly: combine checklist and planner output into one result.

use crate::domain::{AnalysisResult, ConditionSet, PositionSizing, TradePlan};
use crate::planner::PlanningError;

/// Outcome of the planner, if it ran.
pub type PlanOutcome = Result<(TradePlan, PositionSizing), PlanningError>;

/// Build the final [`AnalysisResult`].
///
/// - any failed condition → `SKIP`, reason lists failed conditions in order
/// - all met but planning failed → `SKIP`, reason is the planning error
/// - all met and planned → `VALID_TRADE`
///
/// `planned` is `None` when the caller did not run the planner; with every
/// condition met that is reported as a skip rather than a trade.
pub fn assemble(symbol: &str, conditions: ConditionSet, planned: Option<PlanOutcome>) -> AnalysisResult {
    if !conditions.all_met() {
        return AnalysisResult::skip(symbol, conditions, failed_reason(&conditions));
    }

    match planned {
        Some(Ok((plan, sizing))) => AnalysisResult::valid_trade(symbol, conditions, plan, sizing),
        Some(Err(err)) => AnalysisResult::skip(symbol, conditions, err.to_string()),
        None => AnalysisResult::skip(symbol, conditions, "Trade plan not computed"),
    }
}

/// "Failed conditions: A, B" in fixed condition order.
pub fn failed_reason(conditions: &ConditionSet) -> String {
    let labels: Vec<&str> = conditions
        .failed()
        .into_iter()
        .map(|c| c.failure_label())
        .collect();
    format!("Failed conditions: {}", labels.join(", "))
}
