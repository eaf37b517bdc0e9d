//! Analyzer: the single boundary operation of the engine.
//!
//! Accepts a fully-resolved [`AnalysisInput`] and always returns an
//! [`AnalysisResult`]. Rejected input, failed conditions and planning errors
//! all come back as `SKIP` with a populated reason; nothing here panics or
//! touches the network or terminal.

use crate::checklist::evaluate;
use crate::config::PlannerConfig;
use crate::domain::{AnalysisInput, AnalysisResult, ConditionSet, PriceSet};
use crate::planner::TradePlanner;
use crate::verdict::assemble;

/// Evaluate-then-plan pipeline over one planner configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    planner: TradePlanner,
}

impl Analyzer {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            planner: TradePlanner::new(config),
        }
    }

    pub fn planner(&self) -> &TradePlanner {
        &self.planner
    }

    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        let prices = match PriceSet::new(
            input.current_price,
            input.ma50,
            input.resistance_level,
            input.swing_low,
        ) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(symbol = %input.symbol, error = %e, "input rejected");
                return AnalysisResult::skip(&input.symbol, ConditionSet::default(), e.to_string());
            }
        };

        let conditions = evaluate(&prices, input.ma_uptrend, input.volume_confirmed);

        // The planner only runs for a valid setup.
        let planned = conditions
            .all_met()
            .then(|| self.planner.plan(&prices, input.capital));

        let result = assemble(&input.symbol, conditions, planned);
        tracing::debug!(
            symbol = %input.symbol,
            verdict = %result.verdict(),
            reason = result.reason(),
            "analysis complete"
        );
        result
    }
}

/// Analyze with the default planner constants.
pub fn analyze(input: &AnalysisInput) -> AnalysisResult {
    Analyzer::default().analyze(input)
}
