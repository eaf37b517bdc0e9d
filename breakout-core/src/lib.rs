//! Breakout Core: MA50 + breakout checklist, trade planner, position sizing.
//!
//! This crate contains the decision engine:
//! - Domain types (price levels, conditions, trade plans, analysis results)
//! - Five-condition checklist evaluation
//! - Trade planner with risk-based position sizing
//! - Heuristic estimators that derive inputs from daily bar history
//! - Exchange market-data client with retry and circuit breaker
//!
//! Every operation except the market-data client is pure: the same input
//! always produces the same [`AnalysisResult`](domain::AnalysisResult).

pub mod analyzer;
pub mod checklist;
pub mod config;
pub mod data;
pub mod domain;
pub mod heuristics;
pub mod indicators;
pub mod planner;
pub mod verdict;

pub use analyzer::{analyze, Analyzer};
pub use config::{AnalyzerConfig, ConfigError, HeuristicConfig, MarketDataConfig, PlannerConfig};
pub use planner::{PlanningError, TradePlanner};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine types are Send + Sync.
    ///
    /// The proxy shares the provider and analyzer across request tasks; if
    /// any type fails this check, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceSet>();
        require_sync::<domain::PriceSet>();
        require_send::<domain::ConditionSet>();
        require_sync::<domain::ConditionSet>();
        require_send::<domain::TradePlan>();
        require_sync::<domain::TradePlan>();
        require_send::<domain::PositionSizing>();
        require_sync::<domain::PositionSizing>();
        require_send::<domain::AnalysisInput>();
        require_sync::<domain::AnalysisInput>();
        require_send::<domain::AnalysisResult>();
        require_sync::<domain::AnalysisResult>();

        // Engine
        require_send::<Analyzer>();
        require_sync::<Analyzer>();
        require_send::<TradePlanner>();
        require_sync::<TradePlanner>();
        require_send::<AnalyzerConfig>();
        require_sync::<AnalyzerConfig>();

        // Market data
        require_send::<data::CseClient>();
        require_sync::<data::CseClient>();
        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
        require_send::<data::ChartPayload>();
        require_sync::<data::ChartPayload>();
    }

    /// Architecture contract: heuristics see bar history only, never the
    /// planner or capital.
    #[test]
    fn heuristic_trait_takes_only_bars() {
        fn _check_trait_object_builds(
            h: &dyn heuristics::Heuristic<Output = f64>,
            bars: &[domain::Bar],
        ) -> Option<f64> {
            h.estimate(bars)
        }
    }

    /// Architecture contract: market-data providers are usable as shared
    /// trait objects.
    #[test]
    fn provider_is_object_safe() {
        fn _check(p: std::sync::Arc<dyn data::MarketDataProvider>) -> bool {
            p.is_available()
        }
    }
}
