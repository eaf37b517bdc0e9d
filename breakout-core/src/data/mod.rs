//! Market data: exchange client, response normalization, circuit breaker

pub mod circuit_breaker;
pub mod cse;
pub mod normalize;
pub mod provider;

pub use circuit_breaker::CircuitBreaker;
pub use cse::CseClient;
pub use normalize::normalize_chart;
pub use provider::{
    bars_from_rows, ChartPayload, CompanySummary, DataError, MarketDataProvider, OhlcvRow,
};
