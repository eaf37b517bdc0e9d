//! Market-data provider trait, canonical row shape, and structured errors.
//!
//! The `MarketDataProvider` trait abstracts over the exchange API so the
//! CLI's resolution pipeline and the proxy can swap implementations and
//! mock them in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Bar;

/// Canonical OHLCV row as served to the scanner page.
///
/// Fields are optional because the upstream feed occasionally omits them;
/// absent values serialize as `null`, matching what the page expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRow {
    pub close: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<f64>,
}

impl OhlcvRow {
    /// Convert to a [`Bar`]. Rows without close/high/low are unusable;
    /// a missing volume counts as zero.
    pub fn to_bar(&self) -> Option<Bar> {
        Some(Bar::new(
            self.high?,
            self.low?,
            self.close?,
            self.volume.unwrap_or(0.0),
        ))
    }
}

/// Convert rows to bars, dropping rows that lack a price field.
pub fn bars_from_rows(rows: &[OhlcvRow]) -> Vec<Bar> {
    rows.iter()
        .filter_map(OhlcvRow::to_bar)
        .filter(|bar| !bar.is_void())
        .collect()
}

/// `{ "data": [...] }`: the proxy's response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub data: Vec<OhlcvRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChartPayload {
    pub fn new(data: Vec<OhlcvRow>) -> Self {
        Self { data, error: None }
    }

    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Summary facts about one listed company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub symbol: String,
    /// Exchange-internal stock id; `None` when the symbol is unknown.
    pub stock_id: Option<i64>,
    pub name: Option<String>,
    pub last_traded_price: Option<f64>,
}

/// Structured error types for market-data operations.
///
/// Displayable in both CLI and proxy (502 body) contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market-data providers.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Company summary (id, name, last traded price) for a symbol.
    fn company_summary(&self, symbol: &str) -> Result<CompanySummary, DataError>;

    /// Daily chart rows for a symbol, oldest first. Unknown symbols yield an
    /// empty payload rather than an error.
    fn chart(&self, symbol: &str) -> Result<ChartPayload, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool;
}
