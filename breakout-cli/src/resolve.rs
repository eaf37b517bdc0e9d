//! Input resolution pipeline.
//!
//! Sources run in order (flags, exchange API, interactive prompt) and each
//! fills only the fields still missing. The analyzer never sees a partial
//! record: whatever is still absent after the chain is reported as missing.

use std::io::{BufRead, Write};

use breakout_core::data::{bars_from_rows, DataError, MarketDataProvider};
use breakout_core::domain::{InputField, PartialInput};
use breakout_core::heuristics::MarketSnapshot;
use breakout_core::HeuristicConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One step of the resolution chain.
pub trait ResolveSource {
    fn name(&self) -> &str;

    /// Fill missing fields of `partial`. Fields already set must not change.
    fn fill(&mut self, symbol: &str, partial: &mut PartialInput) -> Result<(), ResolveError>;
}

/// Run `sources` in order until the record is complete.
///
/// A failing source is logged and skipped; later sources still run.
pub fn resolve(symbol: &str, sources: &mut [Box<dyn ResolveSource + '_>]) -> PartialInput {
    let mut partial = PartialInput::default();
    for source in sources.iter_mut() {
        if partial.is_complete() {
            break;
        }
        match source.fill(symbol, &mut partial) {
            Ok(()) => tracing::debug!(
                source = source.name(),
                missing = partial.missing().len(),
                "source applied"
            ),
            Err(e) => tracing::warn!(source = source.name(), error = %e, "source failed, skipping"),
        }
    }
    partial
}

/// Values given on the command line.
pub struct FlagSource {
    values: PartialInput,
}

impl FlagSource {
    pub fn new(values: PartialInput) -> Self {
        Self { values }
    }
}

impl ResolveSource for FlagSource {
    fn name(&self) -> &str {
        "flags"
    }

    fn fill(&mut self, _symbol: &str, partial: &mut PartialInput) -> Result<(), ResolveError> {
        partial.fill_from(&self.values);
        Ok(())
    }
}

/// Exchange quote plus heuristics over the daily chart.
pub struct ApiSource<'a> {
    provider: &'a dyn MarketDataProvider,
    config: HeuristicConfig,
}

impl<'a> ApiSource<'a> {
    pub fn new(provider: &'a dyn MarketDataProvider, config: HeuristicConfig) -> Self {
        Self { provider, config }
    }
}

impl ResolveSource for ApiSource<'_> {
    fn name(&self) -> &str {
        self.provider.name()
    }

    fn fill(&mut self, symbol: &str, partial: &mut PartialInput) -> Result<(), ResolveError> {
        if !self.provider.is_available() {
            return Err(DataError::CircuitBreakerTripped.into());
        }

        let summary = self.provider.company_summary(symbol)?;
        if summary.stock_id.is_none() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }
            .into());
        }

        let chart = self.provider.chart(symbol)?;
        let bars = bars_from_rows(&chart.data);
        // A price already resolved upstream anchors the swing-low search.
        let reference = partial.current_price.or(summary.last_traded_price);
        let snapshot = MarketSnapshot::from_bars(&bars, reference, &self.config);
        tracing::info!(
            symbol,
            bars = snapshot.bar_count,
            price = ?snapshot.current_price,
            "derived inputs from exchange data"
        );
        partial.fill_from(&snapshot.to_partial());
        Ok(())
    }
}

/// Ask on the terminal for whatever is still missing.
///
/// End of input stops prompting; an unparseable answer leaves that field
/// unset.
pub struct PromptSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn prompt_text(symbol: &str, field: InputField, partial: &PartialInput) -> String {
        match field {
            InputField::CurrentPrice => format!("Enter current price for {symbol}: "),
            InputField::Ma50 => format!("Enter MA50 value for {symbol}: "),
            InputField::ResistanceLevel => {
                format!("Enter recent resistance level for {symbol} (from last 1-3 months): ")
            }
            InputField::MaUptrend => "Is MA50 sloping upward? (yes/no): ".to_string(),
            InputField::VolumeConfirmed => match partial.resistance_level {
                Some(level) => format!(
                    "Did the last candle close above {level} with higher volume than recent days? (yes/no): "
                ),
                None => "Was breakout volume higher than recent days? (yes/no): ".to_string(),
            },
            InputField::SwingLow => match partial.current_price {
                Some(price) => {
                    format!("Enter recent swing low price (below current price {price}): ")
                }
                None => "Enter recent swing low price: ".to_string(),
            },
            InputField::Capital => "Enter account capital: ".to_string(),
        }
    }

    /// Returns `None` at end of input.
    fn ask(&mut self, text: &str) -> Result<Option<String>, ResolveError> {
        write!(self.writer, "{text}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> ResolveSource for PromptSource<R, W> {
    fn name(&self) -> &str {
        "prompt"
    }

    fn fill(&mut self, symbol: &str, partial: &mut PartialInput) -> Result<(), ResolveError> {
        for field in partial.missing() {
            let text = Self::prompt_text(symbol, field, partial);
            let Some(answer) = self.ask(&text)? else {
                tracing::debug!("end of input, stopping prompts");
                break;
            };

            if field.is_flag() {
                match parse_yes_no(&answer) {
                    Ok(value) => partial.set_flag(field, value),
                    Err(e) => writeln!(self.writer, "{e}; leaving {} unset", field.label())?,
                }
            } else {
                match parse_positive(&answer) {
                    Ok(value) => partial.set_number(field, value),
                    Err(e) => writeln!(self.writer, "{e}; leaving {} unset", field.label())?,
                }
            }
        }
        Ok(())
    }
}

/// Parse a yes/no answer. Used for both prompts and flag values.
pub fn parse_yes_no(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(format!("expected yes or no, got '{other}'")),
    }
}

fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .replace(',', "")
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("'{s}' must be a positive number"))
    }
}
