//! Breakout CLI: MA50 + breakout checklist for CSE stocks.
//!
//! Commands:
//! - `analyze SYMBOL`: resolve inputs (flags, then the CSE API, then
//!   prompts), run the five-condition checklist and, for a valid setup,
//!   print entry, stop, target and position size. Exits 0 on `VALID_TRADE`,
//!   1 otherwise.

mod report;
mod resolve;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use breakout_core::data::{CircuitBreaker, CseClient};
use breakout_core::domain::{AnalysisResult, ConditionSet, PartialInput};
use breakout_core::{Analyzer, AnalyzerConfig};

use report::{write_report, write_unresolved};
use resolve::{parse_yes_no, resolve, ApiSource, FlagSource, PromptSource, ResolveSource};

#[derive(Parser)]
#[command(
    name = "breakout",
    about = "Breakout CLI: MA50 + breakout checklist, trade plan and position sizing"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. info, debug, breakout_core=trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a symbol against the five breakout conditions.
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// CSE symbol (e.g. SAMP.N0000). Trimmed and uppercased before lookup,
    /// and reported in that form.
    symbol: String,

    /// Account capital used for position sizing.
    #[arg(long, env = "BREAKOUT_CAPITAL", default_value_t = 100_000.0)]
    capital: f64,

    /// Current price. Defaults to the exchange's last traded price.
    #[arg(long)]
    current_price: Option<f64>,

    /// 50-day moving average.
    #[arg(long)]
    ma50: Option<f64>,

    /// Is the MA50 sloping upward (yes/no)?
    #[arg(long, value_parser = parse_yes_no)]
    ma50_uptrend: Option<bool>,

    /// Recent resistance level (last 1-3 months).
    #[arg(long)]
    resistance: Option<f64>,

    /// Recent swing low, used to place the stop.
    #[arg(long)]
    swing_low: Option<f64>,

    /// Did the breakout candle close on higher volume (yes/no)?
    #[arg(long, alias = "breakout", value_parser = parse_yes_no)]
    volume_confirmed: Option<bool>,

    /// Path to a TOML config file (planner, heuristics, market data).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Offline mode: no network access.
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Never prompt; missing inputs produce a SKIP.
    #[arg(long, default_value_t = false)]
    no_interactive: bool,

    /// Print the result as JSON instead of the report.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let code = match cli.command {
        Commands::Analyze(args) => run_analyze(args)?,
    };
    std::process::exit(code);
}

fn init_logging(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exchange symbols are uppercase; `samp.n0000` and `SAMP.N0000` are the same listing.
fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        bail!("symbol must not be empty");
    }
    Ok(symbol)
}

fn run_analyze(args: AnalyzeArgs) -> Result<i32> {
    let symbol = normalize_symbol(&args.symbol)?;

    let config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };

    let flags = PartialInput {
        current_price: args.current_price,
        ma50: args.ma50,
        resistance_level: args.resistance,
        swing_low: args.swing_low,
        ma_uptrend: args.ma50_uptrend,
        volume_confirmed: args.volume_confirmed,
        capital: Some(args.capital),
    };

    let client = if args.offline {
        None
    } else {
        let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
        Some(CseClient::new(&config.market_data, circuit_breaker)?)
    };

    let partial = {
        let mut sources: Vec<Box<dyn ResolveSource + '_>> = vec![Box::new(FlagSource::new(flags))];
        if let Some(client) = &client {
            sources.push(Box::new(ApiSource::new(client, config.heuristics.clone())));
        }
        let stdin = std::io::stdin();
        if !args.no_interactive && stdin.is_terminal() {
            sources.push(Box::new(PromptSource::new(stdin.lock(), std::io::stderr())));
        }
        resolve(&symbol, &mut sources)
    };

    let mut stdout = std::io::stdout().lock();
    let result = match partial.into_input(&symbol) {
        Ok(input) => {
            let result = Analyzer::new(config.planner.clone()).analyze(&input);
            if !args.json {
                write_report(&mut stdout, &input, &result)?;
            }
            result
        }
        Err(e) => {
            let result = AnalysisResult::skip(&symbol, ConditionSet::default(), e.to_string());
            if !args.json {
                write_unresolved(&mut stdout, &result)?;
            }
            result
        }
    };

    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &result)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(result.verdict().exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        assert_eq!(normalize_symbol("  samp.n0000 ").unwrap(), "SAMP.N0000");
        assert_eq!(normalize_symbol("JKH.N0000").unwrap(), "JKH.N0000");
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let err = normalize_symbol("   ").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn analyze_args_parse() {
        let cli = Cli::try_parse_from([
            "breakout", "analyze", "samp.n0000", "--current-price", "105", "--breakout", "yes",
        ])
        .unwrap();
        let Commands::Analyze(args) = cli.command;
        assert_eq!(args.symbol, "samp.n0000");
        assert_eq!(args.current_price, Some(105.0));
        assert_eq!(args.volume_confirmed, Some(true));
    }
}
