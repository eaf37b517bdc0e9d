//! Terminal checklist report.

use std::io::{self, Write};

use breakout_core::domain::{AnalysisInput, AnalysisResult, Condition};

const RULE_WIDTH: usize = 60;

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn mark(met: bool) -> &'static str {
    if met {
        "YES ✓"
    } else {
        "NO ✗"
    }
}

/// Format with thousands separators and two decimals: `13125.0` → `13,125.00`.
pub fn money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{frac}", group_digits(whole))
}

/// Integer with thousands separators.
pub fn count(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Full report for an evaluated input.
pub fn write_report<W: Write>(
    out: &mut W,
    input: &AnalysisInput,
    result: &AnalysisResult,
) -> io::Result<()> {
    let conditions = result.conditions();

    writeln!(out)?;
    rule(out)?;
    writeln!(out, "STOCK CHECK - MA50 + Breakout System (Daily Charts)")?;
    writeln!(out, "Symbol: {}", result.symbol())?;
    rule(out)?;

    for (n, (condition, met)) in conditions.iter().enumerate() {
        writeln!(out, "\n{}. {}", n + 1, condition.question())?;
        match condition {
            Condition::PriceAboveMa => {
                writeln!(out, "   Current Price: {:.2}", input.current_price)?;
                writeln!(out, "   MA50: {:.2}", input.ma50)?;
            }
            Condition::HasResistance => {
                writeln!(out, "   Resistance: {:.2}", input.resistance_level)?;
            }
            Condition::BreakoutClose => {
                writeln!(out, "   Current Price: {:.2}", input.current_price)?;
                writeln!(out, "   Resistance: {:.2}", input.resistance_level)?;
            }
            Condition::MaUptrend | Condition::VolumeConfirmed => {}
        }
        writeln!(out, "   Result: {}", mark(met))?;
    }

    writeln!(out)?;
    rule(out)?;

    let (Some(plan), Some(sizing)) = (result.plan(), result.sizing()) else {
        writeln!(out, "\nVERDICT: SKIP THIS TRADE")?;
        writeln!(out, "Reason: {}", result.reason())?;
        return rule(out);
    };

    writeln!(out, "\nENTRY, STOP, TARGET:")?;
    writeln!(out, "  Entry Price:     {:.2} (breakout level)", plan.entry_price)?;
    writeln!(out, "  Swing Low:       {:.2}", input.swing_low)?;
    writeln!(out, "  Stop Loss:       {:.2} (slightly below swing low)", plan.stop_loss)?;
    writeln!(out, "  Risk per Share:  {:.2} (Entry - Stop)", plan.risk_per_share)?;
    writeln!(
        out,
        "  Target ({:.0}R):     {:.2} (Entry + {:.0} × Risk)",
        plan.reward_risk_ratio(),
        plan.target_price,
        plan.reward_risk_ratio()
    )?;

    writeln!(out)?;
    rule(out)?;
    writeln!(out, "RISK CHECK & POSITION SIZING")?;
    rule(out)?;
    writeln!(out, "\nCapital:              {}", money(sizing.capital))?;
    writeln!(
        out,
        "Risk per Trade ({:.0}%):  {}",
        percent_of(sizing.risk_amount, sizing.capital),
        money(sizing.risk_amount)
    )?;
    writeln!(out, "Risk per Share:       {:.2}", plan.risk_per_share)?;
    writeln!(out, "Position Size:        {} shares", count(sizing.share_count))?;
    writeln!(
        out,
        "Position Value:       {} ({:.1}% of capital)",
        money(sizing.position_value),
        sizing.exposure_fraction() * 100.0
    )?;
    writeln!(
        out,
        "Actual Risk:          {} ({:.2}% of capital)",
        money(sizing.actual_risk),
        sizing.risk_fraction() * 100.0
    )?;
    if let Some(warning) = &sizing.warning {
        writeln!(out, "WARNING: {warning}")?;
    }

    writeln!(out)?;
    rule(out)?;
    writeln!(out, "FINAL VERDICT")?;
    rule(out)?;
    writeln!(out, "\n✓ VALID TRADE")?;
    writeln!(out, "\nTrade Summary:")?;
    writeln!(out, "  Symbol:        {}", result.symbol())?;
    writeln!(out, "  Entry:         {:.2}", plan.entry_price)?;
    writeln!(out, "  Stop Loss:     {:.2}", plan.stop_loss)?;
    writeln!(
        out,
        "  Target ({:.0}R):   {:.2}",
        plan.reward_risk_ratio(),
        plan.target_price
    )?;
    writeln!(out, "  Position Size: {} shares", count(sizing.share_count))?;
    writeln!(out, "  Risk/Share:    {:.2}", plan.risk_per_share)?;
    writeln!(
        out,
        "  Max Risk:      {} ({:.2}% of capital)",
        money(sizing.actual_risk),
        sizing.risk_fraction() * 100.0
    )?;
    writeln!(
        out,
        "  Potential Profit: {} ({:.0}R)",
        money(sizing.potential_profit),
        plan.reward_risk_ratio()
    )?;

    writeln!(out, "\nPre-Trade Checklist:")?;
    let risk_item = format!(
        "Risk ≤ {:.0}% capital",
        percent_of(sizing.risk_amount, sizing.capital)
    );
    let target_item = format!("Target at least {:.0}R", plan.reward_risk_ratio());
    for item in [
        "Price above MA50",
        "MA50 trending up",
        "Breakout with strong volume",
        "Stop loss placed",
        risk_item.as_str(),
        target_item.as_str(),
    ] {
        writeln!(out, "  ✓ {item}")?;
    }
    writeln!(out)?;
    rule(out)
}

/// Short report for a symbol whose inputs could not be resolved.
pub fn write_unresolved<W: Write>(out: &mut W, result: &AnalysisResult) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "STOCK CHECK - {}", result.symbol())?;
    rule(out)?;
    writeln!(out, "\nVERDICT: SKIP THIS TRADE")?;
    writeln!(out, "Reason: {}", result.reason())?;
    rule(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakout_core::analyze;

    fn scenario(current_price: f64) -> AnalysisInput {
        AnalysisInput {
            symbol: "SAMP.N0000".into(),
            current_price,
            ma50: 100.0,
            resistance_level: 104.0,
            swing_low: 98.0,
            ma_uptrend: true,
            volume_confirmed: true,
            capital: 100_000.0,
        }
    }

    fn render(input: &AnalysisInput) -> String {
        let result = analyze(input);
        let mut out = Vec::new();
        write_report(&mut out, input, &result).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn grouping() {
        assert_eq!(money(1995.0), "1,995.00");
        assert_eq!(money(100_000.0), "100,000.00");
        assert_eq!(money(997.5), "997.50");
        assert_eq!(money(-1234.567), "-1,234.57");
        assert_eq!(count(125), "125");
        assert_eq!(count(1_000_000), "1,000,000");
    }

    #[test]
    fn valid_trade_report() {
        let text = render(&scenario(105.0));
        assert!(text.contains("1. Is price above MA50?"));
        assert!(text.contains("5. Was breakout volume higher than recent days?"));
        assert!(text.contains("Stop Loss:       97.02"));
        assert!(text.contains("Target (2R):     120.96"));
        assert!(text.contains("Risk per Trade (1%):  1,000.00"));
        assert!(text.contains("Position Size:        125 shares"));
        assert!(text.contains("13,125.00 (13.1% of capital)"));
        assert!(text.contains("Actual Risk:          997.50"));
        assert!(text.contains("Potential Profit: 1,995.00 (2R)"));
        assert!(text.contains("✓ VALID TRADE"));
    }

    #[test]
    fn skip_report_lists_reason() {
        let text = render(&scenario(95.0));
        assert!(text.contains("Result: NO ✗"));
        assert!(text.contains("VERDICT: SKIP THIS TRADE"));
        assert!(text.contains("Reason: Failed conditions: Price not above MA50"));
        assert!(!text.contains("POSITION SIZING"));
    }
}
