//! Text rendering of calculator results.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{InstrumentSpec, RiskResult, SizeResult, TradeResult};

/// Format as `$1,234.56`; negatives as `-$1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());

    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), frac)
}

/// Fixed-point with `digits` decimals, half away from zero.
pub fn format_fixed(value: Decimal, digits: u32) -> String {
    let rounded = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", digits as usize, rounded)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Pip/profit result for one instrument.
pub fn render_trade(spec: &InstrumentSpec, result: &TradeResult) -> String {
    let pip_digits = spec.class.pip_display_digits() as u32;
    let outcome = if result.is_profit { "Profit" } else { "Loss" };

    let mut out = String::new();
    out.push_str(&format!("\n{:=^50}\n", format!(" {} ({}) ", spec.label, result.direction)));
    out.push_str(&format!("Pip Value:    {}\n", format_currency(result.pip_value)));
    out.push_str(&format!("Total Pips:   {}\n", format_fixed(result.total_pips, pip_digits)));
    out.push_str(&format!(
        "Profit/Loss:  {} [{}]\n",
        format_currency(result.profit.abs()),
        outcome
    ));
    out.push_str(&format!("{:=^50}", ""));
    out
}

pub fn render_risk(result: &RiskResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{:=^50}\n", " RISK "));
    out.push_str(&format!("Risk Amount:       {}\n", format_currency(result.risk_amount)));
    out.push_str(&format!("Remaining Capital: {}\n", format_currency(result.remaining_capital)));
    if let (Some(pips), Some(pip_value)) = (result.stop_loss_pips, result.pip_value) {
        out.push_str(&format!(
            "Stop Loss:         {} pips @ {}/pip\n",
            format_fixed(pips, 1),
            format_currency(pip_value)
        ));
    }
    out.push_str(&format!("{:=^50}", ""));
    out
}

pub fn render_size(result: &SizeResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{:=^50}\n", " POSITION SIZE "));
    out.push_str(&format!("Risk Amount:   {}\n", format_currency(result.risk_amount)));
    out.push_str(&format!("Pip Value/Lot: {}\n", format_currency(result.pip_value_per_lot)));
    out.push_str(&format!("Lot Size:      {}\n", format_fixed(result.lot_size, 2)));
    out.push_str(&format!("{:=^50}", ""));
    out
}
