//! Raw form fields and their conversion into validated calculator inputs.
//!
//! Forms hold text exactly as the user typed it. `parse()` is the only
//! place where `InvalidInput` is raised; range checks live with the
//! calculations themselves.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::CalcError;
use crate::models::{RiskInput, SizeInput, StopLossBasis, TradeInput};

/// Parse a required decimal field.
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, CalcError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::missing(field));
    }

    let not_a_number = || CalcError::InvalidInput {
        field,
        reason: format!("{:?} is not a number", trimmed),
    };

    // Decimal's parser tolerates `_` separators; a form field should not.
    if trimmed.contains('_') {
        return Err(not_a_number());
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| not_a_number())
}

/// Parse an optional decimal field. Blank means absent.
pub fn parse_optional(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<Decimal>, CalcError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_decimal(field, value).map(Some),
    }
}

/// Pip/profit calculator form.
#[derive(Debug, Clone, Default)]
pub struct TradeForm {
    pub symbol: String,
    pub direction: String,
    pub entry_price: String,
    pub exit_price: String,
    pub volume: String,
    pub contract_size: Option<String>,
}

impl TradeForm {
    pub fn parse(&self) -> Result<TradeInput, CalcError> {
        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(CalcError::missing("symbol"));
        }

        Ok(TradeInput {
            symbol: symbol.to_uppercase(),
            direction: self.direction.parse()?,
            entry_price: parse_decimal("entry_price", &self.entry_price)?,
            exit_price: parse_decimal("exit_price", &self.exit_price)?,
            volume: parse_decimal("volume", &self.volume)?,
            contract_size: parse_optional("contract_size", self.contract_size.as_deref())?,
        })
    }
}

/// Risk calculator form. At most one of pip value and lot size is used;
/// pip value wins when both are filled in.
#[derive(Debug, Clone, Default)]
pub struct RiskForm {
    pub capital: String,
    pub risk_pct: String,
    pub pip_value: Option<String>,
    pub lot_size: Option<String>,
}

impl RiskForm {
    pub fn parse(&self) -> Result<RiskInput, CalcError> {
        let capital = parse_decimal("capital", &self.capital)?;
        let risk_pct = parse_decimal("risk_pct", &self.risk_pct)?;

        let pip_value = parse_optional("pip_value", self.pip_value.as_deref())?;
        let lot_size = parse_optional("lot_size", self.lot_size.as_deref())?;
        let basis = pip_value
            .map(StopLossBasis::PipValue)
            .or(lot_size.map(StopLossBasis::LotSize));

        Ok(RiskInput {
            capital,
            risk_pct,
            basis,
        })
    }
}

/// Position-size calculator form.
#[derive(Debug, Clone, Default)]
pub struct SizeForm {
    pub capital: String,
    pub risk_pct: String,
    pub stop_loss_pips: String,
    pub pip_value_per_lot: Option<String>,
}

impl SizeForm {
    pub fn parse(&self) -> Result<SizeInput, CalcError> {
        Ok(SizeInput {
            capital: parse_decimal("capital", &self.capital)?,
            risk_pct: parse_decimal("risk_pct", &self.risk_pct)?,
            stop_loss_pips: parse_decimal("stop_loss_pips", &self.stop_loss_pips)?,
            pip_value_per_lot: parse_optional(
                "pip_value_per_lot",
                self.pip_value_per_lot.as_deref(),
            )?,
        })
    }
}
