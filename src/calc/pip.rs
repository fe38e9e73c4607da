//! Pip value, pips moved and profit for a single trade.

use rust_decimal::Decimal;
use tracing::debug;

use super::{CalcConfig, CalcError};
use crate::models::{InstrumentCatalog, TradeDirection, TradeInput, TradeResult};

/// Compute pip value, total pips and profit for a trade.
///
/// Point value comes from the instrument spec. Contract size falls back to
/// the instrument's base unit, then to 1. When the account currency is the
/// pair's base, pip value is converted through the entry price.
pub fn compute_pip(
    catalog: &InstrumentCatalog,
    config: &CalcConfig,
    input: &TradeInput,
) -> Result<TradeResult, CalcError> {
    let spec = catalog
        .get(&input.symbol)
        .ok_or_else(|| CalcError::UnknownInstrument(input.symbol.clone()))?;

    ensure_positive("entry_price", input.entry_price)?;
    ensure_positive("exit_price", input.exit_price)?;
    ensure_positive("volume", input.volume)?;

    let contract_size = input
        .contract_size
        .or(spec.base_unit)
        .unwrap_or(Decimal::ONE);
    ensure_positive("contract_size", contract_size)?;

    let point_value = spec.point_value()?;

    let mut pip_value = point_value
        .checked_mul(input.volume)
        .and_then(|v| v.checked_mul(contract_size))
        .ok_or_else(|| CalcError::overflow("volume"))?;

    if config.needs_quote_conversion(&spec.symbol) {
        pip_value = pip_value
            .checked_div(input.entry_price)
            .ok_or_else(|| CalcError::overflow("entry_price"))?;
    }

    let price_move = match input.direction {
        TradeDirection::Buy => input.exit_price - input.entry_price,
        TradeDirection::Sell => input.entry_price - input.exit_price,
    };

    let total_pips = price_move
        .checked_div(point_value)
        .ok_or_else(|| CalcError::overflow("exit_price"))?;

    let profit = pip_value
        .checked_mul(total_pips)
        .ok_or_else(|| CalcError::overflow("volume"))?;

    debug!(
        symbol = %spec.symbol,
        direction = %input.direction,
        pip_value = %pip_value,
        total_pips = %total_pips,
        profit = %profit,
        "Computed trade result"
    );

    Ok(TradeResult {
        symbol: spec.symbol.clone(),
        direction: input.direction,
        point_value,
        pip_value,
        total_pips,
        profit,
        is_profit: profit > Decimal::ZERO,
    })
}

fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), CalcError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(CalcError::not_positive(field))
    }
}
