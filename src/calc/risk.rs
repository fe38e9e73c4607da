//! Risk amount, stop-loss distance and position sizing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::{CalcConfig, CalcError};
use crate::models::{RiskInput, RiskResult, SizeInput, SizeResult, StopLossBasis};

/// Compute how much capital a trade risks and, given a pip value or lot
/// size, how many pips of adverse movement that amount covers.
///
/// A non-positive pip value leaves the stop-loss unset rather than failing.
/// A non-positive lot size is a range error.
pub fn compute_risk(config: &CalcConfig, input: &RiskInput) -> Result<RiskResult, CalcError> {
    let risk_amount = risk_amount_for(input.capital, input.risk_pct)?;
    let remaining_capital = input.capital - risk_amount;

    let pip_value = match input.basis {
        Some(StopLossBasis::PipValue(v)) => Some(v),
        Some(StopLossBasis::LotSize(lots)) => {
            if lots <= Decimal::ZERO {
                return Err(CalcError::not_positive("lot_size"));
            }
            let derived = config
                .standard_lot_pip_value
                .checked_mul(lots)
                .ok_or_else(|| CalcError::overflow("lot_size"))?;
            Some(derived)
        }
        None => None,
    };

    let stop_loss_pips = match pip_value {
        Some(v) if v > Decimal::ZERO => Some(
            risk_amount
                .checked_div(v)
                .ok_or_else(|| CalcError::overflow("pip_value"))?,
        ),
        _ => None,
    };

    debug!(
        risk_amount = %risk_amount,
        remaining_capital = %remaining_capital,
        stop_loss_pips = ?stop_loss_pips,
        "Computed risk"
    );

    Ok(RiskResult {
        risk_amount,
        remaining_capital,
        stop_loss_pips,
        pip_value,
    })
}

/// Lot size that loses exactly the risk amount if the stop is hit.
pub fn compute_position_size(
    config: &CalcConfig,
    input: &SizeInput,
) -> Result<SizeResult, CalcError> {
    let risk_amount = risk_amount_for(input.capital, input.risk_pct)?;

    if input.stop_loss_pips <= Decimal::ZERO {
        return Err(CalcError::not_positive("stop_loss_pips"));
    }

    let pip_value_per_lot = input
        .pip_value_per_lot
        .unwrap_or(config.standard_lot_pip_value);
    if pip_value_per_lot <= Decimal::ZERO {
        return Err(CalcError::not_positive("pip_value_per_lot"));
    }

    let lot_size = input
        .stop_loss_pips
        .checked_mul(pip_value_per_lot)
        .and_then(|per_lot_loss| risk_amount.checked_div(per_lot_loss))
        .ok_or_else(|| CalcError::overflow("stop_loss_pips"))?;

    debug!(risk_amount = %risk_amount, lot_size = %lot_size, "Computed position size");

    Ok(SizeResult {
        risk_amount,
        pip_value_per_lot,
        lot_size,
    })
}

/// `capital * pct / 100` after checking capital > 0 and 0 <= pct <= 100.
fn risk_amount_for(capital: Decimal, risk_pct: Decimal) -> Result<Decimal, CalcError> {
    if capital <= Decimal::ZERO {
        return Err(CalcError::not_positive("capital"));
    }
    if risk_pct < Decimal::ZERO || risk_pct > dec!(100) {
        return Err(CalcError::InvalidRange {
            field: "risk_pct",
            reason: format!("{} is not between 0 and 100", risk_pct),
        });
    }

    capital
        .checked_mul(risk_pct)
        .map(|v| v / dec!(100))
        .ok_or_else(|| CalcError::overflow("capital"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(
        capital: Decimal,
        pct: Decimal,
        basis: Option<StopLossBasis>,
    ) -> Result<RiskResult, CalcError> {
        compute_risk(
            &CalcConfig::default(),
            &RiskInput {
                capital,
                risk_pct: pct,
                basis,
            },
        )
    }

    #[test]
    fn test_risk_amount_and_remaining() {
        let result = risk(dec!(10000), dec!(2), None).unwrap();

        assert_eq!(result.risk_amount, dec!(200));
        assert_eq!(result.remaining_capital, dec!(9800));
        assert_eq!(result.stop_loss_pips, None);
        assert_eq!(result.pip_value, None);
    }

    #[test]
    fn test_stop_loss_from_pip_value() {
        let result = risk(dec!(10000), dec!(2), Some(StopLossBasis::PipValue(dec!(10)))).unwrap();

        assert_eq!(result.stop_loss_pips, Some(dec!(20)));
        assert_eq!(result.pip_value, Some(dec!(10)));
    }

    #[test]
    fn test_stop_loss_from_lot_size() {
        // 0.5 lots * $10/pip = $5/pip; $200 / $5 = 40 pips
        let result = risk(dec!(10000), dec!(2), Some(StopLossBasis::LotSize(dec!(0.5)))).unwrap();

        assert_eq!(result.pip_value, Some(dec!(5)));
        assert_eq!(result.stop_loss_pips, Some(dec!(40)));
    }

    #[test]
    fn test_non_positive_pip_value_omits_stop_loss() {
        for pip_value in [dec!(0), dec!(-4)] {
            let basis = Some(StopLossBasis::PipValue(pip_value));
            let result = risk(dec!(5000), dec!(1), basis).unwrap();

            assert_eq!(result.risk_amount, dec!(50));
            assert_eq!(result.stop_loss_pips, None);
        }
    }

    #[test]
    fn test_stop_loss_overflow_is_reported() {
        let tiny = Decimal::new(1, 22);
        let err = risk(dec!(1000000000000000), dec!(100), Some(StopLossBasis::PipValue(tiny)))
            .unwrap_err();

        assert_eq!(err, CalcError::overflow("pip_value"));
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(
            risk(dec!(10000), dec!(150), None).unwrap_err().field(),
            Some("risk_pct")
        );
        assert!(matches!(
            risk(dec!(10000), dec!(-0.1), None),
            Err(CalcError::InvalidRange { field: "risk_pct", .. })
        ));
        assert_eq!(
            risk(dec!(0), dec!(2), None).unwrap_err(),
            CalcError::not_positive("capital")
        );
        assert_eq!(
            risk(dec!(1000), dec!(2), Some(StopLossBasis::LotSize(dec!(0)))).unwrap_err(),
            CalcError::not_positive("lot_size")
        );
    }

    #[test]
    fn test_percentage_bounds_are_inclusive() {
        let none = risk(dec!(800), dec!(0), None).unwrap();
        assert!(none.risk_amount.is_zero());
        assert_eq!(none.remaining_capital, dec!(800));

        let all = risk(dec!(800), dec!(100), None).unwrap();
        assert_eq!(all.risk_amount, dec!(800));
        assert!(all.remaining_capital.is_zero());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let basis = Some(StopLossBasis::PipValue(dec!(3)));

        assert_eq!(
            risk(dec!(1234.56), dec!(1.5), basis).unwrap(),
            risk(dec!(1234.56), dec!(1.5), basis).unwrap()
        );
    }

    #[test]
    fn test_position_size() {
        let config = CalcConfig::default();
        let input = SizeInput {
            capital: dec!(10000),
            risk_pct: dec!(2),
            stop_loss_pips: dec!(20),
            pip_value_per_lot: None,
        };
        let result = compute_position_size(&config, &input).unwrap();

        assert_eq!(result.risk_amount, dec!(200));
        assert_eq!(result.pip_value_per_lot, dec!(10));
        assert_eq!(result.lot_size, dec!(1));

        let input = SizeInput {
            pip_value_per_lot: Some(dec!(1)),
            ..input
        };
        assert_eq!(compute_position_size(&config, &input).unwrap().lot_size, dec!(10));
    }

    #[test]
    fn test_position_size_inverts_stop_loss() {
        let config = CalcConfig::default();
        let risked = risk(dec!(25000), dec!(1), Some(StopLossBasis::LotSize(dec!(2.5)))).unwrap();

        let sized = compute_position_size(
            &config,
            &SizeInput {
                capital: dec!(25000),
                risk_pct: dec!(1),
                stop_loss_pips: risked.stop_loss_pips.unwrap(),
                pip_value_per_lot: None,
            },
        )
        .unwrap();

        assert_eq!(sized.lot_size, dec!(2.5));
    }

    #[test]
    fn test_position_size_rejects_bad_stop() {
        let config = CalcConfig::default();
        let input = SizeInput {
            capital: dec!(10000),
            risk_pct: dec!(2),
            stop_loss_pips: dec!(0),
            pip_value_per_lot: None,
        };
        assert_eq!(
            compute_position_size(&config, &input).unwrap_err(),
            CalcError::not_positive("stop_loss_pips")
        );

        let input = SizeInput {
            stop_loss_pips: dec!(10),
            pip_value_per_lot: Some(dec!(-1)),
            ..input
        };
        assert_eq!(
            compute_position_size(&config, &input).unwrap_err(),
            CalcError::not_positive("pip_value_per_lot")
        );
    }
}
