//! Risk and position-size inputs and results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the stop-loss distance is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum StopLossBasis {
    /// Money per pip for the position
    PipValue(Decimal),
    /// Standard lots; pip value comes from the per-lot constant
    LotSize(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInput {
    pub capital: Decimal,

    /// Percentage of capital to risk (0 to 100)
    pub risk_pct: Decimal,

    #[serde(default)]
    pub basis: Option<StopLossBasis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_amount: Decimal,

    pub remaining_capital: Decimal,

    /// Pips of adverse movement that consume the risk amount
    pub stop_loss_pips: Option<Decimal>,

    /// Pip value the stop-loss was derived from
    pub pip_value: Option<Decimal>,
}

/// Parameters for sizing a position to a fixed risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeInput {
    pub capital: Decimal,

    pub risk_pct: Decimal,

    pub stop_loss_pips: Decimal,

    /// Money per pip for one standard lot; config default when absent
    #[serde(default)]
    pub pip_value_per_lot: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeResult {
    pub risk_amount: Decimal,

    pub pip_value_per_lot: Decimal,

    /// Lots that lose exactly the risk amount at the stop
    pub lot_size: Decimal,
}
