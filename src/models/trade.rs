//! Trade inputs and pip/profit results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calc::CalcError;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "buy",
            TradeDirection::Sell => "sell",
        }
    }
}

impl FromStr for TradeDirection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "long" => Ok(TradeDirection::Buy),
            "sell" | "short" => Ok(TradeDirection::Sell),
            "" => Err(CalcError::missing("direction")),
            other => Err(CalcError::InvalidInput {
                field: "direction",
                reason: format!("expected buy or sell, got {:?}", other),
            }),
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parameters of a single hypothetical trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInput {
    /// Instrument identifier, resolved against the catalog
    pub symbol: String,

    pub direction: TradeDirection,

    pub entry_price: Decimal,

    pub exit_price: Decimal,

    /// Volume in lots
    pub volume: Decimal,

    /// Units per lot; falls back to the instrument's base unit, then 1
    #[serde(default)]
    pub contract_size: Option<Decimal>,
}

/// Outcome of a pip/profit calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResult {
    pub symbol: String,

    pub direction: TradeDirection,

    /// Price size of one pip
    pub point_value: Decimal,

    /// Money value of a one-pip move at this size
    pub pip_value: Decimal,

    /// Pips moved, positive when the move favours the direction
    pub total_pips: Decimal,

    /// Signed profit (negative for a loss)
    pub profit: Decimal,

    pub is_profit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("BUY".parse::<TradeDirection>().unwrap(), TradeDirection::Buy);
        assert_eq!(" sell ".parse::<TradeDirection>().unwrap(), TradeDirection::Sell);
        assert_eq!("short".parse::<TradeDirection>().unwrap(), TradeDirection::Sell);

        assert!(matches!(
            "hold".parse::<TradeDirection>(),
            Err(CalcError::InvalidInput { field: "direction", .. })
        ));
        assert!(matches!(
            "".parse::<TradeDirection>(),
            Err(CalcError::InvalidInput { field: "direction", .. })
        ));
    }
}
