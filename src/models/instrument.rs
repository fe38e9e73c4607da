//! Instrument specifications and the read-only catalog they are looked up from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calc::CalcError;

/// Broad instrument family. Drives display precision and catalog grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    SyntheticIndex,
    Forex,
    Metal,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::SyntheticIndex => "synthetic",
            AssetClass::Forex => "forex",
            AssetClass::Metal => "metal",
        }
    }

    /// Decimals used when printing a pip count for this class.
    pub fn pip_display_digits(&self) -> usize {
        match self {
            AssetClass::SyntheticIndex => 2,
            AssetClass::Forex | AssetClass::Metal => 1,
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Static description of a tradable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Identifier as quoted by the broker (e.g. "R_10", "EURUSD")
    pub symbol: String,

    /// Human-readable label
    pub label: String,

    pub class: AssetClass,

    /// Digits after the decimal point in a quote
    pub precision: u32,

    /// Units in one standard lot, if the instrument has one
    pub base_unit: Option<Decimal>,

    /// Quote carries one digit beyond the pip (5-digit majors, 3-digit JPY, gold)
    pub fractional_pip: bool,
}

impl InstrumentSpec {
    fn new(
        symbol: &str,
        label: &str,
        class: AssetClass,
        precision: u32,
        base_unit: Option<Decimal>,
        fractional_pip: bool,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            label: label.to_string(),
            class,
            precision,
            base_unit,
            fractional_pip,
        }
    }

    /// Number of decimal places that make up one pip.
    pub fn pip_digits(&self) -> u32 {
        if self.fractional_pip {
            self.precision.saturating_sub(1)
        } else {
            self.precision
        }
    }

    /// Size of one pip in price terms: `10^-pip_digits`. Fails when the
    /// scale exceeds what a `Decimal` can represent (28 digits).
    pub fn point_value(&self) -> Result<Decimal, CalcError> {
        Decimal::try_new(1, self.pip_digits()).map_err(|_| CalcError::InvalidRange {
            field: "precision",
            reason: format!("{} pip digits exceeds the supported maximum", self.pip_digits()),
        })
    }
}

/// Immutable lookup table of instrument specs, keyed by upper-cased symbol.
#[derive(Debug, Clone)]
pub struct InstrumentCatalog {
    by_symbol: HashMap<String, InstrumentSpec>,
    order: Vec<String>,
}

impl InstrumentCatalog {
    /// Build a catalog from specs. Later duplicates replace earlier ones.
    pub fn new(specs: Vec<InstrumentSpec>) -> Self {
        let mut by_symbol = HashMap::with_capacity(specs.len());
        let mut order = Vec::with_capacity(specs.len());

        for spec in specs {
            let key = spec.symbol.to_uppercase();
            if by_symbol.insert(key.clone(), spec).is_none() {
                order.push(key);
            }
        }

        Self { by_symbol, order }
    }

    /// The built-in catalog of synthetic indices, forex pairs and metals.
    pub fn builtin() -> Self {
        let mut specs = synthetic_indices();
        specs.extend(forex_and_metals());
        Self::new(specs)
    }

    /// Look up an instrument by symbol, ignoring case and surrounding whitespace.
    pub fn get(&self, symbol: &str) -> Option<&InstrumentSpec> {
        self.by_symbol.get(&symbol.trim().to_uppercase())
    }

    /// Instruments in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &InstrumentSpec> {
        self.order.iter().filter_map(|k| self.by_symbol.get(k))
    }

    /// Instruments of one asset class, in catalog order.
    pub fn by_class(&self, class: AssetClass) -> impl Iterator<Item = &InstrumentSpec> {
        self.iter().filter(move |s| s.class == class)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

}

fn synthetic_indices() -> Vec<InstrumentSpec> {
    use AssetClass::SyntheticIndex as S;

    [
        ("R_10", "Volatility 10"),
        ("R_25", "Volatility 25"),
        ("R_50", "Volatility 50"),
        ("R_75", "Volatility 75"),
        ("R_100", "Volatility 100"),
        ("1HZ10V", "Volatility 10 (1s)"),
        ("1HZ25V", "Volatility 25 (1s)"),
        ("1HZ50V", "Volatility 50 (1s)"),
        ("1HZ75V", "Volatility 75 (1s)"),
        ("1HZ100V", "Volatility 100 (1s)"),
        ("JD10", "Jump 10 Index"),
        ("JD25", "Jump 25 Index"),
        ("JD50", "Jump 50 Index"),
        ("JD75", "Jump 75 Index"),
        ("JD100", "Jump 100 Index"),
        ("CRASH300", "Crash 300 Index"),
        ("CRASH500", "Crash 500 Index"),
        ("CRASH1000", "Crash 1000 Index"),
        ("BOOM300", "Boom 300 Index"),
        ("BOOM500", "Boom 500 Index"),
        ("BOOM1000", "Boom 1000 Index"),
        ("RB100", "Range Break 100 Index"),
        ("RB200", "Range Break 200 Index"),
    ]
    .into_iter()
    .map(|(symbol, label)| InstrumentSpec::new(symbol, label, S, 2, None, false))
    .collect()
}

fn forex_and_metals() -> Vec<InstrumentSpec> {
    use AssetClass::{Forex, Metal};

    const STANDARD_LOT: Decimal = dec!(100000);

    let pair = |symbol: &str, label: &str, precision: u32| {
        InstrumentSpec::new(symbol, label, Forex, precision, Some(STANDARD_LOT), true)
    };

    vec![
        pair("EURUSD", "EUR/USD", 5),
        pair("GBPUSD", "GBP/USD", 5),
        pair("USDJPY", "USD/JPY", 3),
        pair("USDCHF", "USD/CHF", 5),
        pair("AUDUSD", "AUD/USD", 5),
        pair("USDCAD", "USD/CAD", 5),
        pair("NZDUSD", "NZD/USD", 5),
        pair("EURGBP", "EUR/GBP", 5),
        pair("EURJPY", "EUR/JPY", 3),
        pair("GBPJPY", "GBP/JPY", 3),
        InstrumentSpec::new("XAUUSD", "Gold/USD (XAU/USD)", Metal, 2, Some(dec!(100)), true),
        InstrumentSpec::new("XAGUSD", "Silver/USD (XAG/USD)", Metal, 3, Some(dec!(5000)), false),
        pair("EURCHF", "EUR/CHF", 5),
        pair("GBPCHF", "GBP/CHF", 5),
        pair("AUDCAD", "AUD/CAD", 5),
        pair("AUDCHF", "AUD/CHF", 5),
        pair("AUDJPY", "AUD/JPY", 3),
        pair("CADJPY", "CAD/JPY", 3),
        pair("CHFJPY", "CHF/JPY", 3),
        pair("EURAUD", "EUR/AUD", 5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_values_match_market_convention() {
        let catalog = InstrumentCatalog::builtin();
        let point = |s: &str| catalog.get(s).unwrap().point_value().unwrap();

        assert_eq!(point("R_75"), dec!(0.01));
        assert_eq!(point("EURUSD"), dec!(0.0001));
        assert_eq!(point("USDJPY"), dec!(0.01));
        assert_eq!(point("GBPJPY"), dec!(0.01));
        assert_eq!(point("XAUUSD"), dec!(0.1));
        assert_eq!(point("XAGUSD"), dec!(0.001));
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let catalog = InstrumentCatalog::builtin();

        assert_eq!(catalog.get(" eurusd ").unwrap().label, "EUR/USD");
        assert_eq!(catalog.get("crash500").unwrap().symbol, "CRASH500");
        assert!(catalog.get("BTCUSD").is_none());
    }

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = InstrumentCatalog::builtin();

        assert_eq!(catalog.len(), 43);
        assert_eq!(catalog.by_class(AssetClass::SyntheticIndex).count(), 23);
        assert_eq!(catalog.by_class(AssetClass::Metal).count(), 2);
        assert_eq!(catalog.iter().next().unwrap().symbol, "R_10");
        assert_eq!(catalog.get("XAGUSD").unwrap().base_unit, Some(dec!(5000)));
        assert_eq!(catalog.get("R_10").unwrap().base_unit, None);
    }

    #[test]
    fn test_precision_beyond_decimal_scale_is_a_range_error() {
        let deep = InstrumentSpec::new("DEEP", "Deep", AssetClass::Forex, 30, None, false);
        assert!(matches!(
            deep.point_value(),
            Err(CalcError::InvalidRange { field: "precision", .. })
        ));

        let edge = InstrumentSpec::new("EDGE", "Edge", AssetClass::Forex, 29, None, true);
        assert_eq!(edge.point_value().unwrap(), Decimal::new(1, 28));
    }

    #[test]
    fn test_duplicate_symbols_keep_one_entry() {
        let catalog = InstrumentCatalog::new(vec![
            InstrumentSpec::new("ABC", "first", AssetClass::Forex, 4, None, false),
            InstrumentSpec::new("abc", "second", AssetClass::Forex, 4, None, false),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("ABC").unwrap().label, "second");
    }
}
