//! Calculator configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Settings shared by all calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Currency profits are reported in (ISO code)
    pub account_currency: String,

    /// Money per pip for one standard lot, used when only a lot size is known
    pub standard_lot_pip_value: Decimal,

    /// How long to wait for a live quote before giving up
    pub quote_timeout_secs: u64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            account_currency: "USD".to_string(),
            standard_lot_pip_value: dec!(10),
            quote_timeout_secs: 5,
        }
    }
}

impl CalcConfig {
    /// Defaults overridden by `PIPCALC_*` environment variables (and `.env`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let account_currency = std::env::var("PIPCALC_ACCOUNT_CURRENCY")
            .ok()
            .map(|v| v.trim().to_uppercase())
            .filter(|v| v.len() == 3 && v.chars().all(|c| c.is_ascii_alphabetic()))
            .unwrap_or(defaults.account_currency);

        let standard_lot_pip_value = env_parse::<Decimal>("PIPCALC_STANDARD_LOT_PIP_VALUE")
            .filter(|v| *v > Decimal::ZERO)
            .unwrap_or(defaults.standard_lot_pip_value);

        let quote_timeout_secs = env_parse::<u64>("PIPCALC_QUOTE_TIMEOUT_SECS")
            .unwrap_or(defaults.quote_timeout_secs);

        Self {
            account_currency,
            standard_lot_pip_value,
            quote_timeout_secs,
        }
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.quote_timeout_secs)
    }

    /// Whether pip value must be converted through the entry price: the
    /// account currency is the base of the pair but not its quote.
    pub fn needs_quote_conversion(&self, symbol: &str) -> bool {
        let symbol = symbol.to_uppercase();
        symbol.starts_with(&self.account_currency) && !symbol.ends_with(&self.account_currency)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring unparseable environment value");
            None
        }
    }
}
