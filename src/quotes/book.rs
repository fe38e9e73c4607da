//! File-backed quote provider.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use tracing::debug;

use super::{Quote, QuoteProvider};

/// Snapshot of prices keyed by upper-cased symbol, e.g. loaded from
/// `{"R_10": 6123.45, "EURUSD": "1.08412"}`.
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    prices: HashMap<String, Decimal>,
    loaded_at: DateTime<Utc>,
}

impl QuoteBook {
    pub fn from_prices<'a>(prices: impl IntoIterator<Item = (&'a str, Decimal)>) -> Self {
        Self {
            prices: prices
                .into_iter()
                .map(|(symbol, price)| (symbol.trim().to_uppercase(), price))
                .collect(),
            loaded_at: Utc::now(),
        }
    }

    /// Parse a JSON object of symbol to price. Prices may be numbers or strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Decimal> = serde_json::from_str(json)
            .context("Quote file must be a JSON object of symbol to price")?;

        Ok(Self::from_prices(raw.iter().map(|(k, v)| (k.as_str(), *v))))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read quote file {}", path.display()))?;
        let book = Self::from_json(&json)
            .with_context(|| format!("Failed to parse quote file {}", path.display()))?;

        debug!(path = %path.display(), symbols = book.len(), "Loaded quote book");
        Ok(book)
    }

    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(&symbol.trim().to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

impl QuoteProvider for QuoteBook {
    fn latest_quote(&self, symbol: &str) -> impl Future<Output = Result<Option<Quote>>> + Send {
        let quote = self.price(symbol).map(|price| Quote {
            symbol: symbol.trim().to_uppercase(),
            price,
            received_at: self.loaded_at,
        });
        async move { Ok(quote) }
    }
}
