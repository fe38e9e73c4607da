//! Live quote seam: where an entry price can come from when the user does
//! not type one in.

mod book;

pub use book::QuoteBook;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// A single price observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub received_at: DateTime<Utc>,
}

/// Source of current prices by instrument identifier.
pub trait QuoteProvider {
    /// Latest quote for `symbol`, or `None` if the provider has none.
    fn latest_quote(&self, symbol: &str) -> impl Future<Output = Result<Option<Quote>>> + Send;
}

/// Ask `provider` for one quote, waiting at most `timeout`.
///
/// Every failure mode (timeout, provider error, no quote, non-positive
/// price) collapses to `None`; the caller falls back to manual entry.
pub async fn fetch_entry_price<P: QuoteProvider>(
    provider: &P,
    symbol: &str,
    timeout: Duration,
) -> Option<Decimal> {
    match tokio::time::timeout(timeout, provider.latest_quote(symbol)).await {
        Ok(Ok(Some(quote))) if quote.price > Decimal::ZERO => {
            debug!(symbol = symbol, price = %quote.price, "Received live quote");
            Some(quote.price)
        }
        Ok(Ok(Some(quote))) => {
            warn!(symbol = symbol, price = %quote.price, "Ignoring non-positive quote");
            None
        }
        Ok(Ok(None)) => {
            warn!(symbol = symbol, "No quote available");
            None
        }
        Ok(Err(e)) => {
            warn!(symbol = symbol, error = %e, "Quote provider failed");
            None
        }
        Err(_) => {
            warn!(
                symbol = symbol,
                timeout_secs = timeout.as_secs_f64(),
                "Timed out waiting for quote"
            );
            None
        }
    }
}
