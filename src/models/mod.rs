//! Data models for instruments, trades and risk calculations.

mod instrument;
mod risk;
mod trade;

pub use instrument::{AssetClass, InstrumentCatalog, InstrumentSpec};
pub use risk::{RiskInput, RiskResult, SizeInput, SizeResult, StopLossBasis};
pub use trade::{TradeDirection, TradeInput, TradeResult};
