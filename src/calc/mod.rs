//! Trading math: pip/profit, risk and position sizing over the instrument catalog.

mod config;
mod error;
mod input;
mod pip;
mod risk;

pub use config::CalcConfig;
pub use error::CalcError;
pub use input::{RiskForm, SizeForm, TradeForm};
pub use pip::compute_pip;
pub use risk::{compute_position_size, compute_risk};
