//! Trading Calculator Suite
//!
//! Pip/profit calculators for synthetic indices and forex/metals, plus risk
//! and position-size calculators. Every calculation is a pure function of
//! its inputs and the built-in instrument catalog.

mod calc;
mod models;
mod quotes;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::calc::{
    compute_pip, compute_position_size, compute_risk, CalcConfig, RiskForm, SizeForm, TradeForm,
};
use crate::models::{AssetClass, InstrumentCatalog};
use crate::quotes::{fetch_entry_price, QuoteBook};

/// Trading calculator CLI.
#[derive(Parser)]
#[command(name = "pipcalc")]
#[command(about = "Pip, profit, risk and position-size calculators", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pip value, pips moved and profit/loss for a trade
    Pip {
        /// Instrument identifier (e.g. R_75, EURUSD, XAUUSD)
        symbol: String,

        /// Trade direction (buy or sell)
        #[arg(short, long, default_value = "buy")]
        direction: String,

        /// Entry price; taken from --quotes when omitted
        #[arg(short, long)]
        entry: Option<String>,

        /// Exit price
        #[arg(short = 'x', long)]
        exit: String,

        /// Volume in lots
        #[arg(short, long, default_value = "1")]
        volume: String,

        /// Units per lot (defaults to the instrument's base unit, or 1)
        #[arg(short, long)]
        contract_size: Option<String>,

        /// JSON file of current prices used for the entry price
        #[arg(short, long, env = "PIPCALC_QUOTES")]
        quotes: Option<PathBuf>,
    },

    /// Risk amount, remaining capital and stop-loss distance
    Risk {
        /// Trading capital
        #[arg(short, long)]
        capital: String,

        /// Percentage of capital to risk (0-100)
        #[arg(short, long)]
        risk: String,

        /// Money per pip, for the stop-loss distance
        #[arg(short, long)]
        pip_value: Option<String>,

        /// Standard lots, used when no pip value is given
        #[arg(short = 'l', long)]
        lot_size: Option<String>,
    },

    /// Lot size that risks a percentage of capital over a stop distance
    Size {
        /// Trading capital
        #[arg(short, long)]
        capital: String,

        /// Percentage of capital to risk (0-100)
        #[arg(short, long)]
        risk: String,

        /// Stop-loss distance in pips
        #[arg(short, long)]
        stop_loss: String,

        /// Money per pip for one standard lot
        #[arg(short, long)]
        pip_value: Option<String>,
    },

    /// List supported instruments
    Instruments {
        /// Only this class (synthetic, forex, metal)
        #[arg(long)]
        class: Option<String>,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = CalcConfig::from_env();
    let catalog = InstrumentCatalog::builtin();

    match cli.command {
        Commands::Pip {
            symbol,
            direction,
            entry,
            exit,
            volume,
            contract_size,
            quotes,
        } => {
            let entry_price = match (entry, quotes) {
                (Some(entry), _) => entry,
                (None, Some(path)) => {
                    let book = QuoteBook::load(&path)?;
                    info!(symbol = %symbol, "Fetching entry price from quote book");
                    fetch_entry_price(&book, &symbol, config.quote_timeout())
                        .await
                        .map(|p| p.to_string())
                        .unwrap_or_default()
                }
                (None, None) => String::new(),
            };

            let form = TradeForm {
                symbol,
                direction,
                entry_price,
                exit_price: exit,
                volume,
                contract_size,
            };
            let input = form.parse()?;
            let result = compute_pip(&catalog, &config, &input)?;

            if cli.json {
                print_json(&result)?;
            } else if let Some(spec) = catalog.get(&result.symbol) {
                println!("{}", report::render_trade(spec, &result));
            }
        }

        Commands::Risk {
            capital,
            risk,
            pip_value,
            lot_size,
        } => {
            let form = RiskForm {
                capital,
                risk_pct: risk,
                pip_value,
                lot_size,
            };
            let result = compute_risk(&config, &form.parse()?)?;

            if cli.json {
                print_json(&result)?;
            } else {
                println!("{}", report::render_risk(&result));
            }
        }

        Commands::Size {
            capital,
            risk,
            stop_loss,
            pip_value,
        } => {
            let form = SizeForm {
                capital,
                risk_pct: risk,
                stop_loss_pips: stop_loss,
                pip_value_per_lot: pip_value,
            };
            let result = compute_position_size(&config, &form.parse()?)?;

            if cli.json {
                print_json(&result)?;
            } else {
                println!("{}", report::render_size(&result));
            }
        }

        Commands::Instruments { class } => {
            let class = match class.as_deref().map(str::to_lowercase).as_deref() {
                None => None,
                Some("synthetic") => Some(AssetClass::SyntheticIndex),
                Some("forex") => Some(AssetClass::Forex),
                Some("metal") => Some(AssetClass::Metal),
                Some(other) => anyhow::bail!("Unknown instrument class: {}", other),
            };

            let specs: Vec<_> = match class {
                Some(c) => catalog.by_class(c).collect(),
                None => catalog.iter().collect(),
            };

            if cli.json {
                print_json(&specs)?;
                return Ok(());
            }

            println!(
                "\n{:<12} {:<24} {:<10} {:>9} {:>10} {:>10}",
                "SYMBOL", "LABEL", "CLASS", "PRECISION", "PIP", "LOT UNITS"
            );
            println!("{}", "-".repeat(80));

            for spec in specs {
                println!(
                    "{:<12} {:<24} {:<10} {:>9} {:>10} {:>10}",
                    spec.symbol,
                    truncate(&spec.label, 22),
                    spec.class,
                    spec.precision,
                    spec.point_value()
                        .map(|p| p.to_string())
                        .unwrap_or_else(|_| "-".to_string()),
                    spec.base_unit.map(|u| u.to_string()).unwrap_or_else(|| "-".to_string())
                );
            }
        }

        Commands::Config => {
            if cli.json {
                print_json(&config)?;
                return Ok(());
            }

            println!("\n=== Calculator Configuration ===\n");
            println!("  Account Currency:       {}", config.account_currency);
            println!("  Pip Value per Lot:      {}", config.standard_lot_pip_value);
            println!("  Quote Timeout:          {}s", config.quote_timeout_secs);
            println!("  Instruments:            {}", catalog.len());
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string with ellipsis if too long.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
