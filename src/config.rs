//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser};
use jiff::civil::Date;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Checkout command configuration
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Price an order and print the receipt", long_about = None)]
pub struct CheckoutConfig {
    /// YAML order file
    #[arg(short, long, env = "CHECKOUT_ORDER")]
    pub order: PathBuf,

    /// Pricing date (YYYY-MM-DD), overriding the order file and the current date
    #[arg(short, long, env = "CHECKOUT_TODAY")]
    pub today: Option<Date>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CheckoutConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
