//! # Configuration State
//!
//! Application configuration resolved at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--store-name`, ...)
//! 2. Environment variables (`TALLY_*`, read by clap)
//! 3. Defaults (this file)
//!
//! Configuration is read-only once the console is running.

use std::path::PathBuf;

use directories::ProjectDirs;
use tally_core::Money;

use crate::cli::{Cli, DEFAULT_CURRENCY_SYMBOL, DEFAULT_STORE_NAME};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Store name (displayed on menus and receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Directory holding the four data files
    pub data_dir: PathBuf,

    /// Create sample items/customers when their files are missing
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    /// Returns the configuration used when no flags are given.
    ///
    /// ## Default Values
    /// - Store: "XYZ Retail Store"
    /// - Currency: "$"
    /// - Data: platform data directory, or `./data`
    /// - Seeding: enabled
    fn default() -> Self {
        AppConfig {
            store_name: DEFAULT_STORE_NAME.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            data_dir: default_data_dir(),
            seed_sample_data: true,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from parsed flags.
    pub fn from_cli(cli: &Cli) -> Self {
        AppConfig {
            store_name: cli.store_name.clone(),
            currency_symbol: cli.currency_symbol.clone(),
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
            seed_sample_data: !cli.no_seed,
        }
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            amount.major().abs(),
            amount.minor().abs()
        )
    }
}

/// Determines the data directory when none is configured.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.tally.billing`
/// - **Windows**: `%APPDATA%\tally\billing\data`
/// - **Linux**: `~/.local/share/billing`
///
/// Falls back to `./data` when no home directory can be found.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "tally", "billing")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config() -> AppConfig {
        AppConfig {
            data_dir: PathBuf::from("data"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_format_currency_positive() {
        let config = config();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = config();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_currency(Money::from_cents(-5)), "-$0.05");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let config = AppConfig {
            currency_symbol: "Rs ".to_string(),
            ..config()
        };
        assert_eq!(config.format_currency(Money::from_cents(123456789)), "Rs 1234567.89");
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from(["tally", "--data-dir", "/srv/till", "--no-seed"]).unwrap();
        let config = AppConfig::from_cli(&cli);

        assert_eq!(config.data_dir, PathBuf::from("/srv/till"));
        assert!(!config.seed_sample_data);
    }
}
