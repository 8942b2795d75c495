//! Command-line flags for the `tally` binary.
//!
//! Every flag has an environment fallback so a till can be configured
//! once in its launcher script.

use std::path::PathBuf;

use clap::Parser;

/// Default store name printed on menus and receipts.
pub const DEFAULT_STORE_NAME: &str = "XYZ Retail Store";

/// Default currency symbol.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, Parser)]
#[command(name = "tally", version, about = "Retail billing console")]
pub struct Cli {
    /// Directory holding items.txt, customers.txt and the receipt files
    #[arg(long, env = "TALLY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Store name shown on menus and receipts
    #[arg(long, env = "TALLY_STORE_NAME", default_value = DEFAULT_STORE_NAME)]
    pub store_name: String,

    /// Currency symbol used when printing amounts
    #[arg(long, env = "TALLY_CURRENCY_SYMBOL", default_value = DEFAULT_CURRENCY_SYMBOL)]
    pub currency_symbol: String,

    /// Don't create sample items and customers in an empty data directory
    #[arg(long)]
    pub no_seed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tally"]).unwrap();
        assert_eq!(cli.store_name, "XYZ Retail Store");
        assert_eq!(cli.currency_symbol, "$");
        assert!(!cli.no_seed);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "tally",
            "--data-dir",
            "/tmp/till",
            "--store-name",
            "Corner Shop",
            "--currency-symbol",
            "Rs ",
            "--no-seed",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/till")));
        assert_eq!(cli.store_name, "Corner Shop");
        assert_eq!(cli.currency_symbol, "Rs ");
        assert!(cli.no_seed);
    }
}
