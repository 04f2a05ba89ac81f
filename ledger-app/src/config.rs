//! Configuration loading from environment.

use std::env;

use ledger_types::MonthFilter;

const DEFAULT_STORAGE_URL: &str = "file://.ledger";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_url: String,
    pub default_period: MonthFilter,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let storage_url =
            lookup("LEDGER_STORAGE_URL").unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string());

        let default_period = match lookup("LEDGER_DEFAULT_PERIOD") {
            Some(text) => text
                .parse()
                .map_err(|e| anyhow::anyhow!("LEDGER_DEFAULT_PERIOD must be YYYY-MM: {e}"))?,
            None => MonthFilter::default(),
        };

        Ok(Self {
            storage_url,
            default_period,
        })
    }
}
