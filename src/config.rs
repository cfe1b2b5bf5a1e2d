//! Runtime configuration

use crate::cart::TaxPolicy;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::time::Duration;

/// Where the order builder's services come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// In-process actors seeded with demo data.
    Memory,
    /// JSON-over-HTTP backend at `--base-url`.
    Rest,
}

/// Order desk configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "order-desk", about = "Order entry desk", long_about = None)]
pub struct DeskConfig {
    /// Service backend
    #[arg(long, env = "DESK_BACKEND", value_enum, default_value = "memory")]
    pub backend: BackendKind,

    /// Base URL of the REST backend
    #[arg(long, env = "DESK_BASE_URL", default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Tax rate applied to the subtotal; 0 disables tax
    #[arg(long, env = "DESK_TAX_RATE", default_value = "0.18")]
    pub tax_rate: Decimal,

    /// How long the success message stays up, in milliseconds
    #[arg(long, env = "DESK_SUCCESS_DISPLAY_MS", default_value = "2000")]
    pub success_display_ms: u64,

    /// How long a fetched catalog is reused, in seconds
    #[arg(long, env = "DESK_CATALOG_TTL_SECS", default_value = "30")]
    pub catalog_ttl_secs: u64,

    /// Mailbox capacity of each in-process actor
    #[arg(
        long,
        env = "DESK_MAILBOX_SIZE",
        default_value = "32",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub mailbox_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl DeskConfig {
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

    #[must_use]
    pub fn tax_policy(&self) -> TaxPolicy {
        TaxPolicy::from_rate(self.tax_rate)
    }

    #[must_use]
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    #[must_use]
    pub fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_secs)
    }
}

impl Default for DeskConfig {
    /// The same values the command line defaults to.
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            base_url: "http://localhost:8080/api".to_string(),
            tax_rate: Decimal::new(18, 2),
            success_display_ms: 2000,
            catalog_ttl_secs: 30,
            mailbox_size: 32,
            log_level: "info".to_string(),
        }
    }
}
