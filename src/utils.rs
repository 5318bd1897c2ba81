//! Utils

use std::str::FromStr;

use clap::{Args, Parser};

use crate::products::ProductId;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Arguments for the checkout example
#[derive(Debug, Parser)]
pub struct ExampleCheckoutArgs {
    /// Fixture set to use for the tariffs & menu
    #[clap(short, long, default_value = "dortmund")]
    pub fixture: String,

    /// Postal code to deliver to, or "pickup"
    #[clap(short, long, default_value = "pickup")]
    pub postal_code: String,

    /// Items to add, as `PRODUCT[:SIZE][xQTY]` (e.g., `1:medium x2`, `20`)
    #[clap(short = 'a', long = "add")]
    pub items: Vec<CartEntry>,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// A product, optional size and quantity given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartEntry {
    /// Product to add
    pub product: ProductId,

    /// Size to add
    pub variant: Option<String>,

    /// Number of units
    pub quantity: u32,
}

impl FromStr for CartEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item, quantity) = match s.rsplit_once('x') {
            Some((item, quantity))
                if !quantity.trim().is_empty()
                    && quantity.trim().bytes().all(|byte| byte.is_ascii_digit()) =>
            {
                let quantity = quantity
                    .trim()
                    .parse::<u32>()
                    .map_err(|err| format!("invalid quantity in '{s}': {err}"))?;

                (item.trim(), quantity)
            }
            _ => (s.trim(), 1),
        };

        let (product, variant) = match item.split_once(':') {
            Some((product, variant)) => (product, Some(variant.trim().to_string())),
            None => (item, None),
        };

        let product = product
            .trim()
            .parse::<u32>()
            .map_err(|err| format!("invalid product id in '{s}': {err}"))?;

        Ok(Self {
            product: ProductId::new(product),
            variant,
            quantity,
        })
    }
}
