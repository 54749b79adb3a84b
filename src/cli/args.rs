use clap::{Parser, Subcommand};

use crate::services::BasketAction;

#[derive(Parser)]
#[command(name = "basket-cli")]
#[command(about = "A shopping basket demo backed by a public product catalog")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Product catalog endpoint (overrides CATALOG_URL)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the catalog and fill a basket interactively (default)
    Shop,
    /// Fetch the catalog once and print it
    Catalog,
    /// Fetch the catalog, apply basket actions in order and print the invoice
    Quote {
        /// Actions such as +1 (select product 1), -1 (remove one), +2x3 (select three times)
        #[arg(required = true, allow_hyphen_values = true)]
        actions: Vec<BasketAction>,
    },
}
