//! Vitrina CLI - Catalog and cart management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! vitrina catalog
//!
//! # Work with the persisted cart
//! vitrina cart add 3
//! vitrina cart remove 3
//! vitrina cart show
//! vitrina cart clear
//!
//! # Preview, then confirm, the purchase
//! vitrina cart checkout
//! vitrina cart checkout --yes
//! ```
//!
//! The CLI reads the same `VITRINA_*` environment variables as the
//! storefront, so both operate on the same catalog and cart slot.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use vitrina_core::ProductId;
use vitrina_storefront::config::StorefrontConfig;
use vitrina_storefront::services::CartStore;
use vitrina_storefront::storage::FileStore;

mod commands;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about = "Vitrina catalog and cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Catalog,
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a catalog product
    Add {
        /// Product id from the catalog
        id: ProductId,
    },
    /// Remove one unit of a product
    Remove {
        /// Product id in the cart
        id: ProductId,
    },
    /// Remove every product from the cart
    Clear,
    /// Show the purchase summary, or confirm it with --yes
    Checkout {
        /// Confirm the purchase and empty the cart
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
#[allow(clippy::print_stdout)]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, commands::CommandError> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Catalog => {
            let catalog = commands::catalog::load(&config).await?;
            Ok(commands::catalog::render(&catalog))
        }
        Commands::Cart { action } => {
            let store = Arc::new(FileStore::new(&config.storage_dir));
            let mut cart = CartStore::restore(store);

            match action {
                CartAction::Show => Ok(commands::cart::show(&cart)),
                CartAction::Add { id } => {
                    let catalog = commands::catalog::load(&config).await?;
                    commands::cart::add(&mut cart, &catalog, id)
                }
                CartAction::Remove { id } => commands::cart::remove(&mut cart, id),
                CartAction::Clear => commands::cart::clear(&mut cart),
                CartAction::Checkout { yes } => commands::cart::checkout(&mut cart, yes),
            }
        }
    }
}
