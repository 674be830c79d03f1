//! Tableside CLI - drive a persisted customer cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Scan the QR code at table 7 of restaurant r1
//! tableside restaurant r1
//! tableside table 7
//!
//! # Build the cart
//! tableside add --id 7 --name "Dal Makhani" --price 280 --veg
//! tableside add --id 7 --name "Dal Makhani" --price 280 --veg
//! tableside note 7 "less butter"
//! tableside show
//!
//! # Produce the order payload, then clear once the backend accepted it
//! tableside checkout --phone "+91 98765 43210" --submitted
//! ```
//!
//! # Commands
//!
//! - `add`, `remove`, `quantity`, `note`, `clear` - Edit cart items
//! - `restaurant`, `table` - Set the ordering context
//! - `show` - Print the cart and totals
//! - `checkout` - Print the order submission
//!
//! The cart is saved after every command (see [`config`] for where).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tableside_cart::CartStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::checkout::CheckoutArgs;
use commands::items::NewItem;
use config::{CliConfig, LogFormat};
use error::CliError;

#[derive(Parser)]
#[command(name = "tableside")]
#[command(author, version, about = "Tableside cart CLI")]
struct Cli {
    /// Directory holding the saved cart (overrides `TABLESIDE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a menu item
    Add {
        /// Menu item ID
        #[arg(long, required_unless_present = "json")]
        id: Option<String>,

        /// Display name
        #[arg(long, required_unless_present = "json")]
        name: Option<String>,

        /// Unit price (e.g. 280 or 99.50)
        #[arg(long, required_unless_present = "json")]
        price: Option<String>,

        /// Restaurant the item belongs to
        #[arg(long)]
        restaurant: Option<String>,

        /// Vegetarian
        #[arg(long)]
        veg: bool,

        /// Jain-compatible
        #[arg(long)]
        jain: bool,

        /// Chef's special
        #[arg(long)]
        chefs_special: bool,

        /// Menu item as JSON, as returned by the menu endpoint
        #[arg(long, conflicts_with_all = ["id", "name", "price", "restaurant", "veg", "jain", "chefs_special"])]
        json: Option<String>,
    },
    /// Remove a menu item
    Remove {
        /// Menu item ID
        item_id: String,
    },
    /// Set the quantity of a menu item (0 removes it)
    Quantity {
        /// Menu item ID
        item_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set preparation instructions for a menu item
    Note {
        /// Menu item ID
        item_id: String,

        /// Instructions, e.g. "no onions"
        text: String,
    },
    /// Remove every item, keeping restaurant and table
    Clear,
    /// Switch restaurant (clears items from another restaurant)
    Restaurant {
        /// Restaurant ID
        id: String,
    },
    /// Set the table number
    Table {
        /// Table ID
        id: String,
    },
    /// Print the cart
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the order submission for the backend
    Checkout {
        /// Customer phone number
        #[arg(short, long)]
        phone: String,

        /// Customer name
        #[arg(short, long)]
        name: Option<String>,

        /// Table number (defaults to the cart's table)
        #[arg(short, long)]
        table: Option<String>,

        /// The backend accepted the order; clear the cart
        #[arg(long)]
        submitted: bool,
    },
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tableside_cli=info,tableside_cart=info".into());

    // Use JSON format when configured, human-readable otherwise
    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(cli, config));

    match result {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}

fn run(cli: Cli, mut config: CliConfig) -> Result<String, CliError> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    tracing::debug!(
        data_dir = %config.data_dir.display(),
        key = %config.cart_key,
        "Opening cart"
    );
    let mut store = CartStore::open(config.storage(), config.cart_key.clone());

    let output = match cli.command {
        Commands::Add {
            id,
            name,
            price,
            restaurant,
            veg,
            jain,
            chefs_special,
            json,
        } => commands::items::add(
            &mut store,
            NewItem {
                id,
                name,
                price,
                restaurant,
                veg,
                jain,
                chefs_special,
                json,
            },
        )?,
        Commands::Remove { item_id } => commands::items::remove(&mut store, &item_id),
        Commands::Quantity { item_id, quantity } => {
            commands::items::quantity(&mut store, &item_id, quantity)
        }
        Commands::Note { item_id, text } => commands::items::note(&mut store, &item_id, &text),
        Commands::Clear => commands::items::clear(&mut store),
        Commands::Restaurant { id } => commands::context::restaurant(&mut store, &id),
        Commands::Table { id } => commands::context::table(&mut store, &id),
        Commands::Show { json } => {
            if json {
                commands::show::json(&store, config.currency)?
            } else {
                commands::show::text(&store, config.currency)
            }
        }
        Commands::Checkout {
            phone,
            name,
            table,
            submitted,
        } => commands::checkout::run(
            &mut store,
            CheckoutArgs {
                phone,
                name,
                table,
                submitted,
            },
        )?,
    };

    Ok(output)
}
