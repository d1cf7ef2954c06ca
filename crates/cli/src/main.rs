//! Tabcart CLI - a shop session over a JSON store file.
//!
//! Each invocation is one "tab": it reads the store, performs one action
//! and exits. Running it from two shells against the same file behaves like
//! two browser tabs on one profile.
//!
//! # Usage
//!
//! ```bash
//! # Shop as a guest
//! tabcart add "Shirt" "₦5,000"
//! tabcart cart
//!
//! # Create an account; guest items move into it
//! tabcart register --first-name Ada --last-name Lovelace -e ada@example.com -p secret1
//!
//! # Place an order and list past orders
//! tabcart checkout
//! tabcart orders
//! ```
//!
//! # Environment Variables
//!
//! - `TABCART_STORE_PATH` - Store file (default: tabcart-store.json)
//! - `TABCART_CURRENCY_SYMBOL` - Symbol for totals (default: ₦)
//! - `TABCART_PLACEHOLDER_IMAGE` - Image for products without one
//! - `RUST_LOG` - Log filter (default: `tabcart=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use tabcart_core::LineId;
use tabcart_storefront::{
    JsonFileStore, LoginForm, NewCartLine, RecordingNotifier, RegisterForm, Storefront,
    StorefrontConfig,
};

mod commands;
mod output;

use commands::{CliError, Shop};

#[derive(Parser)]
#[command(name = "tabcart")]
#[command(author, version, about = "Tabcart shop CLI")]
struct Cli {
    /// Store file (overrides `TABCART_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(short, long)]
        email: String,

        /// Digits, `+` and spaces
        #[arg(long, default_value = "")]
        phone: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in and the cart count
    Whoami,
    /// Set a new password for an account
    ResetPassword {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        new_password: String,
    },
    /// Add a product to the cart
    Add {
        /// Product title
        title: String,

        /// Display price, e.g. "₦5,000"
        price: String,

        /// Image path or URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove the line at a position (0-based)
    Remove { index: usize },
    /// Remove a line by id
    RemoveLine { line_id: LineId },
    /// Empty the cart
    Clear,
    /// Show the cart page
    Cart,
    /// Place an order (signed in only)
    Checkout,
    /// Move guest items into the signed-in account's cart
    Merge,
    /// List past orders
    Orders,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabcart=info"));
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    let notices = RecordingNotifier::new();
    let result = open(cli.store, notices.clone()).and_then(|shop| run(&shop, cli.command));

    output::notices(&notices.take());

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn open(store: Option<PathBuf>, notices: RecordingNotifier) -> Result<Shop, CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(path) = store {
        config.store_path = path;
    }
    tracing::debug!(path = %config.store_path.display(), "Opening store");

    let store = JsonFileStore::new(&config.store_path);
    Ok(Storefront::new(store, notices, config))
}

fn run(shop: &Shop, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Register {
            first_name,
            last_name,
            email,
            phone,
            password,
        } => commands::account::register(
            shop,
            &RegisterForm {
                first_name,
                last_name,
                email,
                phone,
                password: SecretString::from(password),
            },
        ),
        Commands::Login { email, password } => commands::account::login(
            shop,
            &LoginForm {
                email,
                password: SecretString::from(password),
            },
        ),
        Commands::Logout => commands::account::logout(shop),
        Commands::Whoami => commands::account::whoami(shop),
        Commands::ResetPassword {
            email,
            new_password,
        } => commands::account::reset_password(shop, &email, &SecretString::from(new_password)),
        Commands::Add {
            title,
            price,
            image,
        } => commands::cart::add(
            shop,
            NewCartLine {
                title,
                price,
                image,
            },
        ),
        Commands::Remove { index } => commands::cart::remove(shop, index),
        Commands::RemoveLine { line_id } => commands::cart::remove_line(shop, line_id),
        Commands::Clear => commands::cart::clear(shop),
        Commands::Cart => commands::cart::show(shop),
        Commands::Checkout => commands::cart::checkout(shop),
        Commands::Merge => commands::cart::merge(shop),
        Commands::Orders => commands::cart::orders(shop),
    }
}
