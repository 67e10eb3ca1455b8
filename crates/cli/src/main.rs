//! Storecart CLI - browse the catalog, manage the cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog
//! storecart products --query airdopes --category Earbuds
//! storecart products --brand boult
//!
//! # Manage the cart
//! storecart cart add 3 -q 2
//! storecart cart set 3 5
//! storecart cart remove 3
//! storecart cart show
//!
//! # Create an account, sign in and place an order
//! storecart signup --name Asha --email asha@shop.in
//! storecart login asha@shop.in
//! storecart wishlist add 7
//! storecart profile --phone 9800000000
//! storecart checkout --payment upi --upi-id asha@okbank
//!
//! # Order history
//! storecart orders
//! storecart orders --returns
//! ```
//!
//! # Configuration
//!
//! See `storecart_storefront::config` for the `STORECART_*` environment
//! variables. Logs go to stderr and honour `RUST_LOG`; set
//! `STORECART_LOG_JSON` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Args, Parser, Subcommand};
use storecart_core::catalog::Category;
use storecart_core::{Email, PaymentMethod, ProductId, Quantity};
use storecart_storefront::config::StorefrontConfig;
use storecart_storefront::models::OrderId;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod error;

use commands::Context;
use error::CliError;

#[derive(Parser)]
#[command(name = "storecart")]
#[command(author, version, about = "Storecart shopper CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or search catalog products
    Products {
        /// Text matched against name, brand and features
        #[arg(short, long)]
        query: Option<String>,

        /// Category (Headphones, Earbuds, Neckbands, a brand, or a form factor)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only this brand (case-insensitive)
        #[arg(short, long, conflicts_with_all = ["query", "category"])]
        brand: Option<String>,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Create an account
    Signup {
        /// Full name
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Email,

        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign in with an account email
    Login {
        email: Email,
    },
    /// Sign out (the cart is kept)
    Logout,
    /// Show or update the signed-in profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },
    /// Manage the signed-in shopper's wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Place an order for the cart contents
    Checkout(CheckoutArgs),
    /// Show order history
    Orders {
        /// Show returned items instead of kept ones
        #[arg(long)]
        returns: bool,

        /// Only the N most recent orders
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Mark an ordered item as returned
    Return {
        order: OrderId,
        product: ProductId,
    },
    /// Put a previously ordered item back in the cart
    BuyAgain {
        order: OrderId,
        product: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines, item count and subtotal
    Show,
    /// Add a product, merging with an existing line
    Add {
        product: ProductId,

        #[arg(short, long, default_value = "1")]
        quantity: Quantity,
    },
    /// Remove a product's line
    Remove {
        product: ProductId,
    },
    /// Replace a line's quantity
    Set {
        product: ProductId,
        quantity: Quantity,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved products
    Show,
    /// Save a catalog product
    Add { product: ProductId },
    /// Drop a saved product
    Remove { product: ProductId },
    /// Put a saved product in the cart
    ToCart { product: ProductId },
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Payment method (card, upi, netbanking, cod)
    #[arg(short, long, default_value = "card")]
    pub payment: PaymentMethod,

    #[arg(long, default_value = "")]
    pub card_number: String,

    #[arg(long, default_value = "")]
    pub expiry: String,

    #[arg(long, default_value = "")]
    pub cvv: String,

    #[arg(long, default_value = "")]
    pub upi_id: String,

    #[arg(long)]
    pub bank: Option<String>,

    /// Deliver to this saved address instead of the default one
    #[arg(long)]
    pub address: Option<i64>,
}

fn main() {
    // Defaults to info level if RUST_LOG is not set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // JSON lines when STORECART_LOG_JSON is set, text otherwise; both on stderr
    let json = std::env::var_os("STORECART_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    let ctx = Context::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Products {
            query,
            category,
            brand,
        } => match brand {
            Some(brand) => commands::products::brand(&ctx, &brand, &mut out)?,
            None => commands::products::list(&ctx, query, category, &mut out)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx, &mut out)?,
            CartAction::Add { product, quantity } => {
                commands::cart::add(&ctx, &product, quantity, &mut out)?;
            }
            CartAction::Remove { product } => commands::cart::remove(&ctx, &product, &mut out)?,
            CartAction::Set { product, quantity } => {
                commands::cart::set(&ctx, &product, quantity, &mut out)?;
            }
            CartAction::Clear => commands::cart::clear(&ctx, &mut out)?,
        },
        Commands::Signup { name, email, phone } => {
            commands::account::signup(&ctx, name, email, phone, &mut out)?;
        }
        Commands::Login { email } => commands::account::login(&ctx, &email, &mut out)?,
        Commands::Logout => commands::account::logout(&ctx, &mut out)?,
        Commands::Profile { name, phone } => {
            commands::account::profile(&ctx, name, phone, &mut out)?;
        }
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&ctx, &mut out)?,
            WishlistAction::Add { product } => commands::wishlist::add(&ctx, &product, &mut out)?,
            WishlistAction::Remove { product } => {
                commands::wishlist::remove(&ctx, &product, &mut out)?;
            }
            WishlistAction::ToCart { product } => {
                commands::wishlist::to_cart(&ctx, &product, &mut out)?;
            }
        },
        Commands::Checkout(args) => commands::checkout::run(&ctx, &args, &mut out)?,
        Commands::Orders { returns, limit } => {
            commands::orders::list(&ctx, returns, limit, &mut out)?;
        }
        Commands::Return { order, product } => {
            commands::orders::mark_returned(&ctx, order, &product, &mut out)?;
        }
        Commands::BuyAgain { order, product } => {
            commands::orders::buy_again(&ctx, order, &product, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
