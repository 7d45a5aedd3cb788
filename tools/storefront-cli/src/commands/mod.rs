//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;
pub mod theme;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show one category (`electronics`, `jewelery`, `men's clothing`,
    /// `women's clothing` or `all`).
    #[arg(short = 'C', long)]
    pub category: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: String,
        /// How many to add (at least 1).
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set the quantity of a product already in the cart.
    Update {
        /// Product ID.
        id: String,
        /// New quantity; zero or less removes the line.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Open the cart panel.
    Open,
    /// Close the cart panel.
    Close,
    /// Open the cart panel if closed, close it if open.
    Toggle,
}

/// Arguments for the checkout command.
///
/// Missing shipping or card fields are prompted for.
#[derive(Args, Default)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip_code: Option<String>,
    /// Defaults to United States.
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub card_number: Option<String>,
    /// Name printed on the card.
    #[arg(long)]
    pub card_name: Option<String>,
    /// Expiry as MM/YY.
    #[arg(long)]
    pub expiry_date: Option<String>,
    #[arg(long)]
    pub cvv: Option<String>,

    /// Skip the order review confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the theme command.
#[derive(Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: Option<ThemeCommand>,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Show the current theme.
    Show,
    /// Switch between dark and light.
    Toggle,
    /// Select a theme.
    Set {
        /// `dark` or `light`.
        theme: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse a product ID argument.
pub fn parse_product_id(value: &str) -> anyhow::Result<storefront_commerce::ProductId> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid product ID: '{}'", value))
}
