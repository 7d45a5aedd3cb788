//! Storefront CLI - browse the catalog, manage the cart and check out from
//! the terminal.
//!
//! Commands:
//! - `storefront products` - List products, optionally by category
//! - `storefront product` - Show one product
//! - `storefront cart` - Show and change the cart
//! - `storefront checkout` - Pay for the cart with the mock processor
//! - `storefront theme` - Show or change the colour theme
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, ProductArgs, ProductsArgs, ThemeArgs};

/// Storefront CLI - a shop in your terminal
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding the persisted cart and theme
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show a single product
    Product(ProductArgs),

    /// Show and change the cart
    Cart(CartArgs),

    /// Check out the current cart
    Checkout(CheckoutArgs),

    /// Show or change the colour theme
    Theme(ThemeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let default_directive = if verbose { "storefront=debug" } else { "storefront=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());

    // Logs go to stderr so stdout stays clean for command output.
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(
        cli.config.as_deref(),
        cli.data_dir.as_deref(),
        output.clone(),
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::list(args, &ctx).await,
        Commands::Product(args) => commands::products::show(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Theme(args) => commands::theme::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
