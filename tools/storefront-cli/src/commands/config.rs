//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // Storage section
    ctx.output.info("[storage]");
    ctx.output.kv("data_dir", &ctx.data_dir.display().to_string());

    // Cart section
    ctx.output.info("[cart]");
    ctx.output
        .kv("notification_secs", &ctx.config.cart.notification_secs.to_string());

    // Catalog section
    ctx.output.info("[catalog]");
    ctx.output
        .kv("list_delay_ms", &ctx.config.catalog.list_delay_ms.to_string());
    ctx.output
        .kv("product_delay_ms", &ctx.config.catalog.product_delay_ms.to_string());

    // Checkout section
    ctx.output.info("[checkout]");
    ctx.output
        .kv("tax_percent", &ctx.config.checkout.tax_percent.to_string());
    ctx.output
        .kv("payment_delay_ms", &ctx.config.checkout.payment_delay_ms.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
