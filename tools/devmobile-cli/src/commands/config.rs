//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
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
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());

    ctx.output.info("[checkout]");
    ctx.output.kv(
        "processing_delay_ms",
        &ctx.config.checkout.processing_delay_ms.to_string(),
    );

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(bundled)"),
    );

    ctx.output.info("[promotions]");
    match ctx.config.promo_table() {
        Ok(table) => {
            for (code, rate) in table.iter() {
                ctx.output.kv(code, &devmobile_commerce::money::format_percent(rate));
            }
        }
        Err(e) => ctx.output.warn(&format!("{:#}", e)),
    }

    ctx.output.info("[display]");
    ctx.output.kv("currency", &ctx.config.display.currency);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("devmobile.toml");

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

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.promo_table() {
        errors.push(format!("{:#}", e));
    }
    if let Err(e) = ctx.config.pricing_policy() {
        errors.push(format!("{:#}", e));
    }
    if let Err(e) = ctx.load_catalog() {
        errors.push(format!("{:#}", e));
    }

    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len())
}
