// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Wardrobe CLI
//!
//! The `wardrobe` binary runs the recommendation engine in-process against a
//! JSON fixture (wardrobe, profile, feedback log and weather snapshots).
//!
//! ## Commands
//!
//! - `wardrobe recommend --fixture <FILE>` - Recommend an outfit, printed as JSON
//! - `wardrobe tags --fixture <FILE>` - Style and occasion vocabulary of a user
//! - `wardrobe design --fixture <FILE> ...` - Render a described garment as a virtual item
//! - `wardrobe config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wardrobe_cli::commands::{self, ConfigCommand, DesignArgs, RecommendArgs, TagsArgs};

/// Wardrobe - weather-aware outfit recommendations
#[derive(Parser)]
#[command(name = "wardrobe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "WARDROBE_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "WARDROBE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend an outfit
    #[command(name = "recommend")]
    Recommend(RecommendArgs),

    /// List a user's style and occasion tags
    #[command(name = "tags")]
    Tags(TagsArgs),

    /// Design a virtual garment from a description
    #[command(name = "design")]
    Design(DesignArgs),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Recommend(args) => commands::recommend::execute(args, cli.config).await,
        Commands::Tags(args) => commands::tags::execute(args, cli.config).await,
        Commands::Design(args) => commands::design::execute(args, cli.config).await,
        Commands::Config { command } => commands::config::handle_command(command, cli.config).await,
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    // stdout carries the JSON result; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
