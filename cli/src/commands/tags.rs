// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Tag vocabulary command: default styles and occasions merged with every
//! tag used in the fixture wardrobe.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use wardrobe_core::domain::engine_config::EngineConfig;

use crate::embedded::{EmbeddedEngine, Fixture};

#[derive(Args)]
pub struct TagsArgs {
    /// Fixture with the wardrobe to read tags from
    #[arg(long, value_name = "FILE")]
    pub fixture: PathBuf,
}

pub async fn execute(args: TagsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config =
        EngineConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let fixture = Fixture::from_json_file(&args.fixture)?;
    let engine = EmbeddedEngine::new(&config, fixture, true).await?;

    let tags = engine.tags().await?;
    println!("{}", serde_json::to_string_pretty(&tags)?);

    Ok(())
}
