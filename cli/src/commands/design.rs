// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Virtual designer command: render a described garment and add it to the
//! fixture wardrobe as a virtual item.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use wardrobe_core::domain::{
    engine_config::EngineConfig,
    garment::{Category, GenderTag, WarmthLevel},
    synthesis::VirtualDesign,
};

use crate::commands::recommend::parse_tag;
use crate::embedded::{EmbeddedEngine, Fixture};

#[derive(Args)]
pub struct DesignArgs {
    /// Fixture with the wardrobe the garment is added to
    #[arg(long, value_name = "FILE")]
    pub fixture: PathBuf,

    /// Category (top, bottom, one-piece, shoes, bag, hat, accessory)
    #[arg(long, value_parser = parse_tag::<Category>)]
    pub category: Category,

    /// Garment subtype, e.g. cardigan
    #[arg(long)]
    pub subcategory: String,

    /// Main color
    #[arg(long)]
    pub color: String,

    /// Warmth level, 1 (lightest) to 5 (heaviest)
    #[arg(long, value_parser = parse_warmth)]
    pub warmth: WarmthLevel,

    /// Materials, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub materials: Vec<String>,

    /// Style tags, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub styles: Vec<String>,

    /// Seasons, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub seasons: Vec<String>,

    /// Garment gender tag (male, female, neutral)
    #[arg(long, default_value = "neutral", value_parser = parse_tag::<GenderTag>)]
    pub gender: GenderTag,

    /// Fail instead of calling the image provider
    #[arg(long)]
    pub offline: bool,
}

fn parse_warmth(raw: &str) -> Result<WarmthLevel, String> {
    let level: u8 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid warmth level '{}'", raw))?;
    WarmthLevel::new(level).map_err(|e| e.to_string())
}

pub async fn execute(args: DesignArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config =
        EngineConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let fixture = Fixture::from_json_file(&args.fixture)?;
    let engine = EmbeddedEngine::new(&config, fixture, args.offline).await?;

    let design = VirtualDesign {
        category: args.category,
        subcategory: args.subcategory,
        main_color: args.color,
        warmth_level: args.warmth,
        materials: args.materials,
        styles: args.styles,
        seasons: args.seasons,
        gender: args.gender,
    };

    let garment = engine
        .design(design)
        .await
        .context("Virtual garment design failed")?;
    println!("{}", serde_json::to_string_pretty(&garment)?);

    Ok(())
}
