// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Outfit recommendation command

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use wardrobe_core::domain::{
    engine_config::EngineConfig,
    garment::{Category, Slot},
    recommendation::Recommendation,
    request::{GenderPreference, RecommendationRequest, Scenario},
};

use crate::embedded::{EmbeddedEngine, Fixture};

#[derive(Args)]
pub struct RecommendArgs {
    /// Fixture with the wardrobe, profile, feedback log and weather snapshots
    #[arg(long, value_name = "FILE")]
    pub fixture: PathBuf,

    /// Scenario: commute, home, outdoor, date, formal-banquet, travel, sport,
    /// shopping or any occasion tag used in the wardrobe
    #[arg(long, default_value = "commute", value_parser = parse_tag::<Scenario>)]
    pub scenario: Scenario,

    /// Desired style tag
    #[arg(long, default_value = "casual")]
    pub style: String,

    /// Target categories in order, comma-separated (default: top,bottom)
    #[arg(long = "categories", value_delimiter = ',', value_parser = parse_tag::<Category>)]
    pub categories: Vec<Category>,

    /// Wearer gender (male, female, neutral)
    #[arg(long, default_value = "male", value_parser = parse_tag::<GenderPreference>)]
    pub gender: GenderPreference,

    /// Location token (default: spec.recommendation.default_location)
    #[arg(long)]
    pub location: Option<String>,

    /// Skip image rendering; virtual garments get the placeholder asset
    #[arg(long)]
    pub offline: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

/// Parse a kebab/lower-case tag into any enum that deserializes from a string.
pub fn parse_tag<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_lowercase()))
        .map_err(|_| format!("unknown value '{}'", raw))
}

pub async fn execute(args: RecommendArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config =
        EngineConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let fixture = Fixture::from_json_file(&args.fixture)?;
    let engine = EmbeddedEngine::new(&config, fixture, args.offline).await?;

    let categories = if args.categories.is_empty() {
        vec![Category::Top, Category::Bottom]
    } else {
        args.categories
    };
    let location = args
        .location
        .unwrap_or_else(|| engine.default_location().to_string());

    let request = RecommendationRequest {
        owner: engine.owner().clone(),
        scenario: args.scenario,
        style: args.style,
        categories,
        gender: args.gender,
        location,
    };

    let recommendation = engine
        .recommend(request)
        .await
        .context("Recommendation failed")?;

    if args.summary {
        print_summary(&recommendation);
    } else {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    }

    Ok(())
}

fn slot_name(slot: Slot) -> String {
    serde_json::to_value(slot)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", slot))
}

fn print_summary(recommendation: &Recommendation) {
    println!(
        "{} {}",
        "Score:".bold(),
        recommendation.score.to_string().bold()
    );
    println!();

    for (slot, garment) in &recommendation.outfit {
        let marker = if garment.is_virtual() {
            "virtual".yellow()
        } else {
            "owned".green()
        };
        println!(
            "  {:<10} {:<20} {:<10} warmth {}  [{}]",
            slot_name(*slot),
            garment.subcategory.bold(),
            garment.main_color,
            garment.warmth_level.value(),
            marker
        );
    }

    println!();
    println!("{}", recommendation.rationale.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag::<Scenario>("Formal-Banquet").unwrap(), Scenario::new("formal-banquet"));
        assert_eq!(parse_tag::<Scenario>("weekend-market").unwrap().as_str(), "weekend-market");
        assert_eq!(parse_tag::<Category>(" one-piece ").unwrap(), Category::OnePiece);
        assert_eq!(parse_tag::<GenderPreference>("female").unwrap(), GenderPreference::Female);
        assert_eq!(parse_tag::<GenderPreference>("Neutral").unwrap(), GenderPreference::Neutral);
        assert!(parse_tag::<Category>("cape").is_err());
    }

    #[test]
    fn test_slot_names() {
        assert_eq!(slot_name(Slot::OnePiece), "one_piece");
        assert_eq!(slot_name(Slot::Outer), "outer");
    }
}
