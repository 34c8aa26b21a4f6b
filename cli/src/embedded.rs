// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Embedded mode execution
//!
//! Creates the engine services in-process, seeds in-memory stores from a JSON
//! fixture and executes commands directly. The fixture stands in for the
//! persistence and weather collaborators.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use wardrobe_core::{
    application::{
        RecommendationService, StandardRecommendationService, StandardWardrobeService,
        WardrobeService, WardrobeTags,
    },
    domain::{
        engine_config::EngineConfig,
        feedback::FeedbackRecord,
        garment::Garment,
        profile::{OwnerId, UserProfile},
        recommendation::Recommendation,
        repository::{FeedbackStore, ProfileStore},
        request::RecommendationRequest,
        synthesis::{AssetRef, AttributeSet, ImageSynthesizer, SynthesisError, VirtualDesign},
        weather::{WeatherContext, WeatherSignals},
    },
    infrastructure::{
        HttpImageSynthesizer, InMemoryFeedbackStore, InMemoryGarmentStore, InMemoryProfileStore,
        StaticWeatherProvider,
    },
};

/// Seed data for one embedded run.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// The user commands act on.
    pub owner: OwnerId,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    /// Weather snapshots, keyed by their `location`.
    #[serde(default)]
    pub weather: Vec<WeatherContext>,
    #[serde(default)]
    pub garments: Vec<Garment>,
    #[serde(default)]
    pub feedback: Vec<FeedbackRecord>,
}

impl Fixture {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture: {:?}", path))?;
        Self::from_json_str(&content).with_context(|| format!("Failed to parse fixture: {:?}", path))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Synthesizer used with `--offline`: every render fails fast, so virtual
/// garments get the placeholder asset without touching the network.
pub struct OfflineSynthesizer;

#[async_trait]
impl ImageSynthesizer for OfflineSynthesizer {
    async fn generate(&self, _attributes: &AttributeSet) -> Result<AssetRef, SynthesisError> {
        Err(SynthesisError::Provider("image synthesis disabled (offline mode)".to_string()))
    }
}

pub struct EmbeddedEngine {
    owner: OwnerId,
    default_location: String,
    recommendation: Arc<dyn RecommendationService>,
    wardrobe: Arc<dyn WardrobeService>,
}

impl EmbeddedEngine {
    pub async fn new(config: &EngineConfig, fixture: Fixture, offline: bool) -> Result<Self> {
        config
            .validate()
            .context("Configuration validation failed")?;

        let garments = Arc::new(InMemoryGarmentStore::new());
        let feedback = Arc::new(InMemoryFeedbackStore::new());
        let profiles = Arc::new(InMemoryProfileStore::new());
        let weather = StaticWeatherProvider::new();
        let default_location = config.spec.recommendation.default_location.clone();

        let synthesis = &config.spec.synthesis;
        let synthesizer: Arc<dyn ImageSynthesizer> = if offline {
            Arc::new(OfflineSynthesizer)
        } else {
            if synthesis.resolved_api_key().is_none() {
                warn!(endpoint = %synthesis.endpoint, "No synthesis API key configured");
            }
            Arc::new(HttpImageSynthesizer::from_config(synthesis))
        };

        let wardrobe = Arc::new(StandardWardrobeService::new(
            garments.clone(),
            synthesizer.clone(),
        ));
        for garment in fixture.garments {
            let id = garment.id;
            wardrobe
                .register_garment(garment)
                .await
                .with_context(|| format!("Fixture garment {} rejected", id))?;
        }

        if let Some(profile) = fixture.profile {
            if profile.owner != fixture.owner {
                anyhow::bail!(
                    "Fixture profile belongs to '{}', expected '{}'",
                    profile.owner,
                    fixture.owner
                );
            }
            profiles.save(&profile).await?;
        }

        for record in fixture.feedback {
            feedback.append(record).await?;
        }

        for mut snapshot in fixture.weather {
            if let Some(today) = &snapshot.today {
                snapshot.signals = WeatherSignals::derive(&snapshot.current, today);
            }
            let location = if snapshot.location.trim().is_empty() {
                default_location.clone()
            } else {
                snapshot.location.clone()
            };
            weather.insert(&location, snapshot);
        }

        let recommendation = StandardRecommendationService::new(
            garments.clone(),
            feedback,
            profiles,
            Arc::new(weather),
            synthesizer,
        )
        .with_synthesis_settings(synthesis.timeout(), synthesis.placeholder_asset.clone());

        info!(owner = %fixture.owner, garments = garments.len(), offline, "Embedded engine ready");

        Ok(Self {
            owner: fixture.owner,
            default_location,
            recommendation: Arc::new(recommendation),
            wardrobe,
        })
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Location used when a command does not name one.
    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    pub async fn recommend(&self, request: RecommendationRequest) -> Result<Recommendation> {
        Ok(self.recommendation.recommend(request).await?)
    }

    pub async fn tags(&self) -> Result<WardrobeTags> {
        self.wardrobe.tags(&self.owner).await
    }

    pub async fn design(&self, design: VirtualDesign) -> Result<Garment> {
        self.wardrobe.design_virtual_garment(&self.owner, design).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_core::domain::garment::{Category, GenderTag, Slot, WarmthLevel};
    use wardrobe_core::domain::request::{GenderPreference, Scenario};

    const FIXTURE: &str = r#"{
        "owner": "alice",
        "profile": { "owner": "alice", "commute": "walk", "thermal_sensitivity": -1 },
        "weather": [{
            "location": "Xiamen",
            "summary": "drizzle",
            "current": { "temp_real": 14.0, "temp_apparent": 13.0, "humidity": 0.8, "wind_speed": 2.0 },
            "today": { "temp_max": 16.0, "temp_min": 11.0, "rain_probability": 70.0 }
        }],
        "garments": [{
            "id": "7a0c4d3e-2f55-4b1a-9d62-3c1f8e0b9a11",
            "owner": "alice",
            "category": "bottom",
            "subcategory": "jeans",
            "warmth_level": 4,
            "main_color": "indigo",
            "styles": ["casual"],
            "occasions": ["weekend-market"],
            "created_at": "2026-03-01T08:00:00Z"
        }]
    }"#;

    fn request(categories: Vec<Category>) -> RecommendationRequest {
        RecommendationRequest {
            owner: OwnerId::new("alice"),
            scenario: Scenario::commute(),
            style: "casual".to_string(),
            categories,
            gender: GenderPreference::Female,
            location: "Xiamen".to_string(),
        }
    }

    async fn engine() -> EmbeddedEngine {
        let fixture = Fixture::from_json_str(FIXTURE).unwrap();
        EmbeddedEngine::new(&EngineConfig::default(), fixture, true)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fixture_seeds_engine() {
        let engine = engine().await;
        let rec = engine
            .recommend(request(vec![Category::Bottom, Category::Shoes]))
            .await
            .unwrap();

        assert_eq!(rec.garment(Slot::Bottom).unwrap().subcategory, "jeans");
        assert_eq!(rec.synthesized, vec![Category::Shoes]);
        assert_eq!(rec.weather_summary, "drizzle");
        assert!(rec.rationale.contains("feel the cold"));
    }

    #[tokio::test]
    async fn test_offline_synthesis_uses_placeholder() {
        let engine = engine().await;
        let rec = engine.recommend(request(vec![Category::Hat])).await.unwrap();
        let hat = rec.garment(Slot::Hat).unwrap();
        assert_eq!(hat.image_url.as_deref(), Some("uploads/default_virtual.jpg"));
    }

    #[tokio::test]
    async fn test_tags_include_fixture_occasions() {
        let tags = engine().await.tags().await.unwrap();
        assert!(tags.occasions.contains("weekend-market"));
        assert!(tags.styles.contains("casual"));
    }

    #[tokio::test]
    async fn test_profile_owner_mismatch_is_rejected() {
        let mut fixture = Fixture::from_json_str(FIXTURE).unwrap();
        fixture.owner = OwnerId::new("bob");
        let result = EmbeddedEngine::new(&EngineConfig::default(), fixture, true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_demo_fixture_recommends_layers_for_cold_cyclist() {
        let fixture =
            Fixture::from_json_str(include_str!("../../demos/wardrobe-fixture.json")).unwrap();
        let engine = EmbeddedEngine::new(&EngineConfig::default(), fixture, true)
            .await
            .unwrap();

        let mut req = request(vec![Category::Top, Category::Bottom]);
        req.owner = engine.owner().clone();
        let rec = engine.recommend(req).await.unwrap();

        assert_eq!(rec.garment(Slot::Top).unwrap().subcategory, "knit-sweater");
        assert_eq!(rec.garment(Slot::Bottom).unwrap().subcategory, "chinos");
        assert!(rec.garment(Slot::Outer).is_some());
        assert!(rec.synthesized.is_empty());
    }

    #[test]
    fn test_invalid_warmth_in_fixture_fails_to_parse() {
        let broken = FIXTURE.replace("\"warmth_level\": 4", "\"warmth_level\": 9");
        assert!(Fixture::from_json_str(&broken).is_err());
    }

    #[tokio::test]
    async fn test_offline_design_fails_and_stores_nothing() {
        let engine = engine().await;
        let design = VirtualDesign {
            category: Category::Hat,
            subcategory: "bucket-hat".to_string(),
            main_color: "khaki".to_string(),
            warmth_level: WarmthLevel::new(1).unwrap(),
            materials: vec!["cotton".to_string()],
            styles: vec!["street".to_string()],
            seasons: vec!["summer".to_string()],
            gender: GenderTag::Neutral,
        };

        assert!(engine.design(design).await.is_err());
        let rec = engine.recommend(request(vec![Category::Hat])).await.unwrap();
        assert_eq!(rec.synthesized, vec![Category::Hat]);
    }
}
