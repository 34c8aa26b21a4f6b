// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Recommend Outfit Use Case
//!
//! Application service that turns a recommendation request into a scored,
//! explained outfit.
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Orchestrate one recommendation call
//! - **Collaborators:**
//!   - Domain: RecommendationConfig, WarmthRange, synthesis rule table
//!   - Infrastructure: GarmentStore, FeedbackStore, ProfileStore,
//!     WeatherProvider, ImageSynthesizer
//!
//! # Flow
//!
//! 1. Validate the raw request into a `RecommendationConfig`
//! 2. Resolve the weather snapshot for the requested location
//! 3. Load the profile (defaults on failure) and the feedback log
//! 4. Compute the personalised feels-like temperature and warmth window
//! 5. Select every resolved category concurrently: relaxed retrieval, then
//!    the best candidate by (style match, fitness), or synthesis when empty
//! 6. Add an outer layer over the top when the weather calls for one
//! 7. Aggregate: `floor(total / |resolved categories|)`; the outer layer adds
//!    its fitness to the total without increasing the divisor
//! 8. Compose the rationale
//!
//! # Error Handling
//!
//! - Input errors: `RecommendationError::InvalidRequest`
//! - Weather provider failure: `RecommendationError::Weather`
//! - Garment or feedback store failure: `RecommendationError::Repository`
//! - Profile store failure: logged, default profile used
//! - Synthesis failure: logged, placeholder asset used

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::application::history::HistoricalPreferenceModel;
use crate::application::outer_layer::OuterLayerSelector;
use crate::application::retrieval::{CandidateRetriever, RetrievalMode};
use crate::application::scoring::ScoringContext;
use crate::application::synthesis::{SynthesisFallback, SynthesisRequest};
use crate::application::thermal;
use crate::domain::garment::{Category, Garment, Slot};
use crate::domain::profile::{CommuteMethod, UserProfile};
use crate::domain::recommendation::{Recommendation, RecommendationError};
use crate::domain::repository::{FeedbackStore, GarmentStore, ProfileStore, RepositoryError};
use crate::domain::request::{RecommendationConfig, RecommendationRequest};
use crate::domain::synthesis::{ImageSynthesizer, SYNTHESIZED_SCORE};
use crate::domain::warmth::WarmthRange;
use crate::domain::weather::{WeatherContext, WeatherProvider};

/// Recommend Outfit Use Case
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Recommend an outfit for the request
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: missing owner or empty resolved category set
    /// - `Weather`: location could not be resolved
    /// - `Repository`: garment or feedback store failed
    async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<Recommendation, RecommendationError>;
}

/// Outcome of selecting one category.
struct Selection {
    category: Category,
    garment: Garment,
    contribution: f64,
    synthesized: bool,
}

/// Standard implementation of RecommendationService
pub struct StandardRecommendationService {
    garments: Arc<dyn GarmentStore>,
    feedback: Arc<dyn FeedbackStore>,
    profiles: Arc<dyn ProfileStore>,
    weather: Arc<dyn WeatherProvider>,
    synthesis: SynthesisFallback,
}

impl StandardRecommendationService {
    pub fn new(
        garments: Arc<dyn GarmentStore>,
        feedback: Arc<dyn FeedbackStore>,
        profiles: Arc<dyn ProfileStore>,
        weather: Arc<dyn WeatherProvider>,
        synthesizer: Arc<dyn ImageSynthesizer>,
    ) -> Self {
        let synthesis = SynthesisFallback::new(synthesizer, garments.clone());
        Self {
            garments,
            feedback,
            profiles,
            weather,
            synthesis,
        }
    }

    /// Override the synthesis timeout and placeholder asset.
    pub fn with_synthesis_settings(mut self, timeout: Duration, placeholder: impl Into<String>) -> Self {
        self.synthesis = self.synthesis.with_timeout(timeout).with_placeholder(placeholder);
        self
    }

    async fn load_profile(&self, config: &RecommendationConfig) -> UserProfile {
        match self.profiles.get_by_owner(&config.owner).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(owner = %config.owner, error = %e, "Profile lookup failed, using defaults");
                UserProfile::default_for(config.owner.clone())
            }
        }
    }

    async fn select_category(
        &self,
        category: Category,
        warmth: WarmthRange,
        config: &RecommendationConfig,
        profile: &UserProfile,
        retriever: &CandidateRetriever<'_>,
        scoring: &ScoringContext<'_>,
    ) -> Result<Selection, RepositoryError> {
        let mut candidates = retriever.retrieve(category, warmth, RetrievalMode::Relaxed).await?;
        if category == Category::Top {
            // outerwear is never worn as the inner layer
            candidates.retain(|g| !g.is_outerwear());
        }

        debug!(owner = %config.owner, category = %category, candidates = candidates.len(), "Recalled candidates");

        let mut best: Option<(bool, f64, Garment)> = None;
        for candidate in candidates {
            let style_match = candidate.has_style(&config.style);
            let fitness = scoring.fitness(&candidate);
            let better = match &best {
                None => true,
                Some((best_match, best_fitness, _)) => {
                    (style_match, fitness) > (*best_match, *best_fitness)
                }
            };
            if better {
                best = Some((style_match, fitness, candidate));
            }
        }

        if let Some((_, fitness, garment)) = best {
            return Ok(Selection {
                category,
                garment,
                contribution: fitness,
                synthesized: false,
            });
        }

        info!(owner = %config.owner, category = %category, "No candidates, falling back to synthesis");
        let garment = self
            .synthesis
            .synthesize(SynthesisRequest {
                owner: config.owner.clone(),
                category,
                style: config.style.clone(),
                warmth: warmth.synthesis_target(),
                commute: profile.commute,
                gender: config.gender.target_tag(),
                fit: profile.fit_preference,
            })
            .await?;

        Ok(Selection {
            category,
            garment,
            contribution: SYNTHESIZED_SCORE,
            synthesized: true,
        })
    }
}

#[async_trait]
impl RecommendationService for StandardRecommendationService {
    async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<Recommendation, RecommendationError> {
        let config = RecommendationConfig::from_request(request)?;
        info!(
            owner = %config.owner,
            scenario = config.scenario.as_str(),
            style = %config.style,
            categories = config.categories.len(),
            "Recommending outfit"
        );

        let weather = self.weather.resolve(&config.location).await?;
        let profile = self.load_profile(&config).await;
        let records = self.feedback.list_by_owner(&config.owner).await?;
        let history: HashMap<_, _> =
            HistoricalPreferenceModel::compute(&records, weather.current.temp_real, Utc::now());

        let feels_like = thermal::feels_like(&profile, &weather);
        let warmth = WarmthRange::for_feels_like(feels_like);
        debug!(
            owner = %config.owner,
            feels_like,
            min = warmth.min,
            max = warmth.max,
            "Resolved warmth window"
        );

        let scoring = ScoringContext::new(&profile, &weather, &history);
        let retriever = CandidateRetriever::new(self.garments.clone(), &config, &profile);

        let selections = try_join_all(config.categories.iter().map(|&category| {
            self.select_category(category, warmth, &config, &profile, &retriever, &scoring)
        }))
        .await?;

        let mut outfit = BTreeMap::new();
        let mut synthesized = Vec::new();
        let mut total = 0.0;
        for selection in selections {
            total += selection.contribution;
            if selection.synthesized {
                synthesized.push(selection.category);
            }
            outfit.insert(selection.category.slot(), selection.garment);
        }

        if let Some(inner) = outfit.get(&Slot::Top) {
            if OuterLayerSelector::needs_outer(feels_like, &weather.signals) {
                let candidates = retriever.outer_candidates().await?;
                if let Some(choice) = OuterLayerSelector::select(inner, candidates, &scoring) {
                    debug!(
                        owner = %config.owner,
                        outer = %choice.garment.id,
                        selection_score = choice.selection_score,
                        "Selected outer layer"
                    );
                    total += choice.fitness;
                    outfit.insert(Slot::Outer, choice.garment);
                }
            }
        }

        if outfit.is_empty() {
            return Err(RecommendationError::NoSlotFilled);
        }

        let score = (total / config.categories.len() as f64).floor() as i64;
        let rationale = compose_rationale(&weather, &synthesized, &profile);

        info!(
            owner = %config.owner,
            score,
            slots = outfit.len(),
            synthesized = synthesized.len(),
            "Recommendation complete"
        );

        Ok(Recommendation {
            outfit,
            score,
            rationale,
            synthesized,
            weather_summary: weather.summary.clone(),
        })
    }
}

/// Human-readable explanation of the recommendation.
pub fn compose_rationale(
    weather: &WeatherContext,
    synthesized: &[Category],
    profile: &UserProfile,
) -> String {
    let mut rationale = format!("Recommended for today's {} weather.", weather.summary);

    if !synthesized.is_empty() {
        let names: Vec<&str> = synthesized.iter().map(|c| c.as_str()).collect();
        rationale.push_str(&format!(
            " To complete the look, new items were designed for you: {}.",
            names.join(", ")
        ));
    }
    if profile.thermal_sensitivity.is_cold_sensitive() {
        rationale.push_str(" Extra warmth was added because you feel the cold.");
    }
    if profile.commute == CommuteMethod::Cycle {
        rationale.push_str(" Wind and water resistance were prioritised for your cycling commute.");
    }

    rationale
}
