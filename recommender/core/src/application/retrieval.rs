// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Candidate Retriever
//!
//! Recall layer: turns `(category, warmth window, mode)` into a structured
//! [`GarmentQuery`] and runs it against the garment store.
//!
//! # Modes
//!
//! - **Strict**: owned garments of the category that pass the profile hard
//!   filters and the gender filter; top and bottom are also warmth-gated.
//!   When a warmth-gated category comes back empty, strict retrieval retries
//!   once with the window widened by one level, hard filters still applied.
//! - **Relaxed**: the window is widened by one level, hard filters are
//!   skipped and menswear is admitted for female wearers. The gender filter
//!   itself is always kept.
//!
//! Outer-layer candidates use their own query: top-category outerwear, hard
//! filters on, gender filter with the style exemption but never relaxed.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::garment::{Category, Garment};
use crate::domain::profile::{CommuteMethod, UserProfile};
use crate::domain::repository::{GarmentQuery, GarmentStore, RepositoryError};
use crate::domain::request::RecommendationConfig;
use crate::domain::warmth::WarmthRange;

/// Casual subtypes barred by an occupational dress code in formal scenarios.
pub const DRESS_CODE_EXCLUDED: &[&str] = &["tank-top", "shorts", "slippers", "sandals", "sweatpants"];
/// Bottom subtypes that do not work on a bicycle.
pub const CYCLING_EXCLUDED: &[&str] = &["skirt", "dress", "long-skirt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
    Strict,
    Relaxed,
}

/// Request-scoped recall over the garment store.
pub struct CandidateRetriever<'a> {
    store: Arc<dyn GarmentStore>,
    config: &'a RecommendationConfig,
    profile: &'a UserProfile,
}

impl<'a> CandidateRetriever<'a> {
    pub fn new(
        store: Arc<dyn GarmentStore>,
        config: &'a RecommendationConfig,
        profile: &'a UserProfile,
    ) -> Self {
        Self { store, config, profile }
    }

    /// Candidates for a category in the requested mode.
    pub async fn retrieve(
        &self,
        category: Category,
        warmth: WarmthRange,
        mode: RetrievalMode,
    ) -> Result<Vec<Garment>, RepositoryError> {
        match mode {
            RetrievalMode::Relaxed => self.relaxed(category, warmth).await,
            RetrievalMode::Strict => {
                let items = self.strict(category, warmth).await?;
                if !items.is_empty() || !category.is_warmth_gated() {
                    return Ok(items);
                }
                let widened = warmth.widened();
                let items = self.strict(category, widened).await?;
                info!(
                    owner = %self.config.owner,
                    category = %category,
                    min = widened.min,
                    max = widened.max,
                    recalled = items.len(),
                    "Strict retrieval fell back to widened warmth window"
                );
                Ok(items)
            }
        }
    }

    /// Single strict query, no fallback.
    pub async fn strict(
        &self,
        category: Category,
        warmth: WarmthRange,
    ) -> Result<Vec<Garment>, RepositoryError> {
        let mut query = self.base_query(category, false);
        if category.is_warmth_gated() {
            query.warmth = Some(warmth);
        }
        self.apply_hard_filters(&mut query);
        self.store.query(&query).await
    }

    pub async fn relaxed(
        &self,
        category: Category,
        warmth: WarmthRange,
    ) -> Result<Vec<Garment>, RepositoryError> {
        let widened = warmth.widened();
        debug!(
            owner = %self.config.owner,
            category = %category,
            min = widened.min,
            max = widened.max,
            "Relaxed retrieval"
        );
        let mut query = self.base_query(category, true);
        if category.is_warmth_gated() {
            query.warmth = Some(widened);
        }
        self.store.query(&query).await
    }

    /// Owned top-category outerwear eligible as an outer layer.
    pub async fn outer_candidates(&self) -> Result<Vec<Garment>, RepositoryError> {
        let mut query = self.base_query(Category::Top, false);
        self.apply_hard_filters(&mut query);
        let items = self.store.query(&query).await?;
        Ok(items.into_iter().filter(Garment::is_outerwear).collect())
    }

    fn base_query(&self, category: Category, relaxed: bool) -> GarmentQuery {
        let mut query = GarmentQuery::new(self.config.owner.clone(), category);
        query.genders = self.config.gender.admitted_tags(&self.config.style, relaxed);
        query
    }

    fn apply_hard_filters(&self, query: &mut GarmentQuery) {
        query.excluded_colors = self.profile.avoid_colors.clone();
        query.excluded_subcategories = excluded_subcategories(self.config, self.profile, query.category);
    }
}

/// Subtypes barred for this wearer and category by the profile hard filters.
pub fn excluded_subcategories(
    config: &RecommendationConfig,
    profile: &UserProfile,
    category: Category,
) -> BTreeSet<String> {
    let mut excluded = BTreeSet::new();
    if config.scenario.is_formal() && profile.occupation.is_dress_code_constrained() {
        excluded.extend(DRESS_CODE_EXCLUDED.iter().map(|s| s.to_string()));
    }
    if profile.commute == CommuteMethod::Cycle && category == Category::Bottom {
        excluded.extend(CYCLING_EXCLUDED.iter().map(|s| s.to_string()));
    }
    excluded
}
