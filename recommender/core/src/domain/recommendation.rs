// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Recommendation result and the errors a recommendation call can surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::garment::{Category, Garment, Slot};
use crate::domain::repository::RepositoryError;
use crate::domain::weather::WeatherError;
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Chosen garment per slot. `outer` appears only when an outer layer was selected.
    pub outfit: BTreeMap<Slot, Garment>,
    /// Aggregate score, floored.
    pub score: i64,
    pub rationale: String,
    /// Categories filled by freshly synthesized virtual garments, in request order.
    pub synthesized: Vec<Category>,
    pub weather_summary: String,
}

impl Recommendation {
    pub fn garment(&self, slot: Slot) -> Option<&Garment> {
        self.outfit.get(&slot)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Weather lookup failed: {0}")]
    Weather(#[from] WeatherError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("No outfit slot could be filled")]
    NoSlotFilled,
}
