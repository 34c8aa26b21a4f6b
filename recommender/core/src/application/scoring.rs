// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Scoring Engine
//!
//! Two pure scores drive every ranking decision:
//!
//! - **Fitness**: how well a single garment suits today's weather and the
//!   wearer's physiology, starting from a base of 80 and adjusted by additive
//!   rules plus the (clamped) historical bonus.
//! - **Compatibility**: how well two garments go together, mixing visual
//!   embedding similarity with style-tag overlap.
//!
//! Both are total: a garment with missing attributes is scored neutrally on
//! the rules that depend on them.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Fitness and compatibility scoring

use std::collections::HashMap;

use crate::domain::garment::{
    Breathability, Category, ColorPattern, Garment, GarmentId, MaterialClass, WaterproofTier,
};
use crate::domain::profile::{CommuteMethod, UserProfile};
use crate::domain::weather::WeatherContext;

pub const BASE_FITNESS: f64 = 80.0;
/// Bound on the historical bonus so a few strong reactions cannot dominate.
pub const HISTORY_CLAMP: f64 = 60.0;
/// Similarity used whenever a real cosine cannot be computed.
pub const NEUTRAL_SIMILARITY: f64 = 0.5;

/// Wind speed (m/s) above which a non-windproof garment is a liability on a bike.
const CYCLING_WIND_ABOVE: f64 = 5.0;

/// Cosine similarity of two embeddings.
///
/// Returns [`NEUTRAL_SIMILARITY`] when either side is absent or empty, the
/// dimensions differ, either norm is zero, or the result is not finite.
pub fn cosine_similarity(a: Option<&[f32]>, b: Option<&[f32]>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return NEUTRAL_SIMILARITY;
    };
    if a.is_empty() || a.len() != b.len() {
        return NEUTRAL_SIMILARITY;
    }

    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 {
        return NEUTRAL_SIMILARITY;
    }
    let sim = dot / denom;
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0)
    } else {
        NEUTRAL_SIMILARITY
    }
}

/// Per-request scoring inputs. Borrowed snapshots only; no I/O.
pub struct ScoringContext<'a> {
    pub profile: &'a UserProfile,
    pub weather: &'a WeatherContext,
    pub history: &'a HashMap<GarmentId, f64>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(
        profile: &'a UserProfile,
        weather: &'a WeatherContext,
        history: &'a HashMap<GarmentId, f64>,
    ) -> Self {
        Self { profile, weather, history }
    }

    /// Weather and physiology fitness of a single garment.
    pub fn fitness(&self, garment: &Garment) -> f64 {
        let signals = &self.weather.signals;
        let mut score = BASE_FITNESS;

        if signals.needs_umbrella {
            if garment.waterproof == Some(WaterproofTier::None) && garment.category != Category::Top {
                score -= 30.0;
            }
            if garment.has_material_class(MaterialClass::Delicate) {
                score -= 40.0;
            }
        }

        if signals.needs_windbreaker {
            score += if garment.windproof { 10.0 } else { -10.0 };
        }

        let low_breathability = garment.breathability == Some(Breathability::Low);
        if signals.high_humidity && low_breathability {
            score -= 20.0;
        }

        if self.profile.sweat_tendency && self.weather.is_hot_or_humid() {
            if low_breathability {
                score -= 50.0;
            }
            if garment.has_material_class(MaterialClass::SyntheticOrLeather) {
                score -= 20.0;
            }
            if garment.has_material_class(MaterialClass::BreathableNatural) {
                score += 10.0;
            }
        }

        if self.profile.commute == CommuteMethod::Cycle {
            if garment.windproof {
                score += 20.0;
            } else if self.weather.current.wind_speed > CYCLING_WIND_ABOVE {
                score -= 15.0;
            }
        }

        if garment.fit == Some(self.profile.fit_preference) {
            score += 10.0;
        }

        score + self.history_bonus(garment.id)
    }

    /// Historical bonus for the garment, clamped to `[-60, 60]`.
    pub fn history_bonus(&self, id: GarmentId) -> f64 {
        self.history
            .get(&id)
            .copied()
            .unwrap_or(0.0)
            .clamp(-HISTORY_CLAMP, HISTORY_CLAMP)
    }
}

/// Pairwise compatibility of two garments under the requested style.
pub fn compatibility(a: &Garment, b: &Garment, requested_style: &str) -> f64 {
    let visual = (cosine_similarity(a.embedding(), b.embedding()) + 1.0) * 50.0;

    let mut common = a.styles.intersection(&b.styles).peekable();
    let mut style = if common.peek().is_some() { 100.0 } else { 40.0 };
    if common.any(|s| s == requested_style) {
        style += 20.0;
    }

    let penalty = if a.color_pattern == ColorPattern::Mixed && b.color_pattern == ColorPattern::Mixed {
        20.0
    } else {
        0.0
    };

    0.5 * visual + 0.5 * style - penalty
}
