// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Historical Preference Model
//!
//! Converts the feedback log into a per-garment additive bonus. Every
//! contribution decays by 10% for each 30 days that have passed since the
//! record was written.
//!
//! Two independent rules apply per record:
//!
//! 1. **Similar weather** (`|record.temp - current| <= 5`): every referenced
//!    garment receives `score * 20 * decay`.
//! 2. **Thermal correction**: "too cold" on a day at least as warm as today,
//!    or "too hot" on a day at least as cold as today, costs `-50 * decay`.
//!
//! The output is deliberately unclamped; the scoring engine clamps it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::feedback::{FeedbackRecord, FeedbackScore};
use crate::domain::garment::GarmentId;

/// Maximum temperature difference (°C) for two days to count as similar.
pub const SIMILAR_WEATHER_DELTA: f64 = 5.0;
const SCORE_WEIGHT: f64 = 20.0;
const THERMAL_PENALTY: f64 = -50.0;
const DECAY_BASE: f64 = 0.9;
const DECAY_PERIOD_DAYS: f64 = 30.0;

pub struct HistoricalPreferenceModel;

impl HistoricalPreferenceModel {
    /// Per-garment bonus for the given records. Ids that no longer resolve to a
    /// garment are kept as-is; nothing here looks them up.
    pub fn compute(
        records: &[FeedbackRecord],
        current_temp: f64,
        now: DateTime<Utc>,
    ) -> HashMap<GarmentId, f64> {
        let mut weights: HashMap<GarmentId, f64> = HashMap::new();

        for record in records {
            let decay = decay_factor(record.recorded_at, now);
            let mut delta = 0.0;

            if (record.weather_temp - current_temp).abs() <= SIMILAR_WEATHER_DELTA {
                delta += f64::from(record.score.value()) * SCORE_WEIGHT * decay;
            }

            let corrected = match record.score {
                FeedbackScore::TooCold => current_temp <= record.weather_temp,
                FeedbackScore::TooHot => current_temp >= record.weather_temp,
                _ => false,
            };
            if corrected {
                delta += THERMAL_PENALTY * decay;
            }

            if delta != 0.0 {
                for id in record.garment_refs() {
                    *weights.entry(id).or_insert(0.0) += delta;
                }
            }
        }

        tracing::debug!(
            records = records.len(),
            affected = weights.len(),
            "Computed historical preference weights"
        );

        weights
    }
}

/// `0.9^(days / 30)` over whole elapsed days; future-dated records count as today.
pub fn decay_factor(recorded_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = (now - recorded_at).num_days().max(0);
    DECAY_BASE.powf(days as f64 / DECAY_PERIOD_DAYS)
}
