// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Outer Layer Selector
//!
//! Decides whether the chosen inner top needs an outer layer and, if so,
//! picks the candidate that best balances visual harmony with the inner top
//! against its own weather fitness.

use crate::application::scoring::{cosine_similarity, ScoringContext};
use crate::domain::garment::Garment;
use crate::domain::weather::WeatherSignals;

/// Personalised feels-like temperature (°C) below which a coat is needed.
pub const OUTER_BELOW_FEELS_LIKE: f64 = 18.0;

/// An outer layer chosen for the outfit.
#[derive(Debug, Clone)]
pub struct OuterChoice {
    pub garment: Garment,
    /// Selection score: `cos(inner, outer) * 50 + fitness * 0.5`.
    pub selection_score: f64,
    /// The outer's own fitness; this is what it adds to the aggregate total.
    pub fitness: f64,
}

pub struct OuterLayerSelector;

impl OuterLayerSelector {
    pub fn needs_outer(feels_like: f64, signals: &WeatherSignals) -> bool {
        feels_like < OUTER_BELOW_FEELS_LIKE || signals.needs_windbreaker || signals.large_diurnal_swing
    }

    /// Best candidate by selection score. Ties keep the first candidate seen.
    pub fn select(
        inner: &Garment,
        candidates: Vec<Garment>,
        scoring: &ScoringContext<'_>,
    ) -> Option<OuterChoice> {
        let mut best: Option<OuterChoice> = None;

        for candidate in candidates {
            let fitness = scoring.fitness(&candidate);
            let selection_score =
                cosine_similarity(inner.embedding(), candidate.embedding()) * 50.0 + fitness * 0.5;

            if best.as_ref().is_none_or(|b| selection_score > b.selection_score) {
                best = Some(OuterChoice {
                    garment: candidate,
                    selection_score,
                    fitness,
                });
            }
        }

        best
    }
}
