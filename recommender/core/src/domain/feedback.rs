// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Feedback Records
//!
//! Append-only log of how a recommended outfit actually felt. Records are
//! never mutated or deleted and are the sole input to the historical
//! preference model.
//!
//! Slot references are weak: a referenced garment may have been deleted since
//! the record was written. Consumers must skip ids that no longer resolve.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::garment::GarmentId;
use crate::domain::profile::OwnerId;
use crate::domain::DomainError;

/// User verdict on a worn outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum FeedbackScore {
    Adopted,
    Ignored,
    TooCold,
    TooHot,
    StyleMismatch,
}

impl FeedbackScore {
    pub fn value(self) -> i8 {
        match self {
            FeedbackScore::Adopted => 1,
            FeedbackScore::Ignored => 0,
            FeedbackScore::TooCold => -1,
            FeedbackScore::TooHot => -2,
            FeedbackScore::StyleMismatch => -3,
        }
    }
}

impl TryFrom<i8> for FeedbackScore {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FeedbackScore::Adopted),
            0 => Ok(FeedbackScore::Ignored),
            -1 => Ok(FeedbackScore::TooCold),
            -2 => Ok(FeedbackScore::TooHot),
            -3 => Ok(FeedbackScore::StyleMismatch),
            other => Err(DomainError::InvalidFeedbackScore(other)),
        }
    }
}

impl From<FeedbackScore> for i8 {
    fn from(score: FeedbackScore) -> Self {
        score.value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub owner: OwnerId,
    pub recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<GarmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<GarmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer: Option<GarmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_piece: Option<GarmentId>,
    pub score: FeedbackScore,
    /// Real temperature (°C) on the day the outfit was worn.
    pub weather_temp: f64,
    #[serde(default = "default_scenario")]
    pub scenario: String,
}

fn default_scenario() -> String {
    "user_feedback".to_string()
}

impl FeedbackRecord {
    pub fn new(owner: OwnerId, score: FeedbackScore, weather_temp: f64) -> Self {
        Self {
            owner,
            recorded_at: Utc::now(),
            top: None,
            bottom: None,
            outer: None,
            one_piece: None,
            score,
            weather_temp,
            scenario: default_scenario(),
        }
    }

    /// Every slot reference carried by the record, in slot order.
    pub fn garment_refs(&self) -> impl Iterator<Item = GarmentId> + '_ {
        [self.top, self.bottom, self.outer, self.one_piece]
            .into_iter()
            .flatten()
    }
}
