// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Feedback Service
//!
//! Appends outfit feedback to the log the historical preference model reads.
//! Scores are validated at the boundary; records are never edited afterwards.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::feedback::{FeedbackRecord, FeedbackScore};
use crate::domain::garment::GarmentId;
use crate::domain::profile::OwnerId;
use crate::domain::repository::FeedbackStore;

/// Raw feedback as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub owner: OwnerId,
    #[serde(default)]
    pub top: Option<GarmentId>,
    #[serde(default)]
    pub bottom: Option<GarmentId>,
    #[serde(default)]
    pub outer: Option<GarmentId>,
    #[serde(default)]
    pub one_piece: Option<GarmentId>,
    /// Unvalidated score; must be one of -3, -2, -1, 0, 1.
    pub score: i8,
    pub weather_temp: f64,
    #[serde(default)]
    pub scenario: Option<String>,
}

#[async_trait]
pub trait FeedbackService: Send + Sync {
    async fn record_feedback(&self, submission: FeedbackSubmission) -> Result<FeedbackRecord>;
}

pub struct StandardFeedbackService {
    feedback: Arc<dyn FeedbackStore>,
}

impl StandardFeedbackService {
    pub fn new(feedback: Arc<dyn FeedbackStore>) -> Self {
        Self { feedback }
    }
}

#[async_trait]
impl FeedbackService for StandardFeedbackService {
    async fn record_feedback(&self, submission: FeedbackSubmission) -> Result<FeedbackRecord> {
        let score = FeedbackScore::try_from(submission.score)?;

        let mut record = FeedbackRecord::new(submission.owner, score, submission.weather_temp);
        record.recorded_at = Utc::now();
        record.top = submission.top;
        record.bottom = submission.bottom;
        record.outer = submission.outer;
        record.one_piece = submission.one_piece;
        if let Some(scenario) = submission.scenario.filter(|s| !s.trim().is_empty()) {
            record.scenario = scenario;
        }

        self.feedback
            .append(record.clone())
            .await
            .context("Failed to append feedback record")?;
        info!(owner = %record.owner, score = score.value(), "Recorded feedback");
        Ok(record)
    }
}
