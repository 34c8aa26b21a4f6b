// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod thermal;
pub mod history;
pub mod scoring;
pub mod retrieval;
pub mod outer_layer;
pub mod synthesis;
pub mod recommendation;
pub mod wardrobe;
pub mod profile;
pub mod feedback;

// Re-export services for convenience
pub use recommendation::{RecommendationService, StandardRecommendationService};
pub use wardrobe::{StandardWardrobeService, WardrobeService, WardrobeTags};
pub use profile::{ProfileService, StandardProfileService};
pub use feedback::{FeedbackService, FeedbackSubmission, StandardFeedbackService};
