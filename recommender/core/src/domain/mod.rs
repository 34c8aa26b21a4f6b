// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Aggregates, value objects and collaborator interfaces of the wardrobe
//! recommender. Nothing in this layer performs I/O.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Domain model and seams

pub mod garment;
pub mod profile;
pub mod feedback;
pub mod weather;
pub mod warmth;
pub mod request;
pub mod repository;
pub mod synthesis;
pub mod recommendation;
pub mod engine_config;

/// Violations of domain invariants detected at construction or validation time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Warmth level {0} is outside [1, 5]")]
    WarmthOutOfRange(u8),

    #[error("Thermal sensitivity {0} is outside [-2, 2]")]
    SensitivityOutOfRange(i8),

    #[error("Invalid feedback score {0}; expected one of -3, -2, -1, 0, 1")]
    InvalidFeedbackScore(i8),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Embedding has {actual} dimensions, expected {expected}")]
    EmbeddingDimension { expected: usize, actual: usize },

    #[error("No categories left to recommend after resolution")]
    EmptyCategorySet,
}
