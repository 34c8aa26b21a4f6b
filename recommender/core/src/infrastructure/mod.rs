// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure
//!
//! Adapters for the domain seams: in-memory stores, the HTTP image
//! synthesizer and a static weather provider.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Implements domain interfaces

pub mod repositories;
pub mod image_synthesis;
pub mod weather;

pub use repositories::{InMemoryFeedbackStore, InMemoryGarmentStore, InMemoryProfileStore};
pub use image_synthesis::HttpImageSynthesizer;
pub use weather::StaticWeatherProvider;
