// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lib
//!
//! Weather-aware outfit recommendation engine.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Crate root; exposes the domain, application and infrastructure layers

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
