// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the Wardrobe CLI

pub mod config;
pub mod design;
pub mod recommend;
pub mod tags;

pub use self::config::ConfigCommand;
pub use self::design::DesignArgs;
pub use self::recommend::RecommendArgs;
pub use self::tags::TagsArgs;
