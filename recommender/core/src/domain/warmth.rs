// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Warmth tiers: the acceptable insulation window for a feels-like temperature.

use serde::{Deserialize, Serialize};

use crate::domain::garment::WarmthLevel;

/// Inclusive `[min, max]` window of acceptable warmth levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmthRange {
    pub min: u8,
    pub max: u8,
}

impl WarmthRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Maps a personalised feels-like temperature onto a contiguous,
    /// non-overlapping partition of tiers.
    pub fn for_feels_like(feels_like: f64) -> Self {
        if feels_like >= 30.0 {
            Self::new(1, 1)
        } else if feels_like >= 24.0 {
            Self::new(1, 2)
        } else if feels_like >= 18.0 {
            Self::new(2, 3)
        } else if feels_like >= 10.0 {
            Self::new(3, 4)
        } else {
            Self::new(4, 5)
        }
    }

    /// Window widened by one level on each side, clamped to `[1, 5]`.
    pub fn widened(self) -> Self {
        Self {
            min: self.min.saturating_sub(1).max(WarmthLevel::MIN),
            max: (self.max + 1).min(WarmthLevel::MAX),
        }
    }

    pub fn contains(self, level: WarmthLevel) -> bool {
        (self.min..=self.max).contains(&level.value())
    }

    /// Warmth level given to a synthesized garment: 4 clamped into the window.
    pub fn synthesis_target(self) -> WarmthLevel {
        WarmthLevel::saturating(4_i32.clamp(self.min as i32, self.max as i32))
    }
}
