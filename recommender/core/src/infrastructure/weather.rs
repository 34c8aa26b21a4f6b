// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Static weather provider serving fixed snapshots keyed by location.
//! Used by the CLI fixtures and tests in place of a live forecast API.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::weather::{WeatherContext, WeatherError, WeatherProvider};

#[derive(Clone, Default)]
pub struct StaticWeatherProvider {
    snapshots: Arc<RwLock<HashMap<String, WeatherContext>>>,
}

impl StaticWeatherProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(self, location: &str, snapshot: WeatherContext) -> Self {
        self.insert(location, snapshot);
        self
    }

    pub fn insert(&self, location: &str, mut snapshot: WeatherContext) {
        if snapshot.location.is_empty() {
            snapshot.location = location.to_string();
        }
        self.snapshots.write().insert(normalise(location), snapshot);
    }
}

fn normalise(location: &str) -> String {
    location.trim().to_lowercase()
}

#[async_trait]
impl WeatherProvider for StaticWeatherProvider {
    async fn resolve(&self, location: &str) -> Result<WeatherContext, WeatherError> {
        self.snapshots
            .read()
            .get(&normalise(location))
            .cloned()
            .ok_or_else(|| WeatherError::UnknownLocation(location.to_string()))
    }
}
