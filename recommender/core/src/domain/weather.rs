// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Weather
//!
//! Transient weather snapshot supplied per recommendation call, plus the
//! domain interface for the external provider that resolves a location token
//! into a snapshot. Nothing here is persisted.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Weather snapshot, derived signals and provider interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Daily rain probability (percent) at which an umbrella is advised.
pub const UMBRELLA_RAIN_PROBABILITY: f64 = 30.0;
/// Daily maximum wind speed above which a windbreaker is advised.
pub const WINDBREAKER_WIND_MAX: f64 = 20.0;
/// Relative humidity (0..1) above which the air counts as humid.
pub const HIGH_HUMIDITY: f64 = 0.7;
/// Daily max/min spread (°C) that counts as a large diurnal swing.
pub const DIURNAL_SWING: f64 = 10.0;
pub const SUN_PROTECTION_UV: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in °C.
    pub temp_real: f64,
    /// Apparent ("feels-like") temperature in °C.
    pub temp_apparent: f64,
    /// Relative humidity in `[0, 1]`.
    pub humidity: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sky: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyStats {
    pub temp_max: f64,
    pub temp_min: f64,
    /// Precipitation probability in percent.
    #[serde(default)]
    pub rain_probability: f64,
    #[serde(default)]
    pub wind_max: f64,
    #[serde(default)]
    pub uv_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeatherSignals {
    #[serde(default)]
    pub needs_umbrella: bool,
    #[serde(default)]
    pub needs_windbreaker: bool,
    #[serde(default)]
    pub needs_sun_protection: bool,
    #[serde(default)]
    pub high_humidity: bool,
    #[serde(default)]
    pub large_diurnal_swing: bool,
}

impl WeatherSignals {
    pub fn derive(current: &CurrentConditions, today: &DailyStats) -> Self {
        Self {
            needs_umbrella: today.rain_probability >= UMBRELLA_RAIN_PROBABILITY,
            needs_windbreaker: today.wind_max > WINDBREAKER_WIND_MAX,
            needs_sun_protection: today.uv_max >= SUN_PROTECTION_UV,
            high_humidity: current.humidity > HIGH_HUMIDITY,
            large_diurnal_swing: (today.temp_max - today.temp_min) > DIURNAL_SWING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
    pub current: CurrentConditions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<DailyStats>,
    #[serde(default)]
    pub signals: WeatherSignals,
}

impl WeatherContext {
    /// Builds a snapshot from a raw observation, deriving every signal.
    pub fn from_observation(
        location: impl Into<String>,
        summary: impl Into<String>,
        current: CurrentConditions,
        today: DailyStats,
    ) -> Self {
        let signals = WeatherSignals::derive(&current, &today);
        Self {
            location: location.into(),
            summary: summary.into(),
            current,
            today: Some(today),
            signals,
        }
    }

    /// Humid or hot enough that sweat-prone users suffer in closed fabrics.
    pub fn is_hot_or_humid(&self) -> bool {
        self.current.humidity > HIGH_HUMIDITY || self.current.temp_real > 25.0
    }
}

/// Domain interface for the weather/geocoding collaborator.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a location token (place name or "lon,lat") into a snapshot.
    async fn resolve(&self, location: &str) -> Result<WeatherContext, WeatherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),
}
