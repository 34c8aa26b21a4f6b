// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Thermal Offset
//!
//! Personalises the apparent temperature: how much warmer or colder the
//! wearer will *feel* given their sensitivity and commute.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Pure feels-like personalisation

use crate::domain::profile::{CommuteMethod, UserProfile};
use crate::domain::warmth::WarmthRange;
use crate::domain::weather::WeatherContext;

/// Real temperature below which a heated car cabin warms the driver up.
const CAR_HEATING_BELOW: f64 = 10.0;
/// Wind speed above which cycling chills the rider.
const CYCLING_WIND_CHILL_ABOVE: f64 = 5.0;

/// Offset in °C added to the apparent temperature.
pub fn thermal_offset(profile: &UserProfile, weather: &WeatherContext) -> f64 {
    let mut offset = f64::from(profile.thermal_sensitivity.value()) * 2.0;

    match profile.commute {
        CommuteMethod::Drive if weather.current.temp_real < CAR_HEATING_BELOW => offset += 3.0,
        CommuteMethod::Cycle if weather.current.wind_speed > CYCLING_WIND_CHILL_ABOVE => offset -= 2.0,
        _ => {}
    }

    offset
}

/// Apparent temperature plus the wearer's offset.
pub fn feels_like(profile: &UserProfile, weather: &WeatherContext) -> f64 {
    weather.current.temp_apparent + thermal_offset(profile, weather)
}

pub fn warmth_range(profile: &UserProfile, weather: &WeatherContext) -> WarmthRange {
    WarmthRange::for_feels_like(feels_like(profile, weather))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{OwnerId, ThermalSensitivity};
    use crate::domain::weather::{CurrentConditions, WeatherSignals};

    fn weather(real: f64, apparent: f64, wind: f64) -> WeatherContext {
        WeatherContext {
            location: "Xiamen".to_string(),
            summary: "clear".to_string(),
            current: CurrentConditions {
                temp_real: real,
                temp_apparent: apparent,
                humidity: 0.5,
                wind_speed: wind,
                sky: None,
            },
            today: None,
            signals: WeatherSignals::default(),
        }
    }

    fn profile(sensitivity: i8, commute: CommuteMethod) -> UserProfile {
        let mut p = UserProfile::default_for(OwnerId::new("u"));
        p.thermal_sensitivity = ThermalSensitivity::new(sensitivity).unwrap();
        p.commute = commute;
        p
    }

    #[test]
    fn test_sensitivity_doubles() {
        let w = weather(20.0, 20.0, 0.0);
        assert_eq!(thermal_offset(&profile(-2, CommuteMethod::Walk), &w), -4.0);
        assert_eq!(thermal_offset(&profile(1, CommuteMethod::Walk), &w), 2.0);
    }

    #[test]
    fn test_driving_in_the_cold() {
        let p = profile(0, CommuteMethod::Drive);
        assert_eq!(thermal_offset(&p, &weather(9.9, 8.0, 0.0)), 3.0);
        assert_eq!(thermal_offset(&p, &weather(10.0, 8.0, 0.0)), 0.0);
    }

    #[test]
    fn test_cycling_in_the_wind() {
        let p = profile(-1, CommuteMethod::Cycle);
        assert_eq!(thermal_offset(&p, &weather(15.0, 15.0, 6.0)), -4.0);
        assert_eq!(thermal_offset(&p, &weather(15.0, 15.0, 5.0)), -2.0);
    }

    #[test]
    fn test_warmth_range_uses_feels_like() {
        // apparent 20, sensitivity -1 => 18, still (2, 3)
        let p = profile(-1, CommuteMethod::Walk);
        assert_eq!(warmth_range(&p, &weather(20.0, 20.0, 0.0)), WarmthRange::new(2, 3));
        // cycling in wind drops it below 18
        let p = profile(-1, CommuteMethod::Cycle);
        assert_eq!(warmth_range(&p, &weather(20.0, 20.0, 8.0)), WarmthRange::new(3, 4));
    }
}
