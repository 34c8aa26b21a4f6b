// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! User Profile
//!
//! Physiological and lifestyle profile. One per owner, created lazily with
//! defaults the first time it is read and changed only by explicit updates.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements profile

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::garment::Fit;
use crate::domain::DomainError;

/// Opaque user identifier issued by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommuteMethod {
    Drive,
    Transit,
    #[default]
    Cycle,
    Walk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupation {
    #[default]
    Student,
    /// Finance, legal and public-sector jobs with an enforced dress code.
    FinanceLegalPublic,
    Outdoor,
    Office,
    Other,
}

impl Occupation {
    pub fn is_dress_code_constrained(self) -> bool {
        matches!(self, Occupation::FinanceLegalPublic)
    }
}

/// Thermal sensitivity from -2 (very cold-sensitive) to 2 (very heat-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct ThermalSensitivity(i8);

impl ThermalSensitivity {
    pub fn new(value: i8) -> Result<Self, DomainError> {
        if (-2..=2).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::SensitivityOutOfRange(value))
        }
    }

    pub fn value(self) -> i8 {
        self.0
    }

    pub fn is_cold_sensitive(self) -> bool {
        self.0 < 0
    }
}

impl TryFrom<i8> for ThermalSensitivity {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThermalSensitivity> for i8 {
    fn from(s: ThermalSensitivity) -> Self {
        s.0
    }
}

fn default_fit() -> Fit {
    Fit::Regular
}

fn default_body_shape() -> String {
    "standard".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub owner: OwnerId,
    #[serde(default)]
    pub thermal_sensitivity: ThermalSensitivity,
    #[serde(default)]
    pub sweat_tendency: bool,
    #[serde(default = "default_body_shape")]
    pub body_shape: String,
    #[serde(default)]
    pub commute: CommuteMethod,
    #[serde(default)]
    pub occupation: Occupation,
    #[serde(default = "default_fit")]
    pub fit_preference: Fit,
    #[serde(default)]
    pub avoid_colors: BTreeSet<String>,
    #[serde(default)]
    pub preferred_colors: BTreeSet<String>,
    #[serde(default)]
    pub preferred_styles: BTreeSet<String>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Profile with the documented defaults: neutral sensitivity, cycling
    /// commute, student occupation, regular fit, no color or style preferences.
    pub fn default_for(owner: OwnerId) -> Self {
        Self {
            owner,
            thermal_sensitivity: ThermalSensitivity::default(),
            sweat_tendency: false,
            body_shape: default_body_shape(),
            commute: CommuteMethod::default(),
            occupation: Occupation::default(),
            fit_preference: default_fit(),
            avoid_colors: BTreeSet::new(),
            preferred_colors: BTreeSet::new(),
            preferred_styles: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }

    /// Applies only the fields present in the update.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(v) = update.thermal_sensitivity {
            self.thermal_sensitivity = v;
        }
        if let Some(v) = update.sweat_tendency {
            self.sweat_tendency = v;
        }
        if let Some(v) = update.body_shape {
            self.body_shape = v;
        }
        if let Some(v) = update.commute {
            self.commute = v;
        }
        if let Some(v) = update.occupation {
            self.occupation = v;
        }
        if let Some(v) = update.fit_preference {
            self.fit_preference = v;
        }
        if let Some(v) = update.avoid_colors {
            self.avoid_colors = v;
        }
        if let Some(v) = update.preferred_colors {
            self.preferred_colors = v;
        }
        if let Some(v) = update.preferred_styles {
            self.preferred_styles = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial profile update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub thermal_sensitivity: Option<ThermalSensitivity>,
    pub sweat_tendency: Option<bool>,
    pub body_shape: Option<String>,
    pub commute: Option<CommuteMethod>,
    pub occupation: Option<Occupation>,
    pub fit_preference: Option<Fit>,
    pub avoid_colors: Option<BTreeSet<String>>,
    pub preferred_colors: Option<BTreeSet<String>>,
    pub preferred_styles: Option<BTreeSet<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = UserProfile::default_for(OwnerId::new("bob"));
        assert_eq!(profile.thermal_sensitivity.value(), 0);
        assert_eq!(profile.commute, CommuteMethod::Cycle);
        assert_eq!(profile.occupation, Occupation::Student);
        assert_eq!(profile.fit_preference, Fit::Regular);
        assert!(profile.avoid_colors.is_empty());
    }

    #[test]
    fn test_sensitivity_range() {
        assert!(ThermalSensitivity::new(-3).is_err());
        assert!(ThermalSensitivity::new(3).is_err());
        assert!(ThermalSensitivity::new(-1).unwrap().is_cold_sensitive());
        let parsed: Result<ThermalSensitivity, _> = serde_json::from_str("5");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_partial_update() {
        let mut profile = UserProfile::default_for(OwnerId::new("bob"));
        profile.apply(ProfileUpdate {
            commute: Some(CommuteMethod::Drive),
            avoid_colors: Some(["red".to_string()].into_iter().collect()),
            ..Default::default()
        });

        assert_eq!(profile.commute, CommuteMethod::Drive);
        assert!(profile.avoid_colors.contains("red"));
        assert_eq!(profile.occupation, Occupation::Student);
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let profile: UserProfile = serde_json::from_str(r#"{"owner":"carol"}"#).unwrap();
        assert_eq!(profile.owner.as_str(), "carol");
        assert_eq!(profile.commute, CommuteMethod::Cycle);
        assert_eq!(profile.body_shape, "standard");
    }
}
