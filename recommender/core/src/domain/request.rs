// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Recommendation Request
//!
//! [`RecommendationRequest`] is the raw, transport-shaped request with
//! optional fields. It is validated exactly once at the boundary into a
//! [`RecommendationConfig`]; the engine never reads raw request fields.
//!
//! Validation resolves the category set: duplicates collapse to their first
//! occurrence and a requested one-piece supersedes separate top and bottom
//! slots. An empty resolved set is an input error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::garment::{Category, GenderTag};
use crate::domain::profile::OwnerId;
use crate::domain::DomainError;

/// Well-known style tags. Garment style tags are free-form, these are the ones
/// the engine's rules react to.
pub mod style {
    pub const CASUAL: &str = "casual";
    pub const BUSINESS: &str = "business";
    pub const SPORT: &str = "sport";
    pub const STREET: &str = "street";
    pub const VINTAGE: &str = "vintage";
    pub const MINIMALIST: &str = "minimalist";
    pub const ELEGANT: &str = "elegant";
    pub const JAPANESE: &str = "japanese";
    pub const WORKWEAR: &str = "workwear";
    pub const SWEET_COOL: &str = "sweet-cool";

    pub const DEFAULTS: &[&str] = &[
        CASUAL, BUSINESS, SPORT, STREET, VINTAGE, MINIMALIST, ELEGANT, JAPANESE, WORKWEAR,
        SWEET_COOL,
    ];

    /// Styles loose enough that menswear is acceptable for female users.
    pub fn admits_menswear(style: &str) -> bool {
        matches!(style, STREET | SPORT | CASUAL)
    }
}

pub const DEFAULT_LOCATION: &str = "Xiamen";

/// Built-in scenario tags. Any garment occasion is also a valid scenario.
pub mod scenario {
    pub const COMMUTE: &str = "commute";
    pub const HOME: &str = "home";
    pub const OUTDOOR: &str = "outdoor";
    pub const DATE: &str = "date";
    pub const FORMAL_BANQUET: &str = "formal-banquet";
    pub const TRAVEL: &str = "travel";
    pub const SPORT: &str = "sport";
    pub const SHOPPING: &str = "shopping";

    pub const DEFAULTS: &[&str] = &[
        COMMUTE, HOME, OUTDOOR, DATE, FORMAL_BANQUET, TRAVEL, SPORT, SHOPPING,
    ];
}

/// Occasion the outfit is for, normalised to a trimmed lower-case tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Scenario(String);

impl Scenario {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_lowercase())
    }

    pub fn commute() -> Self {
        Self::new(scenario::COMMUTE)
    }

    /// Scenarios in which an occupational dress code applies.
    pub fn is_formal(&self) -> bool {
        matches!(self.0.as_str(), scenario::COMMUTE | scenario::FORMAL_BANQUET)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Scenario {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<Scenario> for String {
    fn from(scenario: Scenario) -> Self {
        scenario.0
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    #[default]
    Male,
    Female,
    Neutral,
}

impl GenderPreference {
    /// Gender tag given to synthesized garments.
    pub fn target_tag(self) -> GenderTag {
        match self {
            GenderPreference::Male => GenderTag::Male,
            GenderPreference::Female => GenderTag::Female,
            GenderPreference::Neutral => GenderTag::Neutral,
        }
    }

    /// Garment gender tags admissible for this wearer. Neutral and womenswear
    /// pass for every non-male wearer; menswear joins only under a loose style
    /// or in relaxed retrieval. Womenswear never passes for men.
    pub fn admitted_tags(self, style: &str, relaxed: bool) -> Vec<GenderTag> {
        match self {
            GenderPreference::Male => vec![GenderTag::Neutral, GenderTag::Male],
            GenderPreference::Female | GenderPreference::Neutral => {
                let mut tags = vec![GenderTag::Neutral, GenderTag::Female];
                if relaxed || style::admits_menswear(style) {
                    tags.push(GenderTag::Male);
                }
                tags
            }
        }
    }
}

fn default_categories() -> Vec<Category> {
    vec![Category::Top, Category::Bottom]
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub owner: OwnerId,
    pub scenario: Scenario,
    #[serde(default)]
    pub style: String,
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub gender: GenderPreference,
    #[serde(default = "default_location")]
    pub location: String,
}

/// Validated, defaulted request consumed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationConfig {
    pub owner: OwnerId,
    pub scenario: Scenario,
    /// Normalised (trimmed, lower-case) style tag; `casual` when omitted.
    pub style: String,
    /// Resolved categories in request order.
    pub categories: Vec<Category>,
    pub gender: GenderPreference,
    pub location: String,
}

impl RecommendationConfig {
    pub fn from_request(request: RecommendationRequest) -> Result<Self, DomainError> {
        if request.owner.as_str().trim().is_empty() {
            return Err(DomainError::MissingField("owner"));
        }
        if request.scenario.is_empty() {
            return Err(DomainError::MissingField("scenario"));
        }

        let style = match request.style.trim().to_lowercase() {
            s if s.is_empty() => style::CASUAL.to_string(),
            s => s,
        };

        let location = match request.location.trim() {
            "" => default_location(),
            l => l.to_string(),
        };

        let categories = resolve_categories(&request.categories);
        if categories.is_empty() {
            return Err(DomainError::EmptyCategorySet);
        }

        Ok(Self {
            owner: request.owner,
            scenario: request.scenario,
            style,
            categories,
            gender: request.gender,
            location,
        })
    }
}

/// Deduplicates (first occurrence wins) and applies one-piece exclusion.
pub fn resolve_categories(requested: &[Category]) -> Vec<Category> {
    let one_piece = requested.contains(&Category::OnePiece);
    let mut resolved = Vec::with_capacity(requested.len());
    for &category in requested {
        if one_piece && matches!(category, Category::Top | Category::Bottom) {
            continue;
        }
        if !resolved.contains(&category) {
            resolved.push(category);
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(categories: Vec<Category>) -> RecommendationRequest {
        RecommendationRequest {
            owner: OwnerId::new("alice"),
            scenario: Scenario::commute(),
            style: "  Street ".to_string(),
            categories,
            gender: GenderPreference::Female,
            location: String::new(),
        }
    }

    #[test]
    fn test_one_piece_supersedes_top_and_bottom() {
        let resolved = resolve_categories(&[Category::OnePiece, Category::Top, Category::Bottom]);
        assert_eq!(resolved, vec![Category::OnePiece]);

        let resolved = resolve_categories(&[Category::Top, Category::Shoes, Category::OnePiece]);
        assert_eq!(resolved, vec![Category::Shoes, Category::OnePiece]);
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let resolved = resolve_categories(&[Category::Bottom, Category::Top, Category::Bottom]);
        assert_eq!(resolved, vec![Category::Bottom, Category::Top]);
    }

    #[test]
    fn test_config_normalises_fields() {
        let config = RecommendationConfig::from_request(request(vec![Category::Top])).unwrap();
        assert_eq!(config.style, "street");
        assert_eq!(config.location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_empty_category_set_rejected() {
        let result = RecommendationConfig::from_request(request(vec![]));
        assert!(matches!(result, Err(DomainError::EmptyCategorySet)));
    }

    #[test]
    fn test_request_defaults_on_deserialize() {
        let req: RecommendationRequest =
            serde_json::from_str(r#"{"owner":"bob","scenario":"date"}"#).unwrap();
        assert_eq!(req.categories, vec![Category::Top, Category::Bottom]);
        assert_eq!(req.gender, GenderPreference::Male);
        assert_eq!(req.location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_custom_scenario_is_normalised() {
        let req: RecommendationRequest = serde_json::from_str(
            r#"{"owner":"alice","scenario":" Weekend-Market ","style":"casual"}"#,
        )
        .unwrap();
        assert_eq!(req.scenario.as_str(), "weekend-market");
        assert!(!req.scenario.is_formal());

        let config = RecommendationConfig::from_request(req).unwrap();
        assert_eq!(config.scenario, Scenario::new("weekend-market"));
    }

    #[test]
    fn test_formal_scenarios() {
        assert!(Scenario::new("Commute").is_formal());
        assert!(Scenario::new("formal-banquet").is_formal());
        assert!(!Scenario::new("date").is_formal());
        assert!(!Scenario::new("formal-dinner").is_formal());
    }

    #[test]
    fn test_blank_scenario_rejected() {
        let mut req = request(vec![Category::Top]);
        req.scenario = Scenario::new("   ");
        let result = RecommendationConfig::from_request(req);
        assert!(matches!(result, Err(DomainError::MissingField("scenario"))));
    }

    #[test]
    fn test_neutral_gender_preference() {
        let req: RecommendationRequest =
            serde_json::from_str(r#"{"owner":"alice","scenario":"date","gender":"neutral"}"#)
                .unwrap();
        assert_eq!(req.gender, GenderPreference::Neutral);
        assert_eq!(req.gender.target_tag(), GenderTag::Neutral);

        let strict = GenderPreference::Neutral.admitted_tags("business", false);
        assert_eq!(strict, vec![GenderTag::Neutral, GenderTag::Female]);
        let relaxed = GenderPreference::Neutral.admitted_tags("business", true);
        assert!(relaxed.contains(&GenderTag::Male));
    }

    #[test]
    fn test_gender_admission() {
        let male = GenderPreference::Male.admitted_tags("street", true);
        assert!(!male.contains(&GenderTag::Female));

        let female = GenderPreference::Female.admitted_tags("business", false);
        assert_eq!(female, vec![GenderTag::Neutral, GenderTag::Female]);

        let female = GenderPreference::Female.admitted_tags("sport", false);
        assert!(female.contains(&GenderTag::Male));

        let female = GenderPreference::Female.admitted_tags("business", true);
        assert!(female.contains(&GenderTag::Male));
    }
}
