// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Virtual Garment Synthesis Rules
//!
//! When a mandatory category has no retrievable candidate, the engine
//! manufactures a plausible garment. Its attributes are derived
//! deterministically from `(category, style, warmth, commute)` through a
//! declarative rule table:
//!
//! 1. Start from [`AttributeSet::baseline`] (black, solid, medium breathability).
//! 2. Apply the **first** matching rule of [`BASE_RULES`] for the category.
//! 3. Apply **every** matching rule of [`OVERLAY_RULES`], in table order.
//!
//! Rendering the garment is delegated to the [`ImageSynthesizer`]
//! collaborator; see `crate::application::synthesis` for the timeout and
//! placeholder handling.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::garment::{
    Breathability, Category, ColorPattern, Fit, Garment, GarmentId, GenderTag, LayerTag,
    OwnershipStatus, WarmthLevel, WaterproofTier,
};
use crate::domain::profile::{CommuteMethod, OwnerId};
use crate::domain::request::style::{BUSINESS, ELEGANT, SPORT, STREET, WORKWEAR};
use crate::domain::DomainError;

/// Asset shown when rendering fails or times out.
pub const PLACEHOLDER_ASSET: &str = "uploads/default_virtual.jpg";

/// Fixed contribution of a synthesized garment to the aggregate score.
pub const SYNTHESIZED_SCORE: f64 = 80.0;

/// Inputs that select synthesis rules. `gender` and `fit` pass through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisKey {
    pub category: Category,
    pub style: String,
    pub warmth: WarmthLevel,
    pub commute: CommuteMethod,
    pub gender: GenderTag,
    pub fit: Fit,
}

/// Attribute set handed to the image synthesizer and persisted with the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    pub category: Category,
    pub subcategory: String,
    pub layer: Option<LayerTag>,
    pub warmth_level: WarmthLevel,
    pub materials: Vec<String>,
    pub windproof: bool,
    pub waterproof: WaterproofTier,
    pub breathability: Breathability,
    pub color_pattern: ColorPattern,
    pub main_color: String,
    pub fit: Fit,
    pub gender: GenderTag,
    pub styles: Vec<String>,
    pub occasions: Vec<String>,
    pub seasons: Vec<String>,
}

impl AttributeSet {
    pub fn baseline(key: &SynthesisKey) -> Self {
        Self {
            category: key.category,
            subcategory: "other".to_string(),
            layer: None,
            warmth_level: key.warmth,
            materials: vec!["mixed".to_string()],
            windproof: false,
            waterproof: WaterproofTier::None,
            breathability: Breathability::Medium,
            color_pattern: ColorPattern::Solid,
            main_color: "black".to_string(),
            fit: key.fit,
            gender: key.gender,
            styles: vec![key.style.clone()],
            occasions: vec!["commute".to_string(), "casual".to_string()],
            seasons: ["spring", "summer", "autumn", "winter"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Virtual garment carrying these attributes and the rendered asset.
    pub fn into_garment(self, owner: OwnerId, image_url: String) -> Garment {
        Garment {
            id: GarmentId::new(),
            owner,
            category: self.category,
            subcategory: self.subcategory,
            layer: self.layer,
            warmth_level: self.warmth_level,
            materials: self.materials.into_iter().collect(),
            windproof: self.windproof,
            waterproof: Some(self.waterproof),
            breathability: Some(self.breathability),
            color_pattern: self.color_pattern,
            main_color: self.main_color,
            fit: Some(self.fit),
            gender: self.gender,
            styles: self.styles.into_iter().collect(),
            occasions: self.occasions.into_iter().collect(),
            seasons: self.seasons.into_iter().collect::<BTreeSet<_>>(),
            embedding: None,
            image_url: Some(image_url),
            status: OwnershipStatus::Virtual,
            created_at: Utc::now(),
        }
    }
}

/// A garment described by the user and rendered on demand. Unlike the
/// synthesis fallback, nothing is derived from rules; unspecified attributes
/// take plain defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualDesign {
    pub category: Category,
    pub subcategory: String,
    pub main_color: String,
    pub warmth_level: WarmthLevel,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub gender: GenderTag,
}

impl VirtualDesign {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.subcategory.trim().is_empty() {
            return Err(DomainError::MissingField("subcategory"));
        }
        if self.main_color.trim().is_empty() {
            return Err(DomainError::MissingField("main_color"));
        }
        Ok(())
    }

    pub fn into_attributes(self) -> AttributeSet {
        AttributeSet {
            category: self.category,
            subcategory: self.subcategory.trim().to_string(),
            layer: None,
            warmth_level: self.warmth_level,
            materials: self.materials,
            windproof: false,
            waterproof: WaterproofTier::None,
            breathability: Breathability::Medium,
            color_pattern: ColorPattern::Solid,
            main_color: self.main_color.trim().to_string(),
            fit: Fit::Regular,
            gender: self.gender,
            styles: self.styles,
            occasions: vec!["casual".to_string()],
            seasons: self.seasons,
        }
    }
}

// ============================================================================
// Rule Table
// ============================================================================

/// Condition half of a rule. Empty `styles` matches any style.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch {
    pub category: Category,
    pub styles: &'static [&'static str],
    /// Inclusive warmth window.
    pub warmth: (u8, u8),
    pub commute: Option<CommuteMethod>,
}

impl RuleMatch {
    pub fn matches(&self, key: &SynthesisKey) -> bool {
        let w = key.warmth.value();
        self.category == key.category
            && (self.styles.is_empty() || self.styles.contains(&key.style.as_str()))
            && (self.warmth.0..=self.warmth.1).contains(&w)
            && self.commute.is_none_or(|c| c == key.commute)
    }
}

/// Effect half of a rule. `None` leaves the attribute untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEffect {
    pub subcategory: Option<&'static str>,
    pub layer: Option<LayerTag>,
    pub materials: Option<&'static [&'static str]>,
    pub windproof: Option<bool>,
    pub waterproof: Option<WaterproofTier>,
    pub breathability: Option<Breathability>,
    /// Accessories carry no meaningful insulation and are pinned to level 1.
    pub warmth: Option<u8>,
}

impl RuleEffect {
    fn apply(&self, attrs: &mut AttributeSet) {
        if let Some(sub) = self.subcategory {
            attrs.subcategory = sub.to_string();
        }
        if let Some(layer) = self.layer {
            attrs.layer = Some(layer);
        }
        if let Some(materials) = self.materials {
            attrs.materials = materials.iter().map(|m| m.to_string()).collect();
        }
        if let Some(windproof) = self.windproof {
            attrs.windproof = windproof;
        }
        if let Some(waterproof) = self.waterproof {
            attrs.waterproof = waterproof;
        }
        if let Some(breathability) = self.breathability {
            attrs.breathability = breathability;
        }
        if let Some(level) = self.warmth {
            attrs.warmth_level = WarmthLevel::saturating(level as i32);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SynthesisRule {
    pub when: RuleMatch,
    pub then: RuleEffect,
}

const ANY_STYLE: &[&str] = &[];
const ANY_WARMTH: (u8, u8) = (1, 5);
const NONE: RuleEffect = RuleEffect {
    subcategory: None,
    layer: None,
    materials: None,
    windproof: None,
    waterproof: None,
    breathability: None,
    warmth: None,
};

const fn rule(
    category: Category,
    styles: &'static [&'static str],
    warmth: (u8, u8),
    commute: Option<CommuteMethod>,
    then: RuleEffect,
) -> SynthesisRule {
    SynthesisRule {
        when: RuleMatch { category, styles, warmth, commute },
        then,
    }
}

const CYCLE: Option<CommuteMethod> = Some(CommuteMethod::Cycle);

/// First-match rules, one branch per category.
pub const BASE_RULES: &[SynthesisRule] = &[
    // Tops
    rule(Category::Top, ANY_STYLE, (4, 5), CYCLE, RuleEffect {
        subcategory: Some("hardshell-jacket"),
        layer: Some(LayerTag::Outer),
        breathability: Some(Breathability::Low),
        ..NONE
    }),
    rule(Category::Top, ANY_STYLE, (4, 5), None, RuleEffect {
        subcategory: Some("coat"),
        layer: Some(LayerTag::Outer),
        breathability: Some(Breathability::Low),
        ..NONE
    }),
    rule(Category::Top, &[SPORT], (1, 2), None, RuleEffect {
        subcategory: Some("hoodie"),
        layer: Some(LayerTag::Mid),
        breathability: Some(Breathability::High),
        ..NONE
    }),
    rule(Category::Top, &[SPORT], (3, 3), None, RuleEffect {
        subcategory: Some("hoodie"),
        layer: Some(LayerTag::Mid),
        breathability: Some(Breathability::Medium),
        ..NONE
    }),
    rule(Category::Top, ANY_STYLE, (1, 2), None, RuleEffect {
        subcategory: Some("shirt"),
        layer: Some(LayerTag::Mid),
        breathability: Some(Breathability::High),
        ..NONE
    }),
    rule(Category::Top, ANY_STYLE, (3, 3), None, RuleEffect {
        subcategory: Some("shirt"),
        layer: Some(LayerTag::Mid),
        breathability: Some(Breathability::Medium),
        ..NONE
    }),
    // Bottoms
    rule(Category::Bottom, ANY_STYLE, ANY_WARMTH, CYCLE, RuleEffect {
        subcategory: Some("cargo-pants"),
        materials: Some(&["nylon"]),
        windproof: Some(true),
        ..NONE
    }),
    rule(Category::Bottom, &[WORKWEAR, STREET], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("cargo-pants"),
        ..NONE
    }),
    rule(Category::Bottom, &[BUSINESS], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("suit-trousers"),
        ..NONE
    }),
    rule(Category::Bottom, &[SPORT], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("sweatpants"),
        ..NONE
    }),
    rule(Category::Bottom, ANY_STYLE, (3, 5), None, RuleEffect {
        subcategory: Some("casual-pants"),
        materials: Some(&["denim"]),
        ..NONE
    }),
    rule(Category::Bottom, ANY_STYLE, ANY_WARMTH, None, RuleEffect {
        subcategory: Some("casual-pants"),
        materials: Some(&["cotton"]),
        ..NONE
    }),
    // One-pieces
    rule(Category::OnePiece, ANY_STYLE, (3, 5), None, RuleEffect {
        subcategory: Some("dress"),
        materials: Some(&["wool-blend"]),
        breathability: Some(Breathability::Low),
        ..NONE
    }),
    rule(Category::OnePiece, ANY_STYLE, ANY_WARMTH, None, RuleEffect {
        subcategory: Some("dress"),
        materials: Some(&["cotton-linen"]),
        breathability: Some(Breathability::High),
        ..NONE
    }),
    // Shoes
    rule(Category::Shoes, &[SPORT, STREET], (1, 2), None, RuleEffect {
        subcategory: Some("sneakers"),
        materials: Some(&["mesh"]),
        ..NONE
    }),
    rule(Category::Shoes, &[SPORT, STREET], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("sneakers"),
        materials: Some(&["leather"]),
        ..NONE
    }),
    rule(Category::Shoes, &[BUSINESS, ELEGANT], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("leather-shoes"),
        materials: Some(&["genuine-leather"]),
        ..NONE
    }),
    rule(Category::Shoes, ANY_STYLE, (1, 2), None, RuleEffect {
        subcategory: Some("casual-shoes"),
        materials: Some(&["canvas"]),
        ..NONE
    }),
    rule(Category::Shoes, ANY_STYLE, ANY_WARMTH, None, RuleEffect {
        subcategory: Some("casual-shoes"),
        materials: Some(&["cowhide"]),
        ..NONE
    }),
    // Bags
    rule(Category::Bag, &[BUSINESS], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("briefcase"),
        materials: Some(&["genuine-leather"]),
        warmth: Some(1),
        ..NONE
    }),
    rule(Category::Bag, &[SPORT], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("waist-bag"),
        materials: Some(&["nylon"]),
        warmth: Some(1),
        ..NONE
    }),
    rule(Category::Bag, ANY_STYLE, ANY_WARMTH, None, RuleEffect {
        subcategory: Some("shoulder-bag"),
        materials: Some(&["canvas"]),
        warmth: Some(1),
        ..NONE
    }),
    // Hats
    rule(Category::Hat, &[SPORT], (4, 5), None, RuleEffect {
        subcategory: Some("baseball-cap"),
        materials: Some(&["wool"]),
        warmth: Some(1),
        ..NONE
    }),
    rule(Category::Hat, &[SPORT], ANY_WARMTH, None, RuleEffect {
        subcategory: Some("baseball-cap"),
        materials: Some(&["cotton"]),
        warmth: Some(1),
        ..NONE
    }),
    rule(Category::Hat, ANY_STYLE, (4, 5), None, RuleEffect {
        subcategory: Some("bucket-hat"),
        materials: Some(&["wool"]),
        warmth: Some(1),
        ..NONE
    }),
    rule(Category::Hat, ANY_STYLE, ANY_WARMTH, None, RuleEffect {
        subcategory: Some("bucket-hat"),
        materials: Some(&["cotton"]),
        warmth: Some(1),
        ..NONE
    }),
    // Accessories
    rule(Category::Accessory, ANY_STYLE, (4, 5), None, RuleEffect {
        subcategory: Some("scarf"),
        materials: Some(&["cashmere"]),
        warmth: Some(1),
        ..NONE
    }),
    rule(Category::Accessory, ANY_STYLE, ANY_WARMTH, None, RuleEffect {
        subcategory: Some("sunglasses"),
        materials: Some(&["metal"]),
        warmth: Some(1),
        ..NONE
    }),
];

/// Rules applied on top of the base branch, every match in order.
pub const OVERLAY_RULES: &[SynthesisRule] = &[
    rule(Category::Top, ANY_STYLE, (3, 5), CYCLE, RuleEffect {
        windproof: Some(true),
        materials: Some(&["nylon"]),
        ..NONE
    }),
    rule(Category::Top, ANY_STYLE, (1, 2), CYCLE, RuleEffect {
        windproof: Some(true),
        materials: Some(&["cotton"]),
        ..NONE
    }),
    rule(Category::Shoes, ANY_STYLE, ANY_WARMTH, CYCLE, RuleEffect {
        windproof: Some(true),
        waterproof: Some(WaterproofTier::Splash),
        ..NONE
    }),
];

/// Derives the full attribute set for a virtual garment.
pub fn derive_attributes(key: &SynthesisKey) -> AttributeSet {
    let mut attrs = AttributeSet::baseline(key);
    if let Some(base) = BASE_RULES.iter().find(|r| r.when.matches(key)) {
        base.then.apply(&mut attrs);
    }
    for overlay in OVERLAY_RULES.iter().filter(|r| r.when.matches(key)) {
        overlay.then.apply(&mut attrs);
    }
    attrs
}

// ============================================================================
// Image Synthesizer Collaborator
// ============================================================================

/// Reference to a rendered asset (local path or URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

/// Domain interface for the image-synthesis collaborator
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    /// Render a product image for the attribute set and return where it lives
    async fn generate(&self, attributes: &AttributeSet) -> Result<AssetRef, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Synthesis provider error: {0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Asset download failed: {0}")]
    Download(String),

    #[error("Synthesis timed out after {0}s")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(category: Category, style: &str, warmth: u8, commute: CommuteMethod) -> SynthesisKey {
        SynthesisKey {
            category,
            style: style.to_string(),
            warmth: WarmthLevel::new(warmth).unwrap(),
            commute,
            gender: GenderTag::Female,
            fit: Fit::Loose,
        }
    }

    #[test]
    fn test_every_category_has_a_fallback_rule() {
        let categories = [
            Category::Top,
            Category::Bottom,
            Category::OnePiece,
            Category::Shoes,
            Category::Bag,
            Category::Hat,
            Category::Accessory,
        ];
        for category in categories {
            for warmth in 1..=5 {
                let k = key(category, "unheard-of", warmth, CommuteMethod::Walk);
                assert!(
                    BASE_RULES.iter().any(|r| r.when.matches(&k)),
                    "no rule for {category} at warmth {warmth}"
                );
            }
        }
    }

    #[test]
    fn test_heavy_top_is_a_coat() {
        let attrs = derive_attributes(&key(Category::Top, "casual", 4, CommuteMethod::Walk));
        assert_eq!(attrs.subcategory, "coat");
        assert_eq!(attrs.layer, Some(LayerTag::Outer));
        assert_eq!(attrs.breathability, Breathability::Low);
        assert!(!attrs.windproof);
    }

    #[test]
    fn test_cycling_top_is_windproof_nylon() {
        let attrs = derive_attributes(&key(Category::Top, "casual", 4, CommuteMethod::Cycle));
        assert_eq!(attrs.subcategory, "hardshell-jacket");
        assert!(attrs.windproof);
        assert_eq!(attrs.materials, vec!["nylon".to_string()]);

        let light = derive_attributes(&key(Category::Top, "casual", 2, CommuteMethod::Cycle));
        assert_eq!(light.subcategory, "shirt");
        assert_eq!(light.breathability, Breathability::High);
        assert_eq!(light.materials, vec!["cotton".to_string()]);
    }

    #[test]
    fn test_sport_top_is_hoodie() {
        let attrs = derive_attributes(&key(Category::Top, "sport", 3, CommuteMethod::Drive));
        assert_eq!(attrs.subcategory, "hoodie");
        assert_eq!(attrs.layer, Some(LayerTag::Mid));
        assert_eq!(attrs.breathability, Breathability::Medium);
    }

    #[test]
    fn test_cycling_overrides_bottom_style() {
        let attrs = derive_attributes(&key(Category::Bottom, "business", 3, CommuteMethod::Cycle));
        assert_eq!(attrs.subcategory, "cargo-pants");
        assert!(attrs.windproof);

        let attrs = derive_attributes(&key(Category::Bottom, "business", 3, CommuteMethod::Transit));
        assert_eq!(attrs.subcategory, "suit-trousers");

        let attrs = derive_attributes(&key(Category::Bottom, "casual", 2, CommuteMethod::Transit));
        assert_eq!(attrs.materials, vec!["cotton".to_string()]);
    }

    #[test]
    fn test_sport_shoes_material_by_warmth() {
        let light = derive_attributes(&key(Category::Shoes, "sport", 1, CommuteMethod::Walk));
        assert_eq!(light.subcategory, "sneakers");
        assert_eq!(light.materials, vec!["mesh".to_string()]);

        let cycling = derive_attributes(&key(Category::Shoes, "elegant", 4, CommuteMethod::Cycle));
        assert_eq!(cycling.subcategory, "leather-shoes");
        assert!(cycling.windproof);
        assert_eq!(cycling.waterproof, WaterproofTier::Splash);
    }

    #[test]
    fn test_accessories_pinned_to_lowest_warmth() {
        let scarf = derive_attributes(&key(Category::Accessory, "casual", 5, CommuteMethod::Walk));
        assert_eq!(scarf.subcategory, "scarf");
        assert_eq!(scarf.warmth_level.value(), 1);

        let bag = derive_attributes(&key(Category::Bag, "business", 4, CommuteMethod::Walk));
        assert_eq!(bag.subcategory, "briefcase");
        assert_eq!(bag.warmth_level.value(), 1);
    }

    #[test]
    fn test_pass_through_attributes() {
        let attrs = derive_attributes(&key(Category::OnePiece, "elegant", 2, CommuteMethod::Walk));
        assert_eq!(attrs.gender, GenderTag::Female);
        assert_eq!(attrs.fit, Fit::Loose);
        assert_eq!(attrs.styles, vec!["elegant".to_string()]);
        assert_eq!(attrs.main_color, "black");
    }

    #[test]
    fn test_into_garment_is_virtual() {
        let attrs = derive_attributes(&key(Category::Hat, "sport", 2, CommuteMethod::Walk));
        let garment = attrs.into_garment(OwnerId::new("alice"), PLACEHOLDER_ASSET.to_string());
        assert!(garment.is_virtual());
        assert!(garment.embedding().is_none());
        assert_eq!(garment.image_url.as_deref(), Some(PLACEHOLDER_ASSET));
        assert!(garment.validate().is_ok());
    }

    #[test]
    fn test_virtual_design_defaults() {
        let design: VirtualDesign = serde_json::from_str(
            r#"{"category":"top","subcategory":" cardigan ","main_color":"cream","warmth_level":3}"#,
        )
        .unwrap();
        assert!(design.validate().is_ok());
        assert_eq!(design.gender, GenderTag::Neutral);

        let attrs = design.into_attributes();
        assert_eq!(attrs.subcategory, "cardigan");
        assert_eq!(attrs.fit, Fit::Regular);
        assert_eq!(attrs.color_pattern, ColorPattern::Solid);
        assert_eq!(attrs.occasions, vec!["casual".to_string()]);
        assert!(attrs.layer.is_none());
    }

    #[test]
    fn test_virtual_design_requires_color() {
        let design = VirtualDesign {
            category: Category::Bottom,
            subcategory: "culottes".to_string(),
            main_color: "  ".to_string(),
            warmth_level: WarmthLevel::new(2).unwrap(),
            materials: vec![],
            styles: vec![],
            seasons: vec![],
            gender: GenderTag::Female,
        };
        assert_eq!(design.validate(), Err(DomainError::MissingField("main_color")));
    }
}
