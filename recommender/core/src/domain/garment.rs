// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Garment Aggregate
//!
//! A single wardrobe item, either owned (photographed and catalogued by the
//! user) or virtual (manufactured by the synthesis fallback to fill a gap).
//!
//! ## Invariants
//!
//! - `warmth_level` is always within `[1, 5]` (see [`WarmthLevel`]).
//! - `embedding`, when present and non-empty, has exactly
//!   [`EMBEDDING_DIMENSIONS`] components. Absence is a valid state: virtual
//!   garments never carry an embedding.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Garment aggregate, attribute enums and material classes

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profile::OwnerId;
use crate::domain::DomainError;

/// Dimensionality of the visual embedding vector (CLIP image features).
pub const EMBEDDING_DIMENSIONS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GarmentId(pub Uuid);

impl GarmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for GarmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GarmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Major garment category. Each category maps to exactly one outfit slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Top,
    Bottom,
    OnePiece,
    Shoes,
    Bag,
    Hat,
    Accessory,
}

impl Category {
    /// Only upper and lower body garments are filtered by warmth level.
    /// Shoes, bags, hats and accessories are warmth-exempt.
    pub fn is_warmth_gated(self) -> bool {
        matches!(self, Category::Top | Category::Bottom)
    }

    pub fn slot(self) -> Slot {
        match self {
            Category::Top => Slot::Top,
            Category::Bottom => Slot::Bottom,
            Category::OnePiece => Slot::OnePiece,
            Category::Shoes => Slot::Shoes,
            Category::Bag => Slot::Bag,
            Category::Hat => Slot::Hat,
            Category::Accessory => Slot::Accessory,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::OnePiece => "one-piece",
            Category::Shoes => "shoes",
            Category::Bag => "bag",
            Category::Hat => "hat",
            Category::Accessory => "accessory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outfit slot. `Outer` has no category of its own: outer layers are tops
/// whose [`LayerTag`] marks them as outerwear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Top,
    Bottom,
    OnePiece,
    Outer,
    Shoes,
    Bag,
    Hat,
    Accessory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerTag {
    Base,
    Mid,
    Outer,
    #[serde(rename = "Outer_Heavy")]
    OuterHeavy,
    Unknown,
}

impl LayerTag {
    pub fn is_outerwear(self) -> bool {
        matches!(self, LayerTag::Outer | LayerTag::OuterHeavy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterproofTier {
    None,
    Splash,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breathability {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Slim,
    Regular,
    Loose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderTag {
    #[default]
    Neutral,
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPattern {
    #[default]
    Solid,
    Striped,
    Plaid,
    Printed,
    /// Color-blocked or otherwise busy patterns. Two of these clash.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipStatus {
    #[default]
    Owned,
    Virtual,
}

/// Warmth level on the 1 (lightest) to 5 (heaviest) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WarmthLevel(u8);

impl WarmthLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(DomainError::WarmthOutOfRange(level))
        }
    }

    /// Clamps any integer into the valid range.
    pub fn saturating(level: i32) -> Self {
        Self(level.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for WarmthLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WarmthLevel> for u8 {
    fn from(level: WarmthLevel) -> Self {
        level.0
    }
}

/// Coarse material families the scoring rules react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialClass {
    /// Suede, silk, wool, cashmere: damaged by rain.
    Delicate,
    /// Polyester, nylon-blend, leather: trap heat and sweat.
    SyntheticOrLeather,
    /// Cotton, linen, silk: comfortable when sweating.
    BreathableNatural,
}

/// Returns every class the material belongs to. Matching is case-insensitive
/// and substring based so that "wool blend" still counts as wool.
pub fn material_classes(material: &str) -> Vec<MaterialClass> {
    const DELICATE: &[&str] = &["suede", "silk", "wool", "cashmere"];
    const SYNTHETIC_OR_LEATHER: &[&str] = &["polyester", "leather"];
    const BREATHABLE_NATURAL: &[&str] = &["cotton", "linen", "silk"];

    let m = material.trim().to_lowercase();
    let mut classes = Vec::new();
    if DELICATE.iter().any(|k| m.contains(k)) {
        classes.push(MaterialClass::Delicate);
    }
    if SYNTHETIC_OR_LEATHER.iter().any(|k| m.contains(k)) {
        classes.push(MaterialClass::SyntheticOrLeather);
    }
    if BREATHABLE_NATURAL.iter().any(|k| m.contains(k)) {
        classes.push(MaterialClass::BreathableNatural);
    }
    classes
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    pub id: GarmentId,
    pub owner: OwnerId,
    pub category: Category,
    /// Minor category, e.g. "shirt", "jeans", "sandals".
    pub subcategory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerTag>,
    pub warmth_level: WarmthLevel,
    #[serde(default)]
    pub materials: BTreeSet<String>,
    #[serde(default)]
    pub windproof: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waterproof: Option<WaterproofTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breathability: Option<Breathability>,
    #[serde(default)]
    pub color_pattern: ColorPattern,
    pub main_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<Fit>,
    #[serde(default)]
    pub gender: GenderTag,
    #[serde(default)]
    pub styles: BTreeSet<String>,
    #[serde(default)]
    pub occasions: BTreeSet<String>,
    #[serde(default)]
    pub seasons: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: OwnershipStatus,
    pub created_at: DateTime<Utc>,
}

impl Garment {
    /// Creates an owned garment with neutral defaults for every optional attribute.
    pub fn new(
        owner: OwnerId,
        category: Category,
        subcategory: impl Into<String>,
        warmth_level: WarmthLevel,
        main_color: impl Into<String>,
    ) -> Self {
        Self {
            id: GarmentId::new(),
            owner,
            category,
            subcategory: subcategory.into(),
            layer: None,
            warmth_level,
            materials: BTreeSet::new(),
            windproof: false,
            waterproof: None,
            breathability: None,
            color_pattern: ColorPattern::Solid,
            main_color: main_color.into(),
            fit: None,
            gender: GenderTag::Neutral,
            styles: BTreeSet::new(),
            occasions: BTreeSet::new(),
            seasons: BTreeSet::new(),
            embedding: None,
            image_url: None,
            status: OwnershipStatus::Owned,
            created_at: Utc::now(),
        }
    }

    /// The embedding as a slice, treating an empty vector as absent.
    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|e| !e.is_empty())
    }

    pub fn is_outerwear(&self) -> bool {
        self.layer.is_some_and(LayerTag::is_outerwear)
    }

    pub fn is_virtual(&self) -> bool {
        self.status == OwnershipStatus::Virtual
    }

    pub fn has_material_class(&self, class: MaterialClass) -> bool {
        self.materials
            .iter()
            .any(|m| material_classes(m).contains(&class))
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.styles.contains(style)
    }

    /// Checks the aggregate invariants that serde alone cannot enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.subcategory.trim().is_empty() {
            return Err(DomainError::MissingField("subcategory"));
        }
        if self.main_color.trim().is_empty() {
            return Err(DomainError::MissingField("main_color"));
        }
        if let Some(embedding) = self.embedding() {
            if embedding.len() != EMBEDDING_DIMENSIONS {
                return Err(DomainError::EmbeddingDimension {
                    expected: EMBEDDING_DIMENSIONS,
                    actual: embedding.len(),
                });
            }
        }
        Ok(())
    }
}
