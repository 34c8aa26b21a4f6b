// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each aggregate, following the DDD Repository
//! pattern: interface defined in the domain layer, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `GarmentStore` | `Garment` | `InMemoryGarmentStore` |
//! | `FeedbackStore` | `FeedbackRecord` | `InMemoryFeedbackStore` |
//! | `ProfileStore` | `UserProfile` | `InMemoryProfileStore` |
//!
//! Storage transactions are out of scope for the engine: the only write issued
//! during a recommendation is the single-row insert of a virtual garment.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::feedback::FeedbackRecord;
use crate::domain::garment::{Category, Garment, GarmentId, GenderTag, OwnershipStatus};
use crate::domain::profile::{OwnerId, UserProfile};
use crate::domain::warmth::WarmthRange;

/// Structured garment query. Every populated criterion must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct GarmentQuery {
    pub owner: OwnerId,
    pub category: Category,
    pub status: OwnershipStatus,
    /// Inclusive warmth window; `None` means warmth-exempt.
    pub warmth: Option<WarmthRange>,
    /// Admissible gender tags (`genderIn`).
    pub genders: Vec<GenderTag>,
    /// Main colors to exclude, compared case-insensitively.
    pub excluded_colors: BTreeSet<String>,
    /// Minor categories to exclude, compared case-insensitively.
    pub excluded_subcategories: BTreeSet<String>,
}

impl GarmentQuery {
    pub fn new(owner: OwnerId, category: Category) -> Self {
        Self {
            owner,
            category,
            status: OwnershipStatus::Owned,
            warmth: None,
            genders: vec![GenderTag::Neutral, GenderTag::Male, GenderTag::Female],
            excluded_colors: BTreeSet::new(),
            excluded_subcategories: BTreeSet::new(),
        }
    }

    pub fn matches(&self, garment: &Garment) -> bool {
        if garment.owner != self.owner
            || garment.category != self.category
            || garment.status != self.status
        {
            return false;
        }
        if let Some(range) = self.warmth {
            if !range.contains(garment.warmth_level) {
                return false;
            }
        }
        if !self.genders.contains(&garment.gender) {
            return false;
        }
        if contains_ignore_case(&self.excluded_colors, &garment.main_color) {
            return false;
        }
        !contains_ignore_case(&self.excluded_subcategories, &garment.subcategory)
    }
}

fn contains_ignore_case(set: &BTreeSet<String>, value: &str) -> bool {
    let value = value.trim();
    set.iter().any(|s| s.trim().eq_ignore_ascii_case(value))
}

/// Repository interface for Garment aggregates
#[async_trait]
pub trait GarmentStore: Send + Sync {
    /// Garments matching every criterion of the query, in insertion order
    async fn query(&self, query: &GarmentQuery) -> Result<Vec<Garment>, RepositoryError>;

    /// Persist a new garment atomically and return the stored row
    async fn insert(&self, garment: Garment) -> Result<Garment, RepositoryError>;

    /// Find garment by ID
    async fn find_by_id(&self, id: GarmentId) -> Result<Option<Garment>, RepositoryError>;

    /// Replace an existing garment
    async fn update(&self, garment: &Garment) -> Result<(), RepositoryError>;

    /// Delete garment by ID. Deleting a missing garment is not an error.
    async fn delete(&self, owner: &OwnerId, id: GarmentId) -> Result<(), RepositoryError>;

    /// List every garment of an owner, owned and virtual
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Garment>, RepositoryError>;
}

/// Repository interface for the append-only feedback log
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<FeedbackRecord>, RepositoryError>;

    async fn append(&self, record: FeedbackRecord) -> Result<(), RepositoryError>;
}

/// Repository interface for user profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile for the owner, or the documented defaults when none is stored
    async fn get_by_owner(&self, owner: &OwnerId) -> Result<UserProfile, RepositoryError>;

    /// Create or replace the owner's profile
    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::garment::WarmthLevel;

    fn garment(color: &str, sub: &str, warmth: u8) -> Garment {
        Garment::new(
            OwnerId::new("alice"),
            Category::Bottom,
            sub,
            WarmthLevel::new(warmth).unwrap(),
            color,
        )
    }

    #[test]
    fn test_query_matches_structural_fields() {
        let query = GarmentQuery::new(OwnerId::new("alice"), Category::Bottom);
        assert!(query.matches(&garment("black", "jeans", 3)));

        let other_owner = GarmentQuery::new(OwnerId::new("bob"), Category::Bottom);
        assert!(!other_owner.matches(&garment("black", "jeans", 3)));

        let mut virtual_item = garment("black", "jeans", 3);
        virtual_item.status = OwnershipStatus::Virtual;
        assert!(!query.matches(&virtual_item));
    }

    #[test]
    fn test_query_exclusions_ignore_case() {
        let mut query = GarmentQuery::new(OwnerId::new("alice"), Category::Bottom);
        query.excluded_colors.insert("Red".to_string());
        query.excluded_subcategories.insert("skirt".to_string());

        assert!(!query.matches(&garment("red", "jeans", 3)));
        assert!(!query.matches(&garment("black", "Skirt", 3)));
        assert!(query.matches(&garment("black", "jeans", 3)));
    }

    #[test]
    fn test_query_warmth_and_gender() {
        let mut query = GarmentQuery::new(OwnerId::new("alice"), Category::Bottom);
        query.warmth = Some(WarmthRange::new(2, 3));
        query.genders = vec![GenderTag::Neutral];

        assert!(query.matches(&garment("black", "jeans", 2)));
        assert!(!query.matches(&garment("black", "jeans", 4)));

        let mut menswear = garment("black", "jeans", 2);
        menswear.gender = GenderTag::Male;
        assert!(!query.matches(&menswear));
    }
}
