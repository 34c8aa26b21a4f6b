// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Wardrobe Service
//!
//! Catalogue management for owned garments, the tag vocabulary the client
//! offers when the user picks a style or occasion, and the virtual designer
//! that renders a user-described garment into the wardrobe.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::domain::garment::{Garment, GarmentId};
use crate::domain::profile::OwnerId;
use crate::domain::repository::GarmentStore;
use crate::domain::request::{scenario, style};
use crate::domain::synthesis::{ImageSynthesizer, VirtualDesign};

/// Style and occasion vocabulary: defaults merged with every tag in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WardrobeTags {
    pub styles: BTreeSet<String>,
    pub occasions: BTreeSet<String>,
}

#[async_trait]
pub trait WardrobeService: Send + Sync {
    async fn register_garment(&self, garment: Garment) -> Result<Garment>;
    async fn get_garment(&self, owner: &OwnerId, id: GarmentId) -> Result<Garment>;
    async fn update_garment(&self, owner: &OwnerId, garment: Garment) -> Result<Garment>;
    async fn delete_garment(&self, owner: &OwnerId, id: GarmentId) -> Result<()>;
    async fn list_garments(&self, owner: &OwnerId) -> Result<Vec<Garment>>;
    async fn tags(&self, owner: &OwnerId) -> Result<WardrobeTags>;
    /// Render a user-described garment and store it as virtual. Rendering
    /// failures are returned, never replaced by a placeholder.
    async fn design_virtual_garment(&self, owner: &OwnerId, design: VirtualDesign) -> Result<Garment>;
}

pub struct StandardWardrobeService {
    garments: Arc<dyn GarmentStore>,
    synthesizer: Arc<dyn ImageSynthesizer>,
}

impl StandardWardrobeService {
    pub fn new(garments: Arc<dyn GarmentStore>, synthesizer: Arc<dyn ImageSynthesizer>) -> Self {
        Self { garments, synthesizer }
    }
}

#[async_trait]
impl WardrobeService for StandardWardrobeService {
    async fn register_garment(&self, garment: Garment) -> Result<Garment> {
        garment.validate().context("Garment failed validation")?;
        let stored = self
            .garments
            .insert(garment)
            .await
            .context("Failed to store garment")?;
        info!(owner = %stored.owner, garment = %stored.id, category = %stored.category, "Registered garment");
        Ok(stored)
    }

    async fn get_garment(&self, owner: &OwnerId, id: GarmentId) -> Result<Garment> {
        self.garments
            .find_by_id(id)
            .await?
            .filter(|g| &g.owner == owner)
            .ok_or_else(|| anyhow!("Garment {} not found", id))
    }

    async fn update_garment(&self, owner: &OwnerId, mut garment: Garment) -> Result<Garment> {
        let existing = self.get_garment(owner, garment.id).await?;
        garment.validate().context("Garment failed validation")?;

        // identity and provenance are not client-editable
        garment.owner = existing.owner;
        garment.created_at = existing.created_at;

        self.garments
            .update(&garment)
            .await
            .context("Failed to update garment")?;
        info!(owner = %garment.owner, garment = %garment.id, "Updated garment");
        Ok(garment)
    }

    async fn delete_garment(&self, owner: &OwnerId, id: GarmentId) -> Result<()> {
        self.garments.delete(owner, id).await?;
        info!(owner = %owner, garment = %id, "Deleted garment");
        Ok(())
    }

    async fn list_garments(&self, owner: &OwnerId) -> Result<Vec<Garment>> {
        Ok(self.garments.list_by_owner(owner).await?)
    }

    async fn tags(&self, owner: &OwnerId) -> Result<WardrobeTags> {
        let mut styles: BTreeSet<String> = style::DEFAULTS.iter().map(|s| s.to_string()).collect();
        let mut occasions: BTreeSet<String> =
            scenario::DEFAULTS.iter().map(|s| s.to_string()).collect();

        for garment in self.garments.list_by_owner(owner).await? {
            styles.extend(garment.styles.into_iter().filter(|s| !s.trim().is_empty()));
            occasions.extend(garment.occasions.into_iter().filter(|o| !o.trim().is_empty()));
        }

        Ok(WardrobeTags { styles, occasions })
    }

    async fn design_virtual_garment(&self, owner: &OwnerId, design: VirtualDesign) -> Result<Garment> {
        design.validate().context("Virtual design failed validation")?;
        let attributes = design.into_attributes();

        let asset = self
            .synthesizer
            .generate(&attributes)
            .await
            .with_context(|| format!("Failed to render virtual {}", attributes.subcategory))?;

        let garment = attributes.into_garment(owner.clone(), asset.0);
        let stored = self
            .garments
            .insert(garment)
            .await
            .context("Failed to store virtual garment")?;
        info!(
            owner = %stored.owner,
            garment = %stored.id,
            category = %stored.category,
            subcategory = %stored.subcategory,
            "Designed virtual garment"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::garment::{Category, GenderTag, OwnershipStatus, WarmthLevel};
    use crate::domain::synthesis::{AssetRef, AttributeSet, SynthesisError};
    use crate::infrastructure::repositories::InMemoryGarmentStore;

    struct StubSynthesizer;

    #[async_trait]
    impl ImageSynthesizer for StubSynthesizer {
        async fn generate(&self, attributes: &AttributeSet) -> Result<AssetRef, SynthesisError> {
            Ok(AssetRef(format!("uploads/virtual/{}.jpg", attributes.subcategory)))
        }
    }

    struct FailingSynthesizer;

    #[async_trait]
    impl ImageSynthesizer for FailingSynthesizer {
        async fn generate(&self, _attributes: &AttributeSet) -> Result<AssetRef, SynthesisError> {
            Err(SynthesisError::Provider("quota exceeded".to_string()))
        }
    }

    fn service() -> StandardWardrobeService {
        service_with(Arc::new(StubSynthesizer))
    }

    fn service_with(synthesizer: Arc<dyn ImageSynthesizer>) -> StandardWardrobeService {
        StandardWardrobeService::new(Arc::new(InMemoryGarmentStore::new()), synthesizer)
    }

    fn design() -> VirtualDesign {
        VirtualDesign {
            category: Category::Top,
            subcategory: "cardigan".to_string(),
            main_color: "cream".to_string(),
            warmth_level: WarmthLevel::new(3).unwrap(),
            materials: vec!["wool".to_string()],
            styles: vec!["japanese".to_string()],
            seasons: vec!["autumn".to_string()],
            gender: GenderTag::Neutral,
        }
    }

    fn jacket(owner: &str) -> Garment {
        Garment::new(OwnerId::new(owner), Category::Top, "jacket", WarmthLevel::new(3).unwrap(), "olive")
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_garment() {
        let svc = service();
        let mut garment = jacket("alice");
        garment.main_color = String::new();
        assert!(svc.register_garment(garment).await.is_err());
    }

    #[tokio::test]
    async fn test_other_owners_cannot_read_or_update() {
        let svc = service();
        let stored = svc.register_garment(jacket("alice")).await.unwrap();

        let bob = OwnerId::new("bob");
        assert!(svc.get_garment(&bob, stored.id).await.is_err());
        assert!(svc.update_garment(&bob, stored.clone()).await.is_err());

        let alice = OwnerId::new("alice");
        let mut edited = stored.clone();
        edited.main_color = "black".to_string();
        let updated = svc.update_garment(&alice, edited).await.unwrap();
        assert_eq!(updated.main_color, "black");
        assert_eq!(updated.created_at, stored.created_at);
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let svc = service();
        let alice = OwnerId::new("alice");
        let a = svc.register_garment(jacket("alice")).await.unwrap();
        svc.register_garment(jacket("alice")).await.unwrap();

        svc.delete_garment(&alice, a.id).await.unwrap();
        assert_eq!(svc.list_garments(&alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tags_merge_defaults_and_custom() {
        let svc = service();
        let mut garment = jacket("alice");
        garment.styles.insert("gorpcore".to_string());
        garment.occasions.insert("hiking".to_string());
        svc.register_garment(garment).await.unwrap();

        let tags = svc.tags(&OwnerId::new("alice")).await.unwrap();
        assert!(tags.styles.contains("casual"));
        assert!(tags.styles.contains("gorpcore"));
        assert!(tags.occasions.contains("formal-banquet"));
        assert!(tags.occasions.contains("hiking"));

        let empty = svc.tags(&OwnerId::new("nobody")).await.unwrap();
        assert_eq!(empty.styles.len(), style::DEFAULTS.len());
    }

    #[tokio::test]
    async fn test_design_virtual_garment_is_rendered_and_stored() {
        let svc = service();
        let alice = OwnerId::new("alice");

        let garment = svc.design_virtual_garment(&alice, design()).await.unwrap();
        assert_eq!(garment.status, OwnershipStatus::Virtual);
        assert_eq!(garment.image_url.as_deref(), Some("uploads/virtual/cardigan.jpg"));
        assert_eq!(garment.owner, alice);
        assert!(garment.embedding().is_none());
        assert!(garment.has_style("japanese"));

        let listed = svc.list_garments(&alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, garment.id);
    }

    #[tokio::test]
    async fn test_design_virtual_garment_surfaces_render_failure() {
        let svc = service_with(Arc::new(FailingSynthesizer));
        let alice = OwnerId::new("alice");

        let err = svc.design_virtual_garment(&alice, design()).await.unwrap_err();
        assert!(err.to_string().contains("cardigan"));
        assert!(svc.list_garments(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_design_virtual_garment_rejects_blank_subcategory() {
        let svc = service();
        let mut blank = design();
        blank.subcategory = " ".to_string();
        assert!(svc.design_virtual_garment(&OwnerId::new("alice"), blank).await.is_err());
    }
}
