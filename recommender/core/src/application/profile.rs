// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Profile Service
//!
//! Reads (lazily defaulted) and partially updates user profiles.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::domain::profile::{OwnerId, ProfileUpdate, UserProfile};
use crate::domain::repository::ProfileStore;

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// The owner's profile; a default profile is created on first access.
    async fn get_profile(&self, owner: &OwnerId) -> Result<UserProfile>;

    /// Apply the present fields of `update` and persist the result.
    async fn update_profile(&self, owner: &OwnerId, update: ProfileUpdate) -> Result<UserProfile>;
}

pub struct StandardProfileService {
    profiles: Arc<dyn ProfileStore>,
}

impl StandardProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl ProfileService for StandardProfileService {
    async fn get_profile(&self, owner: &OwnerId) -> Result<UserProfile> {
        self.profiles
            .get_by_owner(owner)
            .await
            .with_context(|| format!("Failed to load profile for {}", owner))
    }

    async fn update_profile(&self, owner: &OwnerId, update: ProfileUpdate) -> Result<UserProfile> {
        let mut profile = self.get_profile(owner).await?;
        profile.apply(update);
        self.profiles
            .save(&profile)
            .await
            .with_context(|| format!("Failed to save profile for {}", owner))?;
        info!(owner = %owner, "Updated profile");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{CommuteMethod, Occupation};
    use crate::infrastructure::repositories::InMemoryProfileStore;

    #[tokio::test]
    async fn test_lazy_default_then_partial_update() {
        let svc = StandardProfileService::new(Arc::new(InMemoryProfileStore::new()));
        let owner = OwnerId::new("dana");

        let profile = svc.get_profile(&owner).await.unwrap();
        assert_eq!(profile.commute, CommuteMethod::Cycle);

        let updated = svc
            .update_profile(
                &owner,
                ProfileUpdate {
                    occupation: Some(Occupation::FinanceLegalPublic),
                    sweat_tendency: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.occupation, Occupation::FinanceLegalPublic);

        let reloaded = svc.get_profile(&owner).await.unwrap();
        assert!(reloaded.sweat_tendency);
        assert_eq!(reloaded.commute, CommuteMethod::Cycle);
    }
}
