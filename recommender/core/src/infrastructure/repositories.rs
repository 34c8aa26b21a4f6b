// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! In-memory store implementations, used by the CLI and the test suites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::feedback::FeedbackRecord;
use crate::domain::garment::{Garment, GarmentId};
use crate::domain::profile::{OwnerId, UserProfile};
use crate::domain::repository::{
    FeedbackStore, GarmentQuery, GarmentStore, ProfileStore, RepositoryError,
};

#[derive(Default)]
struct GarmentTable {
    rows: HashMap<GarmentId, Garment>,
    /// Insertion order, so queries are deterministic.
    order: Vec<GarmentId>,
}

#[derive(Clone, Default)]
pub struct InMemoryGarmentStore {
    table: Arc<RwLock<GarmentTable>>,
}

impl InMemoryGarmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows across every owner.
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl GarmentStore for InMemoryGarmentStore {
    async fn query(&self, query: &GarmentQuery) -> Result<Vec<Garment>, RepositoryError> {
        let table = self.table.read();
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id))
            .filter(|g| query.matches(g))
            .cloned()
            .collect())
    }

    async fn insert(&self, garment: Garment) -> Result<Garment, RepositoryError> {
        let mut table = self.table.write();
        if table.rows.contains_key(&garment.id) {
            return Err(RepositoryError::Database(format!(
                "Garment {} already exists",
                garment.id
            )));
        }
        table.order.push(garment.id);
        table.rows.insert(garment.id, garment.clone());
        Ok(garment)
    }

    async fn find_by_id(&self, id: GarmentId) -> Result<Option<Garment>, RepositoryError> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn update(&self, garment: &Garment) -> Result<(), RepositoryError> {
        let mut table = self.table.write();
        match table.rows.get_mut(&garment.id) {
            Some(row) => {
                *row = garment.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(garment.id.to_string())),
        }
    }

    async fn delete(&self, owner: &OwnerId, id: GarmentId) -> Result<(), RepositoryError> {
        let mut table = self.table.write();
        if table.rows.get(&id).is_some_and(|g| &g.owner == owner) {
            table.rows.remove(&id);
            table.order.retain(|row| *row != id);
        }
        Ok(())
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Garment>, RepositoryError> {
        let table = self.table.read();
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id))
            .filter(|g| &g.owner == owner)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryFeedbackStore {
    records: Arc<RwLock<Vec<FeedbackRecord>>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect())
    }

    async fn append(&self, record: FeedbackRecord) -> Result<(), RepositoryError> {
        self.records.write().push(record);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<OwnerId, UserProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_by_owner(&self, owner: &OwnerId) -> Result<UserProfile, RepositoryError> {
        if let Some(profile) = self.profiles.read().get(owner) {
            return Ok(profile.clone());
        }
        let mut profiles = self.profiles.write();
        Ok(profiles
            .entry(owner.clone())
            .or_insert_with(|| UserProfile::default_for(owner.clone()))
            .clone())
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        self.profiles
            .write()
            .insert(profile.owner.clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::FeedbackScore;
    use crate::domain::garment::{Category, OwnershipStatus, WarmthLevel};
    use crate::domain::profile::CommuteMethod;

    fn garment(owner: &str, sub: &str) -> Garment {
        Garment::new(OwnerId::new(owner), Category::Top, sub, WarmthLevel::new(2).unwrap(), "white")
    }

    #[tokio::test]
    async fn test_query_preserves_insertion_order() {
        let store = InMemoryGarmentStore::new();
        for sub in ["a", "b", "c"] {
            store.insert(garment("alice", sub)).await.unwrap();
        }
        let query = GarmentQuery::new(OwnerId::new("alice"), Category::Top);
        let subs: Vec<_> = store
            .query(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.subcategory)
            .collect();
        assert_eq!(subs, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let store = InMemoryGarmentStore::new();
        let g = garment("alice", "a");
        store.insert(g.clone()).await.unwrap();
        assert!(matches!(store.insert(g).await, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped_and_idempotent() {
        let store = InMemoryGarmentStore::new();
        let g = store.insert(garment("alice", "a")).await.unwrap();

        store.delete(&OwnerId::new("bob"), g.id).await.unwrap();
        assert_eq!(store.len(), 1);

        store.delete(&OwnerId::new("alice"), g.id).await.unwrap();
        store.delete(&OwnerId::new("alice"), g.id).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryGarmentStore::new();
        let result = store.update(&garment("alice", "a")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_includes_virtual_garments() {
        let store = InMemoryGarmentStore::new();
        let mut v = garment("alice", "v");
        v.status = OwnershipStatus::Virtual;
        store.insert(v).await.unwrap();
        store.insert(garment("alice", "o")).await.unwrap();
        store.insert(garment("bob", "x")).await.unwrap();

        assert_eq!(store.list_by_owner(&OwnerId::new("alice")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_feedback_is_owner_scoped() {
        let store = InMemoryFeedbackStore::new();
        store
            .append(FeedbackRecord::new(OwnerId::new("alice"), FeedbackScore::Adopted, 20.0))
            .await
            .unwrap();
        store
            .append(FeedbackRecord::new(OwnerId::new("bob"), FeedbackScore::TooHot, 30.0))
            .await
            .unwrap();

        let alice = store.list_by_owner(&OwnerId::new("alice")).await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].score, FeedbackScore::Adopted);
    }

    #[tokio::test]
    async fn test_profile_created_lazily() {
        let store = InMemoryProfileStore::new();
        let owner = OwnerId::new("carol");

        let mut profile = store.get_by_owner(&owner).await.unwrap();
        assert_eq!(profile.commute, CommuteMethod::Cycle);

        profile.commute = CommuteMethod::Walk;
        store.save(&profile).await.unwrap();
        assert_eq!(store.get_by_owner(&owner).await.unwrap().commute, CommuteMethod::Walk);
    }
}
