use crate::core::distance::is_within_bounding_box;
use crate::models::{BoundingBox, MatchStatus, UserProfile, WingmanMatch};
use crate::services::store::{BuddyStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store backing tests and local development
///
/// A single mutex serializes every operation, so the check-then-insert in
/// `insert_match` is atomic here without the Postgres uniqueness index.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    profiles: HashMap<String, UserProfile>,
    matches: Vec<WingmanMatch>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile directly, bypassing provisioning defaults.
    pub fn put_profile(&self, profile: UserProfile) {
        let mut inner = self.inner.lock().unwrap();
        inner.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Seed a match row with an explicit status and creation time, for
    /// exercising the recency window.
    pub fn put_match(
        &self,
        user_a: &str,
        user_b: &str,
        status: MatchStatus,
        created_at: DateTime<Utc>,
    ) -> WingmanMatch {
        let (user1_id, user2_id) = WingmanMatch::canonical_pair(user_a, user_b);
        let row = WingmanMatch {
            id: uuid::Uuid::new_v4().to_string(),
            user1_id,
            user2_id,
            status,
            created_at,
        };
        let mut inner = self.inner.lock().unwrap();
        inner.matches.push(row.clone());
        row
    }

    /// Number of stored match rows.
    pub fn match_count(&self) -> usize {
        self.inner.lock().unwrap().matches.len()
    }
}

#[async_trait]
impl BuddyStore for MemoryStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.profiles.get(user_id).cloned())
    }

    async fn insert_default_profile(&self, user_id: &str) -> Result<UserProfile, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let profile = inner
            .profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::with_defaults(user_id));
        Ok(profile.clone())
    }

    async fn profiles_in_bounding_box(
        &self,
        bbox: &BoundingBox,
        exclude_user_id: &str,
    ) -> Result<Vec<UserProfile>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .values()
            .filter(|p| p.user_id != exclude_user_id)
            .filter(|p| {
                p.location
                    .as_ref()
                    .is_some_and(|loc| is_within_bounding_box(loc.latitude, loc.longitude, bbox))
            })
            .cloned()
            .collect())
    }

    async fn pending_match_for(&self, user_id: &str) -> Result<Option<WingmanMatch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::Pending)
            .filter(|m| m.user1_id == user_id || m.user2_id == user_id)
            .max_by_key(|m| m.created_at)
            .cloned())
    }

    async fn active_match_for_pair(
        &self,
        user1_id: &str,
        user2_id: &str,
    ) -> Result<Option<WingmanMatch>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .matches
            .iter()
            .find(|m| m.user1_id == user1_id && m.user2_id == user2_id && m.status.is_active())
            .cloned())
    }

    async fn recent_match_between(
        &self,
        user_a: &str,
        user_b: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<WingmanMatch>, StoreError> {
        let (user1_id, user2_id) = WingmanMatch::canonical_pair(user_a, user_b);
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .matches
            .iter()
            .filter(|m| m.user1_id == user1_id && m.user2_id == user2_id)
            .filter(|m| m.created_at > since)
            .max_by_key(|m| m.created_at)
            .cloned())
    }

    async fn insert_match(
        &self,
        user1_id: &str,
        user2_id: &str,
    ) -> Result<WingmanMatch, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(existing) = inner
            .matches
            .iter()
            .find(|m| m.user1_id == user1_id && m.user2_id == user2_id && m.status.is_active())
        {
            return Ok(existing.clone());
        }

        let row = WingmanMatch {
            id: uuid::Uuid::new_v4().to_string(),
            user1_id: user1_id.to_string(),
            user2_id: user2_id.to_string(),
            status: MatchStatus::Pending,
            created_at: Utc::now(),
        };
        inner.matches.push(row.clone());
        Ok(row)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
