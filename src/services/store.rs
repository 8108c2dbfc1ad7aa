use crate::models::{BoundingBox, UserProfile, WingmanMatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the persistent store
///
/// These always propagate up to the orchestrator, which converts them into a
/// generic caller-safe failure. "No row" is not an error anywhere in this
/// trait; absence is modeled with `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed row: {0}")]
    Malformed(String),
}

/// Persistence operations the matching engine depends on
///
/// The production implementation is [`PostgresStore`](crate::services::PostgresStore);
/// [`MemoryStore`](crate::services::MemoryStore) backs tests and local development.
///
/// `insert_match` must uphold the canonical-pair invariant at the storage
/// layer: concurrent inserts for the same active pair resolve to a single
/// row, and the loser of the race receives the surviving row rather than an
/// error.
#[async_trait]
pub trait BuddyStore: Send + Sync {
    /// Point lookup of a profile by user id.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Insert a default profile if none exists; returns the stored profile
    /// either way. Idempotent.
    async fn insert_default_profile(&self, user_id: &str) -> Result<UserProfile, StoreError>;

    /// All located profiles inside the bounding box, excluding the requester.
    /// Exact radius filtering happens in the engine.
    async fn profiles_in_bounding_box(
        &self,
        bbox: &BoundingBox,
        exclude_user_id: &str,
    ) -> Result<Vec<UserProfile>, StoreError>;

    /// Any pending match involving the user, if one exists.
    async fn pending_match_for(&self, user_id: &str) -> Result<Option<WingmanMatch>, StoreError>;

    /// Active (pending or accepted) match for the canonically ordered pair.
    async fn active_match_for_pair(
        &self,
        user1_id: &str,
        user2_id: &str,
    ) -> Result<Option<WingmanMatch>, StoreError>;

    /// Most recent match row between the two users (any status, either
    /// direction of the pair) created strictly after `since`.
    async fn recent_match_between(
        &self,
        user_a: &str,
        user_b: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<WingmanMatch>, StoreError>;

    /// Insert a pending match for the canonically ordered pair. If an active
    /// row for the pair already exists (including one written by a concurrent
    /// request), that row is returned instead.
    async fn insert_match(
        &self,
        user1_id: &str,
        user2_id: &str,
    ) -> Result<WingmanMatch, StoreError>;

    /// Cheap liveness probe for health checks.
    async fn health_check(&self) -> Result<bool, StoreError>;
}
