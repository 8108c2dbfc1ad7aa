use crate::core::compatibility::compatible_candidates;
use crate::core::distance::{calculate_bounding_box, haversine_miles};
use crate::core::recency::exclude_recent;
use crate::models::{BuddyCandidate, MatchOutcome, UserProfile, WingmanMatch};
use crate::services::{BuddyStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

const MSG_ALREADY_PENDING: &str = "You already have a pending wingman match";
const MSG_NO_BUDDIES: &str = "No compatible wingman buddies found";
const MSG_CREATED: &str = "Wingman buddy match created successfully!";
const MSG_FAILED: &str = "Unable to create wingman match";

/// Default cooldown before two users can be paired again
pub const DEFAULT_COOLDOWN_DAYS: i64 = 7;

/// Errors internal to a matching request
///
/// These never reach the caller: `create_automatic_match` converts every
/// error into the generic failure outcome.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid input: {0}")]
    Validation(String),
}

/// Buddy matching engine
///
/// Stateless and request-scoped: all state lives in the store, and a single
/// request runs its steps strictly in sequence. The pipeline is
///
/// 1. Ensure the requester has a profile (safe defaults)
/// 2. Short-circuit on an existing pending match
/// 3. Radius query -> compatibility filter -> recency filter -> first candidate
/// 4. Canonical match-record creation
#[derive(Clone)]
pub struct MatchEngine {
    store: Arc<dyn BuddyStore>,
    cooldown_days: i64,
}

impl MatchEngine {
    pub fn new(store: Arc<dyn BuddyStore>, cooldown_days: i64) -> Self {
        Self {
            store,
            cooldown_days,
        }
    }

    pub fn with_default_cooldown(store: Arc<dyn BuddyStore>) -> Self {
        Self::new(store, DEFAULT_COOLDOWN_DAYS)
    }

    /// Ensure a minimal profile exists for the user
    ///
    /// Idempotent; safe to call on every request.
    pub async fn ensure_user_profile(&self, user_id: &str) -> Result<UserProfile, MatchError> {
        if let Some(profile) = self.store.get_profile(user_id).await? {
            return Ok(profile);
        }

        tracing::info!("No profile for user {}, creating with defaults", user_id);
        Ok(self.store.insert_default_profile(user_id).await?)
    }

    /// Find other users within the radius, sorted by distance
    ///
    /// A requester without a location has no candidates; that is an empty
    /// list, not an error. The boundary is inclusive and ties are broken by
    /// `user_id` so repeated calls with identical inputs order identically.
    pub async fn find_candidates(
        &self,
        user_id: &str,
        radius_miles: f64,
    ) -> Result<Vec<BuddyCandidate>, MatchError> {
        let Some(requester) = self.store.get_profile(user_id).await? else {
            return Ok(Vec::new());
        };
        self.candidates_near(&requester, radius_miles).await
    }

    async fn candidates_near(
        &self,
        requester: &UserProfile,
        radius_miles: f64,
    ) -> Result<Vec<BuddyCandidate>, MatchError> {
        let Some(origin) = requester.location.as_ref() else {
            tracing::debug!("User {} has no location set", requester.user_id);
            return Ok(Vec::new());
        };

        let bbox = calculate_bounding_box(origin.latitude, origin.longitude, radius_miles);
        let profiles = self
            .store
            .profiles_in_bounding_box(&bbox, &requester.user_id)
            .await?;

        let mut candidates: Vec<BuddyCandidate> = profiles
            .into_iter()
            .filter_map(|profile| {
                let loc = profile.location.as_ref()?;
                let distance_miles = haversine_miles(
                    origin.latitude,
                    origin.longitude,
                    loc.latitude,
                    loc.longitude,
                );
                if distance_miles <= radius_miles {
                    Some(BuddyCandidate {
                        user_id: profile.user_id,
                        city: loc.city.clone(),
                        distance_miles,
                        experience_level: profile.experience_level,
                        confidence_archetype: profile.confidence_archetype,
                    })
                } else {
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        tracing::debug!(
            "Found {} candidates within {} miles of {}",
            candidates.len(),
            radius_miles,
            requester.user_id
        );

        Ok(candidates)
    }

    /// Pick the single best candidate for the requester
    ///
    /// Geo query, compatibility filter, recency filter, then the closest
    /// remaining candidate. `None` at any stage means no selection.
    pub async fn find_best_candidate(
        &self,
        user_id: &str,
        radius_miles: f64,
    ) -> Result<Option<BuddyCandidate>, MatchError> {
        let Some(requester) = self.store.get_profile(user_id).await? else {
            return Ok(None);
        };

        let candidates = self.candidates_near(&requester, radius_miles).await?;
        let compatible = compatible_candidates(requester.experience_level, candidates);
        let eligible = exclude_recent(
            self.store.as_ref(),
            user_id,
            compatible,
            self.cooldown_days,
        )
        .await?;

        Ok(eligible.into_iter().next())
    }

    /// Any unresolved match already involving the user
    pub async fn check_existing_pending_match(
        &self,
        user_id: &str,
    ) -> Result<Option<WingmanMatch>, MatchError> {
        Ok(self.store.pending_match_for(user_id).await?)
    }

    /// Create (or dedupe to) the match row for a user pair
    ///
    /// The pair is canonicalized so `create_match_record(a, b)` and
    /// `create_match_record(b, a)` return the same logical row. The storage
    /// layer arbitrates concurrent inserts for the same active pair.
    pub async fn create_match_record(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<WingmanMatch, MatchError> {
        let (user1_id, user2_id) = WingmanMatch::canonical_pair(user_a, user_b);

        if let Some(existing) = self
            .store
            .active_match_for_pair(&user1_id, &user2_id)
            .await?
        {
            tracing::debug!(
                "Active match {} already exists for pair ({}, {})",
                existing.id,
                user1_id,
                user2_id
            );
            return Ok(existing);
        }

        Ok(self.store.insert_match(&user1_id, &user2_id).await?)
    }

    /// Top-level entry point: pair the user with their best buddy
    ///
    /// Never returns an error. Internal failures of any kind collapse into a
    /// generic failure outcome; the only caller-visible messages are the four
    /// fixed ones.
    pub async fn create_automatic_match(&self, user_id: &str, radius_miles: f64) -> MatchOutcome {
        match self.try_create_automatic_match(user_id, radius_miles).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Automatic match failed for {}: {}", user_id, e);
                MatchOutcome::failure(MSG_FAILED)
            }
        }
    }

    async fn try_create_automatic_match(
        &self,
        user_id: &str,
        radius_miles: f64,
    ) -> Result<MatchOutcome, MatchError> {
        // Fail fast before any IO
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(MatchError::Validation(format!(
                "radius_miles must be positive, got {}",
                radius_miles
            )));
        }

        self.ensure_user_profile(user_id).await?;

        if let Some(pending) = self.check_existing_pending_match(user_id).await? {
            tracing::info!(
                "User {} already has pending match {}",
                user_id,
                pending.id
            );
            let buddy_user_id = pending.buddy_of(user_id).to_string();
            return Ok(MatchOutcome::success(
                MSG_ALREADY_PENDING,
                pending.id,
                buddy_user_id,
            ));
        }

        let Some(candidate) = self.find_best_candidate(user_id, radius_miles).await? else {
            tracing::info!(
                "No compatible buddies for {} within {} miles",
                user_id,
                radius_miles
            );
            return Ok(MatchOutcome::failure(MSG_NO_BUDDIES));
        };

        let record = self.create_match_record(user_id, &candidate.user_id).await?;

        // Buddy profile for response shaping
        let buddy_user_id = match self.store.get_profile(&candidate.user_id).await? {
            Some(profile) => profile.user_id,
            None => candidate.user_id.clone(),
        };

        tracing::info!(
            "Created match {} pairing {} with {} ({:.1} miles apart)",
            record.id,
            user_id,
            buddy_user_id,
            candidate.distance_miles
        );

        Ok(MatchOutcome::success(MSG_CREATED, record.id, buddy_user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfidenceArchetype, ExperienceLevel, Location, MatchStatus};
    use crate::services::MemoryStore;
    use chrono::Utc;

    fn located_profile(id: &str, level: ExperienceLevel, lat: f64, lon: f64) -> UserProfile {
        UserProfile {
            user_id: id.to_string(),
            experience_level: level,
            confidence_archetype: ConfidenceArchetype::Analyzer,
            location: Some(Location {
                latitude: lat,
                longitude: lon,
                city: Some("Austin".to_string()),
            }),
            created_at: Some(Utc::now()),
        }
    }

    fn engine_with_store() -> (Arc<MemoryStore>, MatchEngine) {
        let store = Arc::new(MemoryStore::new());
        let engine = MatchEngine::with_default_cooldown(store.clone());
        (store, engine)
    }

    #[tokio::test]
    async fn test_missing_profile_created_with_defaults() {
        let (_, engine) = engine_with_store();

        let profile = engine.ensure_user_profile("new_user").await.unwrap();
        assert_eq!(profile.experience_level, ExperienceLevel::Beginner);
        assert_eq!(
            profile.confidence_archetype,
            ConfidenceArchetype::Analyzer
        );
        assert!(profile.location.is_none());
    }

    #[tokio::test]
    async fn test_candidates_empty_without_location() {
        let (store, engine) = engine_with_store();
        store.put_profile(UserProfile::with_defaults("homeless"));
        store.put_profile(located_profile(
            "other",
            ExperienceLevel::Beginner,
            30.2672,
            -97.7431,
        ));

        let candidates = engine.find_candidates("homeless", 25.0).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_candidates_sorted_with_id_tiebreak() {
        let (store, engine) = engine_with_store();
        store.put_profile(located_profile(
            "me",
            ExperienceLevel::Beginner,
            30.2672,
            -97.7431,
        ));
        // Identical coordinates force a distance tie
        store.put_profile(located_profile(
            "user_b",
            ExperienceLevel::Beginner,
            30.30,
            -97.7431,
        ));
        store.put_profile(located_profile(
            "user_a",
            ExperienceLevel::Beginner,
            30.30,
            -97.7431,
        ));
        store.put_profile(located_profile(
            "user_c",
            ExperienceLevel::Beginner,
            30.28,
            -97.7431,
        ));

        let candidates = engine.find_candidates("me", 25.0).await.unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.user_id.as_str()).collect();
        assert_eq!(ids, vec!["user_c", "user_a", "user_b"]);
    }

    #[tokio::test]
    async fn test_radius_boundary_is_inclusive() {
        let (store, engine) = engine_with_store();
        store.put_profile(located_profile(
            "me",
            ExperienceLevel::Beginner,
            30.2672,
            -97.7431,
        ));
        store.put_profile(located_profile(
            "edge",
            ExperienceLevel::Beginner,
            30.40,
            -97.7431,
        ));

        // Pass the exact computed distance as the radius
        let exact = crate::core::distance::haversine_miles(30.2672, -97.7431, 30.40, -97.7431);
        let candidates = engine.find_candidates("me", exact).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].user_id, "edge");
    }

    #[tokio::test]
    async fn test_create_match_record_is_direction_agnostic() {
        let (_, engine) = engine_with_store();

        let ab = engine.create_match_record("zeta", "alpha").await.unwrap();
        let ba = engine.create_match_record("alpha", "zeta").await.unwrap();

        assert_eq!(ab.id, ba.id);
        assert_eq!(ab.user1_id, "alpha");
        assert_eq!(ab.user2_id, "zeta");
        assert_eq!(ab.status, MatchStatus::Pending);
    }

    #[tokio::test]
    async fn test_invalid_radius_fails_generically() {
        let (_, engine) = engine_with_store();

        for radius in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let outcome = engine.create_automatic_match("someone", radius).await;
            assert!(!outcome.success);
            assert_eq!(outcome.message, "Unable to create wingman match");
            assert!(outcome.match_id.is_none());
        }
    }

    #[tokio::test]
    async fn test_pending_match_short_circuits() {
        let (store, engine) = engine_with_store();
        store.put_profile(located_profile(
            "me",
            ExperienceLevel::Beginner,
            30.2672,
            -97.7431,
        ));
        let pending = store.put_match("me", "earlier_buddy", MatchStatus::Pending, Utc::now());

        let outcome = engine.create_automatic_match("me", 25.0).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "You already have a pending wingman match");
        assert_eq!(outcome.match_id.as_deref(), Some(pending.id.as_str()));
        assert_eq!(outcome.buddy_user_id.as_deref(), Some("earlier_buddy"));
    }
}
