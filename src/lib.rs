//! Wingman Algo - Buddy matching engine for the Wingman coaching app
//!
//! This library pairs two users ("buddies") for a recurring coaching activity
//! based on experience-level compatibility, geographic proximity, and
//! fairness constraints (recency cooldown, pending-match throttling).
//! The HTTP layer in `routes` is a thin adapter; all semantics live in
//! [`crate::core::MatchEngine`] over the [`crate::services::BuddyStore`] seam.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_miles, MatchEngine, MatchError};
pub use crate::models::{
    BuddyCandidate, ConfidenceArchetype, ExperienceLevel, MatchOutcome, MatchStatus, UserProfile,
    WingmanMatch,
};
pub use crate::services::{BuddyStore, MemoryStore, PostgresStore, StoreError};
