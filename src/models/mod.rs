// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, BuddyCandidate, ConfidenceArchetype, ExperienceLevel, Location, MatchStatus,
    UserProfile, WingmanMatch,
};
pub use requests::AutoMatchRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchOutcome};
