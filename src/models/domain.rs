use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal skill/comfort tier used for compatibility math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Numeric tier (beginner=1, intermediate=2, advanced=3).
    #[inline]
    pub fn tier(self) -> i8 {
        match self {
            ExperienceLevel::Beginner => 1,
            ExperienceLevel::Intermediate => 2,
            ExperienceLevel::Advanced => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl Default for ExperienceLevel {
    fn default() -> Self {
        ExperienceLevel::Beginner
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            other => Err(format!("unknown experience level: {}", other)),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coaching persona describing a user's behavioral style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceArchetype {
    Analyzer,
    Sprinter,
    Ghost,
    Scholar,
    Naturalist,
    Protector,
}

impl ConfidenceArchetype {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceArchetype::Analyzer => "analyzer",
            ConfidenceArchetype::Sprinter => "sprinter",
            ConfidenceArchetype::Ghost => "ghost",
            ConfidenceArchetype::Scholar => "scholar",
            ConfidenceArchetype::Naturalist => "naturalist",
            ConfidenceArchetype::Protector => "protector",
        }
    }
}

impl Default for ConfidenceArchetype {
    fn default() -> Self {
        ConfidenceArchetype::Analyzer
    }
}

impl FromStr for ConfidenceArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analyzer" => Ok(ConfidenceArchetype::Analyzer),
            "sprinter" => Ok(ConfidenceArchetype::Sprinter),
            "ghost" => Ok(ConfidenceArchetype::Ghost),
            "scholar" => Ok(ConfidenceArchetype::Scholar),
            "naturalist" => Ok(ConfidenceArchetype::Naturalist),
            "protector" => Ok(ConfidenceArchetype::Protector),
            other => Err(format!("unknown confidence archetype: {}", other)),
        }
    }
}

impl fmt::Display for ConfidenceArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's geographic position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
}

/// User profile as the engine sees it.
///
/// Profile editing belongs to the host application; the engine only ever
/// creates missing profiles with safe defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: ExperienceLevel,
    #[serde(rename = "confidenceArchetype", default)]
    pub confidence_archetype: ConfidenceArchetype,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserProfile {
    /// Minimal profile with safe defaults, as inserted on demand.
    pub fn with_defaults(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            experience_level: ExperienceLevel::default(),
            confidence_archetype: ConfidenceArchetype::default(),
            location: None,
            created_at: Some(chrono::Utc::now()),
        }
    }
}

/// Prospective buddy surfaced by the radius query. Lives only for the
/// duration of a single matching request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyCandidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub city: Option<String>,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
    #[serde(rename = "experienceLevel")]
    pub experience_level: ExperienceLevel,
    #[serde(rename = "confidenceArchetype")]
    pub confidence_archetype: ConfidenceArchetype,
}

/// Lifecycle of a match row. Transitions past Pending belong to the
/// accept/decline flow in the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl MatchStatus {
    /// Active rows block creation of another match for the same pair.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, MatchStatus::Pending | MatchStatus::Accepted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Declined => "declined",
            MatchStatus::Expired => "expired",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "declined" => Ok(MatchStatus::Declined),
            "expired" => Ok(MatchStatus::Expired),
            other => Err(format!("unknown match status: {}", other)),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted match row.
///
/// Invariant: `user1_id` is always the lexicographically smaller of the pair,
/// so a match between A and B has exactly one representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WingmanMatch {
    pub id: String,
    #[serde(rename = "user1Id")]
    pub user1_id: String,
    #[serde(rename = "user2Id")]
    pub user2_id: String,
    pub status: MatchStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl WingmanMatch {
    /// Canonical ordering for a user pair: smaller identifier first.
    pub fn canonical_pair(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// The other participant, given one side of the pair.
    pub fn buddy_of(&self, user_id: &str) -> &str {
        if self.user1_id == user_id {
            &self.user2_id
        } else {
            &self.user1_id
        }
    }
}

/// Geospatial bounding box used as a store-level pre-filter.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
