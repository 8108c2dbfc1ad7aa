use serde::{Deserialize, Serialize};

/// Caller-facing result of a match-creation attempt.
///
/// This is the only shape the orchestrator ever returns: internal error
/// detail never leaks past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub success: bool,
    pub message: String,
    #[serde(rename = "matchId")]
    pub match_id: Option<String>,
    #[serde(rename = "buddyUserId")]
    pub buddy_user_id: Option<String>,
}

impl MatchOutcome {
    pub fn success(message: &str, match_id: String, buddy_user_id: String) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            match_id: Some(match_id),
            buddy_user_id: Some(buddy_user_id),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            match_id: None,
            buddy_user_id: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
