use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create an automatic buddy match
///
/// A missing `radiusMiles` falls back to the configured default at the
/// route layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AutoMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    #[serde(alias = "radius_miles", rename = "radiusMiles")]
    pub radius_miles: Option<f64>,
}
