// Core algorithm exports
pub mod compatibility;
pub mod distance;
pub mod engine;
pub mod recency;

pub use compatibility::{compatible_candidates, levels_compatible};
pub use distance::{calculate_bounding_box, haversine_miles, is_within_bounding_box};
pub use engine::{MatchEngine, MatchError, DEFAULT_COOLDOWN_DAYS};
pub use recency::exclude_recent;
