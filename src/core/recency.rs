use crate::models::BuddyCandidate;
use crate::services::{BuddyStore, StoreError};
use chrono::{DateTime, Duration, Utc};

/// Start of the cooldown window relative to now.
#[inline]
pub fn cooldown_cutoff(now: DateTime<Utc>, cooldown_days: i64) -> DateTime<Utc> {
    now - Duration::days(cooldown_days)
}

/// Drop candidates paired with the requester inside the cooldown window
///
/// A candidate is excluded iff any match row between the pair, regardless of
/// status, was created strictly after `now - cooldown_days`. The strict
/// comparison makes a pair eligible again exactly at `t + cooldown_days`.
/// Order-preserving; one lookup per candidate.
pub async fn exclude_recent(
    store: &dyn BuddyStore,
    requester_id: &str,
    candidates: Vec<BuddyCandidate>,
    cooldown_days: i64,
) -> Result<Vec<BuddyCandidate>, StoreError> {
    let cutoff = cooldown_cutoff(Utc::now(), cooldown_days);

    let mut kept = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let recent = store
            .recent_match_between(requester_id, &candidate.user_id, cutoff)
            .await?;
        if recent.is_none() {
            kept.push(candidate);
        } else {
            tracing::debug!(
                "Excluding candidate {} for {}: matched within the last {} days",
                candidate.user_id,
                requester_id,
                cooldown_days
            );
        }
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_is_days_before_now() {
        let now = Utc::now();
        let cutoff = cooldown_cutoff(now, 7);
        assert_eq!(now - cutoff, Duration::days(7));
    }
}
