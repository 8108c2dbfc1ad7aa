use crate::models::{BuddyCandidate, ExperienceLevel};

/// Check whether two experience levels are within one tier of each other
///
/// Beginner pairs with {beginner, intermediate}, intermediate with everyone,
/// advanced with {intermediate, advanced}.
#[inline]
pub fn levels_compatible(a: ExperienceLevel, b: ExperienceLevel) -> bool {
    (a.tier() - b.tier()).abs() <= 1
}

/// Keep candidates whose experience level is within one tier of the requester
///
/// Pure and order-preserving: candidates come in sorted by distance and
/// leave sorted by distance.
pub fn compatible_candidates(
    requester_level: ExperienceLevel,
    candidates: Vec<BuddyCandidate>,
) -> Vec<BuddyCandidate> {
    candidates
        .into_iter()
        .filter(|c| levels_compatible(requester_level, c.experience_level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfidenceArchetype;

    fn candidate(id: &str, level: ExperienceLevel) -> BuddyCandidate {
        BuddyCandidate {
            user_id: id.to_string(),
            city: None,
            distance_miles: 1.0,
            experience_level: level,
            confidence_archetype: ConfidenceArchetype::Analyzer,
        }
    }

    #[test]
    fn test_compatibility_band() {
        use ExperienceLevel::*;

        assert!(levels_compatible(Beginner, Beginner));
        assert!(levels_compatible(Beginner, Intermediate));
        assert!(!levels_compatible(Beginner, Advanced));

        assert!(levels_compatible(Intermediate, Beginner));
        assert!(levels_compatible(Intermediate, Intermediate));
        assert!(levels_compatible(Intermediate, Advanced));

        assert!(!levels_compatible(Advanced, Beginner));
        assert!(levels_compatible(Advanced, Intermediate));
        assert!(levels_compatible(Advanced, Advanced));
    }

    #[test]
    fn test_filter_preserves_order() {
        use ExperienceLevel::*;

        let candidates = vec![
            candidate("1", Beginner),
            candidate("2", Advanced),
            candidate("3", Intermediate),
            candidate("4", Beginner),
        ];

        let kept = compatible_candidates(Beginner, candidates);
        let ids: Vec<&str> = kept.iter().map(|c| c.user_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_filter_can_empty() {
        let candidates = vec![
            candidate("1", ExperienceLevel::Advanced),
            candidate("2", ExperienceLevel::Advanced),
        ];
        let kept = compatible_candidates(ExperienceLevel::Beginner, candidates);
        assert!(kept.is_empty());
    }
}
