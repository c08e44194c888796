//! Badge unlock evaluation
//!
//! One pass over the catalog per stats mutation. Already-unlocked badges are
//! skipped, so predicates run at most once per badge lifetime on the happy
//! path and the unlocked set only ever grows.

use super::{BadgeDefinition, BADGE_CATALOG};
use crate::stats::{level_for_points, UserStats};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{info, warn};

/// Evaluate the full static catalog against `stats`
///
/// Unlocks every newly satisfied badge, accumulates its points, recomputes
/// the level, and returns the newly unlocked definitions in catalog order.
pub fn evaluate(stats: &mut UserStats) -> Vec<&'static BadgeDefinition> {
    evaluate_with(&BADGE_CATALOG, stats)
}

/// Evaluate an explicit catalog slice (the static catalog in production)
pub fn evaluate_with<'a>(
    catalog: &'a [BadgeDefinition],
    stats: &mut UserStats,
) -> Vec<&'a BadgeDefinition> {
    let mut newly_unlocked = Vec::new();

    for badge in catalog {
        if stats.unlocked_badge_ids.contains(badge.id) {
            continue;
        }

        // A predicate must be pure; if one panics anyway, treat the badge as
        // unsatisfied and keep going rather than aborting the whole pass.
        let satisfied = catch_unwind(AssertUnwindSafe(|| (badge.predicate)(stats)))
            .unwrap_or_else(|_| {
                warn!(badge_id = badge.id, "Badge predicate panicked; treating as unsatisfied");
                false
            });

        if satisfied {
            stats.unlocked_badge_ids.insert(badge.id.to_string());
            stats.total_points += badge.points;
            newly_unlocked.push(badge);
            info!(
                badge_id = badge.id,
                points = badge.points,
                total_points = stats.total_points,
                "Badge unlocked"
            );
        }
    }

    stats.level = level_for_points(stats.total_points);

    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::BadgeCategory;

    #[test]
    fn test_first_bake_unlocks_rookie_only() {
        let mut stats = UserStats::default();
        stats.total_loaves_baked = 1;

        let newly = evaluate(&mut stats);
        let ids: Vec<&str> = newly.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["rookie_baker"]);
        assert_eq!(stats.total_points, 50);
        assert_eq!(stats.level, 1);
        assert!(stats.unlocked_badge_ids.contains("rookie_baker"));
    }

    #[test]
    fn test_second_evaluation_is_idempotent() {
        let mut stats = UserStats::default();
        stats.total_loaves_baked = 3;
        stats.consecutive_baking_days = 3;

        let first = evaluate(&mut stats);
        assert!(!first.is_empty());
        let points_after_first = stats.total_points;

        let second = evaluate(&mut stats);
        assert!(second.is_empty());
        assert_eq!(stats.total_points, points_after_first);
    }

    #[test]
    fn test_batch_unlock_preserves_catalog_order() {
        let mut stats = UserStats::default();
        stats.total_loaves_baked = 3;
        stats.questions_asked = 1;

        let newly = evaluate(&mut stats);
        let ids: Vec<&str> = newly.iter().map(|b| b.id).collect();
        // Milestones are declared before community badges
        assert_eq!(ids, vec!["rookie_baker", "rise_master", "inquisitive"]);
    }

    #[test]
    fn test_points_drive_level_recompute() {
        let mut stats = UserStats::default();
        stats.total_loaves_baked = 3;
        stats.consecutive_baking_days = 3;

        evaluate(&mut stats);
        // rookie_baker (50) + rise_master (75) + on_a_roll (75) = 200
        assert_eq!(stats.total_points, 200);
        assert_eq!(stats.level, 2);
    }

    #[test]
    fn test_panicking_predicate_does_not_abort_pass() {
        let catalog = vec![
            BadgeDefinition {
                id: "broken",
                name: "Broken",
                description: "Predicate panics",
                points: 10,
                category: BadgeCategory::Special,
                predicate: |_| panic!("predicate bug"),
            },
            BadgeDefinition {
                id: "fine",
                name: "Fine",
                description: "Always satisfied",
                points: 20,
                category: BadgeCategory::Special,
                predicate: |_| true,
            },
        ];

        let mut stats = UserStats::default();
        let newly = evaluate_with(&catalog, &mut stats);
        let ids: Vec<&str> = newly.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["fine"]);
        assert_eq!(stats.total_points, 20);
        assert!(!stats.unlocked_badge_ids.contains("broken"));
    }
}
