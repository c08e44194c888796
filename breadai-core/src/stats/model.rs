//! UserStats aggregate and the derived streak/level functions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Level lower bounds for levels 1..=4; levels past the table extend by
/// [`LEVEL_STEP`] points each.
const LEVEL_THRESHOLDS: [u32; 4] = [0, 200, 500, 1000];
const LEVEL_STEP: u32 = 500;

/// A user's full baking history and gamification state
///
/// Owned exclusively by [`super::StatsStore`]; persisted as one JSON blob.
/// Unknown/missing fields deserialize to defaults so older blobs keep loading
/// after the struct grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total_loaves_baked: u32,
    /// Bread names the user has viewed or baked
    pub recipes_viewed: BTreeSet<String>,
    pub questions_asked: u32,
    /// Consecutive calendar days ending today with at least one bake;
    /// recomputed from `baking_dates` on every bake
    pub consecutive_baking_days: u32,
    pub last_bake_date: Option<NaiveDate>,
    pub weekend_bakes: u32,
    /// Age of the live sourdough starter in days
    pub starter_days_active: u32,
    pub seasonal_bakes: u32,
    pub social_shares: u32,
    pub feedback_given: u32,
    pub challenges_completed: u32,
    pub starter_start_date: Option<NaiveDate>,
    pub alternative_flours_used: BTreeSet<String>,
    /// Sum of point values of all unlocked badges (derived, never set directly)
    pub total_points: u32,
    /// Derived from `total_points`; starts at 1
    pub level: u32,
    /// Only ever grows; a badge never re-locks
    pub unlocked_badge_ids: BTreeSet<String>,
    /// Append-only log of day-truncated bake dates
    pub baking_dates: Vec<NaiveDate>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_loaves_baked: 0,
            recipes_viewed: BTreeSet::new(),
            questions_asked: 0,
            consecutive_baking_days: 0,
            last_bake_date: None,
            weekend_bakes: 0,
            starter_days_active: 0,
            seasonal_bakes: 0,
            social_shares: 0,
            feedback_given: 0,
            challenges_completed: 0,
            starter_start_date: None,
            alternative_flours_used: BTreeSet::new(),
            total_points: 0,
            level: 1,
            unlocked_badge_ids: BTreeSet::new(),
            baking_dates: Vec::new(),
        }
    }
}

/// Compute level from accumulated points (lower bounds inclusive)
pub fn level_for_points(points: u32) -> u32 {
    let top = LEVEL_THRESHOLDS[LEVEL_THRESHOLDS.len() - 1];
    if points >= top {
        // Beyond the table: one level per LEVEL_STEP points
        LEVEL_THRESHOLDS.len() as u32 + (points - top) / LEVEL_STEP
    } else {
        LEVEL_THRESHOLDS
            .iter()
            .rposition(|&min| points >= min)
            .map(|i| i as u32 + 1)
            .unwrap_or(1)
    }
}

/// Count consecutive bake days ending on `today`
///
/// Walks backward from `today` through the distinct day set built from the
/// full bake log and stops at the first gap. Recomputing from the log keeps
/// the streak self-correcting when days were missed.
pub fn streak_ending_on(baking_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = baking_dates.iter().copied().collect();

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}
