//! Badge catalog: fixed definitions with pure predicates over [`UserStats`]

mod evaluator;

pub use evaluator::{evaluate, evaluate_with};

use crate::stats::UserStats;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Badge grouping shown in the UI trophy case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Milestone,
    Streak,
    Explorer,
    Community,
    Special,
}

impl std::fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeCategory::Milestone => write!(f, "milestone"),
            BadgeCategory::Streak => write!(f, "streak"),
            BadgeCategory::Explorer => write!(f, "explorer"),
            BadgeCategory::Community => write!(f, "community"),
            BadgeCategory::Special => write!(f, "special"),
        }
    }
}

/// One badge in the static catalog
///
/// Predicates must be pure and monotonic in the fields they read: once
/// satisfied for a growing counter they stay satisfied, which is what lets
/// the evaluator skip already-unlocked ids ("a badge never re-locks").
pub struct BadgeDefinition {
    /// Unique stable identifier, also used in the persisted unlocked set
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub points: u32,
    pub category: BadgeCategory,
    pub predicate: fn(&UserStats) -> bool,
}

impl std::fmt::Debug for BadgeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("points", &self.points)
            .field("category", &self.category)
            .finish()
    }
}

/// The full badge catalog, evaluated in declaration order
pub static BADGE_CATALOG: Lazy<Vec<BadgeDefinition>> = Lazy::new(|| {
    use BadgeCategory::*;

    vec![
        // Loaf count milestones
        BadgeDefinition {
            id: "rookie_baker",
            name: "Rookie Baker",
            description: "Bake your first loaf",
            points: 50,
            category: Milestone,
            predicate: |s| s.total_loaves_baked >= 1,
        },
        BadgeDefinition {
            id: "rise_master",
            name: "The Rise Master",
            description: "Bake three loaves",
            points: 75,
            category: Milestone,
            predicate: |s| s.total_loaves_baked >= 3,
        },
        BadgeDefinition {
            id: "oven_veteran",
            name: "Oven Veteran",
            description: "Bake ten loaves",
            points: 100,
            category: Milestone,
            predicate: |s| s.total_loaves_baked >= 10,
        },
        BadgeDefinition {
            id: "flour_powerhouse",
            name: "Flour Powerhouse",
            description: "Bake twenty-five loaves",
            points: 150,
            category: Milestone,
            predicate: |s| s.total_loaves_baked >= 25,
        },
        BadgeDefinition {
            id: "master_baker",
            name: "Master Baker",
            description: "Bake fifty loaves",
            points: 250,
            category: Milestone,
            predicate: |s| s.total_loaves_baked >= 50,
        },
        BadgeDefinition {
            id: "century_club",
            name: "Century Club",
            description: "Bake one hundred loaves",
            points: 500,
            category: Milestone,
            predicate: |s| s.total_loaves_baked >= 100,
        },
        // Streaks
        BadgeDefinition {
            id: "on_a_roll",
            name: "On a Roll",
            description: "Bake three days in a row",
            points: 75,
            category: Streak,
            predicate: |s| s.consecutive_baking_days >= 3,
        },
        BadgeDefinition {
            id: "seven_day_rise",
            name: "Seven-Day Rise",
            description: "Bake seven days in a row",
            points: 150,
            category: Streak,
            predicate: |s| s.consecutive_baking_days >= 7,
        },
        BadgeDefinition {
            id: "daily_bread",
            name: "Daily Bread",
            description: "Bake thirty days in a row",
            points: 400,
            category: Streak,
            predicate: |s| s.consecutive_baking_days >= 30,
        },
        // Exploration
        BadgeDefinition {
            id: "curious_baker",
            name: "Curious Baker",
            description: "View five different breads",
            points: 50,
            category: Explorer,
            predicate: |s| s.recipes_viewed.len() >= 5,
        },
        BadgeDefinition {
            id: "bread_explorer",
            name: "Bread Explorer",
            description: "View fifteen different breads",
            points: 100,
            category: Explorer,
            predicate: |s| s.recipes_viewed.len() >= 15,
        },
        BadgeDefinition {
            id: "world_tour",
            name: "World Tour",
            description: "View thirty different breads",
            points: 200,
            category: Explorer,
            predicate: |s| s.recipes_viewed.len() >= 30,
        },
        BadgeDefinition {
            id: "flour_pioneer",
            name: "Flour Pioneer",
            description: "Bake with three alternative flours",
            points: 100,
            category: Explorer,
            predicate: |s| s.alternative_flours_used.len() >= 3,
        },
        BadgeDefinition {
            id: "seasons_best",
            name: "Season's Best",
            description: "Log three seasonal bakes",
            points: 75,
            category: Explorer,
            predicate: |s| s.seasonal_bakes >= 3,
        },
        // Community
        BadgeDefinition {
            id: "inquisitive",
            name: "Inquisitive",
            description: "Ask the bread expert a question",
            points: 25,
            category: Community,
            predicate: |s| s.questions_asked >= 1,
        },
        BadgeDefinition {
            id: "bread_scholar",
            name: "Bread Scholar",
            description: "Ask ten questions",
            points: 100,
            category: Community,
            predicate: |s| s.questions_asked >= 10,
        },
        BadgeDefinition {
            id: "crumb_sharer",
            name: "Crumb Sharer",
            description: "Share three bakes",
            points: 50,
            category: Community,
            predicate: |s| s.social_shares >= 3,
        },
        BadgeDefinition {
            id: "helpful_critic",
            name: "Helpful Critic",
            description: "Rate five AI answers",
            points: 50,
            category: Community,
            predicate: |s| s.feedback_given >= 5,
        },
        BadgeDefinition {
            id: "challenge_champion",
            name: "Challenge Champion",
            description: "Complete three baking challenges",
            points: 150,
            category: Community,
            predicate: |s| s.challenges_completed >= 3,
        },
        // Special
        BadgeDefinition {
            id: "weekend_warrior",
            name: "Weekend Warrior",
            description: "Bake on five weekend days",
            points: 75,
            category: Special,
            predicate: |s| s.weekend_bakes >= 5,
        },
        BadgeDefinition {
            id: "starter_parent",
            name: "Starter Parent",
            description: "Keep a starter alive for a week",
            points: 100,
            category: Special,
            predicate: |s| s.starter_days_active >= 7,
        },
        BadgeDefinition {
            id: "starter_keeper",
            name: "Starter Keeper",
            description: "Keep a starter alive for a month",
            points: 200,
            category: Special,
            predicate: |s| s.starter_days_active >= 30,
        },
    ]
});
