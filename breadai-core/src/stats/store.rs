//! Persisted stats store
//!
//! Holds the single authoritative [`UserStats`] for the process lifetime.
//! Every mutation persists the blob, re-evaluates the badge catalog, and
//! broadcasts events for the UI shell.
//!
//! Persistence is best-effort by design: a missing or unreadable blob loads
//! as a fresh start, and a failed save is logged but never surfaced.

use crate::badges;
use crate::config::CoreConfig;
use crate::error::Result;
use crate::events::{CoreEvent, EventBus};
use crate::stats::{streak_ending_on, UserStats};
use crate::time;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Fixed file name of the persisted stats blob inside the data folder
const STATS_FILE: &str = "user_stats.json";

type TodayFn = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Process-wide stats store
///
/// Read-often, write-on-user-action; RwLock keeps snapshot reads uncontended.
pub struct StatsStore {
    stats: RwLock<UserStats>,
    path: PathBuf,
    bus: EventBus,
    /// Injectable so calendar-sensitive logic (streaks, weekends) is
    /// deterministic under test
    today: TodayFn,
}

impl StatsStore {
    /// Open the store at the configured data folder
    pub fn new(config: &CoreConfig, bus: EventBus) -> Self {
        Self::open(config.data_dir.join(STATS_FILE), bus)
    }

    /// Open the store at an explicit blob path, using the local calendar
    pub fn open(path: PathBuf, bus: EventBus) -> Self {
        Self::with_clock(path, bus, time::today)
    }

    /// Open the store with an explicit "today" provider
    pub fn with_clock(
        path: PathBuf,
        bus: EventBus,
        today: impl Fn() -> NaiveDate + Send + Sync + 'static,
    ) -> Self {
        let stats = Self::load(&path);
        Self {
            stats: RwLock::new(stats),
            path,
            bus,
            today: Box::new(today),
        }
    }

    /// Read the blob, falling back to a fresh start on any failure
    fn load(path: &PathBuf) -> UserStats {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(stats) => {
                    debug!(path = %path.display(), "Loaded persisted stats");
                    stats
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Stats blob unreadable, starting fresh");
                    UserStats::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "No persisted stats, starting fresh");
                UserStats::default()
            }
        }
    }

    /// Write the blob; failures are logged, not propagated
    fn save(&self, stats: &UserStats) {
        if let Err(e) = self.try_save(stats) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist stats");
        }
    }

    fn try_save(&self, stats: &UserStats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(stats)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Snapshot of the current stats
    pub fn stats(&self) -> UserStats {
        self.stats.read().unwrap().clone()
    }

    /// Subscribe to stats/badge events
    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.bus.subscribe()
    }

    /// Apply a mutation, then persist, re-evaluate badges, and broadcast
    fn mutate(&self, apply: impl FnOnce(&mut UserStats)) {
        let (snapshot, newly_unlocked, level_before) = {
            let mut stats = self.stats.write().unwrap();
            let level_before = stats.level;
            apply(&mut stats);
            let newly = badges::evaluate(&mut stats);
            self.save(&stats);
            (stats.clone(), newly, level_before)
        };

        self.bus
            .broadcast_lossy(CoreEvent::StatsChanged { timestamp: time::now() });

        // Only the first badge of a batch is announced; simultaneous extra
        // unlocks stay silent. Long-standing app behavior, kept as-is.
        if let Some(first) = newly_unlocked.first() {
            self.bus.broadcast_lossy(CoreEvent::BadgeUnlocked {
                badge_id: first.id.to_string(),
                name: first.name.to_string(),
                points: first.points,
                total_points: snapshot.total_points,
                level: snapshot.level,
                timestamp: time::now(),
            });
        }

        if snapshot.level > level_before {
            self.bus.broadcast_lossy(CoreEvent::LevelUp {
                level: snapshot.level,
                timestamp: time::now(),
            });
        }
    }

    /// Log a finished bake of `bread_type`
    ///
    /// Counts the loaf, marks the bread as seen, appends today to the bake
    /// log, recomputes the streak from the log, and tracks weekend bakes and
    /// starter age.
    pub fn record_bake(&self, bread_type: &str) {
        let today = (self.today)();
        info!(bread = bread_type, date = %today, "Recording bake");
        self.mutate(|stats| {
            stats.total_loaves_baked += 1;
            stats.recipes_viewed.insert(bread_type.to_string());
            stats.baking_dates.push(today);
            stats.last_bake_date = Some(today);
            stats.consecutive_baking_days = streak_ending_on(&stats.baking_dates, today);
            if time::is_weekend(today) {
                stats.weekend_bakes += 1;
            }
            if let Some(start) = stats.starter_start_date {
                stats.starter_days_active = (today - start).num_days().max(0) as u32;
            }
        });
    }

    pub fn record_recipe_viewed(&self, bread_type: &str) {
        let bread_type = bread_type.to_string();
        self.mutate(|stats| {
            stats.recipes_viewed.insert(bread_type);
        });
    }

    pub fn record_question_asked(&self) {
        self.mutate(|stats| stats.questions_asked += 1);
    }

    pub fn record_social_share(&self) {
        self.mutate(|stats| stats.social_shares += 1);
    }

    pub fn record_feedback_given(&self) {
        self.mutate(|stats| stats.feedback_given += 1);
    }

    pub fn record_challenge_completed(&self) {
        self.mutate(|stats| stats.challenges_completed += 1);
    }

    pub fn record_alternative_flour_used(&self, flour: &str) {
        let flour = flour.to_string();
        self.mutate(|stats| {
            stats.alternative_flours_used.insert(flour);
        });
    }

    pub fn record_seasonal_bake(&self) {
        self.mutate(|stats| stats.seasonal_bakes += 1);
    }

    /// Mark the day the user started their sourdough starter
    ///
    /// No-op if a start date is already set; starter age then accrues on
    /// each bake.
    pub fn record_starter_started(&self) {
        let today = (self.today)();
        self.mutate(|stats| {
            if stats.starter_start_date.is_none() {
                stats.starter_start_date = Some(today);
            }
        });
    }

    /// Irreversibly replace all stats with the zero value
    ///
    /// Confirmation is the caller's concern; this layer just does it.
    pub fn reset_all(&self) {
        info!("Resetting all user stats");
        {
            let mut stats = self.stats.write().unwrap();
            *stats = UserStats::default();
            self.save(&stats);
        }
        self.bus
            .broadcast_lossy(CoreEvent::StatsChanged { timestamp: time::now() });
    }
}
