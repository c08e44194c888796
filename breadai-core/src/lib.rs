//! # BreadAI Core Library
//!
//! Platform-independent core logic for the BreadAI baking app:
//! - User statistics and local persistence (StatsStore)
//! - Badge catalog, unlock evaluation, points and levels
//! - Bake countdown timer (one live timer, pause/resume/reset)
//! - HTTP client for the AI backend (ask / recipe / feedback / health)
//! - Broadcast event bus the UI shell subscribes to

pub mod api;
pub mod badges;
pub mod config;
pub mod error;
pub mod events;
pub mod stats;
pub mod time;
pub mod timer;

pub use api::{ApiError, AskResponse, BreadClient, FeedbackRequest, Rating, Recipe};
pub use badges::{BadgeCategory, BadgeDefinition, BADGE_CATALOG};
pub use config::CoreConfig;
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus};
pub use stats::{StatsStore, UserStats};
pub use timer::{BakeTimer, TimerPhase, TIMER_PRESETS};
