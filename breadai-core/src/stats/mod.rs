//! User statistics: model, streak/level math, and the persisted store

mod model;
mod store;

pub use model::{level_for_points, streak_ending_on, UserStats};
pub use store::StatsStore;
