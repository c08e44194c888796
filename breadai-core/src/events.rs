//! Event types and broadcast bus for UI binding
//!
//! The UI shell subscribes to [`EventBus`] and re-renders from events instead
//! of polling core state. Events are serde-tagged so a shell that bridges to
//! another language (FFI, webview) can forward them as JSON unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Core event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CoreEvent {
    /// User statistics mutated (any record_* call or reset)
    StatsChanged {
        timestamp: DateTime<Utc>,
    },

    /// A badge unlock to surface to the user
    ///
    /// When one evaluation pass unlocks several badges at once, only the
    /// first (catalog order) is announced; the rest unlock silently.
    BadgeUnlocked {
        badge_id: String,
        name: String,
        points: u32,
        total_points: u32,
        level: u32,
        timestamp: DateTime<Utc>,
    },

    /// Level increased as a result of an evaluation pass
    LevelUp {
        level: u32,
        timestamp: DateTime<Utc>,
    },

    /// Countdown timer started (preempts any previous timer)
    TimerStarted {
        name: String,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// Periodic countdown progress (sub-second cadence while running)
    TimerTick {
        remaining_ms: u64,
        progress: f64,
        timestamp: DateTime<Utc>,
    },

    /// Countdown paused; remaining time frozen
    TimerPaused {
        remaining_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// Countdown resumed from pause
    TimerResumed {
        remaining_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// Countdown reached zero
    TimerCompleted {
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// Countdown cancelled and cleared
    TimerReset {
        timestamp: DateTime<Utc>,
    },
}

impl CoreEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            CoreEvent::StatsChanged { .. } => "StatsChanged",
            CoreEvent::BadgeUnlocked { .. } => "BadgeUnlocked",
            CoreEvent::LevelUp { .. } => "LevelUp",
            CoreEvent::TimerStarted { .. } => "TimerStarted",
            CoreEvent::TimerTick { .. } => "TimerTick",
            CoreEvent::TimerPaused { .. } => "TimerPaused",
            CoreEvent::TimerResumed { .. } => "TimerResumed",
            CoreEvent::TimerCompleted { .. } => "TimerCompleted",
            CoreEvent::TimerReset { .. } => "TimerReset",
        }
    }
}

/// Broadcast bus distributing [`CoreEvent`]s to all subscribers
///
/// Created once at the composition root and cloned into the stats store and
/// timer. Lossy by design: no subscribers is fine, slow subscribers drop old
/// events.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create a new bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast an event, ignoring if no subscribers are connected
    pub fn broadcast_lossy(&self, event: CoreEvent) {
        debug!(event = event.event_type(), "Broadcasting core event");
        let _ = self.tx.send(event);
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.tx.subscribe()
    }

    /// Current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tagging() {
        let event = CoreEvent::BadgeUnlocked {
            badge_id: "rookie_baker".to_string(),
            name: "Rookie Baker".to_string(),
            points: 50,
            total_points: 50,
            level: 1,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"BadgeUnlocked\""));
        assert!(json.contains("\"badge_id\":\"rookie_baker\""));

        let back: CoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type(), "BadgeUnlocked");
    }

    #[test]
    fn test_broadcast_without_subscribers_is_ok() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        // Must not panic or error out
        bus.broadcast_lossy(CoreEvent::StatsChanged { timestamp: Utc::now() });
    }

    #[test]
    fn test_subscriber_receives_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.broadcast_lossy(CoreEvent::TimerReset { timestamp: Utc::now() });

        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type(), "TimerReset");
        assert!(rx.try_recv().is_err());
    }
}
