//! Bake countdown timer
//!
//! Exactly one named countdown runs at a time; starting a new one preempts
//! the old. Remaining time is always recomputed from an absolute deadline,
//! never decremented per tick, so ticks cannot accumulate drift. The tick
//! task is aborted deterministically on pause/reset/drop.

use crate::events::{CoreEvent, EventBus};
use crate::time;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Tick cadence while running (sub-second for responsive UI)
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// A named preset duration selectable in the UI
#[derive(Debug, Clone, Copy)]
pub struct TimerPreset {
    pub name: &'static str,
    pub duration: Duration,
}

/// The five stock bake-stage presets
pub static TIMER_PRESETS: [TimerPreset; 5] = [
    TimerPreset { name: "Autolyse", duration: Duration::from_secs(30 * 60) },
    TimerPreset { name: "Bulk Ferment", duration: Duration::from_secs(4 * 60 * 60) },
    TimerPreset { name: "Proof", duration: Duration::from_secs(2 * 60 * 60) },
    TimerPreset { name: "Bench Rest", duration: Duration::from_secs(20 * 60) },
    TimerPreset { name: "Bake", duration: Duration::from_secs(45 * 60) },
];

/// Timer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

struct TimerInner {
    phase: TimerPhase,
    name: String,
    total: Duration,
    /// Absolute completion time while Running
    deadline: Option<Instant>,
    /// Remaining time captured at pause
    frozen_remaining: Duration,
}

impl TimerInner {
    fn idle() -> Self {
        Self {
            phase: TimerPhase::Idle,
            name: String::new(),
            total: Duration::ZERO,
            deadline: None,
            frozen_remaining: Duration::ZERO,
        }
    }

    fn remaining_at(&self, now: Instant) -> Duration {
        match self.phase {
            TimerPhase::Running => self
                .deadline
                .map(|d| d.saturating_duration_since(now))
                .unwrap_or(Duration::ZERO),
            TimerPhase::Paused => self.frozen_remaining,
            TimerPhase::Idle => Duration::ZERO,
        }
    }
}

/// The app's single countdown timer
///
/// Methods are synchronous; `start`/`resume` spawn the tick task and must be
/// called from within a tokio runtime.
pub struct BakeTimer {
    inner: Arc<Mutex<TimerInner>>,
    tick_task: Mutex<Option<JoinHandle<()>>>,
    bus: EventBus,
}

impl BakeTimer {
    pub fn new(bus: EventBus) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerInner::idle())),
            tick_task: Mutex::new(None),
            bus,
        }
    }

    /// Start a countdown, preempting any live timer
    pub fn start(&self, duration: Duration, name: &str) {
        self.abort_tick_task();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.phase = TimerPhase::Running;
            inner.name = name.to_string();
            inner.total = duration;
            inner.deadline = Some(Instant::now() + duration);
            inner.frozen_remaining = Duration::ZERO;
        }
        info!(name, duration_ms = duration.as_millis() as u64, "Timer started");
        self.bus.broadcast_lossy(CoreEvent::TimerStarted {
            name: name.to_string(),
            duration_ms: duration.as_millis() as u64,
            timestamp: time::now(),
        });
        self.spawn_tick_task();
    }

    /// Freeze the countdown; no-op unless Running
    pub fn pause(&self) {
        let remaining = {
            let mut inner = self.inner.lock().unwrap();
            if inner.phase != TimerPhase::Running {
                return;
            }
            let remaining = inner.remaining_at(Instant::now());
            inner.phase = TimerPhase::Paused;
            inner.frozen_remaining = remaining;
            inner.deadline = None;
            remaining
        };
        self.abort_tick_task();
        debug!(remaining_ms = remaining.as_millis() as u64, "Timer paused");
        self.bus.broadcast_lossy(CoreEvent::TimerPaused {
            remaining_ms: remaining.as_millis() as u64,
            timestamp: time::now(),
        });
    }

    /// Continue from a pause; no-op unless Paused with time left
    pub fn resume(&self) {
        let remaining = {
            let mut inner = self.inner.lock().unwrap();
            if inner.phase != TimerPhase::Paused || inner.frozen_remaining.is_zero() {
                return;
            }
            let remaining = inner.frozen_remaining;
            inner.phase = TimerPhase::Running;
            inner.deadline = Some(Instant::now() + remaining);
            inner.frozen_remaining = Duration::ZERO;
            remaining
        };
        debug!(remaining_ms = remaining.as_millis() as u64, "Timer resumed");
        self.bus.broadcast_lossy(CoreEvent::TimerResumed {
            remaining_ms: remaining.as_millis() as u64,
            timestamp: time::now(),
        });
        self.spawn_tick_task();
    }

    /// Cancel and clear the countdown from any state
    pub fn reset(&self) {
        self.abort_tick_task();
        {
            let mut inner = self.inner.lock().unwrap();
            *inner = TimerInner::idle();
        }
        debug!("Timer reset");
        self.bus
            .broadcast_lossy(CoreEvent::TimerReset { timestamp: time::now() });
    }

    /// Time left, recomputed from the deadline
    pub fn remaining(&self) -> Duration {
        self.inner.lock().unwrap().remaining_at(Instant::now())
    }

    /// Completion fraction in [0, 1]
    pub fn progress(&self) -> f64 {
        let inner = self.inner.lock().unwrap();
        if inner.total.is_zero() {
            return 0.0;
        }
        let remaining = inner.remaining_at(Instant::now());
        (1.0 - remaining.as_secs_f64() / inner.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn phase(&self) -> TimerPhase {
        self.inner.lock().unwrap().phase
    }

    pub fn is_running(&self) -> bool {
        self.phase() == TimerPhase::Running
    }

    /// Name of the live countdown (empty when Idle)
    pub fn name(&self) -> String {
        self.inner.lock().unwrap().name.clone()
    }

    /// Subscribe to timer events
    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.bus.subscribe()
    }

    fn abort_tick_task(&self) {
        if let Some(handle) = self.tick_task.lock().unwrap().take() {
            handle.abort();
        }
    }

    fn spawn_tick_task(&self) {
        let inner = Arc::clone(&self.inner);
        let bus = self.bus.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK_INTERVAL);
            // First tick completes immediately; that gives the UI an instant
            // reading right after start/resume.
            loop {
                ticker.tick().await;

                enum Step {
                    Tick { remaining_ms: u64, progress: f64 },
                    Done { name: String },
                    Stop,
                }

                let step = {
                    let mut guard = inner.lock().unwrap();
                    if guard.phase != TimerPhase::Running {
                        Step::Stop
                    } else {
                        let now = Instant::now();
                        let remaining = guard.remaining_at(now);
                        if remaining.is_zero() {
                            let name = std::mem::take(&mut guard.name);
                            *guard = TimerInner::idle();
                            Step::Done { name }
                        } else {
                            let progress = if guard.total.is_zero() {
                                1.0
                            } else {
                                (1.0 - remaining.as_secs_f64() / guard.total.as_secs_f64())
                                    .clamp(0.0, 1.0)
                            };
                            Step::Tick {
                                remaining_ms: remaining.as_millis() as u64,
                                progress,
                            }
                        }
                    }
                };

                match step {
                    Step::Tick { remaining_ms, progress } => {
                        bus.broadcast_lossy(CoreEvent::TimerTick {
                            remaining_ms,
                            progress,
                            timestamp: time::now(),
                        });
                    }
                    Step::Done { name } => {
                        info!(name = %name, "Timer completed");
                        bus.broadcast_lossy(CoreEvent::TimerCompleted {
                            name,
                            timestamp: time::now(),
                        });
                        break;
                    }
                    Step::Stop => break,
                }
            }
        });

        *self.tick_task.lock().unwrap() = Some(handle);
    }
}

impl Drop for BakeTimer {
    // The recurring tick task must not outlive its owner
    fn drop(&mut self) {
        self.abort_tick_task();
    }
}
