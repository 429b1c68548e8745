use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ElementType;
use crate::progression::SessionRewards;
use crate::timer::{Phase, TimerState};

/// Every session state change produces an Event.
///
/// `PhaseExpired` and `ReturnedToMenu` are the two outward signals a front
/// end must act on; the rest are informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseStarted {
        phase: Phase,
        session_type: ElementType,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Study phase ended (naturally or skipped); rewards await resolution.
    PhaseExpired {
        rewards: SessionRewards,
        skipped: bool,
        at: DateTime<Utc>,
    },
    /// Rest phase ended; control goes back to the main menu.
    ReturnedToMenu {
        skipped: bool,
        at: DateTime<Utc>,
    },
    /// A phase was torn down without completing.
    PhaseCancelled {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        phase: Option<Phase>,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True for the events that end a phase.
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::PhaseExpired { .. } | Event::ReturnedToMenu { .. })
    }
}
