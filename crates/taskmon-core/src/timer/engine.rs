//! Countdown state machine for a single phase.
//!
//! The engine has no internal thread. Each call to `tick()` stands for one
//! elapsed second; the caller (see [`super::driver`]) supplies the ticks.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |           |
//!           +--> Expired <+   (tick to zero, or skip)
//! Expired -> Idle            (acknowledge / cancel)
//! ```

use serde::{Deserialize, Serialize};

use super::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    phase: Option<Phase>,
    remaining_secs: u64,
    total_secs: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            phase: None,
            remaining_secs: 0,
            total_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// Running or paused: a countdown exists for the current phase.
    pub fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return if self.state == TimerState::Expired { 1.0 } else { 0.0 };
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down `phase`. Refused while a countdown is active.
    pub fn start(&mut self, phase: Phase, duration_secs: u64) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = TimerState::Running;
        self.phase = Some(phase);
        self.remaining_secs = duration_secs;
        self.total_secs = duration_secs;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// One second elapsed. Returns the phase that just expired, at most once.
    ///
    /// A zero-length phase expires on its first tick.
    pub fn tick(&mut self) -> Option<Phase> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.expire();
        }
        None
    }

    /// Force the current phase to expire now, paused or not.
    pub fn skip(&mut self) -> Option<Phase> {
        if !self.is_active() {
            return None;
        }
        self.expire()
    }

    /// Drop the current phase without firing completion.
    pub fn cancel(&mut self) -> Option<Phase> {
        let phase = self.phase.take();
        self.state = TimerState::Idle;
        self.remaining_secs = 0;
        self.total_secs = 0;
        phase
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self) -> Option<Phase> {
        self.state = TimerState::Expired;
        self.remaining_secs = 0;
        self.phase
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
