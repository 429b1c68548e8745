//! Real-time tick source for a [`SessionEngine`] phase.
//!
//! One `tokio::time::Interval` exists per running stretch of a phase. It is
//! dropped on pause, skip, cancel and completion, so a stopped countdown can
//! never deliver a late tick.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval};

use crate::events::Event;
use crate::profile::Profile;
use crate::session::SessionEngine;
use crate::timer::TimerState;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// User controls delivered while a phase runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    Skip,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOutcome {
    /// `PhaseExpired` or `ReturnedToMenu`.
    Completed(Event),
    Cancelled,
}

fn start_interval(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Drive the engine's current phase until it completes or is cancelled.
///
/// `on_event` sees every event, including a `StateSnapshot` after each tick.
/// A closed control channel stops accepting controls but keeps ticking.
pub async fn run_phase<F>(
    engine: &mut SessionEngine,
    profile: &mut Profile,
    controls: &mut mpsc::Receiver<Control>,
    period: Duration,
    mut on_event: F,
) -> PhaseOutcome
where
    F: FnMut(&Event),
{
    let mut interval = match engine.state() {
        TimerState::Running => Some(start_interval(period)),
        TimerState::Paused => None,
        _ => return PhaseOutcome::Cancelled,
    };
    let mut controls_open = true;

    loop {
        tokio::select! {
            _ = next_tick(&mut interval) => {
                if let Some(event) = engine.tick(profile) {
                    on_event(&event);
                    return PhaseOutcome::Completed(event);
                }
                on_event(&engine.snapshot());
            }
            control = controls.recv(), if controls_open => match control {
                Some(Control::Pause) => {
                    if let Some(event) = engine.pause() {
                        interval = None;
                        on_event(&event);
                    }
                }
                Some(Control::Resume) => {
                    if let Some(event) = engine.resume() {
                        interval = Some(start_interval(period));
                        on_event(&event);
                    }
                }
                Some(Control::Skip) => {
                    if let Some(event) = engine.skip(profile) {
                        on_event(&event);
                        return PhaseOutcome::Completed(event);
                    }
                }
                Some(Control::Cancel) => {
                    if let Some(event) = engine.cancel() {
                        on_event(&event);
                    }
                    return PhaseOutcome::Cancelled;
                }
                None => {
                    tracing::debug!("control channel closed; phase keeps running");
                    controls_open = false;
                    if interval.is_none() {
                        // Paused with nobody left to resume.
                        if let Some(event) = engine.cancel() {
                            on_event(&event);
                        }
                        return PhaseOutcome::Cancelled;
                    }
                }
            },
        }
    }
}
