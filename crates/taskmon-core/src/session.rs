//! Session/progression engine.
//!
//! Owns the phase timer and the pending encounter. The profile is owned by
//! the caller and passed in by `&mut` on every operation that changes it.
//!
//! ```text
//! Idle -> Running(Study) -> Expired(Study) --resolve--> Idle
//!      -> Running(Rest)  -> Idle (ReturnedToMenu)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(Catalog::builtin(), None);
//! engine.start_session(SessionConfig::new(ElementType::Fire, 30, 5))?;
//! // once per second:
//! if let Some(Event::PhaseExpired { rewards, .. }) = engine.tick(&mut profile) { ... }
//! let outcome = engine.resolve_encounter(&mut profile, &rewards.encounters);
//! engine.start_rest()?;
//! ```

use chrono::Utc;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::events::Event;
use crate::profile::Profile;
use crate::progression::{self, ResolutionOutcome, SessionRewards};
use crate::timer::{Phase, SessionConfig, TimerEngine, TimerState};

/// A finished study phase waiting for the user's catch decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEncounter {
    pub config: SessionConfig,
    pub rewards: SessionRewards,
}

pub struct SessionEngine {
    catalog: Catalog,
    timer: TimerEngine,
    config: Option<SessionConfig>,
    pending: Option<PendingEncounter>,
    rng: Mcg128Xsl64,
}

impl SessionEngine {
    /// `seed` makes encounter rolls reproducible; `None` seeds from the OS.
    pub fn new(catalog: Catalog, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            catalog,
            timer: TimerEngine::new(),
            config: None,
            pending: None,
            rng,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingEncounter> {
        self.pending.as_ref()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.timer.state(),
            phase: self.timer.phase(),
            remaining_secs: self.timer.remaining_secs(),
            total_secs: self.timer.total_secs(),
            progress: self.timer.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the phase `config` selects: study, or rest when `break_triggered`.
    ///
    /// Refused while a phase is counting down or an encounter is unresolved.
    /// An invalid config leaves the engine idle.
    pub fn start_session(&mut self, config: SessionConfig) -> Result<Event, ValidationError> {
        if self.timer.is_active() {
            return Err(ValidationError::SessionActive(format!(
                "{} phase is {}",
                self.timer.phase().map(|p| p.to_string()).unwrap_or_default(),
                if self.timer.state() == TimerState::Paused { "paused" } else { "running" }
            )));
        }
        if self.pending.is_some() {
            return Err(ValidationError::SessionActive(
                "encounter awaiting resolution".into(),
            ));
        }
        config.validate()?;

        let phase = config.phase();
        let duration_secs = config.phase_secs();
        self.timer.start(phase, duration_secs);
        tracing::debug!(%phase, duration_secs, session_type = %config.session_type, "phase started");
        let event = Event::PhaseStarted {
            phase,
            session_type: config.session_type,
            duration_secs,
            at: Utc::now(),
        };
        self.config = Some(config);
        Ok(event)
    }

    /// Re-enter the last session for its rest phase.
    pub fn start_rest(&mut self) -> Result<Event, ValidationError> {
        let config = self
            .config
            .as_ref()
            .map(SessionConfig::for_rest)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "session".into(),
                message: "no session to rest after".into(),
            })?;
        self.start_session(config)
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.timer.pause() {
            return None;
        }
        Some(Event::TimerPaused {
            phase: self.timer.phase()?,
            remaining_secs: self.timer.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if !self.timer.resume() {
            return None;
        }
        Some(Event::TimerResumed {
            phase: self.timer.phase()?,
            remaining_secs: self.timer.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// One second elapsed. Returns the completion event when the phase ends.
    pub fn tick(&mut self, profile: &mut Profile) -> Option<Event> {
        let phase = self.timer.tick()?;
        self.complete(phase, profile, false)
    }

    /// End the current phase now. No-op once it has already expired.
    pub fn skip(&mut self, profile: &mut Profile) -> Option<Event> {
        let phase = self.timer.skip()?;
        tracing::debug!(%phase, "phase skipped");
        self.complete(phase, profile, true)
    }

    /// Tear down the running phase without firing its completion.
    pub fn cancel(&mut self) -> Option<Event> {
        if !self.timer.is_active() {
            return None;
        }
        let remaining_secs = self.timer.remaining_secs();
        let phase = self.timer.cancel()?;
        tracing::debug!(%phase, remaining_secs, "phase cancelled");
        Some(Event::PhaseCancelled {
            phase,
            remaining_secs,
            at: Utc::now(),
        })
    }

    /// Apply the user's catch choices to the pending encounter.
    ///
    /// Only offered species can be caught, each offer at most once. Without a
    /// pending encounter this is a no-op.
    pub fn resolve_encounter<S: AsRef<str>>(
        &mut self,
        profile: &mut Profile,
        chosen: &[S],
    ) -> ResolutionOutcome {
        let Some(pending) = self.pending.take() else {
            tracing::warn!("resolve_encounter called with no pending encounter");
            return ResolutionOutcome::default();
        };

        let mut offered = pending.rewards.encounters.clone();
        let mut caught = Vec::with_capacity(chosen.len());
        for name in chosen {
            let name = name.as_ref();
            match offered.iter().position(|o| o == name) {
                Some(idx) => caught.push(offered.swap_remove(idx)),
                None => tracing::warn!(species = name, "not offered in this encounter; ignored"),
            }
        }

        let outcome = progression::resolve_encounter(
            &self.catalog,
            profile,
            &caught,
            pending.rewards.exp_gained,
        );
        if self.timer.state() == TimerState::Expired {
            self.timer.cancel();
        }
        self.config = Some(pending.config);
        outcome
    }

    /// Debug operation: register every catalog species in the pokedex.
    pub fn unlock_all_species(&self, profile: &mut Profile) {
        progression::unlock_all_species(&self.catalog, profile);
    }

    /// Reload an encounter saved by an earlier process.
    pub fn restore_pending(&mut self, pending: PendingEncounter) -> Result<(), ValidationError> {
        if self.timer.is_active() || self.pending.is_some() {
            return Err(ValidationError::SessionActive(
                "cannot restore an encounter over an active session".into(),
            ));
        }
        self.config = Some(pending.config.clone());
        self.pending = Some(pending);
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, phase: Phase, profile: &mut Profile, skipped: bool) -> Option<Event> {
        match phase {
            Phase::Study => {
                let Some(config) = self.config.clone() else {
                    tracing::error!("study phase expired without a session config");
                    self.timer.cancel();
                    return None;
                };
                let rewards = progression::compute_rewards(
                    &self.catalog,
                    profile,
                    config.study_minutes,
                    config.session_type,
                    &mut self.rng,
                );
                tracing::info!(
                    exp_gained = rewards.exp_gained,
                    encounters = rewards.encounters.len(),
                    skipped,
                    "study phase expired"
                );
                self.pending = Some(PendingEncounter {
                    config,
                    rewards: rewards.clone(),
                });
                Some(Event::PhaseExpired {
                    rewards,
                    skipped,
                    at: Utc::now(),
                })
            }
            Phase::Rest => {
                self.timer.cancel();
                tracing::info!(skipped, "rest phase over");
                Some(Event::ReturnedToMenu {
                    skipped,
                    at: Utc::now(),
                })
            }
        }
    }
}
