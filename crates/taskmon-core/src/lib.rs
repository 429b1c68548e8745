//! # TaskMon Core Library
//!
//! This library provides the core logic for TaskMon, a study timer that
//! rewards completed focus sessions with creature encounters, experience and
//! evolution. All operations are available through the standalone `taskmon`
//! CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: Read-only species table (types, evolution chains, thresholds)
//! - **Timer Engine**: A tick-driven study/rest countdown; the async driver in
//!   [`timer::driver`] feeds it one tick per second
//! - **Session Engine**: Wires timer expiry to reward computation and pending
//!   encounter resolution
//! - **Progression**: Exp, catch and evolution rules applied to a [`Profile`]
//! - **Storage**: SQLite key-value store for the profile, an optional HTTP
//!   document store, and TOML configuration
//!
//! ## Key Components
//!
//! - [`Catalog`]: Species lookup and wild encounter sampling
//! - [`SessionEngine`]: Session lifecycle state machine
//! - [`ProfileRepository`]: Local-first profile persistence
//! - [`Config`]: Application configuration management

pub mod catalog;
pub mod error;
pub mod events;
pub mod profile;
pub mod progression;
pub mod session;
pub mod storage;
pub mod timer;

pub use catalog::{Catalog, ElementType, SpeciesInfo};
pub use error::{ConfigError, CoreError, RemoteError, StorageError, ValidationError};
pub use events::Event;
pub use profile::{AvatarVariant, Creature, PokedexEntry, Profile};
pub use progression::{ResolutionOutcome, SessionRewards};
pub use session::{PendingEncounter, SessionEngine};
pub use storage::{Config, LocalStore, ProfileRepository, ProfileStore, RemoteStore};
pub use timer::{Control, Phase, PhaseOutcome, SessionConfig, TimerEngine, TimerState};
