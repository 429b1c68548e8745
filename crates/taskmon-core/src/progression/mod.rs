//! Reward, catch, and evolution rules applied to a [`Profile`](crate::Profile).
//!
//! Functions here mutate the profile in memory only. Persisting the result is
//! the caller's job.

mod resolution;
mod rewards;

pub use resolution::{evolve_partner, resolve_encounter, unlock_all_species, ResolutionOutcome};
pub use rewards::{
    compute_rewards, exp_gain, total_encounters, SessionRewards, EXP_PER_30_MINUTES,
    MINUTES_PER_ENCOUNTER,
};
