//! Study-phase rewards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ElementType};
use crate::profile::Profile;

/// Minutes of study per encounter slot.
pub const MINUTES_PER_ENCOUNTER: u32 = 10;
/// 30 minutes of study is worth 100 exp.
pub const EXP_PER_30_MINUTES: u32 = 100;

/// Outcome of one finished study phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRewards {
    #[serde(rename = "type")]
    pub session_type: ElementType,
    pub duration_minutes: u32,
    pub exp_gained: u32,
    /// Offered species, in sample order. May repeat.
    pub encounters: Vec<String>,
}

pub fn total_encounters(duration_minutes: u32) -> u32 {
    duration_minutes / MINUTES_PER_ENCOUNTER
}

/// `floor(duration / 30 * 100)`, in integer arithmetic.
pub fn exp_gain(duration_minutes: u32) -> u32 {
    let exp = u64::from(duration_minutes) * u64::from(EXP_PER_30_MINUTES) / 30;
    u32::try_from(exp).unwrap_or(u32::MAX)
}

/// Roll the encounters for a study phase and credit the partner's exp.
///
/// Slots whose type has no species are dropped, not padded.
pub fn compute_rewards<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &mut Profile,
    duration_minutes: u32,
    session_type: ElementType,
    rng: &mut R,
) -> SessionRewards {
    let exp_gained = exp_gain(duration_minutes);
    let encounters: Vec<String> = (0..total_encounters(duration_minutes))
        .filter_map(|_| catalog.sample_wild_encounter(session_type, rng))
        .map(str::to_string)
        .collect();

    match profile.partner_mut() {
        Some(partner) => {
            partner.exp += f64::from(exp_gained);
            tracing::info!(
                partner = %partner.current_name,
                exp_gained,
                total_exp = partner.exp,
                "partner gained exp"
            );
        }
        None => tracing::warn!("study phase finished without a partner; exp not credited"),
    }

    SessionRewards {
        session_type,
        duration_minutes,
        exp_gained,
        encounters,
    }
}
