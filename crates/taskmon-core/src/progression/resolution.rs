//! Encounter resolution: partner evolution, then wild catches.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::profile::{Creature, Profile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOutcome {
    pub has_new_pokemon: bool,
    pub has_evolved: bool,
}

/// Evolve the partner by one stage if its exp has reached the threshold.
///
/// Returns the new species name. Registers it in the pokedex as a side effect;
/// the second field reports whether that registration was new.
pub fn evolve_partner(catalog: &Catalog, profile: &mut Profile) -> Option<(String, bool)> {
    let partner = profile.partner()?;
    let current = catalog.lookup_by_name(&partner.current_name)?;
    let threshold = current.evo_threshold?;
    if partner.exp < f64::from(threshold) {
        return None;
    }
    let next = catalog.lookup_by_name(current.next_evolution()?)?;

    let partner = profile.partner_mut()?;
    let from = std::mem::replace(&mut partner.current_name, next.name.to_string());
    partner.stage = next.stage;
    tracing::info!(from = %from, to = next.name, "partner evolved");

    let is_new = profile.register_species(next);
    Some((next.name.to_string(), is_new))
}

/// Apply the user's catch choices.
///
/// Order matters: the partner evolution check runs first so that an evolved
/// form and a caught species both count as new. Each caught name adds an
/// inventory entry with `exp_gain / 3` exp, including repeats within one
/// batch; only the first sighting of a species touches the pokedex. Names
/// missing from the catalog are skipped.
pub fn resolve_encounter<S: AsRef<str>>(
    catalog: &Catalog,
    profile: &mut Profile,
    caught: &[S],
    exp_gain: u32,
) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();

    if let Some((_, is_new)) = evolve_partner(catalog, profile) {
        outcome.has_evolved = true;
        outcome.has_new_pokemon |= is_new;
    }

    let share = f64::from(exp_gain) / 3.0;
    for name in caught {
        let name = name.as_ref();
        let Some(info) = catalog.lookup_by_name(name) else {
            tracing::warn!(species = name, "caught species not in catalog; skipped");
            continue;
        };
        if profile.register_species(info) {
            outcome.has_new_pokemon = true;
        }
        profile.inventory.push(Creature::from_species(info, share, false));
        tracing::debug!(species = name, "caught");
    }

    outcome
}

/// Replace the pokedex with every catalog species, ascending by id.
pub fn unlock_all_species(catalog: &Catalog, profile: &mut Profile) {
    let mut pokedex: Vec<_> = catalog
        .list_all_species_names()
        .into_iter()
        .filter_map(|name| catalog.lookup_by_name(name))
        .map(|info| crate::profile::PokedexEntry {
            id: info.id,
            name: info.name.to_string(),
        })
        .collect();
    pokedex.sort_by_key(|p| p.id);
    profile.pokedex = pokedex;
    tracing::info!(count = profile.pokedex.len(), "pokedex unlocked");
}
