//! Static species catalog.
//!
//! Every lookup is pure. An unknown name is reported as `None`, which callers
//! treat as "skip this slot / skip this catch".

mod species;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use species::STARTERS;

/// Elemental type tag. Doubles as the session (encounter zone) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Bug,
    Poison,
    Rock,
    Ghost,
    Dragon,
}

impl ElementType {
    pub const ALL: [ElementType; 11] = [
        ElementType::Normal,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Grass,
        ElementType::Electric,
        ElementType::Psychic,
        ElementType::Bug,
        ElementType::Poison,
        ElementType::Rock,
        ElementType::Ghost,
        ElementType::Dragon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Normal => "Normal",
            ElementType::Fire => "Fire",
            ElementType::Water => "Water",
            ElementType::Grass => "Grass",
            ElementType::Electric => "Electric",
            ElementType::Psychic => "Psychic",
            ElementType::Bug => "Bug",
            ElementType::Poison => "Poison",
            ElementType::Rock => "Rock",
            ElementType::Ghost => "Ghost",
            ElementType::Dragon => "Dragon",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownSessionType(s.to_string()))
    }
}

/// Catalog metadata for one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesInfo {
    pub id: u32,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub element: ElementType,
    /// Evolution stage (1 = base form).
    pub stage: u8,
    /// Exp needed to evolve. `None` marks a final evolution.
    pub evo_threshold: Option<u32>,
    /// Evolution targets; only the first one is ever used.
    pub next_evolutions: &'static [&'static str],
}

impl SpeciesInfo {
    pub fn is_final(&self) -> bool {
        self.evo_threshold.is_none()
    }

    pub fn next_evolution(&self) -> Option<&'static str> {
        self.next_evolutions.first().copied()
    }

    /// Threshold in the exported-table encoding, where `-1` means "never".
    pub fn evo_threshold_raw(&self) -> i64 {
        self.evo_threshold.map(i64::from).unwrap_or(-1)
    }
}

/// Lookup and sampling over a species table.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<SpeciesInfo>,
}

impl Catalog {
    /// The built-in table shipped with the client.
    pub fn builtin() -> Self {
        Self::new(species::SPECIES.to_vec())
    }

    pub fn new(mut entries: Vec<SpeciesInfo>) -> Self {
        entries.sort_by_key(|s| s.id);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesInfo> {
        self.entries.iter()
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&SpeciesInfo> {
        self.entries.iter().find(|s| s.name == name)
    }

    pub fn lookup_by_id(&self, id: u32) -> Option<&SpeciesInfo> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn lookup_id_by_name(&self, name: &str) -> Option<u32> {
        self.lookup_by_name(name).map(|s| s.id)
    }

    /// Case-insensitive name resolution for user input.
    pub fn resolve_name(&self, input: &str) -> Option<&'static str> {
        let input = input.trim();
        self.entries
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(input))
            .map(|s| s.name)
    }

    /// Species whose elemental type matches `element`.
    pub fn species_of_type(&self, element: ElementType) -> Vec<&SpeciesInfo> {
        self.entries.iter().filter(|s| s.element == element).collect()
    }

    /// Draw one wild species of `element` uniformly at random.
    ///
    /// Each call is independent; repeated calls may return the same name.
    pub fn sample_wild_encounter<R: Rng + ?Sized>(
        &self,
        element: ElementType,
        rng: &mut R,
    ) -> Option<&'static str> {
        self.species_of_type(element)
            .choose(rng)
            .map(|s| s.name)
    }

    pub fn list_all_species_names(&self) -> BTreeSet<&'static str> {
        self.entries.iter().map(|s| s.name).collect()
    }

    /// Element types with at least one species, in declaration order.
    pub fn session_types(&self) -> Vec<ElementType> {
        ElementType::ALL
            .into_iter()
            .filter(|t| self.entries.iter().any(|s| s.element == *t))
            .collect()
    }

    pub fn starters(&self) -> &'static [&'static str] {
        STARTERS
    }

    pub fn is_starter(&self, name: &str) -> bool {
        STARTERS.contains(&name) && self.lookup_by_name(name).is_some()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
