//! Built-in species table.
//!
//! Thresholds: first stages evolve at 300 exp (three 30-minute sessions),
//! middle stages at 900. Fast-evolving bugs and Magikarp are the exceptions.

use super::{ElementType, SpeciesInfo};

use ElementType::*;

const fn species(
    id: u32,
    name: &'static str,
    element: ElementType,
    stage: u8,
    evo_threshold: Option<u32>,
    next_evolutions: &'static [&'static str],
) -> SpeciesInfo {
    SpeciesInfo {
        id,
        name,
        element,
        stage,
        evo_threshold,
        next_evolutions,
    }
}

/// Species offered at onboarding.
pub const STARTERS: &[&str] = &["Charmander", "Squirtle", "Bulbasaur"];

pub(super) const SPECIES: &[SpeciesInfo] = &[
    species(1, "Bulbasaur", Grass, 1, Some(300), &["Ivysaur"]),
    species(2, "Ivysaur", Grass, 2, Some(900), &["Venusaur"]),
    species(3, "Venusaur", Grass, 3, None, &[]),
    species(4, "Charmander", Fire, 1, Some(300), &["Charmeleon"]),
    species(5, "Charmeleon", Fire, 2, Some(900), &["Charizard"]),
    species(6, "Charizard", Fire, 3, None, &[]),
    species(7, "Squirtle", Water, 1, Some(300), &["Wartortle"]),
    species(8, "Wartortle", Water, 2, Some(900), &["Blastoise"]),
    species(9, "Blastoise", Water, 3, None, &[]),
    species(10, "Caterpie", Bug, 1, Some(100), &["Metapod"]),
    species(11, "Metapod", Bug, 2, Some(200), &["Butterfree"]),
    species(12, "Butterfree", Bug, 3, None, &[]),
    species(16, "Pidgey", Normal, 1, Some(300), &["Pidgeotto"]),
    species(17, "Pidgeotto", Normal, 2, Some(900), &["Pidgeot"]),
    species(18, "Pidgeot", Normal, 3, None, &[]),
    species(19, "Rattata", Normal, 1, Some(300), &["Raticate"]),
    species(20, "Raticate", Normal, 2, None, &[]),
    species(23, "Ekans", Poison, 1, Some(300), &["Arbok"]),
    species(24, "Arbok", Poison, 2, None, &[]),
    species(25, "Pikachu", Electric, 1, Some(300), &["Raichu"]),
    species(26, "Raichu", Electric, 2, None, &[]),
    species(37, "Vulpix", Fire, 1, Some(300), &["Ninetales"]),
    species(38, "Ninetales", Fire, 2, None, &[]),
    species(54, "Psyduck", Water, 1, Some(300), &["Golduck"]),
    species(55, "Golduck", Water, 2, None, &[]),
    species(58, "Growlithe", Fire, 1, Some(300), &["Arcanine"]),
    species(59, "Arcanine", Fire, 2, None, &[]),
    species(60, "Poliwag", Water, 1, Some(300), &["Poliwhirl"]),
    species(61, "Poliwhirl", Water, 2, Some(900), &["Poliwrath"]),
    species(62, "Poliwrath", Water, 3, None, &[]),
    species(63, "Abra", Psychic, 1, Some(300), &["Kadabra"]),
    species(64, "Kadabra", Psychic, 2, Some(900), &["Alakazam"]),
    species(65, "Alakazam", Psychic, 3, None, &[]),
    species(69, "Bellsprout", Grass, 1, Some(300), &["Weepinbell"]),
    species(70, "Weepinbell", Grass, 2, Some(900), &["Victreebel"]),
    species(71, "Victreebel", Grass, 3, None, &[]),
    species(74, "Geodude", Rock, 1, Some(300), &["Graveler"]),
    species(75, "Graveler", Rock, 2, Some(900), &["Golem"]),
    species(76, "Golem", Rock, 3, None, &[]),
    species(81, "Magnemite", Electric, 1, Some(300), &["Magneton"]),
    species(82, "Magneton", Electric, 2, None, &[]),
    species(92, "Gastly", Ghost, 1, Some(300), &["Haunter"]),
    species(93, "Haunter", Ghost, 2, Some(900), &["Gengar"]),
    species(94, "Gengar", Ghost, 3, None, &[]),
    species(96, "Drowzee", Psychic, 1, Some(300), &["Hypno"]),
    species(97, "Hypno", Psychic, 2, None, &[]),
    species(100, "Voltorb", Electric, 1, Some(300), &["Electrode"]),
    species(101, "Electrode", Electric, 2, None, &[]),
    species(102, "Exeggcute", Grass, 1, Some(300), &["Exeggutor"]),
    species(103, "Exeggutor", Grass, 2, None, &[]),
    species(122, "Mr. Mime", Psychic, 1, None, &[]),
    species(129, "Magikarp", Water, 1, Some(500), &["Gyarados"]),
    species(130, "Gyarados", Water, 2, None, &[]),
    species(133, "Eevee", Normal, 1, Some(300), &["Vaporeon", "Jolteon", "Flareon"]),
    species(134, "Vaporeon", Water, 2, None, &[]),
    species(135, "Jolteon", Electric, 2, None, &[]),
    species(136, "Flareon", Fire, 2, None, &[]),
    species(143, "Snorlax", Normal, 1, None, &[]),
    species(147, "Dratini", Dragon, 1, Some(300), &["Dragonair"]),
    species(148, "Dragonair", Dragon, 2, Some(900), &["Dragonite"]),
    species(149, "Dragonite", Dragon, 3, None, &[]),
];
