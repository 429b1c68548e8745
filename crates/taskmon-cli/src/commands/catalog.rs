use clap::Subcommand;
use taskmon_core::{Catalog, ElementType};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List species, optionally filtered by type
    List {
        /// Only species of this type (e.g. "Fire")
        #[arg(long = "type")]
        element: Option<ElementType>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one species
    Show {
        /// Species name (case-insensitive)
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the session types that have wild encounters
    Types,
}

pub fn run(action: CatalogAction) -> CmdResult {
    let catalog = Catalog::builtin();
    match action {
        CatalogAction::List { element, json } => {
            let species: Vec<_> = match element {
                Some(element) => catalog.species_of_type(element),
                None => catalog.iter().collect(),
            };
            if json {
                return print_json(&species);
            }
            for info in species {
                println!("#{:03} {:<12} {:<9} stage {}", info.id, info.name, info.element, info.stage);
            }
        }
        CatalogAction::Show { name, json } => {
            let info = catalog
                .resolve_name(&name)
                .and_then(|n| catalog.lookup_by_name(n))
                .ok_or_else(|| format!("unknown species: {name}"))?;
            if json {
                return print_json(info);
            }
            println!("#{:03} {}", info.id, info.name);
            println!("Type:   {}", info.element);
            println!("Stage:  {}", info.stage);
            match (info.evo_threshold, info.next_evolution()) {
                (Some(threshold), Some(next)) => {
                    println!("Evolves into {next} at {threshold} exp");
                    if info.next_evolutions.len() > 1 {
                        println!("Other forms: {}", info.next_evolutions[1..].join(", "));
                    }
                }
                _ => println!("Final form"),
            }
        }
        CatalogAction::Types => {
            for element in catalog.session_types() {
                let count = catalog.species_of_type(element).len();
                println!("{element:<9} {count} species");
            }
        }
    }
    Ok(())
}
