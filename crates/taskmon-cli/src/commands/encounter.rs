use clap::Subcommand;
use serde_json::json;

use taskmon_core::{Catalog, Profile, ResolutionOutcome, SessionEngine};

use super::session::resolve_names;
use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum EncounterAction {
    /// Show the encounter waiting for a catch decision
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Catch some, all or none of the offered creatures
    Resolve {
        /// Species to catch; omit to release everything
        names: Vec<String>,
        /// Catch every offered creature
        #[arg(long, conflicts_with = "names")]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(action: EncounterAction) -> CmdResult {
    let ctx = Context::open()?;
    match action {
        EncounterAction::Show { json } => {
            let pending = ctx.repo.local().load_pending()?;
            if json {
                return print_json(&pending);
            }
            match pending {
                Some(pending) => {
                    let rewards = &pending.rewards;
                    println!(
                        "{} session, {} min, +{} exp",
                        rewards.session_type, rewards.duration_minutes, rewards.exp_gained
                    );
                    if rewards.encounters.is_empty() {
                        println!("No wild creatures appeared");
                    } else {
                        println!("Wild creatures: {}", rewards.encounters.join(", "));
                    }
                }
                None => println!("No pending encounter"),
            }
            Ok(())
        }
        EncounterAction::Resolve { names, all, json } => resolve(&ctx, names, all, json).await,
    }
}

async fn resolve(ctx: &Context, names: Vec<String>, all: bool, json: bool) -> CmdResult {
    let pending = ctx
        .repo
        .local()
        .load_pending()?
        .ok_or("no pending encounter")?;
    let mut profile = ctx.complete_profile().await?;

    let catalog = Catalog::builtin();
    let chosen = if all {
        pending.rewards.encounters.clone()
    } else {
        resolve_names(&catalog, &names)
    };

    let mut engine = SessionEngine::new(catalog, ctx.config.seed);
    engine.restore_pending(pending)?;
    let outcome = engine.resolve_encounter(&mut profile, &chosen);

    ctx.persist(&profile).await?;
    ctx.repo.local().clear_pending()?;
    report_resolution(&profile, &outcome, json)
}

/// Print what a resolution changed.
pub fn report_resolution(profile: &Profile, outcome: &ResolutionOutcome, json: bool) -> CmdResult {
    if json {
        return print_json(&json!({
            "outcome": outcome,
            "partner": profile.partner(),
            "pokedex": profile.pokedex.len(),
            "inventory": profile.inventory.len(),
        }));
    }

    if outcome.has_evolved {
        if let Some(partner) = profile.partner() {
            println!("Your partner evolved into {}!", partner.current_name);
        }
    }
    if outcome.has_new_pokemon {
        println!("New pokedex entries! {} species registered", profile.pokedex.len());
    }
    println!("You now own {} creatures", profile.inventory.len());
    Ok(())
}
