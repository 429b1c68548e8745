//! Trainer profile commands.
//!
//! Covers onboarding (starter selection), the friends list and the debug
//! unlock. Every mutation goes through the repository so the remote copy,
//! when configured, stays in step with the local one.

use clap::Subcommand;
use taskmon_core::progression;
use taskmon_core::{AvatarVariant, Catalog, Profile, ValidationError};

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the current profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the default profile if none exists
    Init,
    /// Choose a starter and finish onboarding
    Starter {
        /// Charmander, Squirtle or Bulbasaur
        name: String,
        /// Avatar variant (male, female)
        #[arg(long, default_value = "male")]
        avatar: AvatarVariant,
        /// Trainer name to use
        #[arg(long)]
        trainer_name: Option<String>,
    },
    /// Register every species in the pokedex (debug)
    UnlockAll,
    /// Add a friend by share id
    AddFriend {
        /// Friend share id (e.g. "local-user-Misty")
        id: String,
    },
    /// Delete the local profile and any pending encounter
    Reset,
}

pub async fn run(action: ProfileAction) -> CmdResult {
    let ctx = Context::open()?;
    match action {
        ProfileAction::Show { json } => show(&ctx, json).await,
        ProfileAction::Init => {
            let profile = ctx.repo.initialize_default()?;
            println!(
                "Profile for {} ({})",
                profile.trainer_name,
                if profile.is_profile_complete { "complete" } else { "choose a starter next" }
            );
            Ok(())
        }
        ProfileAction::Starter {
            name,
            avatar,
            trainer_name,
        } => choose_starter(&ctx, &name, avatar, trainer_name).await,
        ProfileAction::UnlockAll => {
            let mut profile = ctx.profile().await?;
            progression::unlock_all_species(&Catalog::builtin(), &mut profile);
            ctx.persist(&profile).await?;
            println!("Pokedex now lists {} species", profile.pokedex.len());
            Ok(())
        }
        ProfileAction::AddFriend { id } => {
            let mut profile = ctx.profile().await?;
            if profile.add_friend(&id) {
                ctx.persist(&profile).await?;
                println!("Added friend: {}", id.trim());
            } else {
                println!("Friend not added (empty or already present)");
            }
            Ok(())
        }
        ProfileAction::Reset => {
            ctx.repo.local().clear_profile()?;
            println!("Local profile removed");
            Ok(())
        }
    }
}

async fn show(ctx: &Context, json: bool) -> CmdResult {
    let profile = ctx.profile().await?;
    if json {
        return print_json(&profile);
    }

    print_summary(&profile);
    Ok(())
}

fn print_summary(profile: &Profile) {
    println!("Trainer:  {} ({:?})", profile.trainer_name, profile.avatar);
    println!("Share id: {}", profile.share_id());
    if !profile.is_profile_complete {
        println!("Status:   no starter yet (taskmon profile starter <name>)");
        return;
    }
    if let Some(partner) = profile.partner() {
        println!(
            "Partner:  {} [{}] stage {} exp {:.1}",
            partner.current_name, partner.elemental_type, partner.stage, partner.exp
        );
    }
    println!("Pokedex:  {} species", profile.pokedex.len());
    println!("Owned:    {} creatures", profile.inventory.len());
    println!("Friends:  {}", profile.friends.len());
    println!("Since:    {}", profile.created_at.format("%Y-%m-%d"));
}

async fn choose_starter(
    ctx: &Context,
    name: &str,
    avatar: AvatarVariant,
    trainer_name: Option<String>,
) -> CmdResult {
    let catalog = Catalog::builtin();
    let starter = catalog
        .resolve_name(name)
        .ok_or_else(|| ValidationError::NotAStarter(name.to_string()))?;

    let mut profile = ctx.profile().await?;
    if let Some(trainer_name) = trainer_name {
        if profile.is_profile_complete {
            return Err(ValidationError::ProfileAlreadyComplete.into());
        }
        profile.trainer_name = trainer_name;
    }
    let partner = profile.complete_with_starter(&catalog, starter, avatar)?.current_name.clone();
    ctx.persist(&profile).await?;
    println!("{} chose {partner} as their partner!", profile.trainer_name);
    Ok(())
}
