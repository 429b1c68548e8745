//! Read-only views of the pokedex and the owned creatures.

use super::{print_json, CmdResult, Context};

pub async fn pokedex(json: bool) -> CmdResult {
    let ctx = Context::open()?;
    let profile = ctx.profile().await?;
    let entries = profile.sorted_pokedex();
    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("Pokedex is empty");
        return Ok(());
    }
    for entry in &entries {
        println!("#{:03} {}", entry.id, entry.name);
    }
    println!("{} species registered", entries.len());
    Ok(())
}

pub async fn inventory(json: bool) -> CmdResult {
    let ctx = Context::open()?;
    let profile = ctx.profile().await?;
    if json {
        return print_json(&profile.inventory);
    }

    if profile.inventory.is_empty() {
        println!("No creatures yet");
        return Ok(());
    }
    for creature in &profile.inventory {
        println!(
            "{}{:<12} {:<9} stage {} exp {:>7.1}",
            if creature.is_partner { "* " } else { "  " },
            creature.current_name,
            creature.elemental_type,
            creature.stage,
            creature.exp
        );
    }
    Ok(())
}
