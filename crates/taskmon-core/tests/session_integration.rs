//! Integration tests for the full study session lifecycle.
//!
//! These tests drive a [`SessionEngine`] from onboarding through study,
//! encounter resolution and rest, the way a front end would.

use std::collections::BTreeSet;
use std::time::Duration;

use taskmon_core::timer::{run_phase, Control, PhaseOutcome, SessionConfig};
use taskmon_core::{AvatarVariant, Catalog, ElementType, Event, Profile, SessionEngine, TimerState};
use tokio::sync::mpsc;

fn onboarded(seed: u64) -> (SessionEngine, Profile) {
    let engine = SessionEngine::new(Catalog::builtin(), Some(seed));
    let mut profile = Profile::default();
    profile
        .complete_with_starter(engine.catalog(), "Charmander", AvatarVariant::Male)
        .unwrap();
    (engine, profile)
}

fn tick_until_completion(engine: &mut SessionEngine, profile: &mut Profile) -> (Event, u64) {
    let mut ticks = 0;
    loop {
        ticks += 1;
        if let Some(event) = engine.tick(profile) {
            return (event, ticks);
        }
        assert!(ticks < 10_000, "phase never completed");
    }
}

#[test]
fn test_charmander_fire_session_end_to_end() {
    let (mut engine, mut profile) = onboarded(7);
    assert_eq!(profile.pokedex.len(), 1);
    assert_eq!(profile.pokedex[0].id, 4);
    assert_eq!(profile.pokedex[0].name, "Charmander");
    assert_eq!(profile.inventory.len(), 1);
    assert_eq!(profile.partner().unwrap().exp, 0.0);

    engine
        .start_session(SessionConfig::new(ElementType::Fire, 30, 5))
        .unwrap();
    let (event, ticks) = tick_until_completion(&mut engine, &mut profile);
    assert_eq!(ticks, 1800);

    let Event::PhaseExpired { rewards, skipped, .. } = event else {
        panic!("expected PhaseExpired, got {event:?}");
    };
    assert!(!skipped);
    assert_eq!(rewards.exp_gained, 100);
    assert_eq!(rewards.encounters.len(), 3);
    for name in &rewards.encounters {
        let info = engine.catalog().lookup_by_name(name).unwrap();
        assert_eq!(info.element, ElementType::Fire);
    }
    assert_eq!(profile.partner().unwrap().exp, 100.0);

    let new_species: BTreeSet<_> = rewards
        .encounters
        .iter()
        .filter(|n| !profile.has_species(n))
        .cloned()
        .collect();
    let pokedex_before = profile.pokedex.len();

    let outcome = engine.resolve_encounter(&mut profile, &rewards.encounters);

    assert_eq!(profile.pokedex.len(), pokedex_before + new_species.len());
    assert!(profile.pokedex.len() <= pokedex_before + 3);
    assert_eq!(profile.inventory.len(), 4);
    assert_eq!(outcome.has_new_pokemon, !new_species.is_empty());
    assert!(!outcome.has_evolved);
    assert_eq!(profile.partner().unwrap().exp, 100.0);
    for wild in profile.inventory.iter().filter(|c| !c.is_partner) {
        assert!((wild.exp - 100.0 / 3.0).abs() < 1e-9);
    }
    assert_eq!(engine.state(), TimerState::Idle);
}

#[test]
fn test_partner_evolves_after_three_full_sessions() {
    let (mut engine, mut profile) = onboarded(11);
    let mut evolved = false;

    for _ in 0..3 {
        engine
            .start_session(SessionConfig::new(ElementType::Water, 30, 0))
            .unwrap();
        tick_until_completion(&mut engine, &mut profile);
        let none: [&str; 0] = [];
        evolved = engine.resolve_encounter(&mut profile, &none).has_evolved;
    }

    assert!(evolved);
    let partner = profile.partner().unwrap();
    assert_eq!(partner.current_name, "Charmeleon");
    assert_eq!(partner.base_species_name, "Charmander");
    assert_eq!(partner.stage, 2);
    assert!(profile.has_species("Charmeleon"));
}

#[test]
fn test_rest_phase_returns_to_menu_without_rewards() {
    let (mut engine, mut profile) = onboarded(3);
    engine
        .start_session(SessionConfig::new(ElementType::Grass, 10, 1))
        .unwrap();
    tick_until_completion(&mut engine, &mut profile);
    let none: [&str; 0] = [];
    engine.resolve_encounter(&mut profile, &none);
    let exp_after_study = profile.partner().unwrap().exp;

    engine.start_rest().unwrap();
    let (event, ticks) = tick_until_completion(&mut engine, &mut profile);
    assert!(matches!(event, Event::ReturnedToMenu { skipped: false, .. }));
    assert_eq!(ticks, 60);
    assert_eq!(profile.partner().unwrap().exp, exp_after_study);
    assert_eq!(engine.state(), TimerState::Idle);
}

#[test]
fn test_bulk_unlock_covers_catalog() {
    let (engine, mut profile) = onboarded(1);
    engine.unlock_all_species(&mut profile);

    assert_eq!(profile.pokedex.len(), engine.catalog().len());
    assert!(profile.pokedex.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(profile.inventory.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_driver_runs_study_then_rest() {
    let (mut engine, mut profile) = onboarded(5);
    let (tx, mut rx) = mpsc::channel(4);
    let period = Duration::from_secs(1);

    engine
        .start_session(SessionConfig::new(ElementType::Psychic, 1, 1))
        .unwrap();
    let outcome = run_phase(&mut engine, &mut profile, &mut rx, period, |_| {}).await;
    assert!(matches!(outcome, PhaseOutcome::Completed(Event::PhaseExpired { .. })));

    let none: [&str; 0] = [];
    engine.resolve_encounter(&mut profile, &none);
    engine.start_rest().unwrap();

    tx.send(Control::Skip).await.unwrap();
    let outcome = run_phase(&mut engine, &mut profile, &mut rx, period, |_| {}).await;
    assert!(matches!(
        outcome,
        PhaseOutcome::Completed(Event::ReturnedToMenu { skipped: true, .. })
    ));
}
