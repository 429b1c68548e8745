//! Foreground study and rest phases.
//!
//! The phase runs on the async tick driver while a plain thread forwards
//! stdin controls (`p`, `r`, `s`, `q`) into the driver's control channel.

use std::io::BufRead;
use std::time::Duration;

use clap::{Args, Subcommand};
use tokio::sync::mpsc;

use taskmon_core::timer::{run_phase, Control, PhaseOutcome, SessionConfig};
use taskmon_core::{Catalog, ElementType, Event, SessionEngine};

use super::encounter::report_resolution;
use super::{CmdResult, Context};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Run a study session in the foreground
    Run(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Session type, decides which species can appear
    #[arg(long = "type")]
    element: Option<ElementType>,
    /// Study minutes (default from config)
    #[arg(long)]
    study: Option<u32>,
    /// Rest minutes (default from config)
    #[arg(long)]
    rest: Option<u32>,
    #[command(flatten)]
    catch: CatchArgs,
    /// Stop after the encounter instead of starting the rest phase
    #[arg(long)]
    no_rest: bool,
    #[command(flatten)]
    output: PhaseOutput,
}

/// Catch decision made up front. Without one the encounter is saved for
/// `taskmon encounter resolve`.
#[derive(Args)]
#[group(multiple = false)]
pub struct CatchArgs {
    /// Catch every wild encounter
    #[arg(long)]
    catch_all: bool,
    /// Catch only these species
    #[arg(long, num_args = 1..)]
    catch: Vec<String>,
    /// Release every wild encounter
    #[arg(long)]
    skip_catch: bool,
}

impl CatchArgs {
    fn choice(&self, catalog: &Catalog, offered: &[String]) -> Option<Vec<String>> {
        if self.catch_all {
            Some(offered.to_vec())
        } else if !self.catch.is_empty() {
            Some(resolve_names(catalog, &self.catch))
        } else if self.skip_catch {
            Some(Vec::new())
        } else {
            None
        }
    }
}

#[derive(Args)]
pub struct RestArgs {
    /// Rest minutes (default from config)
    #[arg(long)]
    minutes: Option<u32>,
    #[command(flatten)]
    output: PhaseOutput,
}

#[derive(Args)]
pub struct PhaseOutput {
    /// Print every event as a JSON line
    #[arg(long)]
    json: bool,
    /// Tick length in milliseconds
    #[arg(long, hide = true, default_value_t = 1000)]
    tick_ms: u64,
}

impl PhaseOutput {
    fn period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

pub async fn run(action: SessionAction) -> CmdResult {
    match action {
        SessionAction::Run(args) => run_session(args).await,
    }
}

/// Case-insensitive species names; unknown input is passed through and
/// ignored at resolution time.
pub fn resolve_names(catalog: &Catalog, names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| catalog.resolve_name(n).map_or_else(|| n.clone(), str::to_string))
        .collect()
}

async fn run_session(args: RunArgs) -> CmdResult {
    let ctx = Context::open()?;
    let mut profile = ctx.complete_profile().await?;
    let mut engine = SessionEngine::new(Catalog::builtin(), ctx.config.seed);
    if let Some(pending) = ctx.repo.local().load_pending()? {
        engine.restore_pending(pending)?;
    }

    let defaults = &ctx.config.session;
    let config = SessionConfig::new(
        args.element.unwrap_or(defaults.default_type),
        args.study.unwrap_or(defaults.study_minutes),
        args.rest.unwrap_or(defaults.rest_minutes),
    );

    let printer = EventPrinter::new(args.output.json);
    printer.print(&engine.start_session(config)?);
    printer.hint("controls: p pause, r resume, s skip, q quit");

    let mut controls = spawn_controls();
    let period = args.output.period();
    let outcome =
        run_phase(&mut engine, &mut profile, &mut controls, period, |e| printer.print(e)).await;
    if !matches!(outcome, PhaseOutcome::Completed(Event::PhaseExpired { .. })) {
        return Ok(());
    }
    ctx.persist(&profile).await?;

    let offered = engine
        .pending()
        .map(|p| p.rewards.encounters.clone())
        .unwrap_or_default();
    let Some(chosen) = args.catch.choice(engine.catalog(), &offered) else {
        if let Some(pending) = engine.pending() {
            ctx.repo.local().save_pending(pending)?;
        }
        printer.hint("encounter saved; resolve it with `taskmon encounter resolve`");
        return Ok(());
    };

    let resolution = engine.resolve_encounter(&mut profile, &chosen);
    ctx.persist(&profile).await?;
    report_resolution(&profile, &resolution, args.output.json)?;

    if args.no_rest {
        return Ok(());
    }
    printer.print(&engine.start_rest()?);
    run_phase(&mut engine, &mut profile, &mut controls, period, |e| printer.print(e)).await;
    Ok(())
}

/// `taskmon rest`: a standalone rest phase.
pub async fn rest(args: RestArgs) -> CmdResult {
    let ctx = Context::open()?;
    let mut profile = ctx.profile().await?;
    let mut engine = SessionEngine::new(Catalog::builtin(), ctx.config.seed);
    if let Some(pending) = ctx.repo.local().load_pending()? {
        engine.restore_pending(pending)?;
    }

    let mut config = ctx.config.session_config();
    if let Some(minutes) = args.minutes {
        config.rest_minutes = minutes;
    }

    let printer = EventPrinter::new(args.output.json);
    printer.print(&engine.start_session(config.for_rest())?);

    let mut controls = spawn_controls();
    run_phase(
        &mut engine,
        &mut profile,
        &mut controls,
        args.output.period(),
        |e| printer.print(e),
    )
    .await;
    Ok(())
}

fn spawn_controls() -> mpsc::Receiver<Control> {
    let (tx, rx) = mpsc::channel(8);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let control = match line.trim() {
                "p" => Control::Pause,
                "r" => Control::Resume,
                "s" => Control::Skip,
                "q" => Control::Cancel,
                "" => continue,
                other => {
                    eprintln!("unknown control '{other}' (p, r, s, q)");
                    continue;
                }
            };
            if tx.blocking_send(control).is_err() {
                break;
            }
        }
    });
    rx
}

fn format_secs(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

struct EventPrinter {
    json: bool,
}

impl EventPrinter {
    fn new(json: bool) -> Self {
        Self { json }
    }

    fn hint(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    fn print(&self, event: &Event) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "event not serializable"),
            }
            return;
        }

        match event {
            Event::PhaseStarted {
                phase,
                session_type,
                duration_secs,
                ..
            } => println!(
                "{phase} phase started ({session_type}, {})",
                format_secs(*duration_secs)
            ),
            Event::TimerPaused { remaining_secs, .. } => {
                println!("paused, {} left", format_secs(*remaining_secs));
            }
            Event::TimerResumed { remaining_secs, .. } => {
                println!("resumed, {} left", format_secs(*remaining_secs));
            }
            Event::PhaseExpired { rewards, .. } => {
                println!("Study complete! Partner gained {} exp", rewards.exp_gained);
                if rewards.encounters.is_empty() {
                    println!("No wild creatures appeared");
                } else {
                    println!("Wild creatures appeared: {}", rewards.encounters.join(", "));
                }
            }
            Event::ReturnedToMenu { .. } => println!("Rest over, back to the menu"),
            Event::PhaseCancelled { phase, .. } => println!("{phase} phase cancelled"),
            Event::StateSnapshot { remaining_secs, .. } => {
                if *remaining_secs > 0 && remaining_secs % 60 == 0 {
                    println!("  {} left", format_secs(*remaining_secs));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_secs_pads() {
        assert_eq!(format_secs(0), "00:00");
        assert_eq!(format_secs(61), "01:01");
        assert_eq!(format_secs(1800), "30:00");
    }

    #[test]
    fn names_resolve_case_insensitively() {
        let catalog = Catalog::builtin();
        let names = resolve_names(&catalog, &["pidgey".into(), "Missingno".into()]);
        assert_eq!(names, vec!["Pidgey".to_string(), "Missingno".to_string()]);
    }

    #[test]
    fn catch_choice_requires_a_decision() {
        let catalog = Catalog::builtin();
        let offered = vec!["Gastly".to_string(), "Gastly".to_string()];
        let none = CatchArgs {
            catch_all: false,
            catch: Vec::new(),
            skip_catch: false,
        };
        assert!(none.choice(&catalog, &offered).is_none());

        let all = CatchArgs {
            catch_all: true,
            ..none
        };
        assert_eq!(all.choice(&catalog, &offered).unwrap(), offered);
    }
}
