pub mod driver;
mod engine;
mod phase;

pub use driver::{run_phase, Control, PhaseOutcome};
pub use engine::{TimerEngine, TimerState};
pub use phase::{Phase, SessionConfig};
