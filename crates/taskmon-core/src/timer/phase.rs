use serde::{Deserialize, Serialize};

use crate::catalog::ElementType;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Study,
    Rest,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Study => f.write_str("Study"),
            Phase::Rest => f.write_str("Rest"),
        }
    }
}

/// Settings for one focus/rest session.
///
/// Must not change while a phase is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(rename = "type")]
    pub session_type: ElementType,
    pub study_minutes: u32,
    pub rest_minutes: u32,
    /// Set when re-entering the session for its rest phase.
    #[serde(default)]
    pub break_triggered: bool,
}

impl SessionConfig {
    pub fn new(session_type: ElementType, study_minutes: u32, rest_minutes: u32) -> Self {
        Self {
            session_type,
            study_minutes,
            rest_minutes,
            break_triggered: false,
        }
    }

    /// A study phase needs a positive length. Rest phases may be zero long.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.break_triggered && self.study_minutes == 0 {
            return Err(ValidationError::NonPositiveStudyDuration);
        }
        Ok(())
    }

    /// The same session, re-entered for its rest phase.
    pub fn for_rest(&self) -> Self {
        Self {
            break_triggered: true,
            ..self.clone()
        }
    }

    pub fn phase(&self) -> Phase {
        if self.break_triggered {
            Phase::Rest
        } else {
            Phase::Study
        }
    }

    pub fn phase_minutes(&self) -> u32 {
        match self.phase() {
            Phase::Study => self.study_minutes,
            Phase::Rest => self.rest_minutes,
        }
    }

    pub fn phase_secs(&self) -> u64 {
        u64::from(self.phase_minutes()).saturating_mul(60)
    }
}
