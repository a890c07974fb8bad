//! Error types surfaced to the driver

use crate::sim::SessionPhase;

/// Errors raised while parsing, validating or looking up level data
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("invalid level spec: {starts} start tiles and {ends} end tiles (need exactly 1 start, at least 1 end)")]
    InvalidLevelSpec { starts: usize, ends: usize },

    #[error("invalid level json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no built-in level with index {0}")]
    UnknownLevel(usize),
}

/// Errors raised by the session state machine
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },

    #[error("campaign has no levels")]
    EmptyCampaign,

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Errors raised while reading or writing settings files
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("settings file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings json invalid: {0}")]
    Json(#[from] serde_json::Error),
}
