//! Error taxonomy.
//!
//! Every failure is local to the engine: it disables or finishes the virtual
//! partner and never aborts the host session.

use std::path::PathBuf;

use thiserror::Error;

use crate::enums::EngineKind;

/// Invalid engine configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no attacks configured")]
    NoAttacks,

    #[error("attack duration is {duration} m but it should be less than {limit:.1} m")]
    AttackTooLong { duration: u32, limit: f64 },

    #[error("invalid ride duration: {0}")]
    InvalidRideDuration(f64),

    #[error("{name} percent {value} is outside 0..=100")]
    PercentOutOfRange { name: &'static str, value: f64 },

    #[error("warmup ({warmup_percent}%) and cooldown ({cooldown_percent}%) leave no room for attacks")]
    NoPacingWindow {
        warmup_percent: f64,
        cooldown_percent: f64,
    },

    #[error("no source file configured for {0:?}")]
    MissingSourcePath(EngineKind),
}

/// A file-based source could not be opened or used.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("source contains no samples")]
    Empty,

    #[error("source has no power channel")]
    NoPowerChannel,

    #[error("samples are not in time order")]
    Unsorted,
}

/// Reason the engine could not be initialized.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("virtual partner is disabled")]
    Disabled,

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}
