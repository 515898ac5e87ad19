//! Per-session engine configuration.
//!
//! Loaded by the host from its settings store before a session starts and
//! handed to the engine at initialization. The engine never writes it back.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::enums::EngineKind;
use crate::error::ConfigError;

/// Parameters of the algorithmic pacing/attack model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalSettings {
    /// Number of attacks spread over the ride.
    pub total_attacks: u32,
    /// Share of the ride reserved for warmup, in percent (0 disables).
    pub warmup_percent: f64,
    /// Share of the ride reserved for cooldown, in percent (0 disables).
    pub cooldown_percent: f64,
    /// Length of one attack in meters.
    pub attack_duration_m: u32,
    /// Watts added to the athlete's power during an attack. May be negative.
    pub attack_power_increase_w: i32,
    /// Maximum separation before the partner regulates (0 = unbounded).
    pub max_separation_m: u32,
}

/// Complete engine configuration for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Master switch for the virtual partner.
    pub enabled: bool,
    pub kind: EngineKind,
    pub intervals: IntervalSettings,
    /// Power profile used by `EngineKind::ErgProfile`.
    pub erg_file: Option<PathBuf>,
    /// Recorded ride used by `EngineKind::PreviousRide`.
    pub previous_ride_file: Option<PathBuf>,
    /// RNG seed for attack placement. `None` draws a fresh seed per session.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: EngineKind::default(),
            intervals: IntervalSettings::default(),
            erg_file: None,
            previous_ride_file: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Algorithmic configuration with the given interval settings.
    pub fn algorithmic(intervals: IntervalSettings) -> Self {
        Self {
            intervals,
            ..Default::default()
        }
    }

    /// ERG-profile configuration reading from `path`.
    pub fn erg_profile(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: EngineKind::ErgProfile,
            erg_file: Some(path.into()),
            ..Default::default()
        }
    }

    /// Previous-ride configuration reading from `path`.
    pub fn previous_ride(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: EngineKind::PreviousRide,
            previous_ride_file: Some(path.into()),
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks that do not depend on the ride being loaded.
    ///
    /// Ride-dependent checks (attack length against the pacing interval)
    /// happen when the attack plan is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            EngineKind::AlgorithmicAi => self.intervals.validate(),
            EngineKind::ErgProfile if self.erg_file.is_none() => {
                Err(ConfigError::MissingSourcePath(self.kind))
            }
            EngineKind::PreviousRide if self.previous_ride_file.is_none() => {
                Err(ConfigError::MissingSourcePath(self.kind))
            }
            _ => Ok(()),
        }
    }
}

impl IntervalSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_attacks == 0 {
            return Err(ConfigError::NoAttacks);
        }
        for (name, value) in [
            ("warmup", self.warmup_percent),
            ("cooldown", self.cooldown_percent),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::PercentOutOfRange { name, value });
            }
        }
        if self.warmup_percent + self.cooldown_percent >= 100.0 {
            return Err(ConfigError::NoPacingWindow {
                warmup_percent: self.warmup_percent,
                cooldown_percent: self.cooldown_percent,
            });
        }
        Ok(())
    }
}
