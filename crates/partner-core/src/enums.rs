//! Enumeration types used throughout the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which data source drives the virtual partner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    /// Algorithmic pacing with scripted attacks.
    #[default]
    AlgorithmicAi,
    /// Follows an externally supplied power-vs-time profile.
    ErgProfile,
    /// Replays a previously recorded ride.
    PreviousRide,
}

/// Engine lifecycle / behavior phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No successful initialization since construction or the last stop.
    #[default]
    Uninitialized,
    /// Riding with the athlete until the next attack point.
    Pacing,
    /// Holding attack power.
    Attacking,
    /// Shadowing the athlete during warmup or cooldown.
    WarmupCooldown,
    /// Following a file-based source (ERG profile or previous ride).
    Following,
    /// No more attacks, end of recording, or workout complete.
    Finished,
}

/// Narrative status shown next to the partner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerStatus {
    #[default]
    NotStarted,
    Pacing,
    Attacking,
    SlowingDown,
    SpeedingUp,
    WarmupCooldown,
    NoMoreAttacks,
    ErgMode,
    PreviousRideMode,
    Finished,
}

impl PartnerStatus {
    pub fn label(self) -> &'static str {
        match self {
            PartnerStatus::NotStarted => "NOT STARTED",
            PartnerStatus::Pacing => "Pacing",
            PartnerStatus::Attacking => "Attacking",
            PartnerStatus::SlowingDown => "Slowing down",
            PartnerStatus::SpeedingUp => "Speeding up",
            PartnerStatus::WarmupCooldown => "Warmup - Cooldown",
            PartnerStatus::NoMoreAttacks => "No more attacks",
            PartnerStatus::ErgMode => "ERG mode",
            PartnerStatus::PreviousRideMode => "Previous ride mode",
            PartnerStatus::Finished => "Finished",
        }
    }
}

impl fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit system used when formatting distances for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayUnits {
    #[default]
    Metric,
    Imperial,
}

impl DisplayUnits {
    /// Convert meters into the display unit.
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            DisplayUnits::Metric => meters,
            DisplayUnits::Imperial => meters * crate::constants::FEET_PER_METER,
        }
    }

    /// Short unit suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            DisplayUnits::Metric => "m",
            DisplayUnits::Imperial => "ft",
        }
    }
}
