//! Partner data sources.
//!
//! Each source turns one telemetry tick into partner power, phase and
//! position. The engine owns exactly one active source per session.

pub mod algorithmic;
pub mod erg;
pub mod previous_ride;

use partner_core::enums::{EngineKind, EnginePhase, PartnerStatus};
use partner_core::events::PartnerCue;
use partner_core::types::{Position, Telemetry};
use partner_pacing::AttackPlan;

pub use algorithmic::AlgorithmicSource;
pub use erg::{ErgCurve, ErgPoint, ErgSource, PowerCurve};
pub use previous_ride::{RecordedRide, ReplaySource, RideSample};

/// Where the partner's position comes from this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionFix {
    /// Partner rides the host's route at athlete distance + separation.
    FollowHost,
    /// Position taken directly from the source.
    Recorded(Position),
    /// Keep the last published position.
    Hold,
}

/// One tick of source output.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSample {
    pub power_w: f64,
    pub phase: EnginePhase,
    pub status: PartnerStatus,
    pub position: PositionFix,
    pub next_attack_m: Option<f64>,
    pub attack_ordinal: Option<u32>,
    pub cue: Option<PartnerCue>,
    pub workout_finished: bool,
}

impl SourceSample {
    /// Zero-power sample for a partner that has nothing left to do.
    pub fn finished(status: PartnerStatus, position: PositionFix) -> Self {
        Self {
            power_w: 0.0,
            phase: EnginePhase::Finished,
            status,
            position,
            next_attack_m: None,
            attack_ordinal: None,
            cue: None,
            workout_finished: true,
        }
    }
}

/// The capability every partner source provides.
pub trait PartnerSource {
    fn kind(&self) -> EngineKind;

    /// Phase reported right after a successful initialization.
    fn initial_phase(&self) -> EnginePhase {
        EnginePhase::Following
    }

    fn sample(&mut self, tick: &Telemetry) -> SourceSample;

    /// The attack plan, for sources that have one.
    fn attack_plan(&self) -> Option<&AttackPlan> {
        None
    }
}

/// The partner has ridden past the end of the workout.
pub(crate) fn past_ride_end(tick: &Telemetry, ride_duration_m: f64) -> bool {
    tick.partner_distance_m() > ride_duration_m
}
