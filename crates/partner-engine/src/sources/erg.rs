//! ERG profile source: follows a power-vs-time curve.

use serde::{Deserialize, Serialize};

use partner_core::enums::{EngineKind, EnginePhase, PartnerStatus};
use partner_core::error::SourceError;
use partner_core::types::Telemetry;

use super::{past_ride_end, PartnerSource, PositionFix, SourceSample};

/// A time-ordered power target, as exposed by the host's ERG reader.
pub trait PowerCurve {
    /// Target power (W) at `elapsed_ms` into the workout.
    fn power_at(&self, elapsed_ms: u64) -> f64;

    fn has_power(&self) -> bool {
        true
    }
}

/// One point of an ERG profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErgPoint {
    pub ms: u64,
    pub watts: f64,
}

/// Linearly interpolated ERG profile. Holds the end values outside its range.
#[derive(Debug, Clone, PartialEq)]
pub struct ErgCurve {
    points: Vec<ErgPoint>,
}

impl ErgCurve {
    pub fn new(points: Vec<ErgPoint>) -> Result<Self, SourceError> {
        if points.is_empty() {
            return Err(SourceError::Empty);
        }
        if points.windows(2).any(|w| w[1].ms < w[0].ms) {
            return Err(SourceError::Unsorted);
        }
        Ok(Self { points })
    }

    pub fn duration_ms(&self) -> u64 {
        self.points.last().map(|p| p.ms).unwrap_or_default()
    }
}

impl PowerCurve for ErgCurve {
    fn power_at(&self, elapsed_ms: u64) -> f64 {
        let upper = self.points.partition_point(|p| p.ms <= elapsed_ms);
        if upper == 0 {
            return self.points.first().map(|p| p.watts).unwrap_or_default();
        }
        let a = self.points[upper - 1];
        let Some(b) = self.points.get(upper) else {
            return a.watts;
        };
        let span = (b.ms - a.ms) as f64;
        if span <= 0.0 {
            return a.watts;
        }
        let t = (elapsed_ms - a.ms) as f64 / span;
        a.watts + (b.watts - a.watts) * t
    }
}

pub struct ErgSource {
    curve: Box<dyn PowerCurve>,
    ride_duration_m: f64,
}

impl ErgSource {
    pub fn new(curve: Box<dyn PowerCurve>, ride_duration_m: f64) -> Result<Self, SourceError> {
        if !curve.has_power() {
            return Err(SourceError::NoPowerChannel);
        }
        Ok(Self {
            curve,
            ride_duration_m,
        })
    }
}

impl PartnerSource for ErgSource {
    fn kind(&self) -> EngineKind {
        EngineKind::ErgProfile
    }

    fn sample(&mut self, tick: &Telemetry) -> SourceSample {
        // A finished workout emits nothing, whatever the curve says.
        if past_ride_end(tick, self.ride_duration_m) {
            return SourceSample::finished(PartnerStatus::ErgMode, PositionFix::FollowHost);
        }

        SourceSample {
            power_w: self.curve.power_at(tick.elapsed_ms),
            phase: EnginePhase::Following,
            status: PartnerStatus::ErgMode,
            position: PositionFix::FollowHost,
            next_attack_m: None,
            attack_ordinal: None,
            cue: None,
            workout_finished: false,
        }
    }
}
