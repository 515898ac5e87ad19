//! Previous-ride source: replays a recorded ride.
//!
//! With a power channel the recorded watts drive the partner along the
//! host's route. Without one the recorded positions are republished
//! directly, second by second.

use serde::{Deserialize, Serialize};

use partner_core::constants::METERS_PER_KM;
use partner_core::enums::{EngineKind, EnginePhase, PartnerStatus};
use partner_core::error::SourceError;
use partner_core::types::{GeoPoint, Position, Telemetry};

use super::{past_ride_end, PartnerSource, PositionFix, SourceSample};

/// One recorded sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RideSample {
    pub secs: f64,
    pub km: f64,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    #[serde(default)]
    pub watts: Option<f64>,
}

impl RideSample {
    pub fn position(&self) -> Position {
        Position::new(
            self.km * METERS_PER_KM,
            Some(GeoPoint {
                lat: self.lat,
                lon: self.lon,
                alt: self.alt,
            }),
        )
    }
}

/// A recorded ride, ordered by time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRide {
    samples: Vec<RideSample>,
}

impl RecordedRide {
    pub fn new(samples: Vec<RideSample>) -> Result<Self, SourceError> {
        if samples.is_empty() {
            return Err(SourceError::Empty);
        }
        if samples.windows(2).any(|w| w[1].secs < w[0].secs) {
            return Err(SourceError::Unsorted);
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[RideSample] {
        &self.samples
    }

    /// True when at least one sample carries watts.
    pub fn has_power(&self) -> bool {
        self.samples.iter().any(|s| s.watts.is_some())
    }

    /// The sample in effect at `elapsed_secs`, or `None` past the end.
    pub fn sample_at(&self, elapsed_secs: f64) -> Option<&RideSample> {
        let last = self.samples.last()?;
        if elapsed_secs > last.secs {
            return None;
        }
        let upper = self.samples.partition_point(|s| s.secs <= elapsed_secs);
        self.samples.get(upper.saturating_sub(1))
    }
}

pub struct ReplaySource {
    ride: RecordedRide,
    has_power: bool,
    ride_duration_m: f64,
    exhausted: bool,
}

impl ReplaySource {
    pub fn new(ride: RecordedRide, ride_duration_m: f64) -> Self {
        let has_power = ride.has_power();
        if !has_power {
            tracing::info!("recorded ride has no power channel, replaying positions");
        }
        Self {
            ride,
            has_power,
            ride_duration_m,
            exhausted: false,
        }
    }

    pub fn replays_positions(&self) -> bool {
        !self.has_power
    }
}

impl PartnerSource for ReplaySource {
    fn kind(&self) -> EngineKind {
        EngineKind::PreviousRide
    }

    fn sample(&mut self, tick: &Telemetry) -> SourceSample {
        let current_second = (tick.elapsed_ms / 1000) as f64;
        let Some(recorded) = self.ride.sample_at(current_second) else {
            if !self.exhausted {
                tracing::info!(second = current_second, "end of recorded ride");
                self.exhausted = true;
            }
            return SourceSample::finished(PartnerStatus::Finished, PositionFix::Hold);
        };

        if self.has_power && past_ride_end(tick, self.ride_duration_m) {
            return SourceSample::finished(PartnerStatus::PreviousRideMode, PositionFix::FollowHost);
        }

        let (power_w, position) = if self.has_power {
            (recorded.watts.unwrap_or_default(), PositionFix::FollowHost)
        } else {
            (0.0, PositionFix::Recorded(recorded.position()))
        };

        SourceSample {
            power_w,
            phase: EnginePhase::Following,
            status: PartnerStatus::PreviousRideMode,
            position,
            next_attack_m: None,
            attack_ordinal: None,
            cue: None,
            workout_finished: false,
        }
    }
}
