//! Algorithmic source: wraps the pacing state machine.

use partner_core::enums::{EngineKind, EnginePhase, PartnerStatus};
use partner_core::types::Telemetry;
use partner_pacing::{AttackPlan, PacingInput, PacingStateMachine};

use super::{past_ride_end, PartnerSource, PositionFix, SourceSample};

pub struct AlgorithmicSource {
    machine: PacingStateMachine,
    ride_duration_m: f64,
}

impl AlgorithmicSource {
    pub fn new(machine: PacingStateMachine, ride_duration_m: f64) -> Self {
        Self {
            machine,
            ride_duration_m,
        }
    }

    pub fn machine(&self) -> &PacingStateMachine {
        &self.machine
    }
}

impl PartnerSource for AlgorithmicSource {
    fn kind(&self) -> EngineKind {
        EngineKind::AlgorithmicAi
    }

    fn initial_phase(&self) -> EnginePhase {
        EnginePhase::Pacing
    }

    fn sample(&mut self, tick: &Telemetry) -> SourceSample {
        if past_ride_end(tick, self.ride_duration_m) {
            return SourceSample::finished(PartnerStatus::Finished, PositionFix::FollowHost);
        }

        let out = self.machine.advance(&PacingInput {
            athlete_power_w: tick.power_w,
            athlete_distance_m: tick.distance_m(),
            separation_m: tick.separation_m,
            elapsed_ms: tick.elapsed_ms,
        });

        SourceSample {
            power_w: out.power_w,
            phase: out.phase,
            status: out.status,
            position: PositionFix::FollowHost,
            next_attack_m: out.next_attack_m,
            attack_ordinal: out.attack_ordinal,
            cue: out.cue,
            workout_finished: false,
        }
    }

    fn attack_plan(&self) -> Option<&AttackPlan> {
        Some(self.machine.plan())
    }
}
