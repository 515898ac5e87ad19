//! Snapshot packaging: turns one source sample into the published snapshot.
//!
//! Read-only with respect to engine state.

use partner_core::enums::EngineKind;
use partner_core::state::EngineSnapshot;
use partner_core::types::Position;

use crate::sources::SourceSample;

/// Build the snapshot for an initialized engine.
pub fn build_snapshot(
    engine_kind: EngineKind,
    sample: &SourceSample,
    position: Position,
    athlete_distance_m: f64,
) -> EngineSnapshot {
    EngineSnapshot {
        enabled: true,
        initialized: true,
        engine_kind,
        phase: sample.phase,
        status: sample.status,
        phase_label: sample.status.to_string(),
        position,
        power_w: sample.power_w,
        separation_m: position.distance_m - athlete_distance_m,
        next_attack_distance_m: sample.next_attack_m,
        attack_ordinal: sample.attack_ordinal,
        workout_finished: sample.workout_finished,
        status_reason: None,
        cues: sample.cue.into_iter().collect(),
    }
}
