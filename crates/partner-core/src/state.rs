//! Engine snapshot: the complete published partner state for one tick.

use serde::{Deserialize, Serialize};

use crate::enums::{EngineKind, EnginePhase, PartnerStatus};
use crate::events::PartnerCue;
use crate::types::Position;

/// Published after every tick. Has no identity across ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub enabled: bool,
    pub initialized: bool,
    pub engine_kind: EngineKind,
    pub phase: EnginePhase,
    pub status: PartnerStatus,
    /// Human-readable form of `status`.
    pub phase_label: String,
    pub position: Position,
    /// Partner power (W).
    pub power_w: f64,
    /// Signed separation partner minus athlete (m).
    pub separation_m: f64,
    /// Route distance of the next (or running) attack.
    pub next_attack_distance_m: Option<f64>,
    /// 1-based number of the next (or running) attack.
    pub attack_ordinal: Option<u32>,
    pub workout_finished: bool,
    /// Why the engine is not initialized, if it tried and failed.
    pub status_reason: Option<String>,
    pub cues: Vec<PartnerCue>,
}

impl EngineSnapshot {
    /// Passthrough snapshot for a disabled or uninitialized engine.
    pub fn inactive(
        enabled: bool,
        engine_kind: EngineKind,
        status_reason: Option<String>,
    ) -> Self {
        Self {
            enabled,
            engine_kind,
            phase_label: PartnerStatus::NotStarted.to_string(),
            status_reason,
            ..Default::default()
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.phase == EnginePhase::Attacking
    }
}
