//! Cues emitted by the engine for the sound/notification system.

use serde::{Deserialize, Serialize};

/// Fire-and-forget cue carried in the snapshot of the tick that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PartnerCue {
    /// An attack began at the given plan distance.
    AttackStarted { ordinal: u32, at_m: f64 },
    /// An attack finished (or was cut short by a skip or cooldown).
    AttackEnded { ordinal: u32 },
}
