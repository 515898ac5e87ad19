//! Pacing/attack finite state machine.
//!
//! Re-evaluated on every telemetry tick. Shadows the athlete during warmup
//! and cooldown, paces between attack points, holds attack power for the
//! attack length, and regulates the gap to the athlete throughout.

use partner_core::config::IntervalSettings;
use partner_core::constants::{DEBOUNCE_MS, SKIP_THRESHOLD_M};
use partner_core::enums::{EnginePhase, PartnerStatus};
use partner_core::events::PartnerCue;

use crate::plan::AttackPlan;
use crate::separation::SeparationGovernor;

/// Input to the state machine for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingInput {
    pub athlete_power_w: f64,
    /// Athlete's route distance (m).
    pub athlete_distance_m: f64,
    /// Partner minus athlete (m). Positive = partner ahead.
    pub separation_m: f64,
    pub elapsed_ms: u64,
}

/// Output of the state machine for a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PacingOutput {
    pub power_w: f64,
    pub phase: EnginePhase,
    pub status: PartnerStatus,
    /// Plan distance of the next (or running) attack.
    pub next_attack_m: Option<f64>,
    /// 1-based number of the next (or running) attack.
    pub attack_ordinal: Option<u32>,
    pub cue: Option<PartnerCue>,
    /// False when the debounce window returned the cached power.
    pub recomputed: bool,
}

/// The algorithmic partner. Owns its attack plan for the session.
#[derive(Debug, Clone)]
pub struct PacingStateMachine {
    plan: AttackPlan,
    attack_power_increase_w: f64,
    governor: SeparationGovernor,
    phase: EnginePhase,
    status: PartnerStatus,
    /// Next attack while pacing, running attack while attacking. `None` once exhausted.
    active_attack: Option<usize>,
    attack_started_at_m: f64,
    attack_power_w: f64,
    last_power_w: f64,
    last_recompute_ms: Option<u64>,
    prev_athlete_distance_m: f64,
}

impl PacingStateMachine {
    pub fn new(plan: AttackPlan, settings: &IntervalSettings) -> Self {
        let active_attack = (!plan.is_empty()).then_some(0);
        Self {
            plan,
            attack_power_increase_w: settings.attack_power_increase_w as f64,
            governor: SeparationGovernor::new(settings.max_separation_m),
            phase: EnginePhase::Pacing,
            status: PartnerStatus::Pacing,
            active_attack,
            attack_started_at_m: 0.0,
            attack_power_w: 0.0,
            last_power_w: 0.0,
            last_recompute_ms: None,
            prev_athlete_distance_m: 0.0,
        }
    }

    pub fn plan(&self) -> &AttackPlan {
        &self.plan
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn status(&self) -> PartnerStatus {
        self.status
    }

    pub fn active_attack_index(&self) -> Option<usize> {
        self.active_attack
    }

    pub fn is_waiting_for_user(&self) -> bool {
        self.governor.is_waiting_for_user()
    }

    pub fn effective_separation_limit_m(&self) -> f64 {
        self.governor.effective_limit_m()
    }

    /// Advance one tick and return the partner's power.
    pub fn advance(&mut self, input: &PacingInput) -> PacingOutput {
        if self.is_debounced(input.elapsed_ms) {
            return self.output(None, false);
        }
        self.last_recompute_ms = Some(input.elapsed_ms);

        let distance = input.athlete_distance_m;
        let mut cue = None;
        if (distance - self.prev_athlete_distance_m).abs() > SKIP_THRESHOLD_M {
            cue = self.resync(distance);
        }
        self.prev_athlete_distance_m = distance;

        self.last_power_w = self.evaluate(input, &mut cue);
        self.output(cue, true)
    }

    /// Attacks are never debounced; otherwise recompute at most every 2 s.
    fn is_debounced(&self, elapsed_ms: u64) -> bool {
        if self.phase == EnginePhase::Attacking {
            return false;
        }
        match self.last_recompute_ms {
            Some(last) => elapsed_ms >= last && elapsed_ms - last < DEBOUNCE_MS,
            None => false,
        }
    }

    fn evaluate(&mut self, input: &PacingInput, cue: &mut Option<PartnerCue>) -> f64 {
        let distance = input.athlete_distance_m;
        let athlete = input.athlete_power_w;

        if self.plan.in_shadow(distance) {
            if self.phase == EnginePhase::Attacking {
                *cue = self.end_attack();
            }
            self.set_phase(EnginePhase::WarmupCooldown, PartnerStatus::WarmupCooldown);
            return athlete;
        }

        let Some(index) = self.active_attack else {
            self.set_phase(EnginePhase::Finished, PartnerStatus::NoMoreAttacks);
            return athlete;
        };

        if self.phase == EnginePhase::Attacking {
            if distance > self.attack_started_at_m + self.plan.attack_duration_m {
                *cue = self.end_attack();
                self.set_phase(EnginePhase::Pacing, PartnerStatus::Pacing);
                return athlete;
            }
            return self.regulate(self.attack_power_w, input, PartnerStatus::Attacking);
        }

        let next_attack_m = self.plan.get(index).unwrap_or(f64::INFINITY);
        if distance < next_attack_m {
            self.phase = EnginePhase::Pacing;
            return self.regulate(athlete, input, PartnerStatus::Pacing);
        }

        self.attack_started_at_m = next_attack_m;
        self.attack_power_w = athlete + self.attack_power_increase_w;
        self.phase = EnginePhase::Attacking;
        let ordinal = index as u32 + 1;
        tracing::info!(ordinal, at_m = next_attack_m, power_w = self.attack_power_w, "attack started");
        *cue = Some(PartnerCue::AttackStarted {
            ordinal,
            at_m: next_attack_m,
        });
        self.regulate(self.attack_power_w, input, PartnerStatus::Attacking)
    }

    fn regulate(&mut self, phase_power_w: f64, input: &PacingInput, status: PartnerStatus) -> f64 {
        let regulated = self.governor.regulate(
            phase_power_w,
            input.athlete_power_w,
            input.separation_m,
            status,
        );
        self.status = regulated.status;
        regulated.power_w
    }

    /// Finish the running attack and move on to the next plan entry.
    fn end_attack(&mut self) -> Option<PartnerCue> {
        let index = self.active_attack?;
        let next = index + 1;
        self.active_attack = (next < self.plan.len()).then_some(next);
        self.phase = EnginePhase::Pacing;
        let ordinal = index as u32 + 1;
        tracing::info!(ordinal, "attack ended");
        Some(PartnerCue::AttackEnded { ordinal })
    }

    /// The athlete jumped along the route: re-locate the next attack.
    fn resync(&mut self, distance_m: f64) -> Option<PartnerCue> {
        let cue = if self.phase == EnginePhase::Attacking {
            self.end_attack()
        } else {
            None
        };
        self.active_attack = self.plan.first_after(distance_m);
        tracing::debug!(
            from_m = self.prev_athlete_distance_m,
            to_m = distance_m,
            next_attack = ?self.active_attack,
            "route skip, attack points re-located"
        );
        cue
    }

    fn set_phase(&mut self, phase: EnginePhase, status: PartnerStatus) {
        self.phase = phase;
        self.status = status;
    }

    fn output(&self, cue: Option<PartnerCue>, recomputed: bool) -> PacingOutput {
        PacingOutput {
            power_w: self.last_power_w,
            phase: self.phase,
            status: self.status,
            next_attack_m: self.active_attack.and_then(|i| self.plan.get(i)),
            attack_ordinal: self.active_attack.map(|i| i as u32 + 1),
            cue,
            recomputed,
        }
    }
}
