//! Separation control: keeps the partner within reach of the athlete.

use partner_core::constants::{SLOW_DOWN_FACTOR, SPEED_UP_FACTOR, WAITING_SEPARATION_LIMIT_M};
use partner_core::enums::PartnerStatus;

/// Result of regulating one tick's power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regulated {
    pub power_w: f64,
    pub status: PartnerStatus,
}

/// Throttles partner power when the gap to the athlete grows too large.
///
/// Once the configured limit is exceeded the partner waits for the athlete
/// against a 1 m limit: regulation continues until the gap is within 1 m,
/// then the configured limit is restored.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparationGovernor {
    configured_limit_m: f64,
    effective_limit_m: f64,
    waiting_for_user: bool,
}

impl SeparationGovernor {
    /// `max_separation_m == 0` disables regulation.
    pub fn new(max_separation_m: u32) -> Self {
        let limit = max_separation_m as f64;
        Self {
            configured_limit_m: limit,
            effective_limit_m: limit,
            waiting_for_user: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.configured_limit_m == 0.0
    }

    pub fn is_waiting_for_user(&self) -> bool {
        self.waiting_for_user
    }

    pub fn effective_limit_m(&self) -> f64 {
        self.effective_limit_m
    }

    /// Emit `phase_power_w` when inside the limit, otherwise slow down or
    /// speed up relative to the athlete's power.
    pub fn regulate(
        &mut self,
        phase_power_w: f64,
        athlete_power_w: f64,
        separation_m: f64,
        phase_status: PartnerStatus,
    ) -> Regulated {
        if self.is_disabled() {
            return Regulated {
                power_w: phase_power_w,
                status: phase_status,
            };
        }

        let gap = separation_m.abs();
        self.waiting_for_user = gap > self.effective_limit_m;
        self.effective_limit_m = if self.waiting_for_user {
            WAITING_SEPARATION_LIMIT_M
        } else {
            self.configured_limit_m
        };

        if gap < self.effective_limit_m {
            Regulated {
                power_w: phase_power_w,
                status: phase_status,
            }
        } else if separation_m > 0.0 {
            Regulated {
                power_w: athlete_power_w * SLOW_DOWN_FACTOR,
                status: PartnerStatus::SlowingDown,
            }
        } else {
            Regulated {
                power_w: athlete_power_w * SPEED_UP_FACTOR,
                status: PartnerStatus::SpeedingUp,
            }
        }
    }
}
