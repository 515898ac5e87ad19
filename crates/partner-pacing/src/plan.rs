//! Attack plan construction.
//!
//! The ride is split into warmup, an attack-eligible middle, and cooldown.
//! The middle is divided into one pacing interval per attack and each attack
//! point is placed at a random offset inside its interval.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use partner_core::config::IntervalSettings;
use partner_core::constants::MAX_ATTACK_FRACTION;
use partner_core::error::ConfigError;

/// Route landmarks derived from the ride duration and interval settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanLayout {
    pub ride_duration_m: f64,
    pub warmup_end_m: f64,
    pub cooldown_start_m: f64,
}

impl PlanLayout {
    /// Compute warmup end and cooldown start for a ride.
    pub fn from_settings(
        settings: &IntervalSettings,
        ride_duration_m: f64,
    ) -> Result<Self, ConfigError> {
        if !ride_duration_m.is_finite() || ride_duration_m <= 0.0 {
            return Err(ConfigError::InvalidRideDuration(ride_duration_m));
        }
        settings.validate()?;

        Ok(Self {
            ride_duration_m,
            warmup_end_m: ride_duration_m * settings.warmup_percent / 100.0,
            cooldown_start_m: ride_duration_m - ride_duration_m * settings.cooldown_percent / 100.0,
        })
    }
}

/// Ordered attack trigger distances plus the landmarks they were built from.
///
/// Immutable once built; a new session builds a new plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackPlan {
    pub layout: PlanLayout,
    pub pacing_interval_m: f64,
    pub attack_duration_m: f64,
    /// Ascending attack start distances (m).
    pub attack_distances: Vec<f64>,
}

impl AttackPlan {
    pub fn len(&self) -> usize {
        self.attack_distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attack_distances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.attack_distances.get(index).copied()
    }

    pub fn warmup_end_m(&self) -> f64 {
        self.layout.warmup_end_m
    }

    pub fn cooldown_start_m(&self) -> f64 {
        self.layout.cooldown_start_m
    }

    /// Index of the first attack point strictly beyond `distance_m`.
    pub fn first_after(&self, distance_m: f64) -> Option<usize> {
        let index = self.attack_distances.partition_point(|&p| p <= distance_m);
        (index < self.attack_distances.len()).then_some(index)
    }

    /// Whether the partner should simply shadow the athlete at this distance.
    pub fn in_shadow(&self, distance_m: f64) -> bool {
        distance_m < self.layout.warmup_end_m || distance_m > self.layout.cooldown_start_m
    }
}

/// Builds attack plans from an owned, seedable RNG.
pub struct AttackPlanBuilder {
    rng: ChaCha8Rng,
}

impl AttackPlanBuilder {
    /// Same seed = same plan for the same inputs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Build a plan straight from interval settings.
    pub fn build_from_settings(
        &mut self,
        settings: &IntervalSettings,
        ride_duration_m: f64,
    ) -> Result<AttackPlan, ConfigError> {
        let layout = PlanLayout::from_settings(settings, ride_duration_m)?;
        self.build(
            settings.total_attacks,
            ride_duration_m,
            layout.warmup_end_m,
            layout.cooldown_start_m,
            settings.attack_duration_m,
        )
    }

    /// Distribute `total_attacks` attack points between warmup end and
    /// cooldown start.
    ///
    /// Point 0 lands at `warmup_end + interval/2 + U(0, interval/total)`,
    /// point k at `warmup_end + interval/2 + k*interval + U(0, interval/k)`.
    /// No point may start later than `ride_duration - attack_duration`.
    pub fn build(
        &mut self,
        total_attacks: u32,
        ride_duration_m: f64,
        warmup_end_m: f64,
        cooldown_start_m: f64,
        attack_duration_m: u32,
    ) -> Result<AttackPlan, ConfigError> {
        if total_attacks == 0 {
            return Err(ConfigError::NoAttacks);
        }
        if !ride_duration_m.is_finite() || ride_duration_m <= 0.0 {
            return Err(ConfigError::InvalidRideDuration(ride_duration_m));
        }

        let pacing_interval_m = (cooldown_start_m - warmup_end_m) / total_attacks as f64;
        let limit = pacing_interval_m * MAX_ATTACK_FRACTION;
        let attack_duration = attack_duration_m as f64;
        if !limit.is_finite() || attack_duration >= limit {
            return Err(ConfigError::AttackTooLong {
                duration: attack_duration_m,
                limit,
            });
        }

        let base = warmup_end_m + pacing_interval_m / 2.0;
        let latest_start = ride_duration_m - attack_duration;

        let mut attack_distances: Vec<f64> = (0..total_attacks)
            .map(|k| {
                let window = if k == 0 {
                    pacing_interval_m / total_attacks as f64
                } else {
                    pacing_interval_m / k as f64
                };
                base + k as f64 * pacing_interval_m + self.jitter(window)
            })
            .map(|point| point.min(latest_start))
            .collect();
        attack_distances.sort_by(f64::total_cmp);

        tracing::debug!(
            attacks = total_attacks,
            interval_m = pacing_interval_m,
            points = ?attack_distances,
            "attack plan built"
        );

        Ok(AttackPlan {
            layout: PlanLayout {
                ride_duration_m,
                warmup_end_m,
                cooldown_start_m,
            },
            pacing_interval_m,
            attack_duration_m: attack_duration,
            attack_distances,
        })
    }

    fn jitter(&mut self, window: f64) -> f64 {
        if window > 0.0 {
            self.rng.gen_range(0.0..window)
        } else {
            0.0
        }
    }
}
