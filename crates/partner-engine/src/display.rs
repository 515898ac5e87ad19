//! Display helpers for status panels: headline text and rider standings.

use serde::{Deserialize, Serialize};

use partner_core::enums::{DisplayUnits, EngineKind};
use partner_core::state::EngineSnapshot;

/// Status header shown above the partner's numbers.
pub fn headline(snapshot: &EngineSnapshot, athlete_distance_m: f64, units: DisplayUnits) -> String {
    if !snapshot.enabled {
        return "Virtual Partner feature is disabled!".to_string();
    }
    if !snapshot.initialized {
        return "Engine NOT initialized!".to_string();
    }

    match snapshot.engine_kind {
        EngineKind::ErgProfile => "Virtual partner in ERG mode".to_string(),
        EngineKind::PreviousRide => "Following previous ride".to_string(),
        EngineKind::AlgorithmicAi => match (snapshot.attack_ordinal, snapshot.next_attack_distance_m) {
            (Some(ordinal), _) if snapshot.is_attacking() => {
                format!("Attack # {ordinal} in progress")
            }
            (Some(ordinal), Some(at_m)) => {
                let remaining = units.from_meters(at_m - athlete_distance_m);
                format!("Next attack # {ordinal} in {remaining:.1} {}", units.suffix())
            }
            _ => "No more attacks!".to_string(),
        },
    }
}

/// Who is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leader {
    Athlete,
    Partner,
}

/// Order of the two riders and the gap between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub leader: Leader,
    /// Partner minus athlete (m). Once the workout is finished this is the
    /// distance the athlete still has to ride.
    pub gap_m: f64,
}

impl Standings {
    pub fn gap_label(&self, units: DisplayUnits) -> String {
        format!("{:.1} {}", units.from_meters(self.gap_m), units.suffix())
    }
}

pub fn standings(snapshot: &EngineSnapshot, athlete_distance_m: f64, ride_duration_m: f64) -> Standings {
    let gap_m = if snapshot.workout_finished {
        ride_duration_m - athlete_distance_m
    } else {
        snapshot.position.distance_m - athlete_distance_m
    };
    // Within 10 cm the athlete is shown first.
    let leader = if gap_m < 0.1 {
        Leader::Athlete
    } else {
        Leader::Partner
    };
    Standings { leader, gap_m }
}
