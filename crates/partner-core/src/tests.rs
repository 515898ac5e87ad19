#[cfg(test)]
mod tests {
    use crate::config::{EngineConfig, IntervalSettings};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::PartnerCue;
    use crate::state::EngineSnapshot;
    use crate::types::Telemetry;

    fn valid_intervals() -> IntervalSettings {
        IntervalSettings {
            total_attacks: 2,
            warmup_percent: 5.0,
            cooldown_percent: 5.0,
            attack_duration_m: 100,
            attack_power_increase_w: 50,
            max_separation_m: 0,
        }
    }

    #[test]
    fn test_partial_json_config_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "intervals": { "total_attacks": 3 } }"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.kind, EngineKind::AlgorithmicAi);
        assert_eq!(config.intervals.total_attacks, 3);
        assert_eq!(config.intervals.max_separation_m, 0);
        assert!(config.erg_file.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_kind_from_json() {
        let config =
            EngineConfig::from_json(r#"{ "kind": "PreviousRide", "previous_ride_file": "ride.json" }"#)
                .unwrap();
        assert_eq!(config.kind, EngineKind::PreviousRide);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_attacks() {
        let config = EngineConfig::algorithmic(IntervalSettings::default());
        assert_eq!(config.validate(), Err(ConfigError::NoAttacks));
    }

    #[test]
    fn test_validate_rejects_bad_percent() {
        let mut intervals = valid_intervals();
        intervals.warmup_percent = -1.0;
        assert!(matches!(
            intervals.validate(),
            Err(ConfigError::PercentOutOfRange { name: "warmup", .. })
        ));

        let mut intervals = valid_intervals();
        intervals.cooldown_percent = f64::NAN;
        assert!(matches!(
            intervals.validate(),
            Err(ConfigError::PercentOutOfRange { name: "cooldown", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_no_pacing_window() {
        let mut intervals = valid_intervals();
        intervals.warmup_percent = 60.0;
        intervals.cooldown_percent = 40.0;
        assert!(matches!(
            intervals.validate(),
            Err(ConfigError::NoPacingWindow { .. })
        ));
    }

    #[test]
    fn test_validate_file_kinds_need_paths() {
        let mut config = EngineConfig::erg_profile("workout.json");
        assert!(config.validate().is_ok());
        config.erg_file = None;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingSourcePath(EngineKind::ErgProfile))
        );
    }

    #[test]
    fn test_valid_intervals_pass() {
        assert!(EngineConfig::algorithmic(valid_intervals()).validate().is_ok());
    }

    #[test]
    fn test_telemetry_distances() {
        let t = Telemetry {
            power_w: 200.0,
            route_distance_km: 1.5,
            separation_m: -20.0,
            elapsed_ms: 1000,
        };
        assert_eq!(t.distance_m(), 1500.0);
        assert_eq!(t.partner_distance_m(), 1480.0);
    }

    #[test]
    fn test_telemetry_separation_defaults_to_zero() {
        let t: Telemetry =
            serde_json::from_str(r#"{ "power_w": 180, "route_distance_km": 0.2, "elapsed_ms": 0 }"#)
                .unwrap();
        assert_eq!(t.separation_m, 0.0);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(PartnerStatus::WarmupCooldown.to_string(), "Warmup - Cooldown");
        assert_eq!(PartnerStatus::SlowingDown.to_string(), "Slowing down");
        assert_eq!(PartnerStatus::NotStarted.to_string(), "NOT STARTED");
    }

    #[test]
    fn test_imperial_conversion() {
        let feet = DisplayUnits::Imperial.from_meters(100.0);
        assert!((feet - 328.08399).abs() < 1e-6);
        assert_eq!(DisplayUnits::Metric.from_meters(100.0), 100.0);
    }

    #[test]
    fn test_inactive_snapshot() {
        let snap = EngineSnapshot::inactive(false, EngineKind::ErgProfile, Some("off".into()));
        assert!(!snap.enabled);
        assert!(!snap.initialized);
        assert_eq!(snap.phase, EnginePhase::Uninitialized);
        assert_eq!(snap.power_w, 0.0);
        assert_eq!(snap.phase_label, "NOT STARTED");
        assert!(snap.cues.is_empty());
    }

    #[test]
    fn test_cue_is_tagged_in_json() {
        let json = serde_json::to_string(&PartnerCue::AttackEnded { ordinal: 2 }).unwrap();
        assert!(json.contains(r#""type":"AttackEnded""#), "got {json}");
    }
}
