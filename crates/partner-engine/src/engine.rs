//! Virtual partner engine: the orchestrator the session driver talks to.
//!
//! `VirtualPartnerEngine` selects the source named by the configuration,
//! runs it once per telemetry tick and publishes an `EngineSnapshot`.
//! Failures never escape as panics: they leave the engine disabled and are
//! reported in the snapshot.

use tracing::{debug, info, warn};

use partner_core::config::EngineConfig;
use partner_core::enums::{EngineKind, EnginePhase};
use partner_core::error::{ConfigError, EngineError};
use partner_core::state::EngineSnapshot;
use partner_core::types::{Position, Telemetry};
use partner_pacing::{AttackPlan, AttackPlanBuilder, PacingStateMachine};

use crate::loader::{JsonSourceLoader, SourceLoader};
use crate::route::RouteGeometry;
use crate::snapshot::build_snapshot;
use crate::sources::{
    AlgorithmicSource, ErgSource, PartnerSource, PositionFix, ReplaySource,
};

/// The engine. Owns the active source and all per-session state.
pub struct VirtualPartnerEngine {
    loader: Box<dyn SourceLoader>,
    route: Option<Box<dyn RouteGeometry>>,
    config: Option<EngineConfig>,
    ride_duration_m: f64,
    enabled: bool,
    source: Option<Box<dyn PartnerSource>>,
    phase: EnginePhase,
    last_position: Position,
    failure: Option<String>,
    latest: EngineSnapshot,
}

impl Default for VirtualPartnerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualPartnerEngine {
    /// Engine reading file sources as JSON, without route geometry.
    pub fn new() -> Self {
        Self {
            loader: Box::new(JsonSourceLoader),
            route: None,
            config: None,
            ride_duration_m: 0.0,
            enabled: false,
            source: None,
            phase: EnginePhase::Uninitialized,
            last_position: Position::default(),
            failure: None,
            latest: EngineSnapshot::inactive(false, EngineKind::default(), None),
        }
    }

    /// Replace the file-source loader.
    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Attach route geometry used to place the partner on the map.
    pub fn with_route(mut self, route: impl RouteGeometry + 'static) -> Self {
        self.route = Some(Box::new(route));
        self
    }

    /// Set up a session. Called once per workout load.
    ///
    /// On failure the engine stays uninitialized, the reason is kept for the
    /// snapshot, and every `step` returns a passthrough snapshot.
    pub fn initialize(
        &mut self,
        config: EngineConfig,
        ride_duration_m: f64,
    ) -> Result<(), EngineError> {
        self.stop();
        self.enabled = config.enabled;
        self.ride_duration_m = ride_duration_m;

        let opened = self.open_source(&config, ride_duration_m);
        self.config = Some(config);

        match opened {
            Ok(source) => {
                info!(kind = ?source.kind(), ride_duration_m, "virtual partner initialized");
                self.phase = source.initial_phase();
                self.source = Some(source);
                self.failure = None;
                self.latest = self.idle_snapshot();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "virtual partner engine cannot initialize");
                self.failure = Some(err.to_string());
                self.latest = self.idle_snapshot();
                Err(err)
            }
        }
    }

    fn open_source(
        &self,
        config: &EngineConfig,
        ride_duration_m: f64,
    ) -> Result<Box<dyn PartnerSource>, EngineError> {
        if !config.enabled {
            return Err(EngineError::Disabled);
        }
        if !ride_duration_m.is_finite() || ride_duration_m <= 0.0 {
            return Err(ConfigError::InvalidRideDuration(ride_duration_m).into());
        }
        config.validate()?;

        match config.kind {
            EngineKind::AlgorithmicAi => {
                let seed = config.seed.unwrap_or_else(rand::random);
                debug!(seed, "building attack plan");
                let plan = AttackPlanBuilder::seeded(seed)
                    .build_from_settings(&config.intervals, ride_duration_m)?;
                let machine = PacingStateMachine::new(plan, &config.intervals);
                Ok(Box::new(AlgorithmicSource::new(machine, ride_duration_m)))
            }
            EngineKind::ErgProfile => {
                let path = config
                    .erg_file
                    .as_deref()
                    .ok_or(ConfigError::MissingSourcePath(config.kind))?;
                let curve = self.loader.load_erg(path)?;
                Ok(Box::new(ErgSource::new(curve, ride_duration_m)?))
            }
            EngineKind::PreviousRide => {
                let path = config
                    .previous_ride_file
                    .as_deref()
                    .ok_or(ConfigError::MissingSourcePath(config.kind))?;
                let ride = self.loader.load_ride(path)?;
                Ok(Box::new(ReplaySource::new(ride, ride_duration_m)))
            }
        }
    }

    /// Advance one telemetry tick and return the resulting snapshot.
    pub fn step(&mut self, tick: &Telemetry) -> EngineSnapshot {
        let Some(source) = self.source.as_mut() else {
            self.latest = self.idle_snapshot();
            return self.latest.clone();
        };
        let sample = source.sample(tick);
        let kind = source.kind();

        let position = match sample.position {
            PositionFix::FollowHost => {
                let distance_m = tick.partner_distance_m();
                let geo = self.route.as_ref().and_then(|r| r.locate(distance_m));
                Position::new(distance_m, geo)
            }
            PositionFix::Recorded(position) => position,
            PositionFix::Hold => self.last_position,
        };
        self.last_position = position;
        self.phase = sample.phase;

        self.latest = build_snapshot(kind, &sample, position, tick.distance_m());
        self.latest.clone()
    }

    /// End the session. Safe at any tick boundary; keeps the configuration.
    pub fn stop(&mut self) {
        if self.source.take().is_some() {
            info!("virtual partner stopped");
        }
        self.phase = EnginePhase::Uninitialized;
        self.last_position = Position::default();
        self.latest = self.idle_snapshot();
    }

    /// Like `stop`, and also forgets the last failure. The enable flag
    /// follows the kept configuration.
    pub fn reset(&mut self) {
        self.stop();
        self.enabled = self.config.as_ref().is_some_and(|c| c.enabled);
        self.failure = None;
        self.latest = self.idle_snapshot();
    }

    pub fn is_initialized(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn config(&self) -> Option<&EngineConfig> {
        self.config.as_ref()
    }

    pub fn ride_duration_m(&self) -> f64 {
        self.ride_duration_m
    }

    /// Why the last initialization failed, if it did.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// The active attack plan (algorithmic sessions only).
    pub fn attack_plan(&self) -> Option<&AttackPlan> {
        self.source.as_ref().and_then(|s| s.attack_plan())
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> &EngineSnapshot {
        &self.latest
    }

    fn idle_snapshot(&self) -> EngineSnapshot {
        let kind = self.config.as_ref().map(|c| c.kind).unwrap_or_default();
        let mut snapshot = EngineSnapshot::inactive(self.enabled, kind, self.failure.clone());
        if let Some(source) = self.source.as_ref() {
            snapshot.initialized = true;
            snapshot.phase = source.initial_phase();
        }
        snapshot
    }
}
