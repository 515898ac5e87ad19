//! Virtual partner engine.
//!
//! Selects the active data source, runs it once per telemetry tick and
//! packages the result into an `EngineSnapshot`. Headless and
//! single-threaded; the session driver owns the engine and calls
//! `initialize`, `step` and `stop`.

pub mod display;
pub mod engine;
pub mod loader;
pub mod route;
pub mod snapshot;
pub mod sources;

pub use engine::VirtualPartnerEngine;
pub use partner_core as core;
