//! Algorithmic pacing for the virtual partner.
//!
//! Builds randomized attack plans and runs the pacing/attack state machine
//! that turns athlete telemetry into partner power. No I/O, no engine
//! dependency; operates on plain data.

pub mod fsm;
pub mod plan;
pub mod separation;

pub use partner_core as core;
pub use fsm::{PacingInput, PacingOutput, PacingStateMachine};
pub use plan::{AttackPlan, AttackPlanBuilder, PlanLayout};
