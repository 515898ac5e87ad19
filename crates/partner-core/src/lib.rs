//! Core types and definitions for the virtual partner engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! configuration, telemetry input, published snapshots, cues, constants
//! and the error taxonomy. It contains no engine logic.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
