//! Judge CLI - Command line tools for the mission evaluation engine.
//!
//! This crate provides the evaluator binaries:
//! - evaluate_mission: score recorded team logs against the active mission
//! - generate_mission: synthesize a snapshot fixture with simulated flights

pub mod sim;

pub use sim::{generate_snapshot, SimOptions};
