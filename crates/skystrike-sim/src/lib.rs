//! Simulation engine for SKYSTRIKE.
//!
//! Owns the hecs ECS world, advances all subsystems in a fixed order
//! per tick, and produces `WorldSnapshot`s for the rendering driver.

pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use skystrike_core as core;

#[cfg(test)]
mod tests;
