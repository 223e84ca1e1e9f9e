//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus the engine-owned
//! session state they need. They run in the fixed order wired up in
//! `SimulationEngine::run_systems`; none of them blocks or suspends.

pub mod ally_ai;
pub mod collision;
pub mod enemy_ai;
pub mod lock_on;
pub mod mission;
pub mod projectiles;
pub mod raid;
pub mod snapshot;
pub mod turrets;
