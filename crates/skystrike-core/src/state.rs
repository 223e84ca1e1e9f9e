//! World snapshot — the complete visible state handed to the
//! rendering/UI collaborators after each tick.
//!
//! Views carry non-owning entity ids (`hecs` entity bits) so the
//! renderer can keep its visual objects synchronized. Every list is
//! sorted by id for deterministic serialization.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::FxEvent;
use crate::types::SimTime;

/// Complete per-tick output of the simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: MissionPhase,
    /// Cleared on Victory/Defeat; further ticks are no-ops.
    pub running: bool,
    pub score: u32,
    pub player: PlayerView,
    pub lock: LockView,
    pub enemies: Vec<EnemyView>,
    pub allies: Vec<AllyView>,
    pub projectiles: Vec<ProjectileView>,
    pub turrets: Vec<TurretView>,
    pub structures: Vec<StructureView>,
    /// Effect requests produced this tick (drained, not accumulated).
    pub effects: Vec<FxEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub forward: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub missiles_remaining: u32,
    pub airborne: bool,
}

/// Lock-on progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockView {
    /// Entity bits of the tentative/locked target.
    pub target_id: Option<u64>,
    /// Normalized progress in [0, 1].
    pub progress: f32,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: Vec3,
    pub forward: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub state: EnemyState,
    pub targets_objective: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllyView {
    pub id: u64,
    pub position: Vec3,
    pub forward: Vec3,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub kind: ProjectileKind,
    pub source: ProjectileSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretView {
    pub id: u64,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureView {
    pub id: u64,
    pub kind: StructureKind,
    pub position: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub destroyed: bool,
}
