//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy decision state machine.
///
/// Patrol is the initial state; there is no terminal state — an enemy
/// loops between these until it is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Flying toward a roaming patrol point, ignoring the player.
    #[default]
    Patrol,
    /// Orbiting the player at a fixed radius, occasionally attacking.
    Engage,
    /// Flying straight at the player's current position.
    Chase,
    /// Breaking away from the player with a random jink.
    Evade,
}

/// What fired a projectile. Determines valid collision targets downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileSource {
    Player,
    Enemy,
    Ally,
    Turret,
}

/// Projectile flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Straight-flying round, short lifetime.
    Bullet,
    /// Guided round with bounded homing and a longer lifetime.
    Missile,
}

/// The two destructible objective buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureKind {
    /// The friendly base that must survive the defensive phase.
    DefendedBase,
    /// The enemy building the player must destroy to win.
    AttackObjective,
}

/// Mission phase (top-level state).
///
/// `DefendBase` transitions to `AttackObjective` exactly once, when the
/// live enemy count first reaches zero. `Victory` and `Defeat` are
/// terminal: once entered, simulation ticks become no-ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    #[default]
    DefendBase,
    AttackObjective,
    Victory,
    Defeat,
}

/// Visual effect magnitude for the external particle renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FxKind {
    /// Projectile impact without a kill.
    SmallHit,
    /// An aircraft going down.
    Destruction,
    /// A structure being destroyed.
    Massive,
}
