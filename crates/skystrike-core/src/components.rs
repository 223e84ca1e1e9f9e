//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic in them —
//! behavior lives in systems. Target references are stored as entity
//! bits (index + generation), so a stale reference is detected by a
//! failed lookup instead of dereferencing freed state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks the player aircraft. Its transform is driven by the external
/// control resolution, not by the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an enemy aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks an ally aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ally;

/// World-space placement shared by every actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Unit-length facing/heading vector.
    pub forward: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// Hit points. Mutation goes through `apply` so the invariant
/// `0 <= current <= max` holds after every damage application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, clamped into [0, max]. Returns the new value.
    pub fn apply(&mut self, damage: f32) -> f32 {
        self.current = (self.current - damage).clamp(0.0, self.max);
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Per-enemy AI state.
///
/// Timestamps are elapsed-seconds values compared against `SimTime`;
/// the -1000 sentinel keeps the first shot unconstrained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub state: EnemyState,
    /// Current roaming destination while in Patrol.
    pub patrol_target: Vec3,
    /// Randomized per enemy at spawn (200-300).
    pub engage_distance: f32,
    pub chase_distance: f32,
    /// Spreads engaging enemies around the orbit instead of stacking.
    pub orbit_slot: usize,
    /// Sticky objective-attack override flag.
    pub targets_objective: bool,
    /// The 50% objective roll happens at most once per enemy.
    pub objective_roll_done: bool,
    pub last_shot_secs: f32,
    pub last_raid_shot_secs: f32,
}

impl EnemyBrain {
    pub fn new(patrol_target: Vec3, engage_distance: f32, orbit_slot: usize) -> Self {
        Self {
            state: EnemyState::Patrol,
            patrol_target,
            engage_distance,
            chase_distance: crate::constants::CHASE_DISTANCE,
            orbit_slot,
            targets_objective: false,
            objective_roll_done: false,
            last_shot_secs: -1000.0,
            last_raid_shot_secs: -1000.0,
        }
    }
}

/// Per-ally AI state. Allies share the smoothed heading in `Transform`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AllyBrain {
    pub last_shot_secs: f32,
}

impl Default for AllyBrain {
    fn default() -> Self {
        Self {
            last_shot_secs: -1000.0,
        }
    }
}

/// A bullet or guided missile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub velocity: Vec3,
    pub age_secs: f32,
    pub max_age_secs: f32,
    /// Damage on the target's own health scale; the contact engine
    /// special-cases enemy rounds against the player.
    pub damage: f32,
    pub source: ProjectileSource,
    pub kind: ProjectileKind,
    /// Weak homing-target handle (entity bits). None for bullets and for
    /// missiles that have gone ballistic.
    pub homing: Option<u64>,
}

/// A stationary defensive gun. Turrets never move and are never
/// destroyed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurretGun {
    pub range: f32,
    pub cooldown_secs: f32,
    pub damage: f32,
    pub last_shot_secs: f32,
}

impl TurretGun {
    pub fn new(range: f32, cooldown_secs: f32, damage: f32) -> Self {
        Self {
            range,
            cooldown_secs,
            damage,
            last_shot_secs: -1000.0,
        }
    }
}

/// One of the two objective buildings. Destruction is a one-way
/// transition: `destroyed` is set exactly once, health stays clamped at
/// zero afterward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub destroyed: bool,
}
