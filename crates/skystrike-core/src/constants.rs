//! Simulation constants and tuning parameters.
//!
//! All speeds are world units per second, all times are seconds, all
//! distances are world units. Turn/blend rates are per-second lerp rates
//! applied as `rate * dt`, clamped to 1.

use glam::Vec3;

// --- World ---

/// Half-extent of the playable area.
pub const WORLD_EXTENT: f32 = 2000.0;

/// Aircraft altitude band. The AI clamps into this after every move.
pub const ALTITUDE_MIN: f32 = 10.0;
pub const ALTITUDE_MAX: f32 = 180.0;

// --- Population ---

/// Enemies spawned at mission start. There is no respawn.
pub const ENEMY_COUNT: usize = 15;

/// Allies spawned at mission start.
pub const ALLY_COUNT: usize = 6;

// --- Aircraft ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const ENEMY_MAX_HEALTH: f32 = 3.0;
pub const ALLY_MAX_HEALTH: f32 = 3.0;

/// Enemy flight speed. Allies fly slightly faster.
pub const ENEMY_SPEED: f32 = 48.0;
pub const ALLY_SPEED_FACTOR: f32 = 1.1;

/// Heading blend rate for enemy steering (per second).
pub const TURN_RATE: f32 = 1.8;

/// Allies blend more slowly, giving them wider, lazier turns.
pub const ALLY_TURN_RATE: f32 = 1.2;

// --- Enemy AI ---

/// Patrol points are drawn from a square of this half-extent.
pub const PATROL_FIELD: f32 = 1400.0;

/// A patrol point counts as reached within this distance.
pub const PATROL_REACHED: f32 = 50.0;

/// Patrol altitude band: min + uniform [0, span).
pub const PATROL_ALTITUDE_MIN: f32 = 40.0;
pub const PATROL_ALTITUDE_SPAN: f32 = 80.0;

/// Engage trigger distance: min + uniform [0, span), per enemy.
pub const ENGAGE_DISTANCE_MIN: f32 = 200.0;
pub const ENGAGE_DISTANCE_SPAN: f32 = 100.0;

/// Beyond this distance the enemy gives up and returns to patrol.
pub const CHASE_DISTANCE: f32 = 300.0;

/// Orbit geometry while engaging.
pub const ORBIT_RADIUS: f32 = 150.0;
pub const ORBIT_RATE: f32 = 0.5;
pub const ORBIT_BOB: f32 = 30.0;

/// Player-behind detection: dot(enemy-to-player-reverse, forward) below
/// this, inside `BEHIND_RANGE`, flips Engage to Evade.
pub const BEHIND_DOT: f32 = -0.3;
pub const BEHIND_RANGE: f32 = 200.0;

/// Per-tick probability of Engage -> Chase inside `CHASE_TRIGGER_RANGE`.
pub const CHASE_PROBABILITY: f64 = 0.3;
pub const CHASE_TRIGGER_RANGE: f32 = 100.0;

/// Chase breaks to Evade below this distance.
pub const TOO_CLOSE_RANGE: f32 = 30.0;

/// Chase relaxes back to Engage beyond this distance.
pub const CHASE_BREAK_RANGE: f32 = 250.0;

/// Evade returns to Engage once the enemy has this much separation.
pub const EVADE_SAFE_RANGE: f32 = 150.0;

/// Evade jink: uniform perturbation of each axis, recomputed every tick.
pub const EVADE_JITTER: f32 = 0.25;

/// Collision-avoidance radii and the weight of the repulsion term.
pub const ENEMY_AVOID_RADIUS: f32 = 30.0;
pub const ALLY_AVOID_RADIUS: f32 = 25.0;
pub const AVOID_WEIGHT: f32 = 0.3;

/// Allies keep this clearance from the player.
pub const PLAYER_CLEARANCE: f32 = 20.0;
pub const PLAYER_CLEARANCE_WEIGHT: f32 = 0.5;

/// Enemy gun envelope and cooldown.
pub const ENEMY_SHOOT_MIN: f32 = 20.0;
pub const ENEMY_SHOOT_MAX: f32 = 150.0;
pub const ENEMY_SHOOT_COOLDOWN: f32 = 2.0;

/// Ally gun envelope and cooldown.
pub const ALLY_SHOOT_MIN: f32 = 15.0;
pub const ALLY_SHOOT_MAX: f32 = 120.0;
pub const ALLY_SHOOT_COOLDOWN: f32 = 2.5;

// --- Objective raids ---

/// One-time probability that an enemy turns on the base once all allies
/// are down.
pub const OBJECTIVE_ROLL_CHANCE: f64 = 0.5;

/// A raider flies straight at the base inside this range.
pub const RAID_ATTACK_RANGE: f32 = 400.0;

/// A raider launches raid missiles inside this range.
pub const RAID_FIRE_RANGE: f32 = 200.0;
pub const RAID_SHOT_COOLDOWN: f32 = 5.0;

/// Interval between single-raider picks while the base stands.
pub const RAID_PICK_INTERVAL: f32 = 30.0;

// --- Projectiles ---

pub const PLAYER_BULLET_SPEED: f32 = 300.0;
pub const ENEMY_BULLET_SPEED: f32 = 240.0;
pub const ALLY_BULLET_SPEED: f32 = 270.0;
pub const BULLET_LIFETIME: f32 = 3.0;

/// Damage on the aircraft health scale (enemies and allies have 3 HP).
pub const BULLET_DAMAGE: f32 = 1.0;

/// Enemy rounds hit the player on the 100-point scale.
pub const ENEMY_BULLET_PLAYER_DAMAGE: f32 = 10.0;

pub const BULLET_CONTACT_RADIUS: f32 = 3.0;

// --- Guided missiles ---

pub const MISSILE_SPEED: f32 = 120.0;
pub const MISSILE_LIFETIME: f32 = 8.0;

/// Homing blend rate (per second). Bounded turning: the missile cannot
/// reorient instantly and will overshoot a fast crossing target.
pub const MISSILE_TURN_RATE: f32 = 2.4;

/// One-shots a standard enemy.
pub const MISSILE_DAMAGE: f32 = 3.0;

pub const MISSILE_CONTACT_RADIUS: f32 = 5.0;

/// Contact radius and per-hit damage against the attack objective.
pub const OBJECTIVE_CONTACT_RADIUS: f32 = 20.0;
pub const MISSILE_STRUCTURE_DAMAGE: f32 = 25.0;

/// Starting missile inventory.
pub const STARTING_MISSILES: u32 = 20;

// --- Enemy raid missiles ---

pub const RAID_MISSILE_SPEED: f32 = 96.0;
pub const RAID_MISSILE_TURN_RATE: f32 = 3.0;
pub const RAID_MISSILE_LIFETIME: f32 = 15.0;
pub const RAID_MISSILE_DAMAGE: f32 = 20.0;
pub const BASE_CONTACT_RADIUS: f32 = 30.0;

// --- Lock-on ---

/// Continuous dwell required for a full lock.
pub const LOCK_TIME: f32 = 2.0;

/// Maximum lock acquisition range.
pub const LOCK_RANGE: f32 = 400.0;

// --- Turrets ---

pub const TURRET_COUNT: usize = 8;
pub const TURRET_RING_RADIUS: f32 = 120.0;
pub const TURRET_RANGE: f32 = 350.0;
pub const TURRET_COOLDOWN: f32 = 0.5;
pub const TURRET_DAMAGE: f32 = 15.0;
pub const TURRET_SHELL_SPEED: f32 = 90.0;
pub const TURRET_MUZZLE_HEIGHT: f32 = 2.5;

// --- Ramming ---

/// Player-enemy contact: the enemy is destroyed, the player takes damage.
pub const PLAYER_RAM_RADIUS: f32 = 5.0;
pub const PLAYER_RAM_DAMAGE: f32 = 20.0;

/// Aircraft-aircraft contact (enemy-enemy, ally-enemy): both go down.
pub const AIRCRAFT_RAM_RADIUS: f32 = 8.0;

// --- Scoring ---

pub const SCORE_BULLET_KILL: u32 = 10;
pub const SCORE_MISSILE_KILL: u32 = 50;

// --- Structures ---

pub const BASE_HEALTH: f32 = 200.0;
pub const OBJECTIVE_HEALTH: f32 = 100.0;

/// Projectiles aim at a point this far above a structure's origin.
pub const STRUCTURE_AIM_HEIGHT: f32 = 10.0;

pub const BASE_POSITION: Vec3 = Vec3::new(-900.0, 0.0, 0.0);
pub const OBJECTIVE_POSITION: Vec3 = Vec3::new(900.0, 0.0, 600.0);

// --- Effects ---

pub const FX_SMALL_SCALE: f32 = 1.0;
pub const FX_DESTRUCTION_SCALE: f32 = 1.5;
pub const FX_MASSIVE_SCALE: f32 = 4.0;
