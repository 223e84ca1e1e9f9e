//! Enemy AI system — runs the FSM, steering, movement, and gun checks
//! for every enemy each tick.
//!
//! Decisions are computed from a start-of-tick snapshot of positions
//! (two-phase, to keep hecs borrows simple), then applied entity by
//! entity. Fire intents are emitted as `FireRequest`s; the projectile
//! subsystem owns the actual spawning.

use glam::Vec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use skystrike_core::components::{Enemy, EnemyBrain, Player, Structure, Transform};
use skystrike_core::constants::*;
use skystrike_core::enums::{EnemyState, ProjectileKind, ProjectileSource};
use skystrike_core::types::SimTime;

use skystrike_ai::fsm::{self, EnemyContext};
use skystrike_ai::steering;

use crate::session::FireRequest;

/// Advance every enemy by one tick.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    time: &SimTime,
    dt: f32,
    base: Option<hecs::Entity>,
    fire_requests: &mut Vec<FireRequest>,
) {
    let player_pos = match player_position(world) {
        Some(p) => p,
        None => return,
    };
    let base_target = base_aim_point(world, base);

    // Start-of-tick snapshot of every enemy, also used for separation.
    let roster: Vec<(hecs::Entity, Transform, EnemyBrain)> = world
        .query::<(&Enemy, &Transform, &EnemyBrain)>()
        .iter()
        .map(|(e, (_, tf, brain))| (e, *tf, *brain))
        .collect();
    let positions: Vec<Vec3> = roster.iter().map(|(_, tf, _)| tf.position).collect();

    for (idx, (entity, tf, brain)) in roster.iter().enumerate() {
        let mut brain = *brain;
        let dist_to_player = tf.position.distance(player_pos);

        // Objective-attack override: checked before the state machine.
        let mut desired_dir = None;
        if brain.targets_objective {
            if let Some((base_entity, aim)) = base_target {
                let dist_to_base = tf.position.distance(aim);
                if dist_to_base < RAID_ATTACK_RANGE {
                    desired_dir = Some((aim - tf.position).normalize_or_zero());

                    if dist_to_base < RAID_FIRE_RANGE
                        && time.elapsed_secs - brain.last_raid_shot_secs > RAID_SHOT_COOLDOWN
                    {
                        brain.last_raid_shot_secs = time.elapsed_secs;
                        fire_requests.push(FireRequest {
                            kind: ProjectileKind::Missile,
                            source: ProjectileSource::Enemy,
                            position: tf.position,
                            direction: (aim - tf.position).normalize_or_zero(),
                            homing: Some(base_entity),
                        });
                    }
                }
            }
        }

        let raiding = desired_dir.is_some();
        let desired = match desired_dir {
            Some(dir) => dir,
            None => {
                let ctx = EnemyContext {
                    state: brain.state,
                    position: tf.position,
                    forward: tf.forward,
                    player_pos,
                    patrol_target: brain.patrol_target,
                    engage_distance: brain.engage_distance,
                    chase_distance: brain.chase_distance,
                    orbit_slot: brain.orbit_slot,
                    elapsed_secs: time.elapsed_secs,
                };
                let decision = fsm::evaluate(&ctx, rng);
                brain.state = decision.new_state;
                if let Some(target) = decision.new_patrol_target {
                    brain.patrol_target = target;
                }

                // Neighbor repulsion keeps the flight from clustering.
                let neighbors: Vec<Vec3> = positions
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != idx)
                    .map(|(_, &p)| p)
                    .collect();
                let push = steering::separation(tf.position, &neighbors, ENEMY_AVOID_RADIUS);
                steering::combine(decision.desired_dir, push)
            }
        };

        // Gradual turn, then move along the new heading.
        let heading = steering::blend_heading(tf.forward, desired, TURN_RATE, dt);
        let mut position = tf.position + heading * ENEMY_SPEED * dt;
        position.y = position.y.clamp(ALTITUDE_MIN, ALTITUDE_MAX);

        // Guns: only while chasing or engaging, inside the envelope.
        if !raiding
            && matches!(brain.state, EnemyState::Chase | EnemyState::Engage)
            && dist_to_player > ENEMY_SHOOT_MIN
            && dist_to_player < ENEMY_SHOOT_MAX
            && time.elapsed_secs - brain.last_shot_secs > ENEMY_SHOOT_COOLDOWN
        {
            brain.last_shot_secs = time.elapsed_secs;
            fire_requests.push(FireRequest {
                kind: ProjectileKind::Bullet,
                source: ProjectileSource::Enemy,
                position,
                direction: heading,
                homing: None,
            });
        }

        if let Ok(mut tf_mut) = world.get::<&mut Transform>(*entity) {
            tf_mut.position = position;
            tf_mut.forward = heading;
        }
        if let Ok(mut brain_mut) = world.get::<&mut EnemyBrain>(*entity) {
            *brain_mut = brain;
        }
    }
}

/// Current player position, if the player has been placed.
pub(crate) fn player_position(world: &World) -> Option<Vec3> {
    world
        .query::<(&Player, &Transform)>()
        .iter()
        .next()
        .map(|(_, (_, tf))| tf.position)
}

/// Aim point on the defended base, while it still stands.
fn base_aim_point(world: &World, base: Option<hecs::Entity>) -> Option<(hecs::Entity, Vec3)> {
    let base = base?;
    let structure = world.get::<&Structure>(base).ok()?;
    if structure.destroyed {
        return None;
    }
    let tf = world.get::<&Transform>(base).ok()?;
    Some((base, tf.position + Vec3::Y * STRUCTURE_AIM_HEIGHT))
}
