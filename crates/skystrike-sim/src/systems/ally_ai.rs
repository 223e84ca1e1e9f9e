//! Ally AI system — each ally hunts the nearest living enemy.

use glam::Vec3;
use hecs::World;

use skystrike_core::components::{Ally, AllyBrain, Enemy, Transform};
use skystrike_core::constants::*;
use skystrike_core::enums::{ProjectileKind, ProjectileSource};
use skystrike_core::types::SimTime;

use skystrike_ai::steering;

use crate::session::FireRequest;
use crate::systems::enemy_ai::player_position;

/// Advance every ally by one tick.
pub fn run(world: &mut World, time: &SimTime, dt: f32, fire_requests: &mut Vec<FireRequest>) {
    let player_pos = player_position(world);

    let enemy_positions: Vec<Vec3> = world
        .query::<(&Enemy, &Transform)>()
        .iter()
        .map(|(_, (_, tf))| tf.position)
        .collect();

    let roster: Vec<(hecs::Entity, Transform, AllyBrain)> = world
        .query::<(&Ally, &Transform, &AllyBrain)>()
        .iter()
        .map(|(e, (_, tf, brain))| (e, *tf, *brain))
        .collect();
    let positions: Vec<Vec3> = roster.iter().map(|(_, tf, _)| tf.position).collect();

    for (idx, (entity, tf, brain)) in roster.iter().enumerate() {
        let mut brain = *brain;

        // Nearest living enemy; ties go to the earlier scan position.
        let mut nearest: Option<(Vec3, f32)> = None;
        for &pos in &enemy_positions {
            let dist = tf.position.distance(pos);
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((pos, dist));
            }
        }

        // With no enemy left, keep flying on the last heading.
        let desired = match nearest {
            Some((enemy_pos, _)) => (enemy_pos - tf.position).normalize_or_zero(),
            None => tf.forward,
        };

        // Repel from wingmen, and keep clear of the player.
        let neighbors: Vec<Vec3> = positions
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != idx)
            .map(|(_, &p)| p)
            .collect();
        let mut push = steering::separation(tf.position, &neighbors, ALLY_AVOID_RADIUS);
        if let Some(player_pos) = player_pos {
            if tf.position.distance(player_pos) < PLAYER_CLEARANCE {
                push += (tf.position - player_pos).normalize_or_zero() * PLAYER_CLEARANCE_WEIGHT;
            }
        }
        let desired = steering::combine(desired, push);

        let heading = steering::blend_heading(tf.forward, desired, ALLY_TURN_RATE, dt);
        let mut position = tf.position + heading * ENEMY_SPEED * ALLY_SPEED_FACTOR * dt;
        position.y = position.y.clamp(ALTITUDE_MIN, ALTITUDE_MAX);

        if let Some((enemy_pos, dist)) = nearest {
            if dist > ALLY_SHOOT_MIN
                && dist < ALLY_SHOOT_MAX
                && time.elapsed_secs - brain.last_shot_secs > ALLY_SHOOT_COOLDOWN
            {
                brain.last_shot_secs = time.elapsed_secs;
                fire_requests.push(FireRequest {
                    kind: ProjectileKind::Bullet,
                    source: ProjectileSource::Ally,
                    position,
                    direction: (enemy_pos - position).normalize_or_zero(),
                    homing: None,
                });
            }
        }

        if let Ok(mut tf_mut) = world.get::<&mut Transform>(*entity) {
            tf_mut.position = position;
            tf_mut.forward = heading;
        }
        if let Ok(mut brain_mut) = world.get::<&mut AllyBrain>(*entity) {
            *brain_mut = brain;
        }
    }
}
