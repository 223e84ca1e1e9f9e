//! Projectile subsystem — owns all projectile spawning, integration,
//! lifetime expiry, and missile homing.
//!
//! Homing targets are weak handles (entity bits). A target that has
//! been despawned, or a structure already destroyed, reverts the
//! missile to ballistic flight along its last velocity.

use std::collections::HashMap;

use glam::Vec3;
use hecs::{Entity, World};

use skystrike_core::components::{Projectile, Structure, Transform};
use skystrike_core::constants::*;
use skystrike_core::enums::{ProjectileKind, ProjectileSource};

use crate::session::FireRequest;
use skystrike_ai::steering;

/// Spawn all pending fire requests, then advance every projectile.
pub fn run(
    world: &mut World,
    dt: f32,
    fire_requests: &mut Vec<FireRequest>,
    despawn_buffer: &mut Vec<Entity>,
) {
    spawn_pending(world, fire_requests);

    // Resolve homing aim points before taking the integration borrow.
    let mut aims: HashMap<Entity, Option<Vec3>> = HashMap::new();
    {
        let mut query = world.query::<(&Transform, &Projectile)>();
        let missiles: Vec<(Entity, u64)> = query
            .iter()
            .filter_map(|(e, (_, proj))| match (proj.kind, proj.homing) {
                (ProjectileKind::Missile, Some(bits)) => Some((e, bits)),
                _ => None,
            })
            .collect();
        drop(query);

        for (missile, bits) in missiles {
            aims.insert(missile, resolve_aim(world, bits));
        }
    }

    despawn_buffer.clear();
    for (entity, (tf, proj)) in world.query_mut::<(&mut Transform, &mut Projectile)>() {
        // Expired projectiles are removed before being moved again.
        proj.age_secs += dt;
        if proj.age_secs > proj.max_age_secs {
            despawn_buffer.push(entity);
            continue;
        }

        if proj.kind == ProjectileKind::Missile && proj.homing.is_some() {
            match aims.get(&entity) {
                Some(Some(aim)) => {
                    // Bounded homing: blend the velocity direction toward
                    // the target, keep the speed.
                    let speed = proj.velocity.length();
                    let to_target = (*aim - tf.position).normalize_or_zero();
                    let turn_rate = match proj.source {
                        ProjectileSource::Enemy => RAID_MISSILE_TURN_RATE,
                        _ => MISSILE_TURN_RATE,
                    };
                    let dir = steering::blend_heading(
                        proj.velocity.normalize_or_zero(),
                        to_target,
                        turn_rate,
                        dt,
                    );
                    proj.velocity = dir * speed;
                }
                // Stale target: ballistic fallback.
                Some(None) => proj.homing = None,
                None => {}
            }
        }

        tf.position += proj.velocity * dt;
        let dir = proj.velocity.normalize_or_zero();
        if dir != Vec3::ZERO {
            tf.forward = dir;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Drain the request buffer into live projectile entities.
pub fn spawn_pending(world: &mut World, fire_requests: &mut Vec<FireRequest>) {
    for request in fire_requests.drain(..) {
        spawn(world, &request);
    }
}

/// Spawn one projectile from a request.
pub fn spawn(world: &mut World, request: &FireRequest) -> Entity {
    let (speed, damage, lifetime) = ballistics(request.source, request.kind);
    world.spawn((
        Transform::new(request.position, request.direction),
        Projectile {
            velocity: request.direction * speed,
            age_secs: 0.0,
            max_age_secs: lifetime,
            damage,
            source: request.source,
            kind: request.kind,
            homing: request.homing.map(|e| e.to_bits().get()),
        },
    ))
}

/// Muzzle speed, damage, and lifetime per source and kind.
fn ballistics(source: ProjectileSource, kind: ProjectileKind) -> (f32, f32, f32) {
    match (source, kind) {
        (ProjectileSource::Player, ProjectileKind::Bullet) => {
            (PLAYER_BULLET_SPEED, BULLET_DAMAGE, BULLET_LIFETIME)
        }
        (ProjectileSource::Enemy, ProjectileKind::Bullet) => {
            (ENEMY_BULLET_SPEED, BULLET_DAMAGE, BULLET_LIFETIME)
        }
        (ProjectileSource::Ally, ProjectileKind::Bullet) => {
            (ALLY_BULLET_SPEED, BULLET_DAMAGE, BULLET_LIFETIME)
        }
        (ProjectileSource::Turret, _) => (TURRET_SHELL_SPEED, TURRET_DAMAGE, BULLET_LIFETIME),
        (ProjectileSource::Enemy, ProjectileKind::Missile) => {
            (RAID_MISSILE_SPEED, RAID_MISSILE_DAMAGE, RAID_MISSILE_LIFETIME)
        }
        (_, ProjectileKind::Missile) => (MISSILE_SPEED, MISSILE_DAMAGE, MISSILE_LIFETIME),
    }
}

/// Resolve a homing handle to an aim point. Aircraft are aimed at
/// directly; structures at a point above their origin. Returns None for
/// stale handles and destroyed structures.
fn resolve_aim(world: &World, bits: u64) -> Option<Vec3> {
    let target = Entity::from_bits(bits)?;
    let tf = world.get::<&Transform>(target).ok()?;
    match world.get::<&Structure>(target) {
        Ok(structure) => {
            if structure.destroyed {
                None
            } else {
                Some(tf.position + Vec3::Y * STRUCTURE_AIM_HEIGHT)
            }
        }
        Err(_) => Some(tf.position),
    }
}
