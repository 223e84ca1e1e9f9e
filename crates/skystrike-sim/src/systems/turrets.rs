//! Turret subsystem — autonomous stationary guns around the attack
//! objective.
//!
//! Each turret independently scans the player (only while airborne) and
//! all living allies inside its range, picks the single nearest, and
//! fires an unguided shell at the target's position at the instant of
//! firing. Scan order breaks ties: the player is checked before allies.

use glam::Vec3;
use hecs::World;

use skystrike_core::components::{Ally, Transform, TurretGun};
use skystrike_core::constants::TURRET_MUZZLE_HEIGHT;
use skystrike_core::enums::{ProjectileKind, ProjectileSource};
use skystrike_core::types::SimTime;

use crate::session::FireRequest;
use crate::systems::enemy_ai::player_position;

/// Run target scans and firing for every turret.
pub fn run(
    world: &mut World,
    time: &SimTime,
    airborne: bool,
    fire_requests: &mut Vec<FireRequest>,
) {
    let player_pos = player_position(world);

    let ally_positions: Vec<Vec3> = world
        .query::<(&Ally, &Transform)>()
        .iter()
        .map(|(_, (_, tf))| tf.position)
        .collect();

    for (_entity, (gun, tf)) in world.query_mut::<(&mut TurretGun, &Transform)>() {
        let muzzle = tf.position + Vec3::Y * TURRET_MUZZLE_HEIGHT;

        let mut target: Option<(Vec3, f32)> = None;
        if airborne {
            if let Some(pos) = player_pos {
                let dist = tf.position.distance(pos);
                if dist < gun.range {
                    target = Some((pos, dist));
                }
            }
        }
        for &pos in &ally_positions {
            let dist = tf.position.distance(pos);
            if dist < gun.range && target.map_or(true, |(_, best)| dist < best) {
                target = Some((pos, dist));
            }
        }

        if let Some((aim, _)) = target {
            if time.elapsed_secs - gun.last_shot_secs > gun.cooldown_secs {
                gun.last_shot_secs = time.elapsed_secs;
                fire_requests.push(FireRequest {
                    kind: ProjectileKind::Bullet,
                    source: ProjectileSource::Turret,
                    position: muzzle,
                    direction: (aim - muzzle).normalize_or_zero(),
                    homing: None,
                });
            }
        }
    }
}
