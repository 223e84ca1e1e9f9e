//! Lock-on protocol — advances the missile lock timer each tick.
//!
//! Scans every enemy plus the attack objective, picks the nearest
//! candidate inside the maximum lock range, and accumulates dwell time
//! while the candidate stays the same. Any candidate change (including
//! losing all candidates, or the target dying) resets the clock.

use glam::Vec3;
use hecs::World;

use skystrike_core::components::{Enemy, Structure, Transform};
use skystrike_core::constants::STRUCTURE_AIM_HEIGHT;

use crate::session::LockOn;
use crate::systems::enemy_ai::player_position;

/// Run the lock-on scan for one tick.
pub fn run(
    world: &World,
    lock: &mut LockOn,
    dt: f32,
    airborne: bool,
    objective: Option<hecs::Entity>,
) {
    // No lock from the runway.
    if !airborne {
        lock.clear();
        return;
    }

    let player_pos = match player_position(world) {
        Some(p) => p,
        None => {
            lock.clear();
            return;
        }
    };

    // Enemies first, then the attack objective; strict comparison keeps
    // the earlier candidate on exact ties.
    let mut best: Option<(hecs::Entity, f32)> = None;
    for (entity, (_enemy, tf)) in world.query::<(&Enemy, &Transform)>().iter() {
        consider(&mut best, entity, player_pos.distance(tf.position), lock.max_range);
    }
    if let Some(objective) = objective {
        if let (Ok(structure), Ok(tf)) = (
            world.get::<&Structure>(objective),
            world.get::<&Transform>(objective),
        ) {
            if !structure.destroyed {
                let aim = tf.position + Vec3::Y * STRUCTURE_AIM_HEIGHT;
                consider(&mut best, objective, player_pos.distance(aim), lock.max_range);
            }
        }
    }

    match best {
        Some((candidate, _)) if lock.target == Some(candidate) => {
            lock.progress_secs = (lock.progress_secs + dt).min(lock.required_secs);
        }
        Some((candidate, _)) => lock.retarget(candidate),
        None => lock.clear(),
    }
}

fn consider(best: &mut Option<(hecs::Entity, f32)>, entity: hecs::Entity, dist: f32, max: f32) {
    if dist < max && best.map_or(true, |(_, b)| dist < b) {
        *best = Some((entity, dist));
    }
}
