//! Raid escalation — flips enemies onto the objective-attack override.
//!
//! Two triggers, both only while the defended base stands:
//! - every `RAID_PICK_INTERVAL` seconds one random enemy is sent at the
//!   base;
//! - the moment all allies are gone, every enemy rolls a one-time 50%
//!   chance to join the attack. The roll is sticky in both directions:
//!   an enemy that declined never re-rolls, which bounds how many
//!   converge on the base.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skystrike_core::components::{Ally, Enemy, EnemyBrain, Structure};
use skystrike_core::constants::*;

/// Run the raid scheduler for one tick.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    elapsed_secs: f32,
    base: Option<hecs::Entity>,
    raid_clock_secs: &mut f32,
) {
    let base_stands = base
        .and_then(|e| world.get::<&Structure>(e).ok().map(|s| !s.destroyed))
        .unwrap_or(false);
    if !base_stands {
        return;
    }

    let allies_remaining = world.query::<&Ally>().iter().count();

    // Total attack: every enemy that has not yet rolled does so now.
    if allies_remaining == 0 {
        for (_entity, (_enemy, brain)) in world.query_mut::<(&Enemy, &mut EnemyBrain)>() {
            if !brain.objective_roll_done {
                brain.objective_roll_done = true;
                if rng.gen_bool(OBJECTIVE_ROLL_CHANCE) {
                    brain.targets_objective = true;
                }
            }
        }
    }

    // Periodic single-raider pick.
    if elapsed_secs - *raid_clock_secs >= RAID_PICK_INTERVAL {
        let enemies: Vec<hecs::Entity> = world
            .query::<(&Enemy, &EnemyBrain)>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        if !enemies.is_empty() {
            *raid_clock_secs = elapsed_secs;
            let pick = enemies[rng.gen_range(0..enemies.len())];
            if let Ok(mut brain) = world.get::<&mut EnemyBrain>(pick) {
                brain.targets_objective = true;
            }
        }
    }
}
