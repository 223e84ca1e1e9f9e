//! Mission state machine — phase transitions and win/lose evaluation.
//!
//! Runs directly after the contact engine each tick. Terminal states
//! are sticky: once Victory or Defeat is entered the running flag is
//! cleared and this system (like every other) stops being called.

use hecs::{Entity, World};

use skystrike_core::components::{Enemy, Health, Structure};
use skystrike_core::enums::MissionPhase;

use crate::session::MissionState;

/// Evaluate phase transitions for one tick.
pub fn run(
    world: &World,
    mission: &mut MissionState,
    player: Option<Entity>,
    base: Option<Entity>,
    objective: Option<Entity>,
) {
    if mission.is_terminal() {
        return;
    }

    // Defensive phase ends the moment the enemy force is wiped out.
    if mission.phase == MissionPhase::DefendBase {
        let enemies_remaining = world.query::<&Enemy>().iter().count();
        if enemies_remaining == 0 {
            mission.phase = MissionPhase::AttackObjective;
        }
    }

    // Victory before defeat: the objective falling in step 2 of the
    // contact pass outranks the terminal checks of step 5.
    if objective.is_some_and(|e| structure_down(world, e)) {
        mission.phase = MissionPhase::Victory;
        mission.running = false;
        return;
    }

    let player_down = player.is_some_and(|e| {
        world
            .get::<&Health>(e)
            .map(|h| h.is_dead())
            .unwrap_or(false)
    });
    if player_down || base.is_some_and(|e| structure_down(world, e)) {
        mission.phase = MissionPhase::Defeat;
        mission.running = false;
    }
}

fn structure_down(world: &World, entity: Entity) -> bool {
    world
        .get::<&Structure>(entity)
        .map(|s| s.destroyed)
        .unwrap_or(false)
}
