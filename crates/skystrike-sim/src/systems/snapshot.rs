//! Snapshot system: queries the ECS world and builds a complete
//! `WorldSnapshot`. Read-only — it never modifies the world.

use hecs::World;

use skystrike_core::components::*;
use skystrike_core::events::FxEvent;
use skystrike_core::state::*;
use skystrike_core::types::SimTime;

use crate::session::{LockOn, MissionState};

/// Build the per-tick snapshot for the rendering/UI collaborators.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    mission: &MissionState,
    lock: &LockOn,
    missiles_remaining: u32,
    airborne: bool,
    effects: Vec<FxEvent>,
) -> WorldSnapshot {
    WorldSnapshot {
        time: *time,
        phase: mission.phase,
        running: mission.running,
        score: mission.score,
        player: build_player(world, missiles_remaining, airborne),
        lock: LockView {
            target_id: lock.target.map(|e| e.to_bits().get()),
            progress: lock.progress(),
            locked: lock.is_locked(),
        },
        enemies: build_enemies(world),
        allies: build_allies(world),
        projectiles: build_projectiles(world),
        turrets: build_turrets(world),
        structures: build_structures(world),
        effects,
    }
}

fn build_player(world: &World, missiles_remaining: u32, airborne: bool) -> PlayerView {
    world
        .query::<(&Player, &Transform, &Health)>()
        .iter()
        .next()
        .map(|(_, (_, tf, health))| PlayerView {
            position: tf.position,
            forward: tf.forward,
            health: health.current,
            max_health: health.max,
            missiles_remaining,
            airborne,
        })
        .unwrap_or_default()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<EnemyView> = world
        .query::<(&Enemy, &Transform, &Health, &EnemyBrain)>()
        .iter()
        .map(|(e, (_, tf, health, brain))| EnemyView {
            id: e.to_bits().get(),
            position: tf.position,
            forward: tf.forward,
            health: health.current,
            max_health: health.max,
            state: brain.state,
            targets_objective: brain.targets_objective,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_allies(world: &World) -> Vec<AllyView> {
    let mut views: Vec<AllyView> = world
        .query::<(&Ally, &Transform, &Health)>()
        .iter()
        .map(|(e, (_, tf, health))| AllyView {
            id: e.to_bits().get(),
            position: tf.position,
            forward: tf.forward,
            health: health.current,
            max_health: health.max,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Transform, &Projectile)>()
        .iter()
        .map(|(e, (tf, proj))| ProjectileView {
            id: e.to_bits().get(),
            position: tf.position,
            velocity: proj.velocity,
            kind: proj.kind,
            source: proj.source,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_turrets(world: &World) -> Vec<TurretView> {
    let mut views: Vec<TurretView> = world
        .query::<(&TurretGun, &Transform)>()
        .iter()
        .map(|(e, (_, tf))| TurretView {
            id: e.to_bits().get(),
            position: tf.position,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_structures(world: &World) -> Vec<StructureView> {
    let mut views: Vec<StructureView> = world
        .query::<(&Structure, &Transform, &Health)>()
        .iter()
        .map(|(e, (structure, tf, health))| StructureView {
            id: e.to_bits().get(),
            kind: structure.kind,
            position: tf.position,
            health: health.current,
            max_health: health.max,
            destroyed: structure.destroyed,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
