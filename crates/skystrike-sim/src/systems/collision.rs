//! Collision/contact engine — the single authoritative contact pass.
//!
//! Five fixed steps per tick; the order matters because later steps
//! must not see entities removed by earlier ones. Every removal is
//! applied immediately, so each step re-scans live entities instead of
//! reusing a stale list. The terminal checks of step 5 live in the
//! mission system, which runs directly after this one.

use glam::Vec3;
use hecs::{Entity, World};

use skystrike_core::components::*;
use skystrike_core::constants::*;
use skystrike_core::enums::*;
use skystrike_core::events::FxEvent;

use crate::session::MissionState;

/// Resolve all pairwise contacts for one tick.
pub fn run(
    world: &mut World,
    mission: &mut MissionState,
    fx_events: &mut Vec<FxEvent>,
    player: Option<Entity>,
    base: Option<Entity>,
    objective: Option<Entity>,
) {
    resolve_bullets(world, mission, fx_events, player);
    resolve_missiles(world, mission, fx_events, base, objective);
    resolve_turret_shells(world, fx_events, player);
    resolve_rams(world, fx_events, player);
}

/// Step 1: aircraft bullets against their faction-valid targets.
fn resolve_bullets(
    world: &mut World,
    mission: &mut MissionState,
    fx_events: &mut Vec<FxEvent>,
    player: Option<Entity>,
) {
    for (bullet, pos, proj) in collect_projectiles(world, ProjectileKind::Bullet) {
        match proj.source {
            // Enemy rounds hit the player or allies.
            ProjectileSource::Enemy => {
                if let Some(player) = player {
                    if within(world, player, pos, BULLET_CONTACT_RADIUS) {
                        damage_aircraft(world, player, ENEMY_BULLET_PLAYER_DAMAGE);
                        fx_events.push(FxEvent::new(FxKind::SmallHit, pos, FX_SMALL_SCALE));
                        let _ = world.despawn(bullet);
                        continue;
                    }
                }
                if let Some(ally) = nearest_in_radius::<Ally>(world, pos, BULLET_CONTACT_RADIUS) {
                    let dead = damage_aircraft(world, ally, proj.damage);
                    fx_events.push(FxEvent::new(FxKind::SmallHit, pos, FX_SMALL_SCALE));
                    let _ = world.despawn(bullet);
                    if dead {
                        destroy_aircraft(world, ally, fx_events);
                    }
                }
            }
            // Player and ally rounds hit enemies; kills score.
            ProjectileSource::Player | ProjectileSource::Ally => {
                if let Some(enemy) = nearest_in_radius::<Enemy>(world, pos, BULLET_CONTACT_RADIUS)
                {
                    let dead = damage_aircraft(world, enemy, proj.damage);
                    fx_events.push(FxEvent::new(FxKind::SmallHit, pos, FX_SMALL_SCALE));
                    let _ = world.despawn(bullet);
                    if dead {
                        destroy_aircraft(world, enemy, fx_events);
                        mission.score += SCORE_BULLET_KILL;
                    }
                }
            }
            // Turret shells are step 3.
            ProjectileSource::Turret => {}
        }
    }
}

/// Step 2: missiles against enemies and the objective buildings.
fn resolve_missiles(
    world: &mut World,
    mission: &mut MissionState,
    fx_events: &mut Vec<FxEvent>,
    base: Option<Entity>,
    objective: Option<Entity>,
) {
    for (missile, pos, proj) in collect_projectiles(world, ProjectileKind::Missile) {
        match proj.source {
            ProjectileSource::Player => {
                if let Some(enemy) = nearest_in_radius::<Enemy>(world, pos, MISSILE_CONTACT_RADIUS)
                {
                    let dead = damage_aircraft(world, enemy, proj.damage);
                    let _ = world.despawn(missile);
                    if dead {
                        destroy_aircraft(world, enemy, fx_events);
                        mission.score += SCORE_MISSILE_KILL;
                    } else {
                        fx_events.push(FxEvent::new(FxKind::SmallHit, pos, FX_SMALL_SCALE));
                    }
                    continue;
                }
                if let Some(objective) = objective {
                    if structure_stands(world, objective)
                        && within_aim(world, objective, pos, OBJECTIVE_CONTACT_RADIUS)
                    {
                        let _ = world.despawn(missile);
                        damage_structure(world, objective, MISSILE_STRUCTURE_DAMAGE, fx_events);
                    }
                }
            }
            // Raid missiles only threaten the defended base.
            ProjectileSource::Enemy => {
                if let Some(base) = base {
                    if structure_stands(world, base)
                        && within(world, base, pos, BASE_CONTACT_RADIUS)
                    {
                        let _ = world.despawn(missile);
                        damage_structure(world, base, proj.damage, fx_events);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Step 3: turret shells. Damage the player; allies go down outright.
fn resolve_turret_shells(world: &mut World, fx_events: &mut Vec<FxEvent>, player: Option<Entity>) {
    for (shell, pos, proj) in collect_projectiles(world, ProjectileKind::Bullet) {
        if proj.source != ProjectileSource::Turret {
            continue;
        }

        if let Some(player) = player {
            if within(world, player, pos, BULLET_CONTACT_RADIUS) {
                damage_aircraft(world, player, proj.damage);
                fx_events.push(FxEvent::new(FxKind::SmallHit, pos, FX_SMALL_SCALE));
                let _ = world.despawn(shell);
                continue;
            }
        }
        if let Some(ally) = nearest_in_radius::<Ally>(world, pos, BULLET_CONTACT_RADIUS) {
            let _ = world.despawn(shell);
            destroy_aircraft(world, ally, fx_events);
        }
    }
}

/// Step 4: mid-air collisions.
fn resolve_rams(world: &mut World, fx_events: &mut Vec<FxEvent>, player: Option<Entity>) {
    // Player-enemy: the enemy goes down, the player takes fixed damage.
    if let Some(player) = player {
        if let Some(player_pos) = position_of(world, player) {
            let rammed: Vec<Entity> = world
                .query::<(&Enemy, &Transform)>()
                .iter()
                .filter(|(_, (_, tf))| tf.position.distance(player_pos) < PLAYER_RAM_RADIUS)
                .map(|(e, _)| e)
                .collect();
            for enemy in rammed {
                destroy_aircraft(world, enemy, fx_events);
                damage_aircraft(world, player, PLAYER_RAM_DAMAGE);
            }
        }
    }

    // Enemy-enemy: both involved aircraft go down.
    let enemies: Vec<(Entity, Vec3)> = world
        .query::<(&Enemy, &Transform)>()
        .iter()
        .map(|(e, (_, tf))| (e, tf.position))
        .collect();
    let mut downed: Vec<Entity> = Vec::new();
    for i in 0..enemies.len() {
        for j in (i + 1)..enemies.len() {
            let (a, pa) = enemies[i];
            let (b, pb) = enemies[j];
            if downed.contains(&a) || downed.contains(&b) {
                continue;
            }
            if pa.distance(pb) < AIRCRAFT_RAM_RADIUS {
                downed.push(a);
                downed.push(b);
            }
        }
    }

    // Ally-enemy: both go down as well.
    let allies: Vec<(Entity, Vec3)> = world
        .query::<(&Ally, &Transform)>()
        .iter()
        .map(|(e, (_, tf))| (e, tf.position))
        .collect();
    for &(ally, ally_pos) in &allies {
        for &(enemy, enemy_pos) in &enemies {
            if downed.contains(&enemy) || downed.contains(&ally) {
                continue;
            }
            if ally_pos.distance(enemy_pos) < AIRCRAFT_RAM_RADIUS {
                downed.push(ally);
                downed.push(enemy);
            }
        }
    }

    for aircraft in downed {
        destroy_aircraft(world, aircraft, fx_events);
    }
}

// ---- helpers ----

/// Snapshot one projectile class at the start of a step.
fn collect_projectiles(world: &World, kind: ProjectileKind) -> Vec<(Entity, Vec3, Projectile)> {
    world
        .query::<(&Transform, &Projectile)>()
        .iter()
        .filter(|(_, (_, proj))| proj.kind == kind)
        .map(|(e, (tf, proj))| (e, tf.position, *proj))
        .collect()
}

/// Nearest live entity with marker `M` inside `radius` of `pos`.
/// Fresh scan per projectile, so earlier removals in the same step are
/// already reflected.
fn nearest_in_radius<M: hecs::Component>(world: &World, pos: Vec3, radius: f32) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, (_, tf)) in world.query::<(&M, &Transform)>().iter() {
        let dist = pos.distance(tf.position);
        if dist < radius && best.map_or(true, |(_, b)| dist < b) {
            best = Some((entity, dist));
        }
    }
    best.map(|(e, _)| e)
}

fn position_of(world: &World, entity: Entity) -> Option<Vec3> {
    world.get::<&Transform>(entity).ok().map(|tf| tf.position)
}

fn within(world: &World, entity: Entity, pos: Vec3, radius: f32) -> bool {
    position_of(world, entity).is_some_and(|p| p.distance(pos) < radius)
}

/// Contact test against a structure's aim point (its center of mass
/// sits above the origin).
fn within_aim(world: &World, entity: Entity, pos: Vec3, radius: f32) -> bool {
    position_of(world, entity)
        .is_some_and(|p| (p + Vec3::Y * STRUCTURE_AIM_HEIGHT).distance(pos) < radius)
}

/// Apply damage through the clamping mutator. Returns true if the
/// target is now dead.
fn damage_aircraft(world: &mut World, entity: Entity, damage: f32) -> bool {
    match world.get::<&mut Health>(entity) {
        Ok(mut health) => {
            health.apply(damage);
            health.is_dead()
        }
        Err(_) => false,
    }
}

/// Remove a dead aircraft and emit its destruction effect. The player
/// is never despawned — defeat is a mission transition, not a removal.
fn destroy_aircraft(world: &mut World, entity: Entity, fx_events: &mut Vec<FxEvent>) {
    if world.get::<&Player>(entity).is_ok() {
        return;
    }
    if let Some(pos) = position_of(world, entity) {
        fx_events.push(FxEvent::new(FxKind::Destruction, pos, FX_DESTRUCTION_SCALE));
    }
    let _ = world.despawn(entity);
}

fn structure_stands(world: &World, entity: Entity) -> bool {
    world
        .get::<&Structure>(entity)
        .map(|s| !s.destroyed)
        .unwrap_or(false)
}

/// Damage a structure; flip its one-way destruction flag at zero.
fn damage_structure(
    world: &mut World,
    entity: Entity,
    damage: f32,
    fx_events: &mut Vec<FxEvent>,
) {
    let now_zero = {
        let mut health = match world.get::<&mut Health>(entity) {
            Ok(h) => h,
            Err(_) => return,
        };
        health.apply(damage);
        health.is_dead()
    };
    let position = position_of(world, entity).unwrap_or(Vec3::ZERO);

    fx_events.push(FxEvent::new(
        FxKind::Destruction,
        position,
        FX_DESTRUCTION_SCALE,
    ));

    if now_zero {
        if let Ok(mut structure) = world.get::<&mut Structure>(entity) {
            if !structure.destroyed {
                structure.destroyed = true;
                fx_events.push(FxEvent::new(FxKind::Massive, position, FX_MASSIVE_SCALE));
            }
        }
    }
}
