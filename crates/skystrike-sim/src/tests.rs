//! Tests for the simulation engine: determinism, the contact engine,
//! lock-on, missile homing, and the mission state machine.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skystrike_core::commands::DriverCommand;
use skystrike_core::components::*;
use skystrike_core::constants::*;
use skystrike_core::enums::*;
use skystrike_core::types::SimTime;

use crate::engine::{SimConfig, SimulationEngine};
use crate::session::{FireRequest, MissionState};
use crate::systems;
use crate::world_setup;

const DT: f32 = 1.0 / 60.0;

fn started_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(DriverCommand::StartMission);
    engine.queue_command(DriverCommand::UpdatePlayer {
        position: Vec3::new(0.0, 80.0, 0.0),
        forward: Vec3::X,
        airborne: true,
    });
    engine
}

fn spawn_enemy_at(world: &mut hecs::World, position: Vec3) -> hecs::Entity {
    world.spawn((
        Enemy,
        Transform::new(position, Vec3::NEG_X),
        Health::full(ENEMY_MAX_HEALTH),
        EnemyBrain::new(Vec3::new(1000.0, 80.0, 1000.0), 250.0, 0),
    ))
}

fn running_mission() -> MissionState {
    MissionState {
        running: true,
        ..MissionState::default()
    }
}

fn bullet_request(source: ProjectileSource, position: Vec3) -> FireRequest {
    FireRequest {
        kind: ProjectileKind::Bullet,
        source,
        position,
        direction: Vec3::X,
        homing: None,
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = started_engine(12345);
    let mut engine_b = started_engine(12345);

    for _ in 0..300 {
        let snap_a = engine_a.advance(DT);
        let snap_b = engine_b.advance(DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = started_engine(111);
    let mut engine_b = started_engine(222);

    let mut diverged = false;
    for _ in 0..300 {
        let snap_a = engine_a.advance(DT);
        let snap_b = engine_b.advance(DT);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Session lifecycle ----

#[test]
fn test_start_mission_populates_world() {
    let mut engine = started_engine(7);
    let snapshot = engine.advance(DT);

    assert!(snapshot.running);
    assert_eq!(snapshot.phase, MissionPhase::DefendBase);
    assert_eq!(snapshot.enemies.len(), ENEMY_COUNT);
    assert_eq!(snapshot.allies.len(), ALLY_COUNT);
    assert_eq!(snapshot.turrets.len(), TURRET_COUNT);
    assert_eq!(snapshot.structures.len(), 2);
    assert_eq!(snapshot.player.missiles_remaining, STARTING_MISSILES);
}

#[test]
fn test_terminal_state_stops_ticking() {
    let mut engine = started_engine(7);
    engine.advance(DT);

    let player = engine.player_entity().unwrap();
    engine
        .world_mut()
        .get::<&mut Health>(player)
        .unwrap()
        .apply(1000.0);

    let snapshot = engine.advance(DT);
    assert_eq!(snapshot.phase, MissionPhase::Defeat);
    assert!(!snapshot.running);

    let tick_at_defeat = engine.time().tick;
    for _ in 0..10 {
        engine.advance(DT);
    }
    assert_eq!(
        engine.time().tick,
        tick_at_defeat,
        "Ticks after Defeat must be no-ops"
    );
}

// ---- Lock-on protocol ----

#[test]
fn test_lock_acquires_after_required_time() {
    let mut engine = started_engine(7);
    engine.advance(DT);
    engine.despawn_enemies();
    engine.despawn_allies();
    spawn_enemy_at(engine.world_mut(), Vec3::new(100.0, 80.0, 0.0));

    // First tick selects the candidate, then dwell accumulates.
    for _ in 0..25 {
        engine.advance(0.1);
    }

    assert!(engine.lock().is_locked());
    let snapshot = engine.advance(0.1);
    assert_eq!(snapshot.lock.progress, 1.0);
    assert!(snapshot.lock.locked);
    assert!(snapshot.lock.target_id.is_some());
}

#[test]
fn test_lock_resets_when_candidate_changes() {
    let mut engine = started_engine(7);
    engine.advance(DT);
    engine.despawn_enemies();
    engine.despawn_allies();
    spawn_enemy_at(engine.world_mut(), Vec3::new(100.0, 80.0, 0.0));

    for _ in 0..11 {
        engine.advance(0.1);
    }
    let first_target = engine.lock().target;
    assert!(engine.lock().progress_secs > 0.5);
    assert!(!engine.lock().is_locked());

    // A closer enemy appears: the candidate changes, progress restarts.
    spawn_enemy_at(engine.world_mut(), Vec3::new(30.0, 80.0, 0.0));
    engine.advance(0.1);

    assert_ne!(engine.lock().target, first_target);
    assert!(engine.lock().progress_secs < 0.1);
    assert!(!engine.lock().is_locked());
}

#[test]
fn test_lock_cleared_on_ground() {
    let mut engine = started_engine(7);
    engine.advance(DT);
    engine.despawn_enemies();
    engine.despawn_allies();
    spawn_enemy_at(engine.world_mut(), Vec3::new(100.0, 80.0, 0.0));
    for _ in 0..25 {
        engine.advance(0.1);
    }
    assert!(engine.lock().is_locked());

    engine.queue_command(DriverCommand::UpdatePlayer {
        position: Vec3::ZERO,
        forward: Vec3::X,
        airborne: false,
    });
    engine.advance(0.1);
    assert!(!engine.lock().is_locked());
    assert!(engine.lock().target.is_none());
}

// ---- Missile launch gating ----

#[test]
fn test_launch_requires_lock_and_inventory() {
    let mut engine = started_engine(7);
    engine.advance(DT);
    engine.despawn_enemies();
    engine.despawn_allies();

    // No lock: the command is a no-op.
    engine.queue_command(DriverCommand::LaunchMissile {
        position: Vec3::new(0.0, 80.0, 0.0),
        forward: Vec3::X,
    });
    engine.advance(DT);
    assert_eq!(engine.missiles_remaining(), STARTING_MISSILES);

    // Acquire a lock, then launch.
    spawn_enemy_at(engine.world_mut(), Vec3::new(100.0, 80.0, 0.0));
    for _ in 0..25 {
        engine.advance(0.1);
    }
    assert!(engine.lock().is_locked());

    engine.queue_command(DriverCommand::LaunchMissile {
        position: Vec3::new(0.0, 80.0, 0.0),
        forward: Vec3::X,
    });
    engine.advance(DT);

    assert_eq!(engine.missiles_remaining(), STARTING_MISSILES - 1);
    // The launch cleared the lock; the same-tick scan may already have
    // re-acquired a tentative target, but the dwell clock restarted.
    assert!(!engine.lock().is_locked(), "Launch must clear the lock");
    assert_eq!(engine.lock().progress_secs, 0.0);
    let missiles = engine
        .world()
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.kind == ProjectileKind::Missile)
        .count();
    assert_eq!(missiles, 1);
}

// ---- Missile homing ----

#[test]
fn test_missile_homing_convergence() {
    // A missile launched from behind a slow, non-maneuvering target must
    // reach contact radius within its lifetime, despite an off-axis
    // launch direction.
    let mut world = hecs::World::new();
    let target = spawn_enemy_at(&mut world, Vec3::new(0.0, 80.0, 0.0));

    systems::projectiles::spawn(
        &mut world,
        &FireRequest {
            kind: ProjectileKind::Missile,
            source: ProjectileSource::Player,
            position: Vec3::new(-200.0, 80.0, 0.0),
            direction: Vec3::new(0.8, 0.0, 0.6).normalize(),
            homing: Some(target),
        },
    );
    let missile = world
        .query::<&Projectile>()
        .iter()
        .next()
        .map(|(e, _)| e)
        .unwrap();

    let mut requests = Vec::new();
    let mut despawn = Vec::new();
    let mut converged = false;
    for _ in 0..(8.0 / DT) as usize {
        systems::projectiles::run(&mut world, DT, &mut requests, &mut despawn);

        // The target drifts forward without maneuvering.
        {
            let mut tf = world.get::<&mut Transform>(target).unwrap();
            tf.position += Vec3::X * 20.0 * DT;
        }

        let missile_pos = match world.get::<&Transform>(missile) {
            Ok(tf) => tf.position,
            Err(_) => break, // expired without contact
        };
        let target_pos = world.get::<&Transform>(target).unwrap().position;
        if missile_pos.distance(target_pos) < MISSILE_CONTACT_RADIUS {
            converged = true;
            break;
        }
    }
    assert!(converged, "Missile never reached contact radius");
}

#[test]
fn test_missile_ballistic_fallback_on_dead_target() {
    let mut world = hecs::World::new();
    let target = spawn_enemy_at(&mut world, Vec3::new(200.0, 80.0, 0.0));

    systems::projectiles::spawn(
        &mut world,
        &FireRequest {
            kind: ProjectileKind::Missile,
            source: ProjectileSource::Player,
            position: Vec3::new(0.0, 80.0, 0.0),
            direction: Vec3::X,
            homing: Some(target),
        },
    );
    let missile = world
        .query::<&Projectile>()
        .iter()
        .next()
        .map(|(e, _)| e)
        .unwrap();

    world.despawn(target).unwrap();

    let mut requests = Vec::new();
    let mut despawn = Vec::new();
    systems::projectiles::run(&mut world, DT, &mut requests, &mut despawn);

    let proj = world.get::<&Projectile>(missile).unwrap();
    assert_eq!(proj.homing, None, "Stale target must drop to ballistic");
    let dir = proj.velocity.normalize();
    assert!(dir.dot(Vec3::X) > 0.999, "Ballistic flight keeps the last heading");
}

#[test]
fn test_projectile_expires_before_moving_again() {
    let mut world = hecs::World::new();
    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Player, Vec3::ZERO),
    );
    let bullet = world
        .query::<&Projectile>()
        .iter()
        .next()
        .map(|(e, _)| e)
        .unwrap();

    // Age it to the brink, then one more tick must remove it.
    world.get::<&mut Projectile>(bullet).unwrap().age_secs = BULLET_LIFETIME;

    let mut requests = Vec::new();
    let mut despawn = Vec::new();
    systems::projectiles::run(&mut world, DT, &mut requests, &mut despawn);
    assert!(!world.contains(bullet), "Expired bullet must be removed");
}

// ---- Contact engine ----

#[test]
fn test_scenario_bullet_kill_scores_once() {
    // Three 1-damage bullets bring a 3 HP enemy down; the bullet-kill
    // value is awarded exactly once.
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let enemy = spawn_enemy_at(&mut world, Vec3::new(50.0, 80.0, 0.0));

    for expected_health in [2.0_f32, 1.0, 0.0] {
        systems::projectiles::spawn(
            &mut world,
            &bullet_request(ProjectileSource::Player, Vec3::new(50.0, 80.0, 0.0)),
        );
        systems::collision::run(&mut world, &mut mission, &mut fx, None, None, None);

        if expected_health > 0.0 {
            let health = world.get::<&Health>(enemy).unwrap();
            assert_eq!(health.current, expected_health);
            assert_eq!(mission.score, 0);
        }
    }

    assert!(!world.contains(enemy), "Dead enemy must be removed");
    assert_eq!(mission.score, SCORE_BULLET_KILL);

    // No bullets survive their own contact.
    assert_eq!(world.query::<&Projectile>().iter().count(), 0);
}

#[test]
fn test_scenario_missile_kill_scores_missile_value_only() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let enemy = spawn_enemy_at(&mut world, Vec3::new(50.0, 80.0, 0.0));

    systems::projectiles::spawn(
        &mut world,
        &FireRequest {
            kind: ProjectileKind::Missile,
            source: ProjectileSource::Player,
            position: Vec3::new(50.0, 80.0, 0.0),
            direction: Vec3::X,
            homing: Some(enemy),
        },
    );
    systems::collision::run(&mut world, &mut mission, &mut fx, None, None, None);

    assert!(!world.contains(enemy));
    assert_eq!(mission.score, SCORE_MISSILE_KILL, "No bullet value on top");
}

#[test]
fn test_ally_bullet_kill_scores() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let enemy = spawn_enemy_at(&mut world, Vec3::new(50.0, 80.0, 0.0));
    world.get::<&mut Health>(enemy).unwrap().apply(2.0);

    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Ally, Vec3::new(50.0, 80.0, 0.0)),
    );
    systems::collision::run(&mut world, &mut mission, &mut fx, None, None, None);

    assert!(!world.contains(enemy));
    assert_eq!(mission.score, SCORE_BULLET_KILL);
}

#[test]
fn test_scenario_objective_falls_on_fourth_hit() {
    // Four 25-damage missile hits bring the 100 HP objective to zero;
    // Victory triggers exactly on the fourth, not before.
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let objective = world_setup::spawn_structure(
        &mut world,
        StructureKind::AttackObjective,
        OBJECTIVE_POSITION,
        OBJECTIVE_HEALTH,
    );
    let aim = OBJECTIVE_POSITION + Vec3::Y * STRUCTURE_AIM_HEIGHT;

    for hit in 1..=4 {
        systems::projectiles::spawn(
            &mut world,
            &FireRequest {
                kind: ProjectileKind::Missile,
                source: ProjectileSource::Player,
                position: aim,
                direction: Vec3::X,
                homing: Some(objective),
            },
        );
        systems::collision::run(&mut world, &mut mission, &mut fx, None, None, Some(objective));
        systems::mission::run(&mut world, &mut mission, None, None, Some(objective));

        let health = world.get::<&Health>(objective).unwrap().current;
        assert_eq!(health, OBJECTIVE_HEALTH - hit as f32 * MISSILE_STRUCTURE_DAMAGE);
        if hit < 4 {
            assert_ne!(mission.phase, MissionPhase::Victory, "Victory too early");
        }
    }

    assert_eq!(mission.phase, MissionPhase::Victory);
    assert!(!mission.running);
    assert!(
        world.get::<&Structure>(objective).unwrap().destroyed,
        "Destruction flag is one-way"
    );

    // Exactly one Massive effect for the destruction.
    let massive = fx.iter().filter(|e| e.kind == FxKind::Massive).count();
    assert_eq!(massive, 1);
}

#[test]
fn test_contact_pass_idempotent_within_tick() {
    // A second resolution pass with no new movement produces no further
    // damage: the projectile was consumed by its own contact.
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let enemy = spawn_enemy_at(&mut world, Vec3::new(50.0, 80.0, 0.0));

    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Player, Vec3::new(50.0, 80.0, 0.0)),
    );
    systems::collision::run(&mut world, &mut mission, &mut fx, None, None, None);
    assert_eq!(world.get::<&Health>(enemy).unwrap().current, 2.0);

    systems::collision::run(&mut world, &mut mission, &mut fx, None, None, None);
    assert_eq!(
        world.get::<&Health>(enemy).unwrap().current,
        2.0,
        "Second pass must not re-apply damage"
    );
}

#[test]
fn test_enemy_bullet_hits_player_then_ally() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let player = world_setup::spawn_player(&mut world);
    world.get::<&mut Transform>(player).unwrap().position = Vec3::new(0.0, 80.0, 0.0);

    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Enemy, Vec3::new(0.0, 80.0, 0.0)),
    );
    systems::collision::run(&mut world, &mut mission, &mut fx, Some(player), None, None);
    assert_eq!(
        world.get::<&Health>(player).unwrap().current,
        PLAYER_MAX_HEALTH - ENEMY_BULLET_PLAYER_DAMAGE
    );

    // Same round against an ally chips aircraft-scale health instead.
    let ally = world.spawn((
        Ally,
        Transform::new(Vec3::new(40.0, 80.0, 0.0), Vec3::X),
        Health::full(ALLY_MAX_HEALTH),
        AllyBrain::default(),
    ));
    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Enemy, Vec3::new(40.0, 80.0, 0.0)),
    );
    systems::collision::run(&mut world, &mut mission, &mut fx, Some(player), None, None);
    assert_eq!(world.get::<&Health>(ally).unwrap().current, ALLY_MAX_HEALTH - BULLET_DAMAGE);
}

#[test]
fn test_turret_shell_damages_player_destroys_ally() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let player = world_setup::spawn_player(&mut world);
    world.get::<&mut Transform>(player).unwrap().position = Vec3::new(0.0, 80.0, 0.0);
    let ally = world.spawn((
        Ally,
        Transform::new(Vec3::new(40.0, 80.0, 0.0), Vec3::X),
        Health::full(ALLY_MAX_HEALTH),
        AllyBrain::default(),
    ));

    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Turret, Vec3::new(0.0, 80.0, 0.0)),
    );
    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Turret, Vec3::new(40.0, 80.0, 0.0)),
    );
    systems::collision::run(&mut world, &mut mission, &mut fx, Some(player), None, None);

    assert_eq!(
        world.get::<&Health>(player).unwrap().current,
        PLAYER_MAX_HEALTH - TURRET_DAMAGE
    );
    assert!(world.contains(player), "The player is never despawned");
    assert!(!world.contains(ally), "Turret fire is lethal to allies");
}

#[test]
fn test_enemy_enemy_ram_destroys_both() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let a = spawn_enemy_at(&mut world, Vec3::new(0.0, 80.0, 0.0));
    let b = spawn_enemy_at(&mut world, Vec3::new(5.0, 80.0, 0.0));
    let far = spawn_enemy_at(&mut world, Vec3::new(500.0, 80.0, 0.0));

    systems::collision::run(&mut world, &mut mission, &mut fx, None, None, None);

    assert!(!world.contains(a));
    assert!(!world.contains(b));
    assert!(world.contains(far));
}

#[test]
fn test_player_ram_destroys_enemy_and_damages_player() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let player = world_setup::spawn_player(&mut world);
    world.get::<&mut Transform>(player).unwrap().position = Vec3::new(0.0, 80.0, 0.0);
    let enemy = spawn_enemy_at(&mut world, Vec3::new(3.0, 80.0, 0.0));

    systems::collision::run(&mut world, &mut mission, &mut fx, Some(player), None, None);

    assert!(!world.contains(enemy));
    assert_eq!(
        world.get::<&Health>(player).unwrap().current,
        PLAYER_MAX_HEALTH - PLAYER_RAM_DAMAGE
    );
}

// ---- Raid missiles and the defended base ----

#[test]
fn test_raid_missile_damages_base_until_defeat() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let base = world_setup::spawn_structure(
        &mut world,
        StructureKind::DefendedBase,
        BASE_POSITION,
        BASE_HEALTH,
    );
    // Keep one enemy alive so the phase stays DefendBase.
    spawn_enemy_at(&mut world, Vec3::new(500.0, 80.0, 0.0));

    let hits = (BASE_HEALTH / RAID_MISSILE_DAMAGE) as usize;
    for _ in 0..hits {
        systems::projectiles::spawn(
            &mut world,
            &FireRequest {
                kind: ProjectileKind::Missile,
                source: ProjectileSource::Enemy,
                position: BASE_POSITION,
                direction: Vec3::X,
                homing: Some(base),
            },
        );
        systems::collision::run(&mut world, &mut mission, &mut fx, None, Some(base), None);
    }
    systems::mission::run(&mut world, &mut mission, None, Some(base), None);

    assert!(world.get::<&Structure>(base).unwrap().destroyed);
    assert_eq!(world.get::<&Health>(base).unwrap().current, 0.0);
    assert_eq!(mission.phase, MissionPhase::Defeat);
    assert!(!mission.running);
}

// ---- Mission state machine ----

#[test]
fn test_phase_transition_fires_exactly_once() {
    let mut world = hecs::World::new();
    let mut mission = running_mission();
    let mut fx = Vec::new();
    let objective = world_setup::spawn_structure(
        &mut world,
        StructureKind::AttackObjective,
        OBJECTIVE_POSITION,
        OBJECTIVE_HEALTH,
    );
    let enemy = spawn_enemy_at(&mut world, Vec3::new(50.0, 80.0, 0.0));
    world.get::<&mut Health>(enemy).unwrap().apply(2.0);

    systems::mission::run(&mut world, &mut mission, None, None, Some(objective));
    assert_eq!(mission.phase, MissionPhase::DefendBase);

    // Remove the last enemy via a damage path.
    systems::projectiles::spawn(
        &mut world,
        &bullet_request(ProjectileSource::Player, Vec3::new(50.0, 80.0, 0.0)),
    );
    systems::collision::run(&mut world, &mut mission, &mut fx, None, None, Some(objective));
    assert!(!world.contains(enemy));

    systems::mission::run(&mut world, &mut mission, None, None, Some(objective));
    assert_eq!(mission.phase, MissionPhase::AttackObjective);
    assert!(mission.running);

    // Further evaluation must not re-fire or regress the transition.
    for _ in 0..5 {
        systems::mission::run(&mut world, &mut mission, None, None, Some(objective));
    }
    assert_eq!(mission.phase, MissionPhase::AttackObjective);
    assert!(mission.running);
}

// ---- Turret targeting ----

#[test]
fn test_turret_prefers_player_on_tie() {
    let mut world = hecs::World::new();
    let player = world_setup::spawn_player(&mut world);
    world.get::<&mut Transform>(player).unwrap().position = Vec3::new(100.0, 50.0, 0.0);
    world.spawn((
        Ally,
        Transform::new(Vec3::new(-100.0, 50.0, 0.0), Vec3::X),
        Health::full(ALLY_MAX_HEALTH),
        AllyBrain::default(),
    ));
    world.spawn((
        TurretGun::new(TURRET_RANGE, TURRET_COOLDOWN, TURRET_DAMAGE),
        Transform::new(Vec3::ZERO, Vec3::X),
    ));

    let time = SimTime {
        tick: 0,
        elapsed_secs: 10.0,
    };
    let mut requests = Vec::new();
    systems::turrets::run(&mut world, &time, true, &mut requests);

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].source, ProjectileSource::Turret);
    assert!(
        requests[0].direction.x > 0.9,
        "Equidistant targets: the player is scanned first"
    );
}

#[test]
fn test_turret_ignores_grounded_player() {
    let mut world = hecs::World::new();
    let player = world_setup::spawn_player(&mut world);
    world.get::<&mut Transform>(player).unwrap().position = Vec3::new(100.0, 0.0, 0.0);
    world.spawn((
        Ally,
        Transform::new(Vec3::new(-100.0, 50.0, 0.0), Vec3::X),
        Health::full(ALLY_MAX_HEALTH),
        AllyBrain::default(),
    ));
    world.spawn((
        TurretGun::new(TURRET_RANGE, TURRET_COOLDOWN, TURRET_DAMAGE),
        Transform::new(Vec3::ZERO, Vec3::X),
    ));

    let time = SimTime {
        tick: 0,
        elapsed_secs: 10.0,
    };
    let mut requests = Vec::new();
    systems::turrets::run(&mut world, &time, false, &mut requests);

    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].direction.x < -0.9,
        "Grounded player is skipped; the ally is the only target"
    );
}

#[test]
fn test_turret_respects_cooldown() {
    let mut world = hecs::World::new();
    let player = world_setup::spawn_player(&mut world);
    world.get::<&mut Transform>(player).unwrap().position = Vec3::new(100.0, 50.0, 0.0);
    world.spawn((
        TurretGun::new(TURRET_RANGE, TURRET_COOLDOWN, TURRET_DAMAGE),
        Transform::new(Vec3::ZERO, Vec3::X),
    ));

    let mut requests = Vec::new();
    let time = SimTime {
        tick: 0,
        elapsed_secs: 10.0,
    };
    systems::turrets::run(&mut world, &time, true, &mut requests);
    assert_eq!(requests.len(), 1);

    // Immediately after firing, still cooling down.
    systems::turrets::run(&mut world, &time, true, &mut requests);
    assert_eq!(requests.len(), 1);

    let later = SimTime {
        tick: 0,
        elapsed_secs: 10.0 + TURRET_COOLDOWN + 0.1,
    };
    systems::turrets::run(&mut world, &later, true, &mut requests);
    assert_eq!(requests.len(), 2);
}

// ---- Raid escalation ----

#[test]
fn test_total_attack_roll_is_one_time() {
    let mut world = hecs::World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let base = world_setup::spawn_structure(
        &mut world,
        StructureKind::DefendedBase,
        BASE_POSITION,
        BASE_HEALTH,
    );
    for i in 0..10 {
        spawn_enemy_at(&mut world, Vec3::new(i as f32 * 100.0, 80.0, 0.0));
    }

    // No allies in the world: every enemy rolls now.
    let mut clock = 0.0;
    systems::raid::run(&mut world, &mut rng, 1.0, Some(base), &mut clock);

    let flagged: Vec<bool> = world
        .query::<&EnemyBrain>()
        .iter()
        .map(|(_, b)| b.targets_objective)
        .collect();
    assert!(world
        .query::<&EnemyBrain>()
        .iter()
        .all(|(_, b)| b.objective_roll_done));

    // Re-running must not change any verdicts.
    systems::raid::run(&mut world, &mut rng, 2.0, Some(base), &mut clock);
    let flagged_after: Vec<bool> = world
        .query::<&EnemyBrain>()
        .iter()
        .map(|(_, b)| b.targets_objective)
        .collect();
    assert_eq!(flagged, flagged_after, "The roll is one-time per enemy");
}

#[test]
fn test_periodic_raider_pick() {
    let mut world = hecs::World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let base = world_setup::spawn_structure(
        &mut world,
        StructureKind::DefendedBase,
        BASE_POSITION,
        BASE_HEALTH,
    );
    // An ally present: no total-attack roll, only the periodic pick.
    world.spawn((
        Ally,
        Transform::new(Vec3::ZERO, Vec3::X),
        Health::full(ALLY_MAX_HEALTH),
        AllyBrain::default(),
    ));
    for i in 0..5 {
        spawn_enemy_at(&mut world, Vec3::new(i as f32 * 100.0, 80.0, 0.0));
    }

    let mut clock = 0.0;
    systems::raid::run(&mut world, &mut rng, RAID_PICK_INTERVAL - 1.0, Some(base), &mut clock);
    let flagged = world
        .query::<&EnemyBrain>()
        .iter()
        .filter(|(_, b)| b.targets_objective)
        .count();
    assert_eq!(flagged, 0, "Too early for a pick");

    systems::raid::run(&mut world, &mut rng, RAID_PICK_INTERVAL, Some(base), &mut clock);
    let flagged = world
        .query::<&EnemyBrain>()
        .iter()
        .filter(|(_, b)| b.targets_objective)
        .count();
    assert_eq!(flagged, 1, "Exactly one raider per interval");
}
