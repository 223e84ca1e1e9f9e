//! Entity spawn factories for setting up the mission world.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skystrike_core::components::*;
use skystrike_core::constants::*;
use skystrike_core::enums::StructureKind;

use skystrike_ai::fsm::roll_patrol_target;

/// Entity handles the engine keeps after setup.
pub struct MissionHandles {
    pub player: hecs::Entity,
    pub base: hecs::Entity,
    pub objective: hecs::Entity,
}

/// Build the full mission world: player, both objective buildings, the
/// turret ring, the enemy force, and the ally flight.
pub fn setup_mission(world: &mut World, rng: &mut ChaCha8Rng) -> MissionHandles {
    let player = spawn_player(world);
    let base = spawn_structure(world, StructureKind::DefendedBase, BASE_POSITION, BASE_HEALTH);
    let objective = spawn_structure(
        world,
        StructureKind::AttackObjective,
        OBJECTIVE_POSITION,
        OBJECTIVE_HEALTH,
    );
    spawn_turret_ring(world, OBJECTIVE_POSITION);

    for slot in 0..ENEMY_COUNT {
        spawn_enemy(world, rng, slot);
    }
    for _ in 0..ALLY_COUNT {
        spawn_ally(world, rng);
    }

    MissionHandles {
        player,
        base,
        objective,
    }
}

/// Spawn the player aircraft on the runway. Its transform is overwritten
/// by `UpdatePlayer` commands from then on.
pub fn spawn_player(world: &mut World) -> hecs::Entity {
    world.spawn((
        Player,
        Transform::new(Vec3::ZERO, Vec3::X),
        Health::full(PLAYER_MAX_HEALTH),
    ))
}

/// Spawn one of the two objective buildings.
pub fn spawn_structure(
    world: &mut World,
    kind: StructureKind,
    position: Vec3,
    health: f32,
) -> hecs::Entity {
    world.spawn((
        Structure {
            kind,
            destroyed: false,
        },
        Transform::new(position, Vec3::X),
        Health::full(health),
    ))
}

/// Ring of defensive turrets around the attack objective.
pub fn spawn_turret_ring(world: &mut World, center: Vec3) {
    for i in 0..TURRET_COUNT {
        let angle = i as f32 / TURRET_COUNT as f32 * std::f32::consts::TAU;
        let position = center
            + Vec3::new(
                angle.cos() * TURRET_RING_RADIUS,
                0.0,
                angle.sin() * TURRET_RING_RADIUS,
            );
        world.spawn((
            TurretGun::new(TURRET_RANGE, TURRET_COOLDOWN, TURRET_DAMAGE),
            Transform::new(position, Vec3::new(angle.cos(), 0.0, angle.sin())),
        ));
    }
}

/// Spawn a single enemy at a random point in the patrol field, initially
/// facing the player start and in Patrol state.
pub fn spawn_enemy(world: &mut World, rng: &mut ChaCha8Rng, slot: usize) -> hecs::Entity {
    let position = Vec3::new(
        rng.gen_range(-PATROL_FIELD..PATROL_FIELD),
        PATROL_ALTITUDE_MIN + rng.gen_range(0.0..PATROL_ALTITUDE_SPAN),
        rng.gen_range(-PATROL_FIELD..PATROL_FIELD),
    );
    let forward = (Vec3::ZERO - position).normalize_or_zero();
    let engage = ENGAGE_DISTANCE_MIN + rng.gen_range(0.0..ENGAGE_DISTANCE_SPAN);
    let patrol_target = roll_patrol_target(rng);

    world.spawn((
        Enemy,
        Transform::new(position, forward),
        Health::full(ENEMY_MAX_HEALTH),
        EnemyBrain::new(patrol_target, engage, slot),
    ))
}

/// Spawn a single ally near the friendly base with a random heading.
pub fn spawn_ally(world: &mut World, rng: &mut ChaCha8Rng) -> hecs::Entity {
    let position = BASE_POSITION
        + Vec3::new(
            rng.gen_range(-200.0..200.0),
            PATROL_ALTITUDE_MIN + rng.gen_range(0.0..PATROL_ALTITUDE_SPAN),
            rng.gen_range(-200.0..200.0),
        );
    let heading = Vec3::new(rng.gen_range(-1.0..1.0), 0.0, rng.gen_range(-1.0..1.0))
        .normalize_or_zero();
    let forward = if heading == Vec3::ZERO { Vec3::X } else { heading };

    world.spawn((
        Ally,
        Transform::new(position, forward),
        Health::full(ALLY_MAX_HEALTH),
        AllyBrain::default(),
    ))
}
