//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and all session state,
//! processes driver commands at tick boundaries, runs every subsystem
//! in a fixed order, and produces `WorldSnapshot`s. Completely headless:
//! the external driver supplies `dt` and the player's control state,
//! and renders whatever the snapshot says.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skystrike_core::commands::DriverCommand;
use skystrike_core::components::Transform;
use skystrike_core::constants::STARTING_MISSILES;
use skystrike_core::enums::{ProjectileKind, ProjectileSource};
use skystrike_core::events::FxEvent;
use skystrike_core::state::WorldSnapshot;
use skystrike_core::types::SimTime;

use crate::session::{FireRequest, LockOn, MissionState};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Starting missile inventory.
    pub missiles: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            missiles: STARTING_MISSILES,
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    mission: MissionState,
    lock: LockOn,
    rng: ChaCha8Rng,
    missiles_remaining: u32,
    starting_missiles: u32,
    player: Option<Entity>,
    base: Option<Entity>,
    objective: Option<Entity>,
    player_airborne: bool,
    command_queue: VecDeque<DriverCommand>,
    fire_requests: Vec<FireRequest>,
    fx_events: Vec<FxEvent>,
    despawn_buffer: Vec<Entity>,
    raid_clock_secs: f32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            mission: MissionState::default(),
            lock: LockOn::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            missiles_remaining: config.missiles,
            starting_missiles: config.missiles,
            player: None,
            base: None,
            objective: None,
            player_airborne: false,
            command_queue: VecDeque::new(),
            fire_requests: Vec::new(),
            fx_events: Vec::new(),
            despawn_buffer: Vec::new(),
            raid_clock_secs: 0.0,
        }
    }

    /// Queue a driver command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: DriverCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = DriverCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting
    /// snapshot. After Victory or Defeat this becomes a no-op that still
    /// reports the final state.
    pub fn advance(&mut self, dt: f32) -> WorldSnapshot {
        self.process_commands();

        if self.mission.running && dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let effects = std::mem::take(&mut self.fx_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.mission,
            &self.lock,
            self.missiles_remaining,
            self.player_airborne,
            effects,
        )
    }

    /// Current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Mission phase, score, and running flag.
    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    /// Lock-on tracker state.
    pub fn lock(&self) -> &LockOn {
        &self.lock
    }

    /// Remaining missile inventory.
    pub fn missiles_remaining(&self) -> u32 {
        self.missiles_remaining
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single driver command.
    fn handle_command(&mut self, command: DriverCommand) {
        match command {
            DriverCommand::StartMission => {
                if self.player.is_none() {
                    self.setup_session();
                }
            }
            DriverCommand::Restart => {
                self.world = World::new();
                self.player = None;
                self.setup_session();
            }
            DriverCommand::UpdatePlayer {
                position,
                forward,
                airborne,
            } => {
                self.player_airborne = airborne;
                if let Some(player) = self.player {
                    if let Ok(mut tf) = self.world.get::<&mut Transform>(player) {
                        tf.position = position;
                        tf.forward = forward.normalize_or_zero();
                    }
                }
            }
            DriverCommand::FireBullet { position, forward } => {
                if self.mission.running {
                    self.fire_requests.push(FireRequest {
                        kind: ProjectileKind::Bullet,
                        source: ProjectileSource::Player,
                        position,
                        direction: forward.normalize_or_zero(),
                        homing: None,
                    });
                }
            }
            DriverCommand::LaunchMissile { position, forward } => {
                if !self.mission.running
                    || self.missiles_remaining == 0
                    || !self.lock.is_locked()
                {
                    return;
                }
                self.missiles_remaining -= 1;
                self.fire_requests.push(FireRequest {
                    kind: ProjectileKind::Missile,
                    source: ProjectileSource::Player,
                    position,
                    direction: forward.normalize_or_zero(),
                    homing: self.lock.target,
                });
                // A launch always drops the lock.
                self.lock.clear();
            }
        }
    }

    /// Build a fresh session world and reset all session state.
    fn setup_session(&mut self) {
        let handles = world_setup::setup_mission(&mut self.world, &mut self.rng);
        self.player = Some(handles.player);
        self.base = Some(handles.base);
        self.objective = Some(handles.objective);
        self.time = SimTime::default();
        self.mission = MissionState {
            running: true,
            ..MissionState::default()
        };
        self.lock = LockOn::default();
        self.missiles_remaining = self.starting_missiles;
        self.player_airborne = false;
        self.fire_requests.clear();
        self.fx_events.clear();
        self.raid_clock_secs = 0.0;
    }

    /// Run all systems in the fixed per-tick order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Enemy AI (FSM, steering, movement, gun/raid fire intents)
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &self.time,
            dt,
            self.base,
            &mut self.fire_requests,
        );
        // 2. Raid escalation (objective-attack flags)
        systems::raid::run(
            &mut self.world,
            &mut self.rng,
            self.time.elapsed_secs,
            self.base,
            &mut self.raid_clock_secs,
        );
        // 3. Ally AI (pursuit, movement, gun fire intents)
        systems::ally_ai::run(&mut self.world, &self.time, dt, &mut self.fire_requests);
        // 4. Projectiles (spawn pending intents, homing, integration, expiry)
        systems::projectiles::run(
            &mut self.world,
            dt,
            &mut self.fire_requests,
            &mut self.despawn_buffer,
        );
        // 5. Lock-on protocol
        systems::lock_on::run(
            &self.world,
            &mut self.lock,
            dt,
            self.player_airborne,
            self.objective,
        );
        // 6. Turrets (target scan, fire intents spawned the same tick)
        systems::turrets::run(
            &mut self.world,
            &self.time,
            self.player_airborne,
            &mut self.fire_requests,
        );
        systems::projectiles::spawn_pending(&mut self.world, &mut self.fire_requests);
        // 7. Contact resolution (the five fixed steps)
        systems::collision::run(
            &mut self.world,
            &mut self.mission,
            &mut self.fx_events,
            self.player,
            self.base,
            self.objective,
        );
        // 8. Mission state machine
        systems::mission::run(
            &self.world,
            &mut self.mission,
            self.player,
            self.base,
            self.objective,
        );
    }

    // ---- test support ----

    /// Entity handle of the player aircraft.
    #[cfg(test)]
    pub(crate) fn player_entity(&self) -> Option<Entity> {
        self.player
    }

    /// Entity handle of the attack objective.
    #[cfg(test)]
    pub(crate) fn objective_entity(&self) -> Option<Entity> {
        self.objective
    }

    /// Entity handle of the defended base.
    #[cfg(test)]
    pub(crate) fn base_entity(&self) -> Option<Entity> {
        self.base
    }

    /// Mutable world access for scenario construction.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Remove every enemy (for scenarios that need a controlled force).
    #[cfg(test)]
    pub(crate) fn despawn_enemies(&mut self) {
        let enemies: Vec<Entity> = self
            .world
            .query::<&skystrike_core::components::Enemy>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for enemy in enemies {
            let _ = self.world.despawn(enemy);
        }
    }

    /// Remove every ally.
    #[cfg(test)]
    pub(crate) fn despawn_allies(&mut self) {
        let allies: Vec<Entity> = self
            .world
            .query::<&skystrike_core::components::Ally>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for ally in allies {
            let _ = self.world.despawn(ally);
        }
    }
}
