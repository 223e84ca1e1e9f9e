//! Session-level data models owned by the engine, not by the ECS world:
//! mission progress, the lock-on tracker, and fire requests.

use glam::Vec3;

use skystrike_core::constants::{LOCK_RANGE, LOCK_TIME};
use skystrike_core::enums::{MissionPhase, ProjectileKind, ProjectileSource};

/// Mission progress and score. Mutated only by the contact engine and
/// the mission state machine.
#[derive(Debug, Clone)]
pub struct MissionState {
    pub phase: MissionPhase,
    pub score: u32,
    /// Cleared exactly once, on entering Victory or Defeat.
    pub running: bool,
}

impl Default for MissionState {
    fn default() -> Self {
        Self {
            phase: MissionPhase::DefendBase,
            score: 0,
            running: false,
        }
    }
}

impl MissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, MissionPhase::Victory | MissionPhase::Defeat)
    }
}

/// Missile lock-on tracker.
///
/// `target` is a weak entity handle. The tracker resets to `(None, 0)`
/// whenever the nearest-in-range candidate changes, whenever a missile
/// launches, and whenever the target is destroyed (a dead target can no
/// longer be the nearest candidate, so the scan resets it).
#[derive(Debug, Clone)]
pub struct LockOn {
    pub target: Option<hecs::Entity>,
    pub progress_secs: f32,
    pub required_secs: f32,
    pub max_range: f32,
}

impl Default for LockOn {
    fn default() -> Self {
        Self {
            target: None,
            progress_secs: 0.0,
            required_secs: LOCK_TIME,
            max_range: LOCK_RANGE,
        }
    }
}

impl LockOn {
    /// True only when the dwell requirement is met and a target is set.
    pub fn is_locked(&self) -> bool {
        self.target.is_some() && self.progress_secs >= self.required_secs
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.required_secs > 0.0 {
            (self.progress_secs / self.required_secs).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Drop the target and restart the dwell clock.
    pub fn clear(&mut self) {
        self.target = None;
        self.progress_secs = 0.0;
    }

    /// Switch to a new tentative target, restarting the dwell clock.
    pub fn retarget(&mut self, target: hecs::Entity) {
        self.target = Some(target);
        self.progress_secs = 0.0;
    }
}

/// A projectile spawn request emitted by the AI, the turrets, or the
/// driver's fire commands. The projectile subsystem owns all spawning;
/// requests are consumed in the fixed per-tick order.
#[derive(Debug, Clone, Copy)]
pub struct FireRequest {
    pub kind: ProjectileKind,
    pub source: ProjectileSource,
    pub position: Vec3,
    /// Unit launch direction.
    pub direction: Vec3,
    /// Homing target for missiles.
    pub homing: Option<hecs::Entity>,
}
