//! Commands sent from the external driver to the simulation.
//!
//! Commands are queued and processed at the next tick boundary, before
//! any system runs.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// All driver actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DriverCommand {
    /// Build the mission world and start ticking.
    StartMission,
    /// Tear the session down and start a fresh one.
    Restart,

    /// Authoritative snapshot of the externally-controlled player.
    /// The core never moves the player itself; it reads whatever the
    /// driver's control resolution produced this frame.
    UpdatePlayer {
        position: Vec3,
        forward: Vec3,
        airborne: bool,
    },

    /// Fire a cannon round from the given muzzle state.
    FireBullet { position: Vec3, forward: Vec3 },

    /// Launch a guided missile. Ignored unless a full lock is held and
    /// missile inventory remains.
    LaunchMissile { position: Vec3, forward: Vec3 },
}
