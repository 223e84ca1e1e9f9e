//! Events emitted by the simulation for the external effect renderer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::FxKind;

/// A visual-effect request: the core decides that something exploded,
/// the renderer decides what that looks like.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FxEvent {
    pub kind: FxKind,
    pub position: Vec3,
    pub scale: f32,
}

impl FxEvent {
    pub fn new(kind: FxKind, position: Vec3, scale: f32) -> Self {
        Self {
            kind,
            position,
            scale,
        }
    }
}
