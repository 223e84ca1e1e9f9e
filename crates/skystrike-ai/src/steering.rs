//! Shared steering math: smoothed heading turns and neighbor avoidance.

use glam::Vec3;

use skystrike_core::constants::AVOID_WEIGHT;

/// Blend the current heading toward a desired direction with a
/// per-second lerp rate, then renormalize. Produces gradual turning
/// rather than instantaneous reorientation; independent of frame rate.
pub fn blend_heading(current: Vec3, desired: Vec3, rate: f32, dt: f32) -> Vec3 {
    let t = (rate * dt).min(1.0);
    let blended = current.lerp(desired, t).normalize_or_zero();
    if blended == Vec3::ZERO {
        current
    } else {
        blended
    }
}

/// Sum of repulsion vectors away from each neighbor inside `radius`,
/// each scaled inversely by distance. Nearby aircraft repel each other
/// to reduce clustering.
pub fn separation(position: Vec3, neighbors: &[Vec3], radius: f32) -> Vec3 {
    let mut push = Vec3::ZERO;
    for &other in neighbors {
        let dist = position.distance(other);
        if dist > 0.0 && dist < radius {
            push += (position - other).normalize_or_zero() / dist;
        }
    }
    push
}

/// Fold an avoidance term into a desired direction: the term is
/// normalized, scaled down, added, and the result renormalized.
pub fn combine(desired: Vec3, avoidance: Vec3) -> Vec3 {
    if avoidance.length() > 0.01 {
        (desired + avoidance.normalize_or_zero() * AVOID_WEIGHT).normalize_or_zero()
    } else {
        desired
    }
}
