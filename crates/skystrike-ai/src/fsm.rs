//! Enemy behavior finite state machine.
//!
//! Computes state transitions and the desired flight direction for one
//! enemy per tick. Randomness (patrol point selection, the chase roll,
//! the evade jink) comes from the caller's RNG so the whole simulation
//! stays seed-deterministic.

use glam::Vec3;
use rand::Rng;

use skystrike_core::constants::*;
use skystrike_core::enums::EnemyState;

/// Input to the enemy FSM for a single aircraft.
pub struct EnemyContext {
    pub state: EnemyState,
    pub position: Vec3,
    /// Current (already smoothed) heading.
    pub forward: Vec3,
    pub player_pos: Vec3,
    pub patrol_target: Vec3,
    /// Per-enemy randomized engage trigger (200-300).
    pub engage_distance: f32,
    pub chase_distance: f32,
    /// Offsets the orbit angle so engaging enemies spread out.
    pub orbit_slot: usize,
    pub elapsed_secs: f32,
}

/// Output from the enemy FSM.
pub struct EnemyDecision {
    pub new_state: EnemyState,
    /// Unit direction the enemy wants to fly (before avoidance and
    /// heading smoothing).
    pub desired_dir: Vec3,
    /// Replacement patrol point, when the current one was reached.
    pub new_patrol_target: Option<Vec3>,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext, rng: &mut impl Rng) -> EnemyDecision {
    match ctx.state {
        EnemyState::Patrol => evaluate_patrol(ctx, rng),
        EnemyState::Engage => evaluate_engage(ctx, rng),
        EnemyState::Chase => evaluate_chase(ctx),
        EnemyState::Evade => evaluate_evade(ctx, rng),
    }
}

/// Draw a fresh roaming destination inside the patrol field.
pub fn roll_patrol_target(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-PATROL_FIELD..PATROL_FIELD),
        PATROL_ALTITUDE_MIN + rng.gen_range(0.0..PATROL_ALTITUDE_SPAN),
        rng.gen_range(-PATROL_FIELD..PATROL_FIELD),
    )
}

fn evaluate_patrol(ctx: &EnemyContext, rng: &mut impl Rng) -> EnemyDecision {
    let dist_to_player = ctx.position.distance(ctx.player_pos);

    // Reached the patrol point — pick a new one.
    let mut target = ctx.patrol_target;
    let mut new_patrol_target = None;
    if ctx.position.distance(target) < PATROL_REACHED {
        target = roll_patrol_target(rng);
        new_patrol_target = Some(target);
    }

    let new_state = if dist_to_player < ctx.engage_distance {
        EnemyState::Engage
    } else {
        EnemyState::Patrol
    };

    EnemyDecision {
        new_state,
        desired_dir: (target - ctx.position).normalize_or_zero(),
        new_patrol_target,
    }
}

fn evaluate_engage(ctx: &EnemyContext, rng: &mut impl Rng) -> EnemyDecision {
    let dist_to_player = ctx.position.distance(ctx.player_pos);

    // Orbit point parameterized by elapsed time plus the per-enemy slot.
    let angle = ctx.elapsed_secs * ORBIT_RATE + ctx.orbit_slot as f32;
    let orbit_point = ctx.player_pos
        + Vec3::new(
            angle.cos() * ORBIT_RADIUS,
            (angle * 0.5).sin() * ORBIT_BOB,
            angle.sin() * ORBIT_RADIUS,
        );
    let desired_dir = (orbit_point - ctx.position).normalize_or_zero();

    // Tail check: the player sitting behind us wins over everything else.
    let away_from_player = (ctx.position - ctx.player_pos).normalize_or_zero();
    let tail_dot = away_from_player.dot(ctx.forward);
    let new_state = if tail_dot < BEHIND_DOT && dist_to_player < BEHIND_RANGE {
        EnemyState::Evade
    } else if dist_to_player < CHASE_TRIGGER_RANGE && rng.gen_bool(CHASE_PROBABILITY) {
        EnemyState::Chase
    } else if dist_to_player > ctx.chase_distance {
        EnemyState::Patrol
    } else {
        EnemyState::Engage
    };

    EnemyDecision {
        new_state,
        desired_dir,
        new_patrol_target: None,
    }
}

fn evaluate_chase(ctx: &EnemyContext) -> EnemyDecision {
    let dist_to_player = ctx.position.distance(ctx.player_pos);

    let new_state = if dist_to_player < TOO_CLOSE_RANGE {
        EnemyState::Evade
    } else if dist_to_player > CHASE_BREAK_RANGE {
        EnemyState::Engage
    } else {
        EnemyState::Chase
    };

    EnemyDecision {
        new_state,
        desired_dir: (ctx.player_pos - ctx.position).normalize_or_zero(),
        new_patrol_target: None,
    }
}

fn evaluate_evade(ctx: &EnemyContext, rng: &mut impl Rng) -> EnemyDecision {
    let dist_to_player = ctx.position.distance(ctx.player_pos);

    // Straight away from the player plus a bounded jink, recomputed every
    // tick so the flight path stays unpredictable.
    let away = (ctx.position - ctx.player_pos).normalize_or_zero();
    let jink = Vec3::new(
        rng.gen_range(-EVADE_JITTER..EVADE_JITTER),
        rng.gen_range(-EVADE_JITTER..EVADE_JITTER),
        rng.gen_range(-EVADE_JITTER..EVADE_JITTER),
    );
    let desired_dir = (away + jink).normalize_or_zero();

    let new_state = if dist_to_player > EVADE_SAFE_RANGE {
        EnemyState::Engage
    } else {
        EnemyState::Evade
    };

    EnemyDecision {
        new_state,
        desired_dir,
        new_patrol_target: None,
    }
}
