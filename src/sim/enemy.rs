//! Enemy tank AI
//!
//! Each tick an enemy picks a state from its distance to the player:
//! - beyond detection range: wander on a periodically re-rolled heading
//! - between stop distance and detection range: approach and fire on cooldown
//! - within stop distance: hold position, face away, keep the turret on target
//!
//! Death overrides everything: an exploding enemy only advances its explosion
//! timer and is removed once it runs out.
//!
//! Movement is gated by a collision block. An approaching enemy whose buffered
//! candidate hitbox touches any other combatant stays put, holds fire and
//! re-tests its surroundings once the block cooldown expires.

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::combatant::{Body, Combatant, EntityId, Outbox, Role, VisualState, WorldView};
use super::rect::Rect;
use crate::tuning::EnemyTuning;
use crate::{bearing_deg, heading_vector, lerp_angle_deg, normalize_degrees};

/// Behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Wandering,
    Approaching,
    StandoffFiring,
    /// Terminal; removal follows once the explosion finishes
    Exploding,
}

/// Enemy-only controller state
#[derive(Debug, Clone, Copy)]
pub struct EnemyBrain {
    pub state: EnemyState,
    pub detection_range: f32,
    pub stop_distance: f32,
    /// Movement suspended until a re-test finds free space
    pub blocked: bool,
    /// Seconds until the next re-test while blocked
    pub block_cooldown: f32,
    /// Degrees
    pub wander_heading: f32,
    pub wander_timer: f32,
    pub explosion_elapsed: f32,
}

impl EnemyBrain {
    pub fn new(tuning: &EnemyTuning) -> Self {
        Self {
            state: EnemyState::Wandering,
            detection_range: tuning.detection_range,
            stop_distance: tuning.stop_distance,
            blocked: false,
            block_cooldown: 0.0,
            wander_heading: 0.0,
            // Roll a heading on the first wandering tick
            wander_timer: tuning.wander_interval,
            explosion_elapsed: 0.0,
        }
    }

    pub fn is_exploding(&self) -> bool {
        self.state == EnemyState::Exploding
    }

    pub(crate) fn begin_exploding(&mut self) {
        self.state = EnemyState::Exploding;
        self.explosion_elapsed = 0.0;
        self.blocked = false;
    }

    /// Distance-based state for a living enemy
    pub fn classify(&self, distance: f32) -> EnemyState {
        if distance > self.detection_range {
            EnemyState::Wandering
        } else if distance > self.stop_distance {
            EnemyState::Approaching
        } else {
            EnemyState::StandoffFiring
        }
    }
}

/// Does `probe` overlap any body other than `id`?
pub fn avoidance_blocked(probe: &Rect, id: EntityId, bodies: &[Body]) -> bool {
    bodies.iter().any(|b| b.id != id && overlaps(probe, &b.hitbox))
}

pub(crate) fn update<R: Rng>(c: &mut Combatant, dt: f32, view: &WorldView, rng: &mut R, out: &mut Outbox) {
    let mut brain = match &c.role {
        Role::Enemy(brain) => *brain,
        Role::Player(_) => return,
    };
    step(c, &mut brain, dt, view, rng, out);
    c.role = Role::Enemy(brain);
}

fn step<R: Rng>(
    c: &mut Combatant,
    brain: &mut EnemyBrain,
    dt: f32,
    view: &WorldView,
    rng: &mut R,
    out: &mut Outbox,
) {
    let tuning = &view.tuning.enemy;

    if brain.is_exploding() {
        brain.explosion_elapsed += dt;
        if brain.explosion_elapsed >= tuning.explosion_duration {
            c.mark_for_removal();
        }
        return;
    }

    c.cool_down(dt);

    if brain.blocked {
        brain.block_cooldown -= dt;
        if brain.block_cooldown <= 0.0 {
            let probe = c.hitbox().expanded(tuning.collision_buffer);
            if avoidance_blocked(&probe, c.id, view.bodies) {
                brain.block_cooldown = tuning.block_cooldown;
            } else {
                brain.blocked = false;
                brain.block_cooldown = 0.0;
            }
        }
    }

    let start = c.pos;
    let target = view.player().map(|p| p.pos);
    brain.state = match target {
        Some(p) => brain.classify(c.pos.distance(p)),
        None => EnemyState::Wandering,
    };

    match (brain.state, target) {
        (EnemyState::Approaching, Some(p)) => approach(c, brain, p, dt, view, out),
        (EnemyState::StandoffFiring, Some(p)) => standoff(c, p, dt, tuning, out),
        _ => wander(c, brain, dt, view, rng),
    }

    c.set_visual(if c.pos != start {
        VisualState::Moving
    } else {
        VisualState::Idle
    });
}

fn wander<R: Rng>(c: &mut Combatant, brain: &mut EnemyBrain, dt: f32, view: &WorldView, rng: &mut R) {
    let tuning = &view.tuning.enemy;

    brain.wander_timer += dt;
    if brain.wander_timer >= tuning.wander_interval {
        brain.wander_heading = rng.random_range(0.0..360.0);
        brain.wander_timer = 0.0;
    }

    let body = lerp_angle_deg(c.body_rotation, brain.wander_heading, tuning.wander_turn_rate * dt);
    c.set_rotations(body, c.turret_rotation);

    if !brain.blocked {
        let candidate = c.pos + heading_vector(c.body_rotation) * tuning.move_speed * dt;
        c.pos = view.bounds.clamp_body(candidate, Vec2::splat(c.size));
    }
}

fn approach(c: &mut Combatant, brain: &mut EnemyBrain, player: Vec2, dt: f32, view: &WorldView, out: &mut Outbox) {
    let tuning = &view.tuning.enemy;
    let bearing = bearing_deg(c.pos, player);

    let body = lerp_angle_deg(c.body_rotation, bearing, tuning.body_turn_rate * dt);
    c.set_rotations(body, c.turret_rotation);

    if brain.blocked {
        return;
    }

    let candidate = c.pos + heading_vector(c.body_rotation) * tuning.move_speed * dt;
    let probe = c.hitbox_at(candidate).expanded(tuning.collision_buffer);
    if avoidance_blocked(&probe, c.id, view.bodies) {
        // Holds fire as well as position until the block clears
        brain.blocked = true;
        brain.block_cooldown = tuning.block_cooldown;
        return;
    }
    c.pos = view.bounds.clamp_body(candidate, Vec2::splat(c.size));

    if c.fire_cooldown <= 0.0 {
        let turret = lerp_angle_deg(c.turret_rotation, bearing, tuning.aim_on_fire);
        c.set_rotations(c.body_rotation, turret);
        out.fire.push(c.fire_from_turret(0.0));
        c.fire_cooldown = tuning.fire_interval;
    }
}

fn standoff(c: &mut Combatant, player: Vec2, dt: f32, tuning: &EnemyTuning, out: &mut Outbox) {
    let bearing = bearing_deg(c.pos, player);
    let away = normalize_degrees(bearing + 180.0);

    let body = lerp_angle_deg(c.body_rotation, away, tuning.body_turn_rate * dt);
    let turret = lerp_angle_deg(c.turret_rotation, bearing, tuning.turret_turn_rate * dt);
    c.set_rotations(body, turret);

    if c.fire_cooldown <= 0.0 {
        out.fire.push(c.fire_from_turret(0.0));
        c.fire_cooldown = tuning.fire_interval;
    }
}
