//! Player controller: input intents to motion, turret aim and fire requests

use glam::Vec2;

use super::collision::overlaps;
use super::combatant::{Combatant, CombatantKind, Outbox, Role, VisualState, WorldView};
use super::state::GameEvent;
use super::tick::TickInput;
use crate::heading_vector;

/// Player-only controller state
#[derive(Debug, Clone, Default)]
pub struct PlayerBrain {
    /// Moving or rotating last tick (drives the engine loop edges)
    pub moving: bool,
}

/// Would the player's buffered hitbox at `candidate` touch any enemy?
pub fn move_blocked(player: &Combatant, candidate: Vec2, buffer: f32, view: &WorldView) -> bool {
    let probe = player.hitbox_at(candidate).expanded(buffer);
    view.others(player.id)
        .filter(|b| b.kind == CombatantKind::Enemy)
        .any(|b| overlaps(&probe, &b.hitbox))
}

pub(crate) fn update(c: &mut Combatant, dt: f32, view: &WorldView, input: &TickInput, out: &mut Outbox) {
    let tuning = &view.tuning.player;
    c.cool_down(dt);

    // Translate along the current body heading; backward wins over forward
    let heading = heading_vector(c.body_rotation);
    let mut velocity = Vec2::ZERO;
    if input.forward {
        velocity = heading * tuning.move_speed;
    }
    if input.backward {
        velocity = -heading * tuning.move_speed;
    }

    let translating = velocity != Vec2::ZERO;
    if translating {
        let candidate = c.pos + velocity * dt;
        // Rejected moves leave the position untouched (no sliding)
        if !move_blocked(c, candidate, tuning.collision_buffer, view) {
            c.pos = view.bounds.clamp_body(candidate, Vec2::splat(c.size));
        }
    }

    let body_step = tuning.body_turn_speed * dt;
    let turret_step = tuning.turret_turn_speed * dt;
    let mut body = c.body_rotation;
    let mut turret = c.turret_rotation;
    if input.rotate_left {
        body += body_step;
    }
    if input.rotate_right {
        body -= body_step;
    }
    if input.turret_left {
        turret += turret_step;
    }
    if input.turret_right {
        turret -= turret_step;
    }
    c.set_rotations(body, turret);

    let moving = translating || input.rotate_left || input.rotate_right;
    c.set_visual(if moving { VisualState::Moving } else { VisualState::Idle });

    let wants_fire = if tuning.hold_to_fire {
        input.fire_pressed
    } else {
        input.fire_just_pressed
    };
    if wants_fire && c.fire_cooldown <= 0.0 {
        out.fire.push(c.fire_from_turret(tuning.turret_length));
        c.fire_cooldown = tuning.fire_interval;
    }

    let id = c.id;
    if let Role::Player(brain) = &mut c.role {
        if moving != brain.moving {
            brain.moving = moving;
            out.events.push(if moving {
                GameEvent::EngineMoving { id }
            } else {
                GameEvent::EngineIdle { id }
            });
        }
    }
}
