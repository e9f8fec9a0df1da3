//! Fixed timestep simulation tick
//!
//! One tick runs four passes in a fixed order: spawner, shells, combatants,
//! reconcile. Combatants read peers through snapshots taken at the start of
//! their pass, and every add/remove of the live sets happens here.

use super::combatant::{Body, CombatantKind, DamageOutcome, Outbox, WorldView};
use super::rect::Rect;
use super::shell::{Shell, ShellOutcome};
use super::state::{GameEvent, GamePhase, GameState};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drive forward along the body heading
    pub forward: bool,
    /// Drive backward; wins over `forward`
    pub backward: bool,
    /// Rotate body counter-clockwise
    pub rotate_left: bool,
    /// Rotate body clockwise
    pub rotate_right: bool,
    pub turret_left: bool,
    pub turret_right: bool,
    /// Fire button held
    pub fire_pressed: bool,
    /// Fire button went down this tick
    pub fire_just_pressed: bool,
    /// Start a new run (only honored on the game-over screen)
    pub restart: bool,
    /// Visible rectangle from the camera; centered on the player when absent
    pub view: Option<Rect>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            restart(state);
        }
        return;
    }

    state.time_ticks += 1;
    state.view = input.view.unwrap_or_else(|| state.view_around_player());

    advance_spawner(state, dt);
    let player_killed = update_shells(state, dt);
    if player_killed {
        state.show_game_over(state.score);
        reconcile(state);
        return;
    }

    update_combatants(state, input, dt);
    reconcile(state);
}

/// Discard the current run and start over with a fresh roster
pub fn restart(state: &mut GameState) {
    state.reset_arena();
    state.events.push(GameEvent::Restarted);
    log::info!("Arena restarted (seed {})", state.seed);
}

/// Count toward the next spawn; a due spawn is skipped (not queued) when the cap is met
fn advance_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer < state.tuning.world.spawn_interval {
        return;
    }
    state.spawn_timer = 0.0;
    state.try_spawn_enemy();
}

/// Move every shell and resolve hits. Returns true when the player died.
fn update_shells(state: &mut GameState, dt: f32) -> bool {
    let GameState {
        shells,
        combatants,
        events,
        score,
        tuning,
        ..
    } = state;
    let mut player_killed = false;

    shells.retain_mut(|shell| match shell.tick(dt, combatants) {
        ShellOutcome::InFlight => true,
        ShellOutcome::Expired => {
            log::trace!("Shell {} expired after {:.0}", shell.id, shell.traveled);
            false
        }
        ShellOutcome::Hit { index } => {
            let target = &mut combatants[index];
            let damage = tuning.damage.amount(shell.owner_kind, target.kind());
            let outcome = target.apply_damage(damage);
            if outcome != DamageOutcome::Ignored {
                log::debug!(
                    "Shell {} from {} hit {} for {:.0} ({:.0} left)",
                    shell.id,
                    shell.owner,
                    target.id,
                    damage,
                    target.health
                );
                events.push(GameEvent::Hit {
                    target: target.id,
                    shooter: shell.owner,
                    damage,
                });
            }
            if outcome == DamageOutcome::Killed {
                match target.kind() {
                    CombatantKind::Enemy => {
                        *score += 1;
                        events.push(GameEvent::Exploded { id: target.id });
                        log::info!("Enemy {} destroyed by {} (score {})", target.id, shell.owner, score);
                    }
                    CombatantKind::Player => {
                        log::info!("Player destroyed by {}", shell.owner);
                        player_killed = true;
                    }
                }
            }
            false
        }
    });

    player_killed
}

/// Run every combatant against a start-of-pass snapshot, then launch requested shells
fn update_combatants(state: &mut GameState, input: &TickInput, dt: f32) {
    let bodies: Vec<Body> = state
        .combatants
        .iter()
        .filter(|c| !c.is_pending_removal())
        .map(|c| c.body())
        .collect();
    let bounds = state.world_bounds();

    let mut out = Outbox::default();
    {
        let view = WorldView {
            bodies: &bodies,
            bounds,
            tuning: &state.tuning,
        };
        for c in state.combatants.iter_mut() {
            c.tick(dt, &view, input, &mut state.rng, &mut out);
        }
    }

    state.events.append(&mut out.events);
    for req in out.fire {
        let id = state.next_entity_id();
        state
            .shells
            .push(Shell::new(id, req.shooter, req.kind, req.origin, req.heading, &state.tuning.shell));
        state.events.push(GameEvent::Fired {
            shooter: req.shooter,
            shell: id,
        });
        log::debug!("{:?} {} fired shell {} at {:.1} deg", req.kind, req.shooter, id, req.heading);
    }
}

/// Drop combatants that flagged themselves for removal
fn reconcile(state: &mut GameState) {
    let GameState { combatants, events, .. } = state;
    combatants.retain(|c| {
        if c.is_pending_removal() {
            events.push(GameEvent::Removed { id: c.id });
            log::debug!("{:?} {} removed", c.kind(), c.id);
            false
        } else {
            true
        }
    });
}
