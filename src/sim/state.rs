//! Arena state: the coordinator that owns every live combatant and shell
//!
//! Only the coordinator adds or removes entries in the live sets. Entities
//! flag themselves for removal and the end-of-tick reconcile drops them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::combatant::{Combatant, CombatantKind, EntityId};
use super::rect::Rect;
use super::shell::Shell;
use crate::tuning::Tuning;

/// Spawn rejection sampling gives up after this many draws
const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player destroyed; nothing ticks until restart
    GameOver,
}

/// Discrete things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Fired { shooter: EntityId, shell: EntityId },
    Hit { target: EntityId, shooter: EntityId, damage: f32 },
    /// Enemy death sequence started
    Exploded { id: EntityId },
    /// Entity left the live set (drop its sprite and health bar)
    Removed { id: EntityId },
    EnemySpawned { id: EntityId, pos: Vec2 },
    /// Player started moving
    EngineMoving { id: EntityId },
    /// Player stopped moving
    EngineIdle { id: EntityId },
    GameOver { score: u64 },
    Restarted,
}

/// Complete arena state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Enemies destroyed this run
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds since the last spawn attempt
    pub spawn_timer: f32,
    /// Visible rectangle; spawns land outside it
    pub view: Rect,
    /// Live combatants in insertion order
    pub combatants: Vec<Combatant>,
    /// Live shells in insertion order
    pub shells: Vec<Shell>,
    pub(crate) events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new arena with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        tuning.debug_validate();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            spawn_timer: 0.0,
            view: Rect::new(0.0, 0.0, 0.0, 0.0),
            combatants: Vec::new(),
            shells: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_arena();
        state
    }

    /// Clear the live sets and place the player and the starting roster
    pub(crate) fn reset_arena(&mut self) {
        self.combatants.clear();
        self.shells.clear();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.spawn_timer = 0.0;

        let start = self.tuning.world.player_start;
        let id = self.next_entity_id();
        self.combatants.push(Combatant::new_player(id, start, &self.tuning));
        self.view = self.view_around_player();

        for pos in self.tuning.world.initial_enemies.clone() {
            self.spawn_enemy_at(pos);
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn world_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.world.width, self.tuning.world.height)
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.kind() == CombatantKind::Player)
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn enemy_count(&self) -> usize {
        self.combatants
            .iter()
            .filter(|c| c.kind() == CombatantKind::Enemy)
            .count()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Visible rectangle centered on the player (or the world center once the player is gone)
    pub fn view_around_player(&self) -> Rect {
        let size = Vec2::new(self.tuning.world.view_width, self.tuning.world.view_height);
        let center = self
            .player()
            .map(|p| p.center())
            .unwrap_or_else(|| self.world_bounds().center());
        Rect::from_center(center, size)
    }

    /// Add an enemy at `pos` (clamped into the world)
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> EntityId {
        let pos = self
            .world_bounds()
            .clamp_body(pos, Vec2::splat(self.tuning.tank.size));
        let id = self.next_entity_id();
        self.combatants.push(Combatant::new_enemy(id, pos, &self.tuning));
        self.events.push(GameEvent::EnemySpawned { id, pos });
        log::info!("Enemy {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Uniform spawn position outside the current view.
    ///
    /// Points are clamped so the body fits in the world before the view test,
    /// so the returned position is where the enemy will actually stand.
    pub fn sample_spawn_point(&mut self) -> Option<Vec2> {
        let world = self.world_bounds();
        let body = Vec2::splat(self.tuning.tank.size);
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let p = Vec2::new(
                self.rng.random_range(0.0..=world.size.x),
                self.rng.random_range(0.0..=world.size.y),
            );
            let p = world.clamp_body(p, body);
            if !self.view.contains_point(p) {
                return Some(p);
            }
        }
        None
    }

    /// Spawn one enemy off-screen unless the population cap is met
    pub fn try_spawn_enemy(&mut self) -> Option<EntityId> {
        if self.enemy_count() >= self.tuning.world.max_enemies {
            log::debug!("Spawn skipped: {} enemies at cap", self.enemy_count());
            return None;
        }
        match self.sample_spawn_point() {
            Some(p) => Some(self.spawn_enemy_at(p)),
            None => {
                log::warn!("Spawn skipped: no off-screen point found in {} draws", MAX_SPAWN_ATTEMPTS);
                None
            }
        }
    }

    /// Enter game over with the final score
    pub fn show_game_over(&mut self, score: u64) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score });
        log::info!("Game over - final score {}", score);
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
