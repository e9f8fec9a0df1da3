//! Shared combatant base for the player tank and enemy tanks
//!
//! A combatant owns its kinematic and health state. Peers are only ever seen
//! through [`Body`] snapshots, and damage only arrives through
//! [`Combatant::apply_damage`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{self, EnemyBrain};
use super::player::{self, PlayerBrain};
use super::rect::Rect;
use super::state::GameEvent;
use super::tick::TickInput;
use crate::tuning::Tuning;
use crate::{heading_vector, normalize_degrees};

/// Entity identifier, unique within a run
pub type EntityId = u32;

/// Which side a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    Enemy,
}

/// Visual selector for the rendering sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    Idle,
    Moving,
    Exploding,
}

/// Result of [`Combatant::apply_damage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Death already began; nothing changed
    Ignored,
    Damaged,
    /// This hit brought health to zero
    Killed,
}

/// Per-variant controller state
#[derive(Debug, Clone)]
pub enum Role {
    Player(PlayerBrain),
    Enemy(EnemyBrain),
}

/// Read-only geometry of a combatant as of the start of the update pass
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: EntityId,
    pub kind: CombatantKind,
    pub pos: Vec2,
    pub hitbox: Rect,
}

/// Request to launch a shell, turned into a live shell by the coordinator
#[derive(Debug, Clone, Copy)]
pub struct FireRequest {
    pub shooter: EntityId,
    pub kind: CombatantKind,
    pub origin: Vec2,
    pub heading: f32,
}

/// What an entity sees of the world during its update
pub struct WorldView<'a> {
    pub bodies: &'a [Body],
    pub bounds: Rect,
    pub tuning: &'a Tuning,
}

impl WorldView<'_> {
    pub fn player(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.kind == CombatantKind::Player)
    }

    /// Every body except `id`
    pub fn others(&self, id: EntityId) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.id != id)
    }
}

/// Side effects an entity produces during its update
#[derive(Debug, Default)]
pub struct Outbox {
    pub fire: Vec<FireRequest>,
    pub events: Vec<GameEvent>,
}

/// A tank: player or enemy
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: EntityId,
    /// Lower-left corner of the visual body
    pub pos: Vec2,
    /// Degrees [0, 360)
    pub body_rotation: f32,
    /// Degrees [0, 360), independent of the body
    pub turret_rotation: f32,
    pub health: f32,
    pub max_health: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Visual body side length
    pub size: f32,
    pub hitbox_inset: f32,
    pub visual: VisualState,
    /// Seconds spent in the current visual state
    pub anim_time: f32,
    pub role: Role,
    dead: bool,
    pending_removal: bool,
}

impl Combatant {
    pub fn new_player(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self::new(id, pos, tuning.player.max_health, tuning, Role::Player(PlayerBrain::default()))
    }

    pub fn new_enemy(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        let brain = EnemyBrain::new(&tuning.enemy);
        Self::new(id, pos, tuning.enemy.max_health, tuning, Role::Enemy(brain))
    }

    fn new(id: EntityId, pos: Vec2, max_health: f32, tuning: &Tuning, role: Role) -> Self {
        Self {
            id,
            pos,
            body_rotation: 0.0,
            turret_rotation: 0.0,
            health: max_health,
            max_health,
            fire_cooldown: 0.0,
            size: tuning.tank.size,
            hitbox_inset: tuning.tank.hitbox_inset,
            visual: VisualState::Idle,
            anim_time: 0.0,
            role,
            dead: false,
            pending_removal: false,
        }
    }

    pub fn kind(&self) -> CombatantKind {
        match self.role {
            Role::Player(_) => CombatantKind::Player,
            Role::Enemy(_) => CombatantKind::Enemy,
        }
    }

    /// Visual bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Collision rectangle, always derived from the current position
    pub fn hitbox(&self) -> Rect {
        self.hitbox_at(self.pos)
    }

    /// Hitbox the combatant would have at `pos`
    pub fn hitbox_at(&self, pos: Vec2) -> Rect {
        Rect::new(pos.x, pos.y, self.size, self.size).inset(self.hitbox_inset)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Flagged for the coordinator to drop at the end of the tick
    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    pub(crate) fn mark_for_removal(&mut self) {
        self.pending_removal = true;
    }

    pub fn body(&self) -> Body {
        Body {
            id: self.id,
            kind: self.kind(),
            pos: self.pos,
            hitbox: self.hitbox(),
        }
    }

    pub fn enemy_brain(&self) -> Option<&EnemyBrain> {
        match &self.role {
            Role::Enemy(brain) => Some(brain),
            Role::Player(_) => None,
        }
    }

    /// Apply incoming damage. Health stays within [0, max]; the death
    /// transition runs once and later hits are ignored.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }

        self.health = (self.health - amount).clamp(0.0, self.max_health);
        if self.health > 0.0 {
            return DamageOutcome::Damaged;
        }

        self.dead = true;
        match &mut self.role {
            Role::Enemy(brain) => {
                brain.begin_exploding();
                self.set_visual(VisualState::Exploding);
            }
            Role::Player(_) => {
                // No death animation: the player leaves the arena immediately
                self.pending_removal = true;
            }
        }
        DamageOutcome::Killed
    }

    /// Switch visual state; the animation clock restarts on change
    pub fn set_visual(&mut self, visual: VisualState) {
        if self.visual != visual {
            self.visual = visual;
            self.anim_time = 0.0;
        }
    }

    /// Count the fire cooldown down toward zero
    pub(crate) fn cool_down(&mut self, dt: f32) {
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        }
    }

    /// Build a fire request from the turret, `barrel` units past the body edge
    pub(crate) fn fire_from_turret(&self, barrel: f32) -> FireRequest {
        let reach = self.size * 0.5 + barrel;
        FireRequest {
            shooter: self.id,
            kind: self.kind(),
            origin: self.center() + heading_vector(self.turret_rotation) * reach,
            heading: self.turret_rotation,
        }
    }

    pub(crate) fn set_rotations(&mut self, body: f32, turret: f32) {
        self.body_rotation = normalize_degrees(body);
        self.turret_rotation = normalize_degrees(turret);
    }

    /// Advance this combatant by one tick
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        view: &WorldView,
        input: &TickInput,
        rng: &mut R,
        out: &mut Outbox,
    ) {
        if self.pending_removal {
            return;
        }

        match self.role {
            Role::Player(_) => player::update(self, dt, view, input, out),
            Role::Enemy(_) => enemy::update(self, dt, view, rng, out),
        }

        self.anim_time += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(x: f32, y: f32) -> Combatant {
        Combatant::new_enemy(1, Vec2::new(x, y), &Tuning::default())
    }

    #[test]
    fn test_hitbox_follows_position() {
        let mut c = enemy_at(100.0, 200.0);
        assert_eq!(c.hitbox(), Rect::new(110.0, 210.0, 44.0, 44.0));
        c.pos = Vec2::new(0.0, 0.0);
        assert_eq!(c.hitbox(), Rect::new(10.0, 10.0, 44.0, 44.0));
    }

    #[test]
    fn test_spawned_with_full_health_and_no_cooldown() {
        let t = Tuning::default();
        let p = Combatant::new_player(1, Vec2::ZERO, &t);
        let e = Combatant::new_enemy(2, Vec2::ZERO, &t);
        assert_eq!(p.health, 150.0);
        assert_eq!(e.health, 100.0);
        assert_eq!(p.fire_cooldown, 0.0);
        assert_eq!(p.kind(), CombatantKind::Player);
        assert_eq!(e.kind(), CombatantKind::Enemy);
    }

    #[test]
    fn test_health_stays_in_range() {
        let mut c = enemy_at(0.0, 0.0);
        let hits = [30.0, -500.0, 7.5, 1000.0, 30.0, -10.0];
        for h in hits {
            c.apply_damage(h);
            assert!(c.health >= 0.0 && c.health <= c.max_health, "health {}", c.health);
        }
        assert_eq!(c.health, 0.0);
    }

    #[test]
    fn test_exact_zero_kills_once() {
        let mut c = enemy_at(0.0, 0.0);
        assert_eq!(c.apply_damage(70.0), DamageOutcome::Damaged);
        assert_eq!(c.apply_damage(30.0), DamageOutcome::Killed);
        assert_eq!(c.health, 0.0);
        assert!(!c.is_alive());
        assert_eq!(c.visual, VisualState::Exploding);

        let before = c.clone();
        for _ in 0..5 {
            assert_eq!(c.apply_damage(30.0), DamageOutcome::Ignored);
        }
        assert_eq!(c.health, before.health);
        assert!(c.enemy_brain().unwrap().is_exploding());
    }

    #[test]
    fn test_player_death_flags_removal() {
        let mut p = Combatant::new_player(1, Vec2::ZERO, &Tuning::default());
        assert_eq!(p.apply_damage(200.0), DamageOutcome::Killed);
        assert!(p.is_pending_removal());
        assert_eq!(p.health, 0.0);
    }

    #[test]
    fn test_visual_change_resets_anim_time() {
        let mut c = enemy_at(0.0, 0.0);
        c.anim_time = 2.5;
        c.set_visual(VisualState::Idle);
        assert_eq!(c.anim_time, 2.5);
        c.set_visual(VisualState::Moving);
        assert_eq!(c.anim_time, 0.0);
    }

    #[test]
    fn test_fire_from_turret_origin() {
        let mut c = enemy_at(0.0, 0.0);
        c.turret_rotation = 0.0;
        let req = c.fire_from_turret(15.0);
        // center (32,32) + (32 + 15) along +x
        assert!((req.origin.x - 79.0).abs() < 1e-4);
        assert!((req.origin.y - 32.0).abs() < 1e-4);
        assert_eq!(req.kind, CombatantKind::Enemy);
    }

    proptest::proptest! {
        #[test]
        fn prop_health_bounded_and_death_is_final(hits in proptest::collection::vec(-200.0f32..200.0, 0..40)) {
            let mut c = enemy_at(0.0, 0.0);
            let mut kills = 0;
            for h in hits {
                if c.apply_damage(h) == DamageOutcome::Killed {
                    kills += 1;
                }
                proptest::prop_assert!(c.health >= 0.0 && c.health <= c.max_health);
            }
            proptest::prop_assert!(kills <= 1);
            proptest::prop_assert_eq!(kills == 1, !c.is_alive());
        }
    }
}
