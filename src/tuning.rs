//! Data-driven game balance
//!
//! Every section is `#[serde(default)]`, so a tuning file only needs to name
//! the values it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::CombatantKind;

/// World bounds, spawn cadence and the starting roster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub height: f32,
    /// Size of the visible rectangle used to keep spawns off-screen
    pub view_width: f32,
    pub view_height: f32,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    /// Enemy population cap
    pub max_enemies: usize,
    pub player_start: Vec2,
    pub initial_enemies: Vec<Vec2>,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            spawn_interval: SPAWN_INTERVAL,
            max_enemies: MAX_ENEMIES,
            player_start: Vec2::new(750.0, 450.0),
            initial_enemies: vec![
                Vec2::new(2500.0, 1000.0),
                Vec2::new(2000.0, 2000.0),
                Vec2::new(3000.0, 3000.0),
            ],
        }
    }
}

/// Body geometry shared by every tank
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TankTuning {
    /// Visual body size (square)
    pub size: f32,
    /// Hitbox inset from the visual bounds on every side
    pub hitbox_inset: f32,
}

impl Default for TankTuning {
    fn default() -> Self {
        Self {
            size: TANK_SIZE,
            hitbox_inset: HITBOX_INSET,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    /// Units per second along the body heading
    pub move_speed: f32,
    /// Degrees per second
    pub body_turn_speed: f32,
    /// Degrees per second
    pub turret_turn_speed: f32,
    /// Seconds between shots
    pub fire_interval: f32,
    /// Margin added around the candidate hitbox before testing against enemies
    pub collision_buffer: f32,
    /// Barrel length beyond the body edge where shells appear
    pub turret_length: f32,
    /// Fire while the button is held instead of only on press
    pub hold_to_fire: bool,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 150.0,
            move_speed: 300.0,
            body_turn_speed: 180.0,
            turret_turn_speed: 180.0,
            fire_interval: 0.1,
            collision_buffer: 40.0,
            turret_length: 15.0,
            hold_to_fire: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_health: f32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub stop_distance: f32,
    pub fire_interval: f32,
    /// Margin added around the candidate hitbox for early avoidance
    pub collision_buffer: f32,
    /// Seconds before a blocked enemy re-tests its surroundings
    pub block_cooldown: f32,
    pub wander_interval: f32,
    /// Angular lerp fractions per second (clamped to 1 per tick)
    pub body_turn_rate: f32,
    pub wander_turn_rate: f32,
    pub turret_turn_rate: f32,
    /// Fraction of the remaining arc the turret covers when firing on approach
    pub aim_on_fire: f32,
    pub explosion_duration: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 150.0,
            detection_range: 1000.0,
            stop_distance: 500.0,
            fire_interval: 2.0,
            collision_buffer: 60.0,
            block_cooldown: 1.0,
            wander_interval: 3.0,
            body_turn_rate: 1.8,
            wander_turn_rate: 3.0,
            turret_turn_rate: 2.0,
            aim_on_fire: 1.0,
            explosion_duration: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellTuning {
    pub speed: f32,
    pub max_range: f32,
    /// Side of the square hitbox centered on the shell
    pub size: f32,
}

impl Default for ShellTuning {
    fn default() -> Self {
        Self {
            speed: SHELL_SPEED,
            max_range: SHELL_MAX_RANGE,
            size: SHELL_SIZE,
        }
    }
}

/// Shell damage keyed by who fired and who was hit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageTable {
    pub player_vs_enemy: f32,
    pub enemy_vs_player: f32,
    pub enemy_vs_enemy: f32,
    pub player_vs_player: f32,
}

impl Default for DamageTable {
    fn default() -> Self {
        Self {
            player_vs_enemy: 30.0,
            enemy_vs_player: 20.0,
            enemy_vs_enemy: 30.0,
            player_vs_player: 0.0,
        }
    }
}

impl DamageTable {
    pub fn amount(&self, shooter: CombatantKind, target: CombatantKind) -> f32 {
        use CombatantKind::*;
        match (shooter, target) {
            (Player, Enemy) => self.player_vs_enemy,
            (Enemy, Player) => self.enemy_vs_player,
            (Enemy, Enemy) => self.enemy_vs_enemy,
            (Player, Player) => self.player_vs_player,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub tank: TankTuning,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub shell: ShellTuning,
    pub damage: DamageTable,
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Sanity checks for programmer errors in hand-written tuning
    pub(crate) fn debug_validate(&self) {
        debug_assert!(self.world.width > 0.0 && self.world.height > 0.0);
        debug_assert!(self.tank.size > 2.0 * self.tank.hitbox_inset);
        debug_assert!(self.player.move_speed >= 0.0 && self.enemy.move_speed >= 0.0);
        debug_assert!(self.shell.speed > 0.0 && self.shell.max_range > 0.0);
        debug_assert!(self.enemy.stop_distance <= self.enemy.detection_range);
        debug_assert!(self.world.spawn_interval > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arena_constants() {
        let t = Tuning::default();
        assert_eq!(t.player.max_health, 150.0);
        assert_eq!(t.enemy.max_health, 100.0);
        assert_eq!(t.enemy.detection_range, 1000.0);
        assert_eq!(t.enemy.stop_distance, 500.0);
        assert_eq!(t.world.max_enemies, 30);
        assert_eq!(t.world.initial_enemies.len(), 3);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let t = Tuning::from_json(r#"{ "enemy": { "move_speed": 99.0 }, "world": { "max_enemies": 5 } }"#)
            .unwrap();
        assert_eq!(t.enemy.move_speed, 99.0);
        assert_eq!(t.enemy.detection_range, 1000.0);
        assert_eq!(t.world.max_enemies, 5);
        assert_eq!(t.player.fire_interval, 0.1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert!(Tuning::from_json(r#"{ "enemy": { "move_speed": "fast" } }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_roster() {
        let t = Tuning::default();
        let back = Tuning::from_json(&t.to_json_pretty()).unwrap();
        assert_eq!(back.world.initial_enemies, t.world.initial_enemies);
        assert_eq!(back.world.player_start, t.world.player_start);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let t = Tuning::load("/definitely/not/a/real/tuning.json");
        assert_eq!(t.shell.max_range, 1500.0);
    }

    #[test]
    fn test_damage_table_is_keyed_by_both_sides() {
        let d = DamageTable::default();
        assert_eq!(d.amount(CombatantKind::Player, CombatantKind::Enemy), 30.0);
        assert_eq!(d.amount(CombatantKind::Enemy, CombatantKind::Player), 20.0);
        assert_eq!(d.amount(CombatantKind::Enemy, CombatantKind::Enemy), 30.0);
    }
}
