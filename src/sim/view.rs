//! Read-only per-frame snapshots for the rendering sink and the HUD

use glam::Vec2;
use serde::Serialize;

use super::combatant::{Combatant, CombatantKind, EntityId, VisualState};
use super::shell::Shell;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantView {
    pub id: EntityId,
    pub kind: CombatantKind,
    pub pos: Vec2,
    pub body_rotation: f32,
    pub turret_rotation: f32,
    pub visual: VisualState,
    /// Seconds into the current visual state (animation frame selector)
    pub anim_time: f32,
    /// Health bar fill, 0.0..=1.0
    pub health_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellView {
    pub id: EntityId,
    pub owner: EntityId,
    pub pos: Vec2,
    pub heading: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub health: f32,
    pub max_health: f32,
    pub score: u64,
    /// Final score once the run has ended
    pub game_over: Option<u64>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub combatants: Vec<CombatantView>,
    pub shells: Vec<ShellView>,
    pub hud: HudView,
}

impl From<&Combatant> for CombatantView {
    fn from(c: &Combatant) -> Self {
        let health_fraction = if c.max_health > 0.0 {
            (c.health / c.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            id: c.id,
            kind: c.kind(),
            pos: c.pos,
            body_rotation: c.body_rotation,
            turret_rotation: c.turret_rotation,
            visual: c.visual,
            anim_time: c.anim_time,
            health_fraction,
        }
    }
}

impl From<&Shell> for ShellView {
    fn from(s: &Shell) -> Self {
        Self {
            id: s.id,
            owner: s.owner,
            pos: s.pos,
            heading: s.heading,
        }
    }
}

impl GameState {
    pub fn hud(&self) -> HudView {
        let (health, max_health) = match self.player() {
            Some(p) => (p.health, p.max_health),
            None => (0.0, self.tuning.player.max_health),
        };
        HudView {
            health,
            max_health,
            score: self.score,
            game_over: (self.phase == GamePhase::GameOver).then_some(self.score),
        }
    }

    /// Snapshot of the live sets in insertion order. Combatants already
    /// flagged for removal are left out.
    pub fn frame(&self) -> Frame {
        Frame {
            combatants: self
                .combatants
                .iter()
                .filter(|c| !c.is_pending_removal())
                .map(CombatantView::from)
                .collect(),
            shells: self.shells.iter().map(ShellView::from).collect(),
            hud: self.hud(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_lists_live_entities() {
        let mut state = GameState::new(5);
        state.combatants[1].health = 25.0;
        let frame = state.frame();
        assert_eq!(frame.combatants.len(), 4);
        assert_eq!(frame.combatants[0].kind, CombatantKind::Player);
        assert_eq!(frame.combatants[1].health_fraction, 0.25);
        assert!(frame.shells.is_empty());
        assert_eq!(frame.hud.health, 150.0);
        assert_eq!(frame.hud.game_over, None);
    }

    #[test]
    fn test_hud_after_game_over() {
        let mut state = GameState::new(5);
        state.score = 9;
        state.combatants.remove(0);
        state.show_game_over(9);
        let hud = state.hud();
        assert_eq!(hud.health, 0.0);
        assert_eq!(hud.game_over, Some(9));
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::new(5);
        let json = serde_json::to_string(&state.frame()).unwrap();
        assert!(json.contains("\"kind\":\"Player\""));
        assert!(json.contains("\"score\":0"));
    }
}
