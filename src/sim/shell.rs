//! Shells: straight-line projectiles with a range limit

use glam::Vec2;

use super::collision::overlaps;
use super::combatant::{Combatant, CombatantKind, EntityId};
use super::rect::Rect;
use crate::heading_vector;
use crate::tuning::ShellTuning;

/// Slack for accumulated float error when comparing travel against range
const RANGE_EPSILON: f32 = 1e-2;

/// A shell in flight
#[derive(Debug, Clone)]
pub struct Shell {
    pub id: EntityId,
    /// Combatant that fired it; never hit by its own shell
    pub owner: EntityId,
    pub owner_kind: CombatantKind,
    pub origin: Vec2,
    pub pos: Vec2,
    /// Fixed at launch (degrees)
    pub heading: f32,
    pub vel: Vec2,
    /// Cumulative distance travelled
    pub traveled: f32,
    pub max_range: f32,
    /// Side of the square hitbox centered on `pos`
    pub size: f32,
}

/// How a shell's tick ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellOutcome {
    /// Still flying
    InFlight,
    /// Reached max range without hitting anything
    Expired,
    /// Overlapped a combatant (index into the combatant slice)
    Hit { index: usize },
}

impl Shell {
    pub fn new(
        id: EntityId,
        owner: EntityId,
        owner_kind: CombatantKind,
        origin: Vec2,
        heading: f32,
        tuning: &ShellTuning,
    ) -> Self {
        Self {
            id,
            owner,
            owner_kind,
            origin,
            pos: origin,
            heading,
            vel: heading_vector(heading) * tuning.speed,
            traveled: 0.0,
            max_range: tuning.max_range,
            size: tuning.size,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }

    /// Move along the launch heading and accumulate distance travelled
    pub fn integrate(&mut self, dt: f32) {
        let step = self.vel * dt;
        self.pos += step;
        self.traveled += step.length();
    }

    pub fn out_of_range(&self) -> bool {
        self.traveled + RANGE_EPSILON >= self.max_range
    }

    /// First combatant (in live-set order) overlapped by this shell, skipping its owner
    pub fn find_target(&self, combatants: &[Combatant]) -> Option<usize> {
        let hitbox = self.hitbox();
        combatants
            .iter()
            .position(|c| c.id != self.owner && !c.is_pending_removal() && overlaps(&hitbox, &c.hitbox()))
    }

    /// Advance one tick: move, then test hits, then test range.
    ///
    /// A hit on the tick the range runs out still counts as a hit.
    pub fn tick(&mut self, dt: f32, combatants: &[Combatant]) -> ShellOutcome {
        self.integrate(dt);
        if let Some(index) = self.find_target(combatants) {
            return ShellOutcome::Hit { index };
        }
        if self.out_of_range() {
            return ShellOutcome::Expired;
        }
        ShellOutcome::InFlight
    }
}
