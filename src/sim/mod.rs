//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (live-set insertion order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combatant;
pub mod enemy;
pub mod player;
pub mod rect;
pub mod shell;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{Axis, Separation, overlaps, penetration, resolve_overlap};
pub use combatant::{Body, Combatant, CombatantKind, DamageOutcome, EntityId, FireRequest, Role, VisualState};
pub use enemy::{EnemyBrain, EnemyState};
pub use player::PlayerBrain;
pub use rect::Rect;
pub use shell::{Shell, ShellOutcome};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, restart, tick};
pub use view::{CombatantView, Frame, HudView, ShellView};
