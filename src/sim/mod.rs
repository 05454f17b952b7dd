//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical tick only (the tick is the physics unit)
//! - Seeded RNG only
//! - Stable pillar order (spawn order, recycled in place)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{bird_hits_pillar, passed_scoring_line};
pub use rect::Rect;
pub use state::{Bird, GameEvent, GamePhase, GameState, Pillar};
pub use tick::tick;
