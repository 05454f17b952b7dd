//! Flappy Dash - a Flappy Bird style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, scoring, game state)
//! - `clock`: Fixed timestep tick accumulator
//! - `audio`: Procedural sound effects and background music
//! - `renderer`: Canvas2D rendering (wasm only)
//! - `settings`: Persisted player settings

pub mod audio;
pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::TickClock;
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz logical tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Bird bounding box and fixed horizontal anchor (left edge)
    pub const BIRD_WIDTH: f32 = 33.0;
    pub const BIRD_HEIGHT: f32 = 28.0;
    pub const BIRD_LEFT: f32 = 100.0;

    /// Vertical physics, in pixels per tick
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_IMPULSE: f32 = -12.0;

    /// Pillar geometry and motion
    pub const PILLAR_WIDTH: f32 = 52.0;
    pub const PILLAR_SPEED: f32 = 5.0;
    pub const PILLAR_GAP: f32 = 160.0;
    pub const PILLAR_COUNT: usize = 2;
    /// Pillars enter just past the right edge of the field
    pub const PILLAR_SPAWN_X: f32 = FIELD_WIDTH;
    /// Horizontal distance between consecutive pillars at session start
    pub const PILLAR_SPACING: f32 = 300.0;

    /// Random gap-top range, integer pixels (max exclusive)
    pub const GAP_TOP_MIN: i32 = 100;
    pub const GAP_TOP_MAX: i32 = 300;

    /// Score awarded per pillar passed
    pub const SCORE_PER_PILLAR: f32 = 0.5;

    /// Bird tilt, degrees per unit of vertical velocity, and its clamp range
    pub const TILT_PER_VELOCITY: f32 = 3.0;
    pub const TILT_MIN_DEG: f32 = -30.0;
    pub const TILT_MAX_DEG: f32 = 90.0;
}
