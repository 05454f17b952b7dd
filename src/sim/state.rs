//! Game state and core simulation types
//!
//! One `GameState` is one session: it exclusively owns the bird and the
//! pillar row, and nothing outside the `sim` module mutates either except
//! through the input operations below and the tick module.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, nothing ticking
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, sticky until restart
    GameOver,
}

/// One-shot signals emitted by the simulation for the platform layer to
/// drain each frame (audio triggers, HUD pulses). The sim never reads
/// its own event queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A run began
    Started,
    /// The bird flapped
    Jumped,
    /// A pillar was passed
    Scored { total: f32 },
    /// The run ended
    GameOver { score: f32 },
    /// The session was discarded and rebuilt at the start screen
    Restarted,
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Top offset within the field (0 = top edge, grows downward)
    pub y: f32,
    /// Vertical velocity in pixels per tick (positive = falling)
    pub vel: f32,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            y: FIELD_HEIGHT / 2.0,
            vel: 0.0,
        }
    }

    /// Bounding box at the fixed horizontal anchor
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(
            Vec2::new(BIRD_LEFT, self.y),
            Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
        )
    }

    /// Render tilt in degrees, derived from vertical velocity
    pub fn rotation_degrees(&self) -> f32 {
        (self.vel * TILT_PER_VELOCITY).clamp(TILT_MIN_DEG, TILT_MAX_DEG)
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A pillar pair: top and bottom segments with a vertical passage between
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    /// Stable identity, kept across recycles
    pub id: u32,
    /// Left edge, decreases every tick
    pub x: f32,
    /// Bottom edge of the top segment (top of the passage)
    pub gap_top: f32,
    /// One-shot scoring latch, cleared only on recycle
    pub scored: bool,
}

impl Pillar {
    /// Bounding box of the top segment
    pub fn top_rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::new(self.x, 0.0), Vec2::new(PILLAR_WIDTH, self.gap_top))
    }

    /// Bounding box of the bottom segment for the given passage size
    pub fn bottom_rect(&self, gap: f32) -> Rect {
        let top = self.gap_top + gap;
        Rect::from_pos_size(
            Vec2::new(self.x, top),
            Vec2::new(PILLAR_WIDTH, (FIELD_HEIGHT - top).max(0.0)),
        )
    }
}

/// Complete session state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The player's bird
    pub bird: Bird,
    /// Pillars in spawn order; fixed size, recycled in place
    pub pillars: Vec<Pillar>,
    /// Vertical passage size shared by all pillars
    pub gap: f32,
    /// Half a point per pillar passed
    pub score: f32,
    /// Forwarded to the audio layer; never read by the simulation
    pub muted: bool,
    /// Ticks executed in the current session
    pub time_ticks: u64,
    /// Gap height randomness (continues across restarts)
    rng: Pcg32,
    /// Pending one-shot signals
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed, at the start screen
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Idle,
            bird: Bird::new(),
            pillars: Vec::with_capacity(PILLAR_COUNT),
            gap: PILLAR_GAP,
            score: 0.0,
            muted: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.spawn_pillars();
        state
    }

    /// Draw a fresh gap-top height
    pub fn next_gap_top(&mut self) -> f32 {
        self.rng.random_range(GAP_TOP_MIN..GAP_TOP_MAX) as f32
    }

    /// Lay out the pillar row at the canonical spawn offsets
    fn spawn_pillars(&mut self) {
        self.pillars.clear();
        for i in 0..PILLAR_COUNT {
            let gap_top = self.next_gap_top();
            self.pillars.push(Pillar {
                id: i as u32 + 1,
                x: PILLAR_SPAWN_X + i as f32 * PILLAR_SPACING,
                gap_top,
                scored: false,
            });
        }
    }

    /// Begin the run. Valid only from the start screen; ignored otherwise.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("run started (seed {})", self.seed);
    }

    /// Flap: set velocity to the jump impulse, replacing any accumulated
    /// fall speed. Ignored unless a run is active.
    pub fn jump(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.bird.vel = JUMP_IMPULSE;
        self.events.push(GameEvent::Jumped);
    }

    /// End the run. Idempotent: several checks can fire in one tick and
    /// only the first transition emits the event.
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("game over at score {}", self.score);
    }

    /// Discard the session and rebuild it at the start screen. The mute
    /// flag and the RNG stream carry over; everything else resets.
    pub fn restart(&mut self) {
        self.bird = Bird::new();
        self.score = 0.0;
        self.phase = GamePhase::Idle;
        self.time_ticks = 0;
        self.spawn_pillars();
        self.events.clear();
        self.events.push(GameEvent::Restarted);
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Queue a one-shot signal for the platform layer
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
