//! Fixed timestep tick accumulator
//!
//! Converts variable frame time into whole logical ticks. The frame loop
//! feeds it elapsed seconds and runs however many ticks it yields; banked
//! time below one tick carries over to the next frame. Ticks per call are
//! capped so a long gap (tab hidden, debugger pause) cannot trigger a
//! catch-up burst, and a session boundary resets the bank so a fresh run
//! never consumes time accumulated by the previous one.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Accumulator state for the fixed-rate tick driver
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    accumulator: f32,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank elapsed seconds and return the number of whole ticks to run
    /// now, capped at `MAX_SUBSTEPS`. Time beyond the cap stays banked.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    /// Drop banked time. Called whenever the session leaves the running
    /// phase and on start/restart.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
