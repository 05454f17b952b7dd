//! 2D canvas renderer
//!
//! Draws directly from simulation state each animation frame. All geometry
//! comes from the sim's rects so the picture can never drift from what the
//! collision checks see. Coordinates are logical field units; the context
//! is pre-scaled for the device pixel ratio.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{BIRD_HEIGHT, BIRD_WIDTH, FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{GameState, Rect};

/// Flat CSS color palette
struct Palette {
    sky: &'static str,
    pillar: &'static str,
    pillar_cap: &'static str,
    bird_body: &'static str,
    bird_wing: &'static str,
    bird_beak: &'static str,
    bird_eye: &'static str,
}

const PALETTE: Palette = Palette {
    sky: "#70c5ce",
    pillar: "#43a047",
    pillar_cap: "#2e7d32",
    bird_body: "#f7d51d",
    bird_wing: "#e8b816",
    bird_beak: "#ef6c00",
    bird_eye: "#1a1a2e",
};

/// Overhang of the cap lip past the pillar body, logical pixels
const CAP_OVERHANG: f64 = 3.0;
/// Height of the cap lip, logical pixels
const CAP_HEIGHT: f64 = 14.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Attaches to the canvas and scales the context for the device pixel
    /// ratio so all later draw calls use logical field coordinates.
    pub fn new(canvas: &HtmlCanvasElement, dpr: f64) -> Option<Self> {
        canvas.set_width((f64::from(FIELD_WIDTH) * dpr) as u32);
        canvas.set_height((f64::from(FIELD_HEIGHT) * dpr) as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        ctx.scale(dpr, dpr).ok()?;

        Some(Self { ctx })
    }

    /// Draws one full frame
    pub fn render(&self, state: &GameState) {
        self.ctx.set_fill_style_str(PALETTE.sky);
        self.ctx.fill_rect(
            0.0,
            0.0,
            f64::from(FIELD_WIDTH),
            f64::from(FIELD_HEIGHT),
        );

        for pillar in &state.pillars {
            self.draw_pillar_segment(&pillar.top_rect(), true);
            self.draw_pillar_segment(&pillar.bottom_rect(state.gap), false);
        }

        self.draw_bird(state);
    }

    /// One pillar segment plus its cap lip at the gap edge
    fn draw_pillar_segment(&self, rect: &Rect, cap_at_bottom: bool) {
        self.fill_rect(rect, PALETTE.pillar);

        let cap_y = if cap_at_bottom {
            f64::from(rect.max.y) - CAP_HEIGHT
        } else {
            f64::from(rect.min.y)
        };
        self.ctx.set_fill_style_str(PALETTE.pillar_cap);
        self.ctx.fill_rect(
            f64::from(rect.min.x) - CAP_OVERHANG,
            cap_y,
            f64::from(rect.width()) + CAP_OVERHANG * 2.0,
            CAP_HEIGHT,
        );
    }

    /// Bird body rotated around its center by the velocity tilt
    fn draw_bird(&self, state: &GameState) {
        let center = state.bird.rect().center();
        let angle = f64::from(state.bird.rotation_degrees()).to_radians();

        let w = f64::from(BIRD_WIDTH);
        let h = f64::from(BIRD_HEIGHT);

        self.ctx.save();
        let _ = self.ctx.translate(f64::from(center.x), f64::from(center.y));
        let _ = self.ctx.rotate(angle);

        self.ctx.set_fill_style_str(PALETTE.bird_body);
        self.ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);

        self.ctx.set_fill_style_str(PALETTE.bird_wing);
        self.ctx.fill_rect(-w / 2.0 + 3.0, -1.0, w * 0.45, h * 0.35);

        self.ctx.set_fill_style_str(PALETTE.bird_beak);
        self.ctx.fill_rect(w / 2.0 - 2.0, -3.0, 7.0, 6.0);

        self.ctx.set_fill_style_str(PALETTE.bird_eye);
        self.ctx.fill_rect(w / 2.0 - 11.0, -h / 2.0 + 5.0, 5.0, 5.0);

        self.ctx.restore();
    }

    fn fill_rect(&self, rect: &Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            f64::from(rect.min.x),
            f64::from(rect.min.y),
            f64::from(rect.width()),
            f64::from(rect.height()),
        );
    }
}
