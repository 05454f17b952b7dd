//! Canvas rendering module
//!
//! Draws the whole frame from simulation state on a 2D context.

pub mod canvas;

pub use canvas::CanvasRenderer;
