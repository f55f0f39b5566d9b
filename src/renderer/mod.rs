//! Rendering module
//!
//! The simulation only ever sees a `RenderSink`. The WebGPU implementation
//! draws the whole scene in one fragment shader using SDFs.

pub mod scene;
pub mod sdf_pipeline;

pub use scene::{Scene, TextOverlay, score_text};
pub use sdf_pipeline::SdfRenderState;

/// Anything that can present a frame. Failures stay inside the sink.
pub trait RenderSink {
    fn draw(&mut self, scene: &Scene);
}

/// Discards every frame (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn draw(&mut self, _scene: &Scene) {}
}
