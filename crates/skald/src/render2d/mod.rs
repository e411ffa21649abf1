//! # 2D Rendering — Batched Sprites, Text, and Shapes
//!
//! Everything on screen goes through one [`SpriteBatch`]: textured quads,
//! glyph quads for text, solid rectangles via an internal white texture,
//! and particle quads. The batch accumulates geometry on the CPU and talks
//! to the GPU only through the [`RenderBackend`] seam, so the whole module
//! is unit-testable without a device.
//!
//! - [`batch`] — the `begin`/`draw`/`end` state machine and flush rules
//! - [`font`] — bitmap fonts: glyph tables, measurement, TTF rasterization
//! - [`backend`] — the injected GPU trait and texture handles
//! - [`wgpu_backend`] — the concrete wgpu implementation
//! - [`vertex`] — vertex layout and the static quad index pattern

pub mod backend;
pub mod batch;
pub mod font;
pub mod vertex;
pub mod wgpu_backend;

pub use backend::{RenderBackend, Texture2d, TextureHandle};
pub use batch::{DrawParams, SpriteBatch, MAX_BATCH_SIZE};
pub use font::{BitmapFont, Glyph};
pub use vertex::SpriteVertex;
pub use wgpu_backend::WgpuBackend;

use crate::math::{Color, Vec2};

/// One particle as the batch consumes it. Simulation is the caller's
/// concern; the renderer only reads these fields.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World-space center of the particle quad.
    pub position: Vec2,
    /// Rotation in radians around the center.
    pub rotation: f32,
    /// Uniform scale applied to the particle texture.
    pub size: f32,
    pub color: Color,
    /// Inactive particles are skipped without emitting a quad.
    pub active: bool,
}
