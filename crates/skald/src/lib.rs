//! # skald — Batched 2D Sprite Rendering
//!
//! A small 2D renderer built around one idea: collect quads on the CPU,
//! flush them to the GPU in as few draw calls as possible. Rendering a
//! frame looks like this:
//!
//! ```no_run
//! # fn demo(
//! #     backend: skald::render2d::WgpuBackend,
//! #     texture: skald::render2d::Texture2d,
//! # ) {
//! use skald::camera::Camera2d;
//! use skald::math::{Color, Vec2};
//! use skald::render2d::SpriteBatch;
//!
//! let mut camera = Camera2d::new(800, 600);
//! let mut batch = SpriteBatch::new(backend);
//!
//! batch.begin(Some(&mut camera), None);
//! batch.draw(texture, Vec2::new(10.0, 10.0), Color::WHITE);
//! batch.end();
//! # }
//! ```
//!
//! Between `begin` and `end` the batch only touches the GPU when it must:
//! on a texture switch, when the batch fills up, or at `end`. Text, solid
//! rectangles, and particles all reduce to the same quad path.
//!
//! ## Modules
//!
//! - [`render2d`] — the sprite batch, fonts, and the GPU backend seam
//! - [`camera`] — 2D camera with cached view/projection matrices
//! - [`render`] — wgpu device, queue, and surface plumbing
//! - [`math`] — `Rect`, `Color`, and glam re-exports
//! - [`diag`] — frame statistics (draw calls, sprites, vertices)
//! - [`error`] — resource error type
//!
//! The GPU sits behind the [`render2d::RenderBackend`] trait, so all of
//! the batching, text, and camera logic is unit-tested without a device.

pub mod camera;
pub mod diag;
pub mod error;
pub mod math;
pub mod render;
pub mod render2d;

pub use camera::Camera2d;
pub use diag::RenderStats;
pub use error::RenderError;
pub use math::{Color, Rect, Vec2};
pub use render::GpuContext;
pub use render2d::{
    BitmapFont, DrawParams, Particle, SpriteBatch, Texture2d, WgpuBackend, MAX_BATCH_SIZE,
};
