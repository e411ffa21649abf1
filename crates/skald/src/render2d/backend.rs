//! # Backend — The Injected GPU Seam
//!
//! The sprite batch never talks to a graphics API directly. Everything it
//! needs from the GPU is four operations on the [`RenderBackend`] trait:
//! create a texture, overwrite the persistent vertex buffer, set the camera
//! uniforms, and issue one indexed draw against a bound texture. The
//! concrete [`WgpuBackend`](super::WgpuBackend) implements these with wgpu;
//! tests implement them with an in-memory recorder. Keeping the seam here —
//! rather than reaching for ambient global GL-style state — is what makes
//! the whole `begin`/`draw`/`end` state machine testable without a GPU.
//!
//! ## The Handle Pattern
//!
//! Callers hold a [`Texture2d`]: a `Copy` value pairing a [`TextureHandle`]
//! (an index into the backend's texture registry) with the pixel
//! dimensions the batch needs for UV math. The backend owns the actual GPU
//! resources; the handle is just a `usize`. Batching compares handles to
//! decide when a flush is needed.

use crate::math::Mat4;

use super::vertex::SpriteVertex;

/// Handle to a texture owned by the backend's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) usize);

/// A GPU texture as seen by callers: identity plus dimensions.
///
/// This is the whole texture contract the renderer depends on — how the
/// pixels got into the backend is none of its business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture2d {
    handle: TextureHandle,
    width: u32,
    height: u32,
}

impl Texture2d {
    pub(crate) fn new(handle: TextureHandle, width: u32, height: u32) -> Self {
        Self { handle, width, height }
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// The graphics operations the sprite batch draws through.
///
/// The vertex and index buffers and the shading program are created once
/// when the backend is constructed and live for its lifetime; uploads
/// overwrite them in place.
pub trait RenderBackend {
    /// Upload RGBA8 pixel data as a new texture and return its handle.
    fn create_texture(&mut self, label: &str, width: u32, height: u32, rgba: &[u8]) -> Texture2d;

    /// Overwrite the first `vertices.len()` slots of the persistent GPU
    /// vertex buffer.
    fn upload_vertices(&mut self, vertices: &[SpriteVertex]);

    /// Set the view and projection uniforms for subsequent draws.
    fn set_view_projection(&mut self, view: Mat4, projection: Mat4);

    /// Bind the shading program and `texture`, then issue one indexed draw
    /// call covering `index_count` indices of the static quad pattern.
    fn draw_quads(&mut self, texture: TextureHandle, index_count: u32);
}
