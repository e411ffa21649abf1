//! # SpriteBatch — Collect Quads, Flush Draw Calls
//!
//! This is the CPU-side heart of the renderer. Callers wrap a frame in
//! `begin`/`end` and issue any number of draw calls in between; the batch
//! accumulates one quad per call into a scratch vertex buffer and only
//! touches the GPU when it has to:
//!
//! ```text
//! begin(camera?, transform?)
//!   │
//!   ├─ draw(texture, ...)      append 4 vertices to the scratch buffer
//!   ├─ draw(texture, ...)      same texture → same pending batch
//!   ├─ draw(other, ...)        texture changed → flush, then append
//!   ├─ ...                     batch full (2048 sprites) → flush
//!   │
//! end()                        final flush
//! ```
//!
//! ## Why Batching Matters
//!
//! Every indexed draw carries driver overhead. A scene with 500
//! same-texture sprites is one upload and one draw call, not 500. The
//! price is a rule callers never see: a texture switch or a full buffer
//! forces an intermediate flush.
//!
//! ## Steady-State Allocation
//!
//! The scratch buffer is sized for the maximum batch up front and
//! overwritten in place every frame; the GPU-side vertex/index buffers and
//! the shading program live in the backend for the renderer's lifetime.
//! Nothing is reallocated per frame.
//!
//! ## Draw Order
//!
//! Sprites render strictly in call order — painter's algorithm, no
//! Z-sorting. `layer_depth` is accepted on [`DrawParams`] but does not
//! reorder draws.

use std::cell::RefCell;
use std::rc::Rc;

use crate::camera::Camera2d;
use crate::diag::RenderStats;
use crate::math::{Color, Mat4, Rect, Vec2};

use super::backend::{RenderBackend, Texture2d, TextureHandle};
use super::font::BitmapFont;
use super::vertex::{INDICES_PER_SPRITE, SpriteVertex, VERTICES_PER_SPRITE};
use super::Particle;

/// Maximum number of sprites accumulated before an automatic flush.
pub const MAX_BATCH_SIZE: usize = 2048;

/// Optional per-draw parameters for [`SpriteBatch::draw_ex`].
#[derive(Debug, Clone, Copy)]
pub struct DrawParams {
    /// Texel-space sub-region of the texture to sample. `None` samples the
    /// full texture.
    pub source: Option<Rect>,
    /// Rotation in radians around `origin`.
    pub rotation: f32,
    /// Pivot point in unscaled source pixels, relative to the top-left of
    /// the sampled region.
    pub origin: Vec2,
    /// Per-axis scale applied to the source region size.
    pub scale: Vec2,
    /// Accepted and carried per call, but draws are never reordered by it:
    /// sprites render strictly in call order.
    pub layer_depth: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            source: None,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            layer_depth: 0.0,
        }
    }
}

/// Batches sprite quads into the minimum number of GPU submissions.
///
/// Owns the scratch vertex buffer, the backend (and through it the GPU
/// buffers and shading program), and a private 1×1 white texture for the
/// rectangle-fill helpers. Caller-supplied textures and fonts are only
/// borrowed.
///
/// # Panics
///
/// Misusing the state machine is a caller bug and fails fast:
/// `begin` while already begun, or any draw call / `end` while not begun.
pub struct SpriteBatch<B: RenderBackend> {
    backend: B,
    /// Scratch vertex storage, `MAX_BATCH_SIZE * 4` slots, overwritten in
    /// place. Only the first `sprite_count * 4` entries are live.
    vertices: Vec<SpriteVertex>,
    sprite_count: usize,
    current_texture: Option<TextureHandle>,
    is_begun: bool,
    view: Mat4,
    projection: Mat4,
    white_texture: Texture2d,
    stats: Option<Rc<RefCell<RenderStats>>>,
}

impl<B: RenderBackend> SpriteBatch<B> {
    /// Create a batch drawing through `backend`.
    ///
    /// Creates the internal 1×1 opaque white texture used by
    /// [`draw_rectangle`](Self::draw_rectangle) and friends.
    pub fn new(mut backend: B) -> Self {
        let white_texture = backend.create_texture("white 1x1", 1, 1, &[255, 255, 255, 255]);
        Self {
            backend,
            vertices: vec![
                SpriteVertex {
                    position: [0.0; 2],
                    uv: [0.0; 2],
                    color: [0.0; 4],
                };
                MAX_BATCH_SIZE * VERTICES_PER_SPRITE
            ],
            sprite_count: 0,
            current_texture: None,
            is_begun: false,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            white_texture,
            stats: None,
        }
    }

    /// Attach a shared stats sink; one draw-call event is recorded per
    /// non-empty flush.
    pub fn set_stats(&mut self, stats: Rc<RefCell<RenderStats>>) {
        self.stats = Some(stats);
    }

    /// The internal 1×1 white texture (solid color fills).
    pub fn white_texture(&self) -> Texture2d {
        self.white_texture
    }

    /// Upload RGBA8 pixels as a new texture through the backend.
    pub fn create_texture(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Texture2d {
        self.backend.create_texture(label, width, height, rgba)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Start a batch. Snapshots the camera's view and projection matrices
    /// (identity without a camera); `transform` is an extra world-space
    /// transform folded into the view.
    pub fn begin(&mut self, camera: Option<&mut Camera2d>, transform: Option<Mat4>) {
        if self.is_begun {
            panic!("begin() cannot be called until end() has been called");
        }
        self.is_begun = true;
        self.sprite_count = 0;
        self.current_texture = None;

        let (view, projection) = match camera {
            Some(camera) => (camera.view_matrix(), camera.projection_matrix()),
            None => (Mat4::IDENTITY, Mat4::IDENTITY),
        };
        self.view = view * transform.unwrap_or(Mat4::IDENTITY);
        self.projection = projection;
    }

    /// End the batch: flush whatever is pending.
    pub fn end(&mut self) {
        if !self.is_begun {
            panic!("end() cannot be called before begin()");
        }
        self.flush();
        self.is_begun = false;
    }

    /// Draw the full texture at `position` with a tint.
    pub fn draw(&mut self, texture: Texture2d, position: Vec2, color: Color) {
        self.draw_ex(texture, position, color, DrawParams::default());
    }

    /// Draw a texel-space sub-region of the texture at `position`.
    pub fn draw_region(&mut self, texture: Texture2d, position: Vec2, source: Rect, color: Color) {
        self.draw_ex(
            texture,
            position,
            color,
            DrawParams {
                source: Some(source),
                ..Default::default()
            },
        );
    }

    /// Draw the full texture stretched into a destination rectangle.
    pub fn draw_to_rect(&mut self, texture: Texture2d, dest: Rect, color: Color) {
        self.draw_ex(
            texture,
            dest.position(),
            color,
            DrawParams {
                scale: Vec2::new(
                    dest.w / texture.width() as f32,
                    dest.h / texture.height() as f32,
                ),
                ..Default::default()
            },
        );
    }

    /// The canonical draw: one quad with source region, rotation, origin,
    /// and scale.
    ///
    /// Switching textures or filling the batch triggers an intermediate
    /// flush before the quad is appended.
    pub fn draw_ex(&mut self, texture: Texture2d, position: Vec2, color: Color, params: DrawParams) {
        if !self.is_begun {
            panic!("begin() must be called before draw()");
        }

        // Flush if the texture changes or the batch is full.
        if self.current_texture != Some(texture.handle()) || self.sprite_count >= MAX_BATCH_SIZE {
            self.flush();
            self.current_texture = Some(texture.handle());
        }

        let tex_w = texture.width() as f32;
        let tex_h = texture.height() as f32;

        // Sampled region in texel space; the full texture when absent.
        let src = params
            .source
            .unwrap_or_else(|| Rect::new(0.0, 0.0, tex_w, tex_h));

        // Normalized UVs.
        let u0 = src.x / tex_w;
        let v0 = src.y / tex_h;
        let u1 = (src.x + src.w) / tex_w;
        let v1 = (src.y + src.h) / tex_h;

        // Local-space corners relative to the origin pivot.
        let x0 = -params.origin.x * params.scale.x;
        let y0 = -params.origin.y * params.scale.y;
        let x1 = x0 + src.w * params.scale.x;
        let y1 = y0 + src.h * params.scale.y;

        // Rotate each corner and translate into world space, keeping the
        // BL, BR, TR, TL winding the static index pattern expects.
        let (sin, cos) = params.rotation.sin_cos();
        let corner = |x: f32, y: f32| {
            [
                position.x + x * cos - y * sin,
                position.y + x * sin + y * cos,
            ]
        };
        let p0 = corner(x0, y0);
        let p1 = corner(x1, y0);
        let p2 = corner(x1, y1);
        let p3 = corner(x0, y1);

        let color = color.to_array();
        let base = self.sprite_count * VERTICES_PER_SPRITE;
        self.vertices[base] = SpriteVertex { position: p0, uv: [u0, v0], color };
        self.vertices[base + 1] = SpriteVertex { position: p1, uv: [u1, v0], color };
        self.vertices[base + 2] = SpriteVertex { position: p2, uv: [u1, v1], color };
        self.vertices[base + 3] = SpriteVertex { position: p3, uv: [u0, v1], color };

        self.sprite_count += 1;
    }

    /// Draw text with the font's glyph atlas, one quad per visible glyph.
    ///
    /// Empty text, or a font whose atlas has not been loaded yet, is a
    /// silent no-op — assets still loading must not kill the frame loop.
    /// Characters without a glyph fall back to the font's default
    /// character, and are skipped when neither resolves.
    pub fn draw_string(&mut self, font: &BitmapFont, text: &str, position: Vec2, color: Color) {
        self.draw_string_scaled(font, text, position, color, 1.0);
    }

    /// [`draw_string`](Self::draw_string) with a uniform scale factor.
    pub fn draw_string_scaled(
        &mut self,
        font: &BitmapFont,
        text: &str,
        position: Vec2,
        color: Color,
        scale: f32,
    ) {
        if !self.is_begun {
            panic!("begin() must be called before draw_string()");
        }
        if text.is_empty() {
            return;
        }
        let Some(atlas) = font.atlas() else {
            // Font not ready yet (metrics-only stub) — nothing to render.
            return;
        };

        font.walk(text, scale, |glyph, pen| {
            if glyph.source.w <= 0.0 || glyph.source.h <= 0.0 {
                return;
            }
            self.draw_ex(
                atlas,
                position + pen + glyph.offset * scale,
                color,
                DrawParams {
                    source: Some(glyph.source),
                    scale: Vec2::splat(scale),
                    ..Default::default()
                },
            );
        });
    }

    /// Draw a filled rectangle using the internal white texture.
    pub fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        if !self.is_begun {
            panic!("begin() must be called before draw_rectangle()");
        }
        self.draw_ex(
            self.white_texture,
            rect.position(),
            color,
            DrawParams {
                scale: rect.size(),
                ..Default::default()
            },
        );
    }

    /// Draw a rectangle outline as four strips of `thickness` pixels.
    pub fn draw_rectangle_outline(&mut self, rect: Rect, color: Color, thickness: f32) {
        if !self.is_begun {
            panic!("begin() must be called before draw_rectangle_outline()");
        }
        // Top, bottom, left, right.
        self.draw_rectangle(Rect::new(rect.x, rect.y, rect.w, thickness), color);
        self.draw_rectangle(
            Rect::new(rect.x, rect.y + rect.h - thickness, rect.w, thickness),
            color,
        );
        self.draw_rectangle(Rect::new(rect.x, rect.y, thickness, rect.h), color);
        self.draw_rectangle(
            Rect::new(rect.x + rect.w - thickness, rect.y, thickness, rect.h),
            color,
        );
    }

    /// Draw every active particle as one centered quad of `texture`.
    ///
    /// Many small same-texture draws like these are exactly what the batch
    /// absorbs into a single flush.
    pub fn draw_particles<'a, I>(&mut self, particles: I, texture: Texture2d)
    where
        I: IntoIterator<Item = &'a Particle>,
    {
        if !self.is_begun {
            panic!("begin() must be called before draw_particles()");
        }
        let center = Vec2::new(texture.width() as f32 / 2.0, texture.height() as f32 / 2.0);
        for particle in particles {
            if !particle.active {
                continue;
            }
            self.draw_ex(
                texture,
                particle.position,
                particle.color,
                DrawParams {
                    rotation: particle.rotation,
                    origin: center,
                    scale: Vec2::splat(particle.size),
                    ..Default::default()
                },
            );
        }
    }

    /// Upload the pending quads and issue their draw call. No-op when the
    /// batch is empty.
    fn flush(&mut self) {
        if self.sprite_count == 0 {
            return;
        }
        let Some(texture) = self.current_texture else {
            return;
        };

        let live = self.sprite_count * VERTICES_PER_SPRITE;
        self.backend.upload_vertices(&self.vertices[..live]);
        self.backend.set_view_projection(self.view, self.projection);
        self.backend
            .draw_quads(texture, (self.sprite_count * INDICES_PER_SPRITE) as u32);

        if let Some(stats) = &self.stats {
            stats.borrow_mut().record_draw_call(self.sprite_count as u32);
        }

        self.sprite_count = 0;
        self.current_texture = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::super::backend::recording::RecordingBackend;
    use super::super::font::Glyph;
    use super::*;

    fn batch() -> SpriteBatch<RecordingBackend> {
        SpriteBatch::new(RecordingBackend::new())
    }

    #[test]
    fn same_texture_draws_are_one_flush() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 16, 16, &[0; 16 * 16 * 4]);

        batch.begin(None, None);
        for i in 0..100 {
            batch.draw(tex, Vec2::new(i as f32, 0.0), Color::WHITE);
        }
        batch.end();

        assert_eq!(batch.backend().draws.len(), 1);
        assert_eq!(batch.backend().draws[0], (tex.handle(), 600));
        assert_eq!(batch.backend().uploads[0].len(), 400);
    }

    #[test]
    fn texture_switches_force_flushes() {
        let mut batch = batch();
        let a = batch.create_texture("a", 8, 8, &[0; 8 * 8 * 4]);
        let b = batch.create_texture("b", 8, 8, &[0; 8 * 8 * 4]);

        batch.begin(None, None);
        batch.draw(a, Vec2::ZERO, Color::WHITE);
        batch.draw(a, Vec2::ZERO, Color::WHITE);
        batch.draw(b, Vec2::ZERO, Color::WHITE);
        batch.draw(a, Vec2::ZERO, Color::WHITE);
        batch.end();

        let draws = &batch.backend().draws;
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0], (a.handle(), 12));
        assert_eq!(draws[1], (b.handle(), 6));
        assert_eq!(draws[2], (a.handle(), 6));
    }

    #[test]
    fn full_batch_flushes_automatically_without_losing_sprites() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 4, 4, &[0; 4 * 4 * 4]);
        let total = MAX_BATCH_SIZE + 5;

        batch.begin(None, None);
        for _ in 0..total {
            batch.draw(tex, Vec2::ZERO, Color::WHITE);
        }
        batch.end();

        let draws = &batch.backend().draws;
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].1 as usize, MAX_BATCH_SIZE * INDICES_PER_SPRITE);
        assert_eq!(draws[1].1 as usize, 5 * INDICES_PER_SPRITE);

        let uploaded: usize = batch.backend().uploads.iter().map(|u| u.len()).sum();
        assert_eq!(uploaded, total * VERTICES_PER_SPRITE);
    }

    #[test]
    fn source_rect_normalizes_uvs() {
        let mut batch = batch();
        let tex = batch.create_texture("sheet", 128, 64, &[0; 128 * 64 * 4]);

        batch.begin(None, None);
        batch.draw_region(tex, Vec2::ZERO, Rect::new(32.0, 16.0, 64.0, 32.0), Color::WHITE);
        batch.end();

        let quad = &batch.backend().uploads[0];
        assert_eq!(quad[0].uv, [0.25, 0.25]);
        assert_eq!(quad[1].uv, [0.75, 0.25]);
        assert_eq!(quad[2].uv, [0.75, 0.75]);
        assert_eq!(quad[3].uv, [0.25, 0.75]);
    }

    #[test]
    fn unrotated_draw_emits_axis_aligned_quad() {
        // The full scenario: 64x32 texture at (10,10), all defaults.
        let mut batch = batch();
        let tex = batch.create_texture("tex", 64, 32, &[0; 64 * 32 * 4]);

        batch.begin(None, None);
        batch.draw(tex, Vec2::new(10.0, 10.0), Color::WHITE);
        batch.end();

        assert_eq!(batch.backend().draws.len(), 1);
        let quad = &batch.backend().uploads[0];
        assert_eq!(quad[0].position, [10.0, 10.0]);
        assert_eq!(quad[1].position, [74.0, 10.0]);
        assert_eq!(quad[2].position, [74.0, 42.0]);
        assert_eq!(quad[3].position, [10.0, 42.0]);
        assert_eq!(quad[0].uv, [0.0, 0.0]);
        assert_eq!(quad[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn draw_to_rect_stretches_texture_into_destination() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 64, 32, &[0; 64 * 32 * 4]);

        batch.begin(None, None);
        batch.draw_to_rect(tex, Rect::new(10.0, 20.0, 32.0, 8.0), Color::WHITE);
        batch.end();

        assert_eq!(batch.backend().draws.len(), 1);
        let quad = &batch.backend().uploads[0];
        assert_eq!(quad[0].position, [10.0, 20.0]);
        assert_eq!(quad[1].position, [42.0, 20.0]);
        assert_eq!(quad[2].position, [42.0, 28.0]);
        assert_eq!(quad[3].position, [10.0, 28.0]);
        // The full texture is sampled regardless of the stretch.
        assert_eq!(quad[0].uv, [0.0, 0.0]);
        assert_eq!(quad[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn rotation_spins_corners_around_origin() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 10, 10, &[0; 10 * 10 * 4]);

        batch.begin(None, None);
        batch.draw_ex(
            tex,
            Vec2::new(100.0, 100.0),
            Color::WHITE,
            DrawParams {
                rotation: std::f32::consts::FRAC_PI_2,
                origin: Vec2::new(5.0, 5.0),
                ..Default::default()
            },
        );
        batch.end();

        // Quarter turn around the center: BL corner (-5,-5) lands at (+5,-5).
        let quad = &batch.backend().uploads[0];
        let close = |p: [f32; 2], x: f32, y: f32| {
            assert!((p[0] - x).abs() < 1e-4 && (p[1] - y).abs() < 1e-4, "{p:?}");
        };
        close(quad[0].position, 105.0, 95.0);
        close(quad[1].position, 105.0, 105.0);
        close(quad[2].position, 95.0, 105.0);
        close(quad[3].position, 95.0, 95.0);
    }

    #[test]
    fn scale_and_origin_offset_the_quad() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 8, 8, &[0; 8 * 8 * 4]);

        batch.begin(None, None);
        batch.draw_ex(
            tex,
            Vec2::new(50.0, 50.0),
            Color::WHITE,
            DrawParams {
                origin: Vec2::new(4.0, 4.0),
                scale: Vec2::new(2.0, 3.0),
                ..Default::default()
            },
        );
        batch.end();

        let quad = &batch.backend().uploads[0];
        assert_eq!(quad[0].position, [42.0, 38.0]);
        assert_eq!(quad[2].position, [58.0, 62.0]);
    }

    #[test]
    fn color_is_carried_per_vertex() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 2, 2, &[0; 2 * 2 * 4]);

        batch.begin(None, None);
        batch.draw(tex, Vec2::ZERO, Color::rgba(0.5, 0.25, 1.0, 0.75));
        batch.end();

        for v in &batch.backend().uploads[0] {
            assert_eq!(v.color, [0.5, 0.25, 1.0, 0.75]);
        }
    }

    #[test]
    fn rectangle_helpers_use_white_texture_and_batch_together() {
        let mut batch = batch();
        let white = batch.white_texture();

        batch.begin(None, None);
        batch.draw_rectangle(Rect::new(0.0, 0.0, 20.0, 10.0), Color::RED);
        batch.draw_rectangle_outline(Rect::new(40.0, 40.0, 20.0, 20.0), Color::BLUE, 2.0);
        batch.end();

        // Fill + 4 outline strips, all white-texture: one flush.
        assert_eq!(batch.backend().draws.len(), 1);
        assert_eq!(batch.backend().draws[0], (white.handle(), 5 * 6));

        // The fill scaled the 1x1 white pixel to the rect size.
        let quad = &batch.backend().uploads[0][..4];
        assert_eq!(quad[0].position, [0.0, 0.0]);
        assert_eq!(quad[2].position, [20.0, 10.0]);
    }

    #[test]
    fn particles_skip_inactive_and_share_one_flush() {
        let mut batch = batch();
        let tex = batch.create_texture("spark", 8, 8, &[0; 8 * 8 * 4]);

        let particles: Vec<Particle> = (0..10)
            .map(|i| Particle {
                position: Vec2::new(i as f32 * 4.0, 0.0),
                rotation: 0.0,
                size: 1.0,
                color: Color::WHITE,
                active: i % 2 == 0,
            })
            .collect();

        batch.begin(None, None);
        batch.draw_particles(&particles, tex);
        batch.end();

        assert_eq!(batch.backend().draws.len(), 1);
        assert_eq!(batch.backend().draws[0].1, 5 * 6);

        // Particles draw centered on the texture midpoint.
        let quad = &batch.backend().uploads[0][..4];
        assert_eq!(quad[0].position, [-4.0, -4.0]);
        assert_eq!(quad[2].position, [4.0, 4.0]);
    }

    fn test_font(batch: &mut SpriteBatch<RecordingBackend>) -> BitmapFont {
        // Four 8x16 glyphs in a 64x16 atlas row, advance 8.
        let atlas = batch.create_texture("atlas", 64, 16, &[0; 64 * 16 * 4]);
        let mut glyphs = HashMap::new();
        for (i, ch) in ['A', 'B', 'C', '?'].into_iter().enumerate() {
            glyphs.insert(
                ch,
                Glyph {
                    source: Rect::new(i as f32 * 8.0, 0.0, 8.0, 16.0),
                    offset: Vec2::ZERO,
                    x_advance: 8.0,
                },
            );
        }
        let mut font = BitmapFont::new();
        font.line_spacing = 16.0;
        font.set_atlas(atlas, glyphs);
        font
    }

    #[test]
    fn draw_string_advances_pen_and_wraps_lines() {
        let mut batch = batch();
        let font = test_font(&mut batch);

        batch.begin(None, None);
        batch.draw_string(&font, "AB\nC", Vec2::new(100.0, 50.0), Color::WHITE);
        batch.end();

        // Three glyphs against one atlas texture: one flush.
        assert_eq!(batch.backend().draws.len(), 1);
        assert_eq!(batch.backend().draws[0].1, 3 * 6);

        let verts = &batch.backend().uploads[0];
        assert_eq!(verts[0].position, [100.0, 50.0]); // 'A'
        assert_eq!(verts[4].position, [108.0, 50.0]); // 'B'
        assert_eq!(verts[8].position, [100.0, 66.0]); // 'C' on the next line
    }

    #[test]
    fn draw_string_falls_back_to_default_character() {
        let mut batch = batch();
        let font = test_font(&mut batch);

        batch.begin(None, None);
        batch.draw_string(&font, "Z", Vec2::ZERO, Color::WHITE);
        batch.end();

        // 'Z' has no glyph; '?' (slot 3) is drawn in its place.
        let verts = &batch.backend().uploads[0];
        assert_eq!(verts[0].uv, [24.0 / 64.0, 0.0]);
    }

    #[test]
    fn draw_string_without_atlas_is_a_noop() {
        let mut batch = batch();
        let font = BitmapFont::fixed_width(16);

        batch.begin(None, None);
        batch.draw_string(&font, "hello", Vec2::ZERO, Color::WHITE);
        batch.end();

        assert!(batch.backend().draws.is_empty());
    }

    #[test]
    fn empty_string_is_a_noop() {
        let mut batch = batch();
        let font = test_font(&mut batch);

        batch.begin(None, None);
        batch.draw_string(&font, "", Vec2::ZERO, Color::WHITE);
        batch.end();

        assert!(batch.backend().draws.is_empty());
    }

    #[test]
    fn stats_sink_sees_one_event_per_flush() {
        let mut batch = batch();
        let stats = RenderStats::shared();
        batch.set_stats(stats.clone());
        let a = batch.create_texture("a", 8, 8, &[0; 8 * 8 * 4]);
        let b = batch.create_texture("b", 8, 8, &[0; 8 * 8 * 4]);

        batch.begin(None, None);
        batch.draw(a, Vec2::ZERO, Color::WHITE);
        batch.draw(b, Vec2::ZERO, Color::WHITE);
        batch.draw(b, Vec2::ZERO, Color::WHITE);
        batch.end();

        let stats = stats.borrow();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.sprites, 3);
        assert_eq!(stats.vertices, 12);
    }

    #[test]
    fn empty_batch_flushes_nothing() {
        let mut batch = batch();
        batch.begin(None, None);
        batch.end();
        assert!(batch.backend().draws.is_empty());
        assert!(batch.backend().uploads.is_empty());
    }

    #[test]
    fn begin_sets_identity_matrices_without_camera() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 4, 4, &[0; 4 * 4 * 4]);

        batch.begin(None, None);
        batch.draw(tex, Vec2::ZERO, Color::WHITE);
        batch.end();

        assert_eq!(batch.backend().uniforms[0], (Mat4::IDENTITY, Mat4::IDENTITY));
    }

    #[test]
    fn begin_snapshots_camera_matrices() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 4, 4, &[0; 4 * 4 * 4]);
        let mut camera = Camera2d::new(800, 600);
        camera.look_at(Vec2::new(32.0, 64.0));

        let expected_view = camera.view_matrix();
        let expected_proj = camera.projection_matrix();

        batch.begin(Some(&mut camera), None);
        batch.draw(tex, Vec2::ZERO, Color::WHITE);
        batch.end();

        assert_eq!(batch.backend().uniforms[0], (expected_view, expected_proj));
    }

    #[test]
    fn begin_folds_extra_transform_into_view() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 4, 4, &[0; 4 * 4 * 4]);
        let shake = Mat4::from_translation(glam::Vec3::new(3.0, -2.0, 0.0));

        batch.begin(None, Some(shake));
        batch.draw(tex, Vec2::ZERO, Color::WHITE);
        batch.end();

        assert_eq!(batch.backend().uniforms[0].0, shake);
    }

    #[test]
    #[should_panic(expected = "begin() must be called before draw()")]
    fn draw_before_begin_panics() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 4, 4, &[0; 4 * 4 * 4]);
        batch.draw(tex, Vec2::ZERO, Color::WHITE);
    }

    #[test]
    #[should_panic(expected = "begin() cannot be called until end() has been called")]
    fn nested_begin_panics() {
        let mut batch = batch();
        batch.begin(None, None);
        batch.begin(None, None);
    }

    #[test]
    #[should_panic(expected = "end() cannot be called before begin()")]
    fn end_without_begin_panics() {
        let mut batch = batch();
        batch.end();
    }

    #[test]
    fn batch_is_reusable_across_frames() {
        let mut batch = batch();
        let tex = batch.create_texture("tex", 4, 4, &[0; 4 * 4 * 4]);

        for _ in 0..3 {
            batch.begin(None, None);
            batch.draw(tex, Vec2::ZERO, Color::WHITE);
            batch.end();
        }

        assert_eq!(batch.backend().draws.len(), 3);
    }
}
