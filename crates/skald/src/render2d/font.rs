//! # BitmapFont — Glyph Atlases and Text Metrics
//!
//! A font here is a texture atlas plus a table mapping characters to
//! [`Glyph`] entries (source rectangle, render offset, horizontal
//! advance). Text rendering and text measurement walk the same pen over
//! that table, so `measure` always agrees with what `draw_string` puts on
//! screen.
//!
//! Fonts come from two places:
//!
//! - [`BitmapFont::from_ttf_bytes`] rasterizes the printable ASCII range
//!   of a TTF/OTF with `fontdue` into a 512×512 atlas.
//! - [`BitmapFont::fixed_width`] builds metrics for a uniform-grid font
//!   with no atlas attached — useful as a placeholder while real assets
//!   load, since a font without an atlas still measures correctly and
//!   draws nothing.
//!
//! Characters missing from the table fall back to the font's
//! `default_char`; if that is missing too, the character is skipped.

use std::collections::HashMap;

use crate::error::RenderError;
use crate::math::{Rect, Vec2};

use super::backend::RenderBackend;
use super::batch::SpriteBatch;
use super::Texture2d;

/// Pixel dimensions of the atlas produced by TTF rasterization.
const ATLAS_SIZE: u32 = 512;

/// One character's entry in the font table.
#[derive(Debug, Clone, Copy)]
pub struct Glyph {
    /// Texel-space region of the atlas holding this character.
    pub source: Rect,
    /// Offset from the pen position to the glyph quad's top-left, in
    /// unscaled pixels.
    pub offset: Vec2,
    /// Horizontal pen advance after this character, before `spacing`.
    pub x_advance: f32,
}

/// A glyph table with optional atlas texture and line metrics.
pub struct BitmapFont {
    glyphs: HashMap<char, Glyph>,
    atlas: Option<Texture2d>,
    /// Vertical pen advance per line break, in unscaled pixels.
    pub line_spacing: f32,
    /// Extra horizontal advance added after every character.
    pub spacing: f32,
    /// Substitute for characters missing from the table.
    pub default_char: char,
}

impl BitmapFont {
    /// An empty font: no glyphs, no atlas, zero metrics.
    pub fn new() -> Self {
        Self {
            glyphs: HashMap::new(),
            atlas: None,
            line_spacing: 0.0,
            spacing: 0.0,
            default_char: '?',
        }
    }

    /// Metrics for a uniform-grid font covering printable ASCII, with no
    /// atlas attached. Glyph cells are `font_size / 2` wide and
    /// `font_size` tall, laid out 16 per row.
    pub fn fixed_width(font_size: u32) -> Self {
        let char_width = font_size / 2;
        let mut glyphs = HashMap::new();
        for code in 32u32..=126 {
            let index = code - 32;
            let (col, row) = (index % 16, index / 16);
            glyphs.insert(
                char::from_u32(code).unwrap(),
                Glyph {
                    source: Rect::new(
                        (col * char_width) as f32,
                        (row * font_size) as f32,
                        char_width as f32,
                        font_size as f32,
                    ),
                    offset: Vec2::ZERO,
                    x_advance: (char_width + 1) as f32,
                },
            );
        }
        Self {
            glyphs,
            atlas: None,
            line_spacing: font_size as f32,
            spacing: 1.0,
            default_char: '?',
        }
    }

    /// Rasterize the printable ASCII range of a TTF/OTF into an atlas and
    /// return a ready-to-draw font. Glyphs that no longer fit in the
    /// atlas are logged and skipped.
    pub fn from_ttf_bytes<B: RenderBackend>(
        batch: &mut SpriteBatch<B>,
        bytes: &[u8],
        px: f32,
    ) -> Result<Self, RenderError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| RenderError::Font(e.to_string()))?;
        let line_metrics = font
            .horizontal_line_metrics(px)
            .ok_or_else(|| RenderError::Font("font has no horizontal line metrics".into()))?;
        let ascent = line_metrics.ascent;

        let mut pixels = vec![0u8; (ATLAS_SIZE * ATLAS_SIZE * 4) as usize];
        let mut glyphs = HashMap::new();

        // Shelf packing with a 1px gutter between glyphs.
        let mut cursor_x = 1u32;
        let mut cursor_y = 1u32;
        let mut row_height = 0u32;

        for code in 32u8..=126 {
            let ch = code as char;
            let (metrics, coverage) = font.rasterize(ch, px);
            let (gw, gh) = (metrics.width as u32, metrics.height as u32);

            if cursor_x + gw + 1 > ATLAS_SIZE {
                cursor_x = 1;
                cursor_y += row_height + 1;
                row_height = 0;
            }
            if cursor_y + gh + 1 > ATLAS_SIZE {
                log::warn!("font atlas full at {ch:?}, remaining glyphs skipped");
                break;
            }

            // White pixels, coverage as alpha.
            for y in 0..metrics.height {
                for x in 0..metrics.width {
                    let alpha = coverage[y * metrics.width + x];
                    let px_x = cursor_x as usize + x;
                    let px_y = cursor_y as usize + y;
                    let at = (px_y * ATLAS_SIZE as usize + px_x) * 4;
                    pixels[at] = 255;
                    pixels[at + 1] = 255;
                    pixels[at + 2] = 255;
                    pixels[at + 3] = alpha;
                }
            }

            glyphs.insert(
                ch,
                Glyph {
                    source: Rect::new(cursor_x as f32, cursor_y as f32, gw as f32, gh as f32),
                    // fontdue reports baseline-relative bounds, y-up; convert
                    // to a y-down offset from the line's top.
                    offset: Vec2::new(
                        metrics.xmin as f32,
                        ascent - metrics.height as f32 - metrics.ymin as f32,
                    ),
                    x_advance: metrics.advance_width,
                },
            );

            cursor_x += gw + 1;
            row_height = row_height.max(gh);
        }

        log::debug!("rasterized {} glyphs at {px}px", glyphs.len());

        let atlas = batch.create_texture("font atlas", ATLAS_SIZE, ATLAS_SIZE, &pixels);
        Ok(Self {
            glyphs,
            atlas: Some(atlas),
            line_spacing: line_metrics.new_line_size,
            spacing: 0.0,
            default_char: '?',
        })
    }

    /// Attach an atlas texture and its glyph table.
    pub fn set_atlas(&mut self, atlas: Texture2d, glyphs: HashMap<char, Glyph>) {
        self.atlas = Some(atlas);
        self.glyphs = glyphs;
    }

    /// The atlas texture, if one has been loaded.
    pub fn atlas(&self) -> Option<Texture2d> {
        self.atlas
    }

    /// Look up a character, falling back to `default_char`.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&self.default_char))
    }

    /// Measure `text` at scale 1.
    pub fn measure(&self, text: &str) -> Vec2 {
        self.measure_scaled(text, 1.0)
    }

    /// Bounding size of `text`: the widest line by the number of lines
    /// times `line_spacing`. Empty text measures zero.
    pub fn measure_scaled(&self, text: &str, scale: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let mut max_width = 0.0f32;
        self.walk(text, scale, |glyph, pen| {
            max_width = max_width.max(pen.x + (glyph.x_advance + self.spacing) * scale);
        });
        let lines = 1 + text.chars().filter(|&c| c == '\n').count();
        Vec2::new(max_width, lines as f32 * self.line_spacing * scale)
    }

    /// Walk the pen over `text`, invoking `f` with each resolvable glyph
    /// and the pen position at which it starts. `'\n'` resets the pen to
    /// the line start and advances a line. Rendering and measurement both
    /// go through here so they cannot disagree.
    pub(crate) fn walk<F: FnMut(&Glyph, Vec2)>(&self, text: &str, scale: f32, mut f: F) {
        let mut pen = Vec2::ZERO;
        for ch in text.chars() {
            if ch == '\n' {
                pen.x = 0.0;
                pen.y += self.line_spacing * scale;
                continue;
            }
            let Some(glyph) = self.glyph(ch) else {
                continue;
            };
            f(glyph, pen);
            pen.x += (glyph.x_advance + self.spacing) * scale;
        }
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new()
    }
}
