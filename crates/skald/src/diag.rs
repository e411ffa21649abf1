//! Render statistics counters.
//!
//! [`RenderStats`] is the optional performance sink for the sprite batch:
//! every non-empty flush records one draw call plus the sprite and vertex
//! counts it submitted. Hand the batch a shared handle via
//! [`SpriteBatch::set_stats`](crate::render2d::SpriteBatch::set_stats) and
//! call [`RenderStats::reset`] once per frame to get per-frame numbers.

use std::cell::RefCell;
use std::rc::Rc;

/// Per-frame render statistics, populated by the sprite batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub draw_calls: u32,
    pub sprites: u32,
    pub vertices: u32,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shareable handle suitable for [`SpriteBatch::set_stats`].
    ///
    /// [`SpriteBatch::set_stats`]: crate::render2d::SpriteBatch::set_stats
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Zero all counters. Call at the start of each frame.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one GPU draw call covering `sprites` quads.
    pub fn record_draw_call(&mut self, sprites: u32) {
        self.draw_calls += 1;
        self.sprites += sprites;
        self.vertices += sprites * 4;
    }
}
