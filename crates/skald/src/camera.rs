//! # Camera2d — View and Projection Math
//!
//! A 2D camera is nothing but matrix math: mutable position/zoom/rotation/
//! viewport state on one side, a view matrix and an orthographic projection
//! matrix on the other. There is no GPU dependency here — the
//! [`SpriteBatch`](crate::render2d::SpriteBatch) reads the matrices at
//! `begin` and forwards them to the backend as uniforms.
//!
//! ## Lazy Recomputation
//!
//! Both matrices are cached behind dirty flags. Setters only mark a matrix
//! dirty when the value actually changed, so a game loop that writes the
//! same position every frame pays nothing. Position, zoom, and rotation
//! invalidate the view matrix; viewport size invalidates the projection.
//!
//! ## Coordinate System
//!
//! The projection maps `[0, width] × [height, 0]` — Y grows downward, the
//! usual convention for 2D sprite work, where (0, 0) is the top-left of the
//! screen. The view matrix recenters the camera position on the middle of
//! the viewport, so `position` is the world point under the screen center.

use crate::math::{Mat4, Rect, Vec2};

/// Smallest allowed zoom factor. Anything below this would make the view
/// matrix non-invertible (or close enough to break `screen_to_world`).
const MIN_ZOOM: f32 = 0.1;

/// A 2D camera with position, zoom, and rotation.
///
/// Produces cached view and projection matrices for the sprite renderer.
#[derive(Debug, Clone)]
pub struct Camera2d {
    position: Vec2,
    zoom: f32,
    rotation: f32,
    viewport_width: u32,
    viewport_height: u32,
    view: Mat4,
    projection: Mat4,
    view_dirty: bool,
    projection_dirty: bool,
}

impl Camera2d {
    /// Create a camera at the origin with zoom 1 and no rotation.
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            viewport_width,
            viewport_height,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_dirty: true,
            projection_dirty: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the world position under the center of the screen.
    pub fn set_position(&mut self, position: Vec2) {
        if self.position != position {
            self.position = position;
            self.view_dirty = true;
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor. Clamped to a minimum of 0.1.
    pub fn set_zoom(&mut self, zoom: f32) {
        let zoom = zoom.max(MIN_ZOOM);
        if self.zoom != zoom {
            self.zoom = zoom;
            self.view_dirty = true;
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the camera rotation in radians.
    pub fn set_rotation(&mut self, rotation: f32) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.view_dirty = true;
        }
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Update the viewport size (call when the window is resized).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if self.viewport_width != width || self.viewport_height != height {
            self.viewport_width = width;
            self.viewport_height = height;
            self.projection_dirty = true;
            // Viewport size also feeds the recentering translation.
            self.view_dirty = true;
        }
    }

    /// Move the camera by a delta amount.
    pub fn move_by(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    /// Rotate the camera by a delta amount (in radians).
    pub fn rotate_by(&mut self, delta_radians: f32) {
        self.set_rotation(self.rotation + delta_radians);
    }

    /// Center the camera on a world position.
    pub fn look_at(&mut self, world_position: Vec2) {
        self.set_position(world_position);
    }

    /// The view matrix, recomputed only when camera state changed.
    ///
    /// Applies, in order: translate by `-position`, rotate, scale by zoom,
    /// then translate to the viewport center.
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.view_dirty {
            let recenter = Mat4::from_translation(glam::Vec3::new(
                self.viewport_width as f32 / 2.0,
                self.viewport_height as f32 / 2.0,
                0.0,
            ));
            let scale = Mat4::from_scale(glam::Vec3::new(self.zoom, self.zoom, 1.0));
            let rotate = Mat4::from_rotation_z(self.rotation);
            let translate =
                Mat4::from_translation(glam::Vec3::new(-self.position.x, -self.position.y, 0.0));
            self.view = recenter * scale * rotate * translate;
            self.view_dirty = false;
        }
        self.view
    }

    /// The orthographic projection matrix over `[0, width] × [height, 0]`
    /// (Y flipped, near −1, far 1), recomputed only when the viewport changed.
    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.projection_dirty {
            self.projection = Mat4::orthographic_rh(
                0.0,
                self.viewport_width as f32,
                self.viewport_height as f32,
                0.0,
                -1.0,
                1.0,
            );
            self.projection_dirty = false;
        }
        self.projection
    }

    /// Transform a point from world space to screen space.
    pub fn world_to_screen(&mut self, world_position: Vec2) -> Vec2 {
        let p = self.view_matrix().transform_point3(world_position.extend(0.0));
        Vec2::new(p.x, p.y)
    }

    /// Transform a point from screen space to world space.
    ///
    /// If the view matrix is not invertible (cannot happen while the zoom
    /// clamp holds), the input is returned unchanged.
    pub fn screen_to_world(&mut self, screen_position: Vec2) -> Vec2 {
        let view = self.view_matrix();
        if view.determinant().abs() <= f32::EPSILON {
            return screen_position;
        }
        let p = view.inverse().transform_point3(screen_position.extend(0.0));
        Vec2::new(p.x, p.y)
    }

    /// The axis-aligned world-space rectangle visible at the current camera
    /// state, from unprojecting the two opposite viewport corners.
    ///
    /// Collaborators use this for culling; the renderer itself does not.
    pub fn view_bounds(&mut self) -> Rect {
        let top_left = self.screen_to_world(Vec2::ZERO);
        let bottom_right = self.screen_to_world(Vec2::new(
            self.viewport_width as f32,
            self.viewport_height as f32,
        ));
        Rect::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn zoom_clamps_to_minimum() {
        let mut cam = Camera2d::new(800, 600);
        cam.set_zoom(0.0);
        assert_eq!(cam.zoom(), 0.1);
        cam.set_zoom(-5.0);
        assert_eq!(cam.zoom(), 0.1);
        cam.set_zoom(2.5);
        assert_eq!(cam.zoom(), 2.5);
    }

    #[test]
    fn camera_position_maps_to_screen_center() {
        let mut cam = Camera2d::new(800, 600);
        cam.look_at(Vec2::new(1000.0, -250.0));
        approx(cam.world_to_screen(Vec2::new(1000.0, -250.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn world_screen_round_trip() {
        let mut cam = Camera2d::new(800, 600);
        cam.set_position(Vec2::new(42.0, 17.0));
        cam.set_zoom(1.7);
        cam.set_rotation(0.4);
        let world = Vec2::new(-35.0, 128.0);
        let screen = cam.world_to_screen(world);
        approx(cam.screen_to_world(screen), world);
    }

    #[test]
    fn default_view_is_centering_translation() {
        let mut cam = Camera2d::new(640, 480);
        // position (0,0), zoom 1, no rotation: world origin lands mid-screen
        approx(cam.world_to_screen(Vec2::ZERO), Vec2::new(320.0, 240.0));
        approx(cam.world_to_screen(Vec2::new(10.0, 20.0)), Vec2::new(330.0, 260.0));
    }

    #[test]
    fn zoom_scales_about_camera_position() {
        let mut cam = Camera2d::new(800, 600);
        cam.set_zoom(2.0);
        // 10 world units right of the camera is 20 pixels right of center
        approx(cam.world_to_screen(Vec2::new(10.0, 0.0)), Vec2::new(420.0, 300.0));
    }

    #[test]
    fn view_bounds_cover_viewport_at_default_zoom() {
        let mut cam = Camera2d::new(800, 600);
        let bounds = cam.view_bounds();
        assert!((bounds.w - 800.0).abs() < 1e-3);
        assert!((bounds.h - 600.0).abs() < 1e-3);
        assert!((bounds.x + 400.0).abs() < 1e-3);
        assert!((bounds.y + 300.0).abs() < 1e-3);
    }

    #[test]
    fn view_bounds_shrink_with_zoom() {
        let mut cam = Camera2d::new(800, 600);
        cam.set_zoom(2.0);
        let bounds = cam.view_bounds();
        assert!((bounds.w - 400.0).abs() < 1e-3);
        assert!((bounds.h - 300.0).abs() < 1e-3);
    }

    #[test]
    fn setters_leave_cache_valid() {
        let mut cam = Camera2d::new(800, 600);
        let before = cam.view_matrix();
        // Writing the same value must not change the matrix.
        cam.set_position(Vec2::ZERO);
        assert_eq!(before, cam.view_matrix());
        cam.move_by(Vec2::new(100.0, 0.0));
        assert_ne!(before, cam.view_matrix());
    }

    #[test]
    fn resize_updates_projection() {
        let mut cam = Camera2d::new(800, 600);
        let before = cam.projection_matrix();
        cam.set_viewport(1024, 768);
        assert_ne!(before, cam.projection_matrix());
    }
}
