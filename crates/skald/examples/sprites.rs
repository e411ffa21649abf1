//! Batched sprite rendering demo: a grid of tinted checkerboard sprites,
//! one spinning sprite, rectangle shapes, and a small particle burst —
//! all submitted in a handful of draw calls. Per-second render stats are
//! logged at info level.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use skald::camera::Camera2d;
use skald::diag::RenderStats;
use skald::math::{Color, Rect, Vec2};
use skald::render::GpuContext;
use skald::render2d::{DrawParams, Particle, SpriteBatch, Texture2d, WgpuBackend};

/// 8x8 two-tone checkerboard, 64x64 pixels.
fn checkerboard_pixels() -> Vec<u8> {
    let mut pixels = Vec::with_capacity(64 * 64 * 4);
    for y in 0..64 {
        for x in 0..64 {
            let light = ((x / 8) + (y / 8)) % 2 == 0;
            let v = if light { 230 } else { 60 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    pixels
}

struct Demo {
    window: Arc<Window>,
    batch: SpriteBatch<WgpuBackend>,
    camera: Camera2d,
    checker: Texture2d,
    stats: std::rc::Rc<std::cell::RefCell<RenderStats>>,
    particles: Vec<Particle>,
    time: f32,
    frames: u32,
}

impl Demo {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let backend = WgpuBackend::new(gpu).expect("pipeline creation failed");
        let mut batch = SpriteBatch::new(backend);

        let checker = batch.create_texture("checkerboard", 64, 64, &checkerboard_pixels());

        let stats = RenderStats::shared();
        batch.set_stats(stats.clone());

        let size = window.inner_size();
        let mut camera = Camera2d::new(size.width, size.height);
        camera.look_at(Vec2::ZERO);

        let particles = (0..64)
            .map(|i| {
                let angle = i as f32 / 64.0 * std::f32::consts::TAU;
                Particle {
                    position: Vec2::from_angle(angle) * 150.0,
                    rotation: angle,
                    size: 0.25,
                    color: Color::rgba(1.0, 0.6, 0.2, 0.8),
                    active: i % 3 != 0,
                }
            })
            .collect();

        Self {
            window,
            batch,
            camera,
            checker,
            stats,
            particles,
            time: 0.0,
            frames: 0,
        }
    }

    fn render(&mut self) {
        self.time += 1.0 / 60.0;
        self.stats.borrow_mut().reset();

        if let Err(e) = self
            .batch
            .backend_mut()
            .begin_frame(Color::rgb(0.05, 0.05, 0.08))
        {
            log::warn!("skipping frame: {e}");
            return;
        }

        self.camera.set_zoom(1.0 + 0.25 * (self.time * 0.5).sin());

        self.batch.begin(Some(&mut self.camera), None);

        // A 6x4 grid of tinted sprites, all one flush.
        for gy in 0..4 {
            for gx in 0..6 {
                self.batch.draw(
                    self.checker,
                    Vec2::new(gx as f32 * 80.0 - 240.0, gy as f32 * 80.0 - 160.0),
                    Color::rgb(0.4 + gx as f32 * 0.1, 0.4 + gy as f32 * 0.15, 0.9),
                );
            }
        }

        // One spinning sprite around its center.
        self.batch.draw_ex(
            self.checker,
            Vec2::ZERO,
            Color::WHITE,
            DrawParams {
                rotation: self.time,
                origin: Vec2::new(32.0, 32.0),
                scale: Vec2::splat(1.5),
                ..Default::default()
            },
        );

        self.batch
            .draw_rectangle(Rect::new(-300.0, -220.0, 600.0, 8.0), Color::rgb(0.9, 0.3, 0.3));
        self.batch.draw_rectangle_outline(
            Rect::new(-310.0, -230.0, 620.0, 460.0),
            Color::rgba(1.0, 1.0, 1.0, 0.4),
            2.0,
        );

        self.batch.draw_particles(&self.particles, self.checker);

        self.batch.end();
        self.batch.backend_mut().end_frame();

        self.frames += 1;
        if self.frames % 60 == 0 {
            let stats = self.stats.borrow();
            log::info!(
                "{} draw calls, {} sprites, {} vertices",
                stats.draw_calls,
                stats.sprites,
                stats.vertices
            );
        }
    }
}

#[derive(Default)]
struct App {
    demo: Option<Demo>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.demo.is_none() {
            let window = Arc::new(
                event_loop
                    .create_window(
                        Window::default_attributes()
                            .with_title("skald - sprites")
                            .with_inner_size(winit::dpi::LogicalSize::new(800, 600)),
                    )
                    .expect("failed to create window"),
            );
            self.demo = Some(Demo::new(window));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(demo) = self.demo.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                demo.batch.backend_mut().resize(size.width, size.height);
                demo.camera.set_viewport(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                demo.render();
                demo.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut App::default()).expect("event loop error");
}
