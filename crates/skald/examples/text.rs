//! Text rendering demo: rasterizes a TTF into a glyph atlas and draws
//! multi-line, scaled, and measured text.
//!
//! Usage: `cargo run --example text -- path/to/font.ttf`

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use skald::camera::Camera2d;
use skald::math::{Color, Rect, Vec2};
use skald::render::GpuContext;
use skald::render2d::{BitmapFont, SpriteBatch, WgpuBackend};

struct Demo {
    window: Arc<Window>,
    batch: SpriteBatch<WgpuBackend>,
    camera: Camera2d,
    font: BitmapFont,
}

impl Demo {
    fn new(window: Arc<Window>, ttf: &[u8]) -> Self {
        let gpu = GpuContext::new(window.clone());
        let backend = WgpuBackend::new(gpu).expect("pipeline creation failed");
        let mut batch = SpriteBatch::new(backend);

        let font = BitmapFont::from_ttf_bytes(&mut batch, ttf, 32.0)
            .expect("failed to rasterize font");

        let size = window.inner_size();
        Self {
            window,
            batch,
            camera: Camera2d::new(size.width, size.height),
            font,
        }
    }

    fn render(&mut self) {
        if let Err(e) = self
            .batch
            .backend_mut()
            .begin_frame(Color::rgb(0.08, 0.08, 0.1))
        {
            log::warn!("skipping frame: {e}");
            return;
        }

        self.camera.look_at(Vec2::new(400.0, 300.0));
        self.batch.begin(Some(&mut self.camera), None);

        let text = "The quick brown fox\njumps over the lazy dog.";
        let origin = Vec2::new(60.0, 80.0);

        // Measured backdrop behind the text block.
        let size = self.font.measure(text);
        self.batch.draw_rectangle(
            Rect::new(origin.x - 8.0, origin.y - 8.0, size.x + 16.0, size.y + 16.0),
            Color::rgba(0.2, 0.2, 0.3, 0.8),
        );
        self.batch
            .draw_string(&self.font, text, origin, Color::WHITE);

        self.batch.draw_string_scaled(
            &self.font,
            "scaled 2x",
            Vec2::new(60.0, 250.0),
            Color::rgb(1.0, 0.8, 0.3),
            2.0,
        );
        self.batch.draw_string(
            &self.font,
            "missing glyph: \u{263a}",
            Vec2::new(60.0, 350.0),
            Color::rgb(0.6, 0.9, 0.6),
        );

        self.batch.end();
        self.batch.backend_mut().end_frame();
    }
}

struct App {
    ttf: Vec<u8>,
    demo: Option<Demo>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.demo.is_none() {
            let window = Arc::new(
                event_loop
                    .create_window(
                        Window::default_attributes()
                            .with_title("skald - text")
                            .with_inner_size(winit::dpi::LogicalSize::new(800, 600)),
                    )
                    .expect("failed to create window"),
            );
            self.demo = Some(Demo::new(window, &self.ttf));
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

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: text <path-to-font.ttf>");
        std::process::exit(1);
    };
    let ttf = std::fs::read(&path).unwrap_or_else(|e| {
        eprintln!("cannot read {path}: {e}");
        std::process::exit(1);
    });

    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut App { ttf, demo: None })
        .expect("event loop error");
}
