mod app;
mod camera;
mod config;
mod constants;
mod detail;
mod error;
mod fit;
mod frame;
mod gallery;
mod input;
mod layout;
mod loader;
mod pan;
mod picking;
mod renderer;
mod tile;

use config::Manifest;
use constants::*;
use error::GalleryError;
use frame::Ticker;
use gallery::Gallery;
use glam::Vec2;
use input::WheelDelta;
use loader::LoaderEvent;
use renderer::Renderer;
use std::path::PathBuf;
use std::thread::JoinHandle;

use glutin::prelude::*;
use glutin::surface::WindowSurface;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

/// Set to serve puffin profiling data on the default puffin_http port
const PROFILE_ENV_VAR: &str = "DRIFT_GALLERY_PROFILE";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let _profiler = start_profiler();

    let manifest_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_PATH));
    let manifest = Manifest::load(&manifest_path)?;
    tracing::info!(path = %manifest_path.display(), images = manifest.images.len(), "manifest loaded");

    let event_loop = EventLoop::<LoaderEvent>::with_user_event().build()?;
    let mut app = App::new(manifest, event_loop.create_proxy());
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn start_profiler() -> Option<puffin_http::Server> {
    std::env::var_os(PROFILE_ENV_VAR)?;

    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            puffin::set_scopes_on(true);
            tracing::info!(%addr, "puffin profiler listening");
            Some(server)
        }
        Err(err) => {
            tracing::warn!(%addr, "failed to start puffin profiler: {}", err);
            None
        }
    }
}

struct App {
    manifest: Manifest,
    proxy: EventLoopProxy<LoaderEvent>,
    state: Option<AppState>,
    /// Startup failure reported after the event loop exits
    error: Option<GalleryError>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    egui_glow: EguiGlow,

    // Rendering
    renderer: Renderer,
    /// egui handles for loaded images, by tile index
    detail_textures: Vec<Option<(egui::TextureId, egui::Vec2)>>,

    // Gallery state
    gallery: Gallery,
    ticker: Ticker,
    scale_factor: f64,

    _decoder: JoinHandle<()>,
}

impl App {
    fn new(manifest: Manifest, proxy: EventLoopProxy<LoaderEvent>) -> Self {
        Self {
            manifest,
            proxy,
            state: None,
            error: None,
        }
    }

    fn init_state(&self, event_loop: &ActiveEventLoop) -> Result<AppState, GalleryError> {
        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = app::create_window(event_loop, &self.manifest.title)?;

        let renderer = Renderer::new(gl).map_err(GalleryError::Gl)?;
        let size = window.inner_size();
        renderer.resize(size.width as i32, size.height as i32);

        let scale_factor = window.scale_factor();
        let gallery = Gallery::new(&self.manifest, logical_size(size, scale_factor))?;

        let sources = gallery
            .tiles
            .iter()
            .map(|tile| (tile.index, tile.source.clone()))
            .collect();
        let decoder = loader::spawn_decoder(sources, self.proxy.clone())
            .map_err(|e| GalleryError::Window(format!("failed to start image decoder: {}", e)))?;

        Ok(AppState {
            window,
            gl_surface,
            gl_context,
            egui_glow,
            renderer,
            detail_textures: vec![None; gallery.tiles.len()],
            gallery,
            ticker: Ticker::new(),
            scale_factor,
            _decoder: decoder,
        })
    }
}

impl ApplicationHandler<LoaderEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                tracing::error!("startup failed: {}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // egui only needs the events to run the detail overlay; the gallery
        // applies its own gating while the overlay is open.
        let _ = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.renderer.resize(size.width as i32, size.height as i32);
                state
                    .gallery
                    .on_resize(logical_size(size, state.scale_factor));
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                state.scale_factor = scale_factor;
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(state.scale_factor);
                state.gallery.on_cursor_moved(Vec2::new(logical.x, logical.y));
            }
            WindowEvent::MouseInput {
                state: btn_state,
                button: MouseButton::Left,
                ..
            } => {
                let cursor = state.gallery.input.cursor;
                match btn_state {
                    ElementState::Pressed => state.gallery.on_pointer_down(cursor),
                    ElementState::Released => {
                        state.gallery.on_pointer_up(cursor);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let wheel = WheelDelta::from_winit(delta, state.scale_factor);
                state.gallery.on_wheel(&wheel);
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: LoaderEvent) {
        let Some(state) = &mut self.state else {
            return;
        };
        match event {
            LoaderEvent::Decoded(image) => state.attach_image(image),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn attach_image(&mut self, image: loader::DecodedImage) {
        let texture = match self.renderer.upload_texture(&image) {
            Ok(texture) => texture,
            Err(err) => {
                tracing::warn!(tile = image.index, "texture upload failed: {}", err);
                return;
            }
        };

        self.gallery
            .on_image_ready(image.index, image.width, image.height, texture);

        if let Some(slot) = self.detail_textures.get_mut(image.index) {
            let id = self.egui_glow.painter.register_native_texture(texture);
            *slot = Some((id, egui::vec2(image.width as f32, image.height as f32)));
        }
    }

    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();

        self.ticker.drive(&mut self.gallery);

        // Run UI
        let content = self.gallery.detail.tile().map(|index| {
            let texture = self.detail_textures.get(index).copied().flatten();
            detail::DetailContent {
                label: self.gallery.tiles[index].label(),
                texture: texture.map(|(id, _)| id),
                image_size: texture.map(|(_, size)| size),
            }
        });
        let view = &mut self.gallery.detail;
        self.egui_glow.run(&self.window, |ctx| {
            if let Some(content) = &content {
                detail::draw_detail_view(ctx, view, content);
            }
        });

        // Render
        self.renderer
            .render(&self.gallery.camera, self.gallery.draws());

        // Render egui
        self.egui_glow.paint(&self.window);

        // Swap buffers
        if let Err(err) = self.gl_surface.swap_buffers(&self.gl_context) {
            tracing::error!("failed to swap buffers: {}", err);
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.egui_glow.destroy();
    }
}

fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> Vec2 {
    let logical = size.to_logical::<f32>(scale_factor);
    Vec2::new(logical.width, logical.height)
}
