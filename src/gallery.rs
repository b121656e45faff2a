//! Gallery state and event handlers.
//!
//! `Gallery` owns every piece of per-session state: the pan offsets, the
//! drag state machine, the tiles and the detail-view flag. Each handler is a
//! plain method applying one event. Input handlers write the pan target and
//! drag state; only `on_frame` writes `pan.current` and tile positions.

use crate::camera::Camera;
use crate::config::Manifest;
use crate::detail::DetailView;
use crate::error::GalleryError;
use crate::fit;
use crate::frame::{Frame, FrameCallback};
use crate::input::{InputTranslator, Release, WheelDelta};
use crate::layout::{self, GridConfig, GridLayout, ViewportBounds};
use crate::pan::PanState;
use crate::picking;
use crate::renderer::TileDraw;
use crate::tile::Tile;
use crate::constants::*;
use glam::Vec2;

pub struct Gallery {
    pub pan: PanState,
    pub input: InputTranslator,
    pub tiles: Vec<Tile>,
    pub bounds: ViewportBounds,
    pub camera: Camera,
    pub detail: DetailView,
    grid: GridConfig,
    settled: bool,
}

impl Gallery {
    /// Build the tile set from a manifest and lay it out for `viewport`.
    pub fn new(manifest: &Manifest, viewport: Vec2) -> Result<Self, GalleryError> {
        manifest.validate()?;

        let tiles = manifest
            .images
            .iter()
            .enumerate()
            .map(|(index, entry)| Tile::new(index, entry.src.clone(), entry.title.clone()))
            .collect();

        let mut gallery = Self {
            pan: PanState::new(),
            input: InputTranslator::new(manifest.wheel_calibration()),
            tiles,
            bounds: ViewportBounds::default(),
            camera: Camera::new(viewport.x, viewport.y),
            detail: DetailView::new(),
            grid: manifest.grid,
            settled: true,
        };
        gallery.on_resize(viewport);

        tracing::info!(tiles = gallery.tiles.len(), "gallery created");
        Ok(gallery)
    }

    pub fn on_pointer_down(&mut self, point: Vec2) {
        self.input.track_cursor(point);
        self.input.pointer_down(&self.pan, point);
    }

    pub fn on_cursor_moved(&mut self, point: Vec2) {
        self.input.track_cursor(point);
        let popup_open = self.detail.is_open();
        self.input.pointer_move(&mut self.pan, point, popup_open);
    }

    /// Finish a gesture. Returns the picked tile index when a click opened
    /// the detail view.
    pub fn on_pointer_up(&mut self, point: Vec2) -> Option<usize> {
        self.input.track_cursor(point);
        match self.input.pointer_up(point, self.detail.is_open()) {
            Release::Click(point) => {
                let index = picking::pick(point, &self.camera, &self.tiles)?.index;
                self.detail.open(index);
                tracing::info!(tile = index, label = %self.tiles[index].label(), "detail view opened");
                Some(index)
            }
            Release::Drag => {
                tracing::trace!(target_x = self.pan.target.x, target_y = self.pan.target.y, "drag finished");
                None
            }
            Release::Ignored => None,
        }
    }

    pub fn on_wheel(&mut self, wheel: &WheelDelta) {
        let popup_open = self.detail.is_open();
        self.input.wheel(&mut self.pan, wheel, popup_open);
    }

    /// Recompute cells, wrap bounds and fitted sizes. Safe at any time,
    /// including before any image has loaded or with a zero-sized viewport.
    pub fn on_resize(&mut self, viewport: Vec2) {
        self.camera.resize(viewport.x, viewport.y);

        let grid = GridLayout::compute(&self.grid, viewport, self.tiles.len());
        self.bounds = ViewportBounds::from_container(&grid.container);

        for (tile, cell) in self.tiles.iter_mut().zip(grid.cells) {
            tile.set_cell(cell, viewport);
            fit::fit(tile);
        }
        layout::place_all(&mut self.tiles, &self.pan, &self.bounds);

        tracing::debug!(
            width = viewport.x,
            height = viewport.y,
            max_x = self.bounds.max_x,
            max_y = self.bounds.max_y,
            "gallery resized"
        );
    }

    /// Image decode finished for `index`. Unknown indices are ignored.
    pub fn on_image_ready(
        &mut self,
        index: usize,
        natural_width: u32,
        natural_height: u32,
        texture: glow::Texture,
    ) {
        let Some(tile) = self.tiles.get_mut(index) else {
            tracing::warn!(tile = index, "image ready for unknown tile");
            return;
        };
        tile.texture = Some(texture);
        fit::on_image_ready(tile, natural_width as f32, natural_height as f32);
    }

    /// Per-tile render input for the current frame
    pub fn draws(&self) -> impl Iterator<Item = TileDraw> + '_ {
        self.tiles.iter().map(|tile| TileDraw {
            position: tile.position,
            mesh_size: tile.fitted_size,
            texture: tile.texture,
            resolution: tile.fitted_size,
            border_width: TILE_BORDER,
            motion_intensity: tile.motion_intensity,
        })
    }
}

impl FrameCallback for Gallery {
    fn on_frame(&mut self, frame: Frame) {
        puffin::profile_function!();

        self.pan.tick();
        layout::place_all(&mut self.tiles, &self.pan, &self.bounds);

        let settled = self.pan.is_settled();
        if settled != self.settled {
            self.settled = settled;
            tracing::trace!(frame = frame.index, dt = frame.dt, settled, "pan motion changed");
        }
    }
}
