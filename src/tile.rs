//! Gallery tiles and their layout cells.

use crate::constants::*;
use glam::Vec2;
use std::path::PathBuf;

/// Axis-aligned rectangle in screen space (origin top-left, y down)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when both sides are positive and finite
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// One image tile of the gallery.
///
/// Tiles are created once from the manifest and never reordered; only the
/// derived fields below `cell` change over the session.
#[derive(Clone, Debug)]
pub struct Tile {
    pub index: usize,
    pub source: PathBuf,
    pub title: Option<String>,
    /// Vertical pan multiplier, fixed at creation
    pub row_parallax: f32,

    /// Source-layout cell, recomputed on resize
    pub cell: Rect,
    /// Distance of the cell centre from the viewport centre at rest
    pub offset: Vec2,
    /// Set once the image has loaded
    pub image_aspect: Option<f32>,
    /// Mesh size in pixels (border included once fitted)
    pub fitted_size: Vec2,
    /// Centre of the mesh in world space (origin at viewport centre, y up)
    pub position: Vec2,
    /// Squash amount propagated from the pan controller
    pub motion_intensity: f32,
    pub texture: Option<glow::Texture>,
}

impl Tile {
    pub fn new(index: usize, source: PathBuf, title: Option<String>) -> Self {
        Self {
            index,
            source,
            title,
            row_parallax: row_parallax(index),
            cell: Rect::default(),
            offset: Vec2::ZERO,
            image_aspect: None,
            fitted_size: Vec2::ZERO,
            position: Vec2::ZERO,
            motion_intensity: 0.0,
            texture: None,
        }
    }

    /// Move the tile to a new layout cell and recompute its rest offset.
    pub fn set_cell(&mut self, cell: Rect, viewport: Vec2) {
        self.cell = cell;
        self.offset = cell.center() - viewport / 2.0;
        if self.image_aspect.is_none() {
            self.fitted_size = cell.size();
        }
    }

    /// Display name for the detail view
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self
                .source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("Image {}", self.index + 1)),
        }
    }
}

/// Pan multiplier for a tile: 1.0, 0.9, 0.8, 0.7, 0.6 repeating.
pub fn row_parallax(index: usize) -> f32 {
    1.0 - (index % PARALLAX_BANDS) as f32 * PARALLAX_STEP
}
