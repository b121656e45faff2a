//! Contain-fit of a tile's image inside its layout cell.

use crate::constants::*;
use crate::tile::Tile;
use glam::Vec2;

/// Record the natural image size and refit. Zero or non-finite sizes are
/// ignored and the tile keeps its current size.
pub fn on_image_ready(tile: &mut Tile, natural_width: f32, natural_height: f32) {
    let aspect = natural_width / natural_height;
    if !aspect.is_finite() || aspect <= 0.0 {
        tracing::warn!(
            tile = tile.index,
            natural_width,
            natural_height,
            "ignoring image with degenerate size"
        );
        return;
    }
    tile.image_aspect = Some(aspect);
    fit(tile);
}

/// Recompute the mesh size. No-op until both the cell and the image aspect
/// are known.
pub fn fit(tile: &mut Tile) {
    let Some(image_aspect) = tile.image_aspect else {
        return;
    };
    if !tile.cell.has_area() {
        return;
    }
    tile.fitted_size = contain(tile.cell.size(), image_aspect) + Vec2::splat(TILE_BORDER * 2.0);
}

/// Largest size with `image_aspect` that fits inside `cell`.
pub fn contain(cell: Vec2, image_aspect: f32) -> Vec2 {
    let cell_aspect = cell.x / cell.y;
    if image_aspect > cell_aspect {
        Vec2::new(cell.x, cell.x / image_aspect)
    } else {
        Vec2::new(cell.y * image_aspect, cell.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Rect;
    use std::path::PathBuf;

    fn tile_with_cell(cell: Rect) -> Tile {
        let mut tile = Tile::new(0, PathBuf::from("t.png"), None);
        tile.set_cell(cell, Vec2::new(1000.0, 800.0));
        tile
    }

    #[test]
    fn test_wide_image_fills_width() {
        // 400x200 image in a 200x200 cell
        let mut tile = tile_with_cell(Rect::new(0.0, 0.0, 200.0, 200.0));
        on_image_ready(&mut tile, 400.0, 200.0);

        assert_eq!(contain(Vec2::new(200.0, 200.0), 2.0), Vec2::new(200.0, 100.0));
        assert_eq!(tile.fitted_size, Vec2::new(240.0, 140.0));
    }

    #[test]
    fn test_narrow_image_fills_height() {
        // cell aspect 2.0, image aspect 1.0
        let mut tile = tile_with_cell(Rect::new(0.0, 0.0, 300.0, 150.0));
        on_image_ready(&mut tile, 512.0, 512.0);

        assert_eq!(tile.fitted_size, Vec2::new(150.0 + 40.0, 150.0 + 40.0));
    }

    #[test]
    fn test_fit_waits_for_image() {
        let mut tile = tile_with_cell(Rect::new(0.0, 0.0, 120.0, 80.0));
        fit(&mut tile);
        assert_eq!(tile.fitted_size, Vec2::new(120.0, 80.0));
    }

    #[test]
    fn test_fit_waits_for_cell() {
        let mut tile = Tile::new(0, PathBuf::from("t.png"), None);
        on_image_ready(&mut tile, 400.0, 200.0);

        assert_eq!(tile.image_aspect, Some(2.0));
        assert_eq!(tile.fitted_size, Vec2::ZERO);

        tile.set_cell(Rect::new(0.0, 0.0, 200.0, 200.0), Vec2::new(1000.0, 800.0));
        fit(&mut tile);
        assert_eq!(tile.fitted_size, Vec2::new(240.0, 140.0));
    }

    #[test]
    fn test_fit_is_idempotent() {
        let mut tile = tile_with_cell(Rect::new(10.0, 20.0, 333.0, 211.0));
        on_image_ready(&mut tile, 1920.0, 1080.0);
        let first = tile.fitted_size;
        fit(&mut tile);
        fit(&mut tile);
        assert_eq!(tile.fitted_size, first);
    }

    #[test]
    fn test_zero_height_image_is_ignored() {
        let mut tile = tile_with_cell(Rect::new(0.0, 0.0, 200.0, 200.0));
        on_image_ready(&mut tile, 400.0, 0.0);
        assert_eq!(tile.image_aspect, None);
        assert_eq!(tile.fitted_size, Vec2::new(200.0, 200.0));
    }
}
