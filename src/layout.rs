//! Wrap-around tile placement.
//!
//! The gallery holds a fixed set of tiles laid out in a source grid. Each
//! frame every tile's position is wrapped into one period of the grid
//! container, so tiles leaving one edge re-enter from the opposite edge and
//! the grid appears infinite without creating or destroying tiles.

use crate::pan::PanState;
use crate::tile::{Rect, Tile};
use glam::Vec2;
use serde::Deserialize;

/// Map `value` periodically into `[lo, hi)`.
///
/// A degenerate or non-finite range yields `lo`.
pub fn wrap(lo: f32, hi: f32, value: f32) -> f32 {
    let range = hi - lo;
    if !range.is_finite() || range <= 0.0 || !value.is_finite() {
        return lo;
    }
    let wrapped = lo + (value - lo).rem_euclid(range);
    // rem_euclid can round up to exactly `range` for tiny negative inputs
    if wrapped >= hi {
        lo
    } else {
        wrapped
    }
}

/// Wrap extent: the grid container's right and bottom edges
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportBounds {
    pub max_x: f32,
    pub max_y: f32,
}

impl ViewportBounds {
    pub fn from_container(container: &Rect) -> Self {
        Self {
            max_x: container.right(),
            max_y: container.bottom(),
        }
    }
}

/// Source grid settings from the manifest.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    /// Cell width as a percentage of the viewport width
    pub cell_width_vw: f32,
    /// Cell width / height
    pub cell_aspect: f32,
    /// Space between cells (logical pixels)
    pub gap: f32,
    /// Space around the grid (logical pixels)
    pub padding: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            cell_width_vw: 24.0,
            cell_aspect: 0.8,
            gap: 48.0,
            padding: 24.0,
        }
    }
}

/// Cell rectangles plus the container that encloses them
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    pub container: Rect,
    pub cells: Vec<Rect>,
}

impl GridLayout {
    /// Lay out `count` cells row by row for the given viewport size.
    pub fn compute(config: &GridConfig, viewport: Vec2, count: usize) -> Self {
        let columns = config.columns.max(1);
        let rows = count.div_ceil(columns);

        let cell_width = (viewport.x * config.cell_width_vw / 100.0).max(0.0);
        let cell_height = if config.cell_aspect > 0.0 {
            cell_width / config.cell_aspect
        } else {
            cell_width
        };

        let cells = (0..count)
            .map(|i| {
                let col = (i % columns) as f32;
                let row = (i / columns) as f32;
                Rect::new(
                    config.padding + col * (cell_width + config.gap),
                    config.padding + row * (cell_height + config.gap),
                    cell_width,
                    cell_height,
                )
            })
            .collect();

        let span = |n: usize, size: f32| {
            if n == 0 {
                0.0
            } else {
                n as f32 * size + (n - 1) as f32 * config.gap
            }
        };
        let container = Rect::new(
            0.0,
            0.0,
            config.padding * 2.0 + span(columns, cell_width),
            config.padding * 2.0 + span(rows, cell_height),
        );

        Self { container, cells }
    }
}

/// Position every tile for the current pan offset and propagate the motion
/// intensity.
pub fn place_all(tiles: &mut [Tile], pan: &PanState, bounds: &ViewportBounds) {
    puffin::profile_function!();

    for tile in tiles.iter_mut() {
        tile.position = placement(tile, pan.current, bounds);
        tile.motion_intensity = pan.velocity_magnitude;
    }
}

/// Wrapped world position of one tile.
pub fn placement(tile: &Tile, offset: Vec2, bounds: &ViewportBounds) -> Vec2 {
    let cell_right = tile.cell.right();
    let cell_bottom = tile.cell.bottom();

    let y = wrap(
        -(bounds.max_y - cell_bottom),
        cell_bottom,
        offset.y * tile.row_parallax,
    ) - tile.offset.y;

    let x = wrap(-(bounds.max_x - cell_right), cell_right, offset.x) - tile.offset.x;

    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_wrap_stays_in_range() {
        for v in [-1000.0, -250.5, -100.0, -0.25, 0.0, 99.75, 199.0, 200.0, 5000.0] {
            let w = wrap(-100.0, 200.0, v);
            assert!((-100.0..200.0).contains(&w), "wrap({}) = {}", v, w);
        }
    }

    #[test]
    fn test_wrap_is_periodic() {
        for v in [-730.0, -100.0, -12.5, 0.0, 42.0, 199.5] {
            assert_eq!(wrap(-100.0, 200.0, v), wrap(-100.0, 200.0, v + 300.0));
            assert_eq!(wrap(-100.0, 200.0, v), wrap(-100.0, 200.0, v - 300.0));
        }
    }

    #[test]
    fn test_wrap_identity_inside_range() {
        assert_eq!(wrap(-100.0, 200.0, 50.0), 50.0);
        assert_eq!(wrap(-100.0, 200.0, -100.0), -100.0);
        assert_eq!(wrap(-100.0, 200.0, 200.0), -100.0);
    }

    #[test]
    fn test_wrap_degenerate_range() {
        assert_eq!(wrap(5.0, 5.0, 17.0), 5.0);
        assert_eq!(wrap(5.0, 1.0, 17.0), 5.0);
        assert_eq!(wrap(0.0, 10.0, f32::NAN), 0.0);
    }

    fn tile_at(index: usize, cell: Rect, viewport: Vec2) -> Tile {
        let mut tile = Tile::new(index, PathBuf::from("t.png"), None);
        tile.set_cell(cell, viewport);
        tile
    }

    #[test]
    fn test_placement_at_rest() {
        let viewport = Vec2::new(1000.0, 800.0);
        let tile = tile_at(0, Rect::new(0.0, 0.0, 200.0, 200.0), viewport);
        let bounds = ViewportBounds { max_x: 1000.0, max_y: 800.0 };

        let pos = placement(&tile, Vec2::ZERO, &bounds);

        assert_eq!(pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_placement_reenters_from_opposite_edge() {
        let viewport = Vec2::new(1000.0, 800.0);
        let tile = tile_at(0, Rect::new(0.0, 0.0, 200.0, 200.0), viewport);
        let bounds = ViewportBounds { max_x: 1000.0, max_y: 800.0 };

        // One full period in either axis lands on the rest position again
        let rest = placement(&tile, Vec2::ZERO, &bounds);
        assert_eq!(placement(&tile, Vec2::new(1000.0, 800.0), &bounds), rest);

        // Panning past the cell's right edge wraps to the far left
        let wrapped = placement(&tile, Vec2::new(250.0, 0.0), &bounds);
        assert_eq!(wrapped.x, -750.0 + 400.0);
    }

    #[test]
    fn test_placement_stays_within_one_period() {
        let viewport = Vec2::new(1000.0, 800.0);
        let bounds = ViewportBounds { max_x: 1200.0, max_y: 900.0 };
        let tile = tile_at(3, Rect::new(500.0, 300.0, 200.0, 250.0), viewport);
        let rest_x = -tile.offset.x;
        let rest_y = -tile.offset.y;

        for step in -40..40 {
            let offset = Vec2::new(step as f32 * 97.3, step as f32 * -61.7);
            let pos = placement(&tile, offset, &bounds);
            assert!((pos.x - rest_x).abs() <= bounds.max_x);
            assert!((pos.y - rest_y).abs() <= bounds.max_y);
        }
    }

    #[test]
    fn test_parallax_slows_vertical_pan() {
        let viewport = Vec2::new(1000.0, 800.0);
        let bounds = ViewportBounds { max_x: 5000.0, max_y: 5000.0 };
        let fast = tile_at(0, Rect::new(0.0, 0.0, 100.0, 100.0), viewport);
        let slow = tile_at(4, Rect::new(0.0, 0.0, 100.0, 100.0), viewport);

        let dy_fast = placement(&fast, Vec2::new(0.0, 50.0), &bounds).y
            - placement(&fast, Vec2::ZERO, &bounds).y;
        let dy_slow = placement(&slow, Vec2::new(0.0, 50.0), &bounds).y
            - placement(&slow, Vec2::ZERO, &bounds).y;

        assert!((dy_fast - 50.0).abs() < 1e-3);
        assert!((dy_slow - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_place_all_propagates_motion_intensity() {
        let viewport = Vec2::new(800.0, 600.0);
        let layout = GridLayout::compute(&GridConfig::default(), viewport, 3);
        let bounds = ViewportBounds::from_container(&layout.container);
        let mut tiles: Vec<Tile> = layout
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| tile_at(i, *cell, viewport))
            .collect();

        let pan = PanState {
            velocity_magnitude: 0.03,
            ..PanState::default()
        };
        place_all(&mut tiles, &pan, &bounds);

        assert!(tiles.iter().all(|t| t.motion_intensity == 0.03));
    }

    #[test]
    fn test_grid_layout_rows_and_container() {
        let config = GridConfig {
            columns: 2,
            cell_width_vw: 20.0,
            cell_aspect: 2.0,
            gap: 10.0,
            padding: 5.0,
        };
        let layout = GridLayout::compute(&config, Vec2::new(1000.0, 800.0), 3);

        assert_eq!(layout.cells.len(), 3);
        assert_eq!(layout.cells[0], Rect::new(5.0, 5.0, 200.0, 100.0));
        assert_eq!(layout.cells[1], Rect::new(215.0, 5.0, 200.0, 100.0));
        assert_eq!(layout.cells[2], Rect::new(5.0, 115.0, 200.0, 100.0));
        assert_eq!(layout.container, Rect::new(0.0, 0.0, 420.0, 220.0));
    }

    #[test]
    fn test_grid_layout_zero_viewport() {
        let layout = GridLayout::compute(&GridConfig::default(), Vec2::ZERO, 4);
        assert!(layout.cells.iter().all(|c| !c.has_area()));
    }
}
