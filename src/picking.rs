//! Ray picking against tile meshes.

use crate::camera::{Camera, Ray};
use crate::tile::Tile;
use glam::Vec2;

/// Nearest tile under `screen_point`, if any. Equal distances resolve to the
/// tile that comes first in `tiles`.
pub fn pick<'a>(screen_point: Vec2, camera: &Camera, tiles: &'a [Tile]) -> Option<&'a Tile> {
    if !camera.has_area() || !screen_point.is_finite() {
        return None;
    }
    let ray = camera.ray_from_ndc(camera.screen_to_ndc(screen_point));

    let mut nearest: Option<(f32, &Tile)> = None;
    for tile in tiles {
        let Some(distance) = intersect_quad(&ray, tile.position, tile.fitted_size) else {
            continue;
        };
        if nearest.map_or(true, |(best, _)| distance < best) {
            nearest = Some((distance, tile));
        }
    }
    nearest.map(|(_, tile)| tile)
}

/// Distance along `ray` to a quad on the z = 0 plane, or `None` on a miss.
fn intersect_quad(ray: &Ray, center: Vec2, size: Vec2) -> Option<f32> {
    if ray.direction.z.abs() < f32::EPSILON {
        return None;
    }
    let t = -ray.origin.z / ray.direction.z;
    if t < 0.0 {
        return None;
    }
    let hit = ray.origin + ray.direction * t;
    let half = size / 2.0;
    let inside = (hit.x - center.x).abs() <= half.x && (hit.y - center.y).abs() <= half.y;
    inside.then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tile(index: usize, position: Vec2, size: Vec2) -> Tile {
        let mut tile = Tile::new(index, PathBuf::from("t.png"), None);
        tile.position = position;
        tile.fitted_size = size;
        tile
    }

    #[test]
    fn test_pick_hits_tile_under_pointer() {
        let camera = Camera::new(1000.0, 800.0);
        let tiles = vec![
            tile(0, Vec2::new(-300.0, 0.0), Vec2::new(200.0, 200.0)),
            tile(1, Vec2::new(250.0, 300.0), Vec2::new(100.0, 100.0)),
        ];

        // Screen (750, 100) is world (250, 300)
        let hit = pick(Vec2::new(750.0, 100.0), &camera, &tiles);
        assert_eq!(hit.map(|t| t.index), Some(1));
    }

    #[test]
    fn test_pick_miss_returns_none() {
        let camera = Camera::new(1000.0, 800.0);
        let tiles = vec![tile(0, Vec2::new(-300.0, 0.0), Vec2::new(200.0, 200.0))];
        assert!(pick(Vec2::new(990.0, 10.0), &camera, &tiles).is_none());
    }

    #[test]
    fn test_overlapping_tiles_resolve_to_first() {
        let camera = Camera::new(1000.0, 800.0);
        let tiles = vec![
            tile(0, Vec2::ZERO, Vec2::new(300.0, 300.0)),
            tile(1, Vec2::ZERO, Vec2::new(100.0, 100.0)),
        ];
        let hit = pick(Vec2::new(500.0, 400.0), &camera, &tiles);
        assert_eq!(hit.map(|t| t.index), Some(0));
    }

    #[test]
    fn test_zero_viewport_never_hits() {
        let camera = Camera::new(0.0, 0.0);
        let tiles = vec![tile(0, Vec2::ZERO, Vec2::new(300.0, 300.0))];
        assert!(pick(Vec2::ZERO, &camera, &tiles).is_none());
    }
}
