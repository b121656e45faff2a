//! Tile layout and shading constants.

/// Border padding (pixels) added to each side of a fitted image
pub const TILE_BORDER: f32 = 20.0;
/// Number of distinct row-parallax bands
pub const PARALLAX_BANDS: usize = 5;
/// Parallax reduction per band (band 0 pans at full speed)
pub const PARALLAX_STEP: f32 = 0.1;
/// Border colour drawn around each image (linear RGBA)
pub const TILE_BORDER_COLOR: [f32; 4] = [1.0, 0.965, 0.91, 1.0];
