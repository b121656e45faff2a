//! UI and window constants.

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;

/// Default manifest location when no path is given on the command line
pub const DEFAULT_MANIFEST_PATH: &str = "assets/gallery.json";

/// Overlay dimming behind the detail view
pub const DETAIL_OVERLAY_ALPHA: u8 = 200;
/// Largest edge of the image preview inside the detail view
pub const DETAIL_PREVIEW_MAX: f32 = 480.0;
