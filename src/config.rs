//! Gallery manifest loading.
//!
//! The manifest is a small JSON file listing the images to show and how the
//! source grid is laid out:
//!
//! ```json
//! {
//!   "title": "Gallery",
//!   "grid": { "columns": 5, "cell_width_vw": 24, "cell_aspect": 0.8 },
//!   "images": [{ "src": "images/01.jpg", "title": "Harbour" }]
//! }
//! ```
//!
//! Image paths are resolved relative to the manifest file.

use crate::error::GalleryError;
use crate::input::WheelCalibration;
use crate::layout::GridConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ImageEntry {
    pub src: PathBuf,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Manifest {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub grid: GridConfig,
    /// Overrides the platform wheel calibration
    #[serde(default)]
    pub wheel: Option<WheelCalibration>,
    pub images: Vec<ImageEntry>,
}

fn default_title() -> String {
    "Drift Gallery".to_string()
}

impl Manifest {
    /// Read, parse and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, GalleryError> {
        let json = std::fs::read_to_string(path).map_err(|source| GalleryError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::parse(&json).map_err(|source| GalleryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        manifest.resolve_sources(path.parent().unwrap_or(Path::new(".")));
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn resolve_sources(&mut self, base: &Path) {
        for image in &mut self.images {
            if image.src.is_relative() {
                image.src = base.join(&image.src);
            }
        }
    }

    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.images.is_empty() {
            return Err(GalleryError::EmptyGallery);
        }
        if self.grid.columns == 0 {
            return Err(GalleryError::InvalidGrid("columns must be at least 1"));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.grid.cell_width_vw) || !positive(self.grid.cell_aspect) {
            return Err(GalleryError::InvalidGrid(
                "cell_width_vw and cell_aspect must be positive",
            ));
        }
        if self.grid.gap < 0.0 || self.grid.padding < 0.0 {
            return Err(GalleryError::InvalidGrid("gap and padding must not be negative"));
        }
        Ok(())
    }

    pub fn wheel_calibration(&self) -> WheelCalibration {
        self.wheel.unwrap_or_else(WheelCalibration::for_platform)
    }
}
