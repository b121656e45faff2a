//! Startup errors.
//!
//! Everything after startup degrades silently; only construction can fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("gallery manifest lists no images")]
    EmptyGallery,
    #[error("invalid grid settings: {0}")]
    InvalidGrid(&'static str),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("OpenGL error: {0}")]
    Gl(String),
}
