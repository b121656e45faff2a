//! Background image decoding.
//!
//! Decoding runs on its own thread so the frame loop never blocks. Each
//! finished image is posted back to the event loop as a user event, where
//! the texture is uploaded and the tile refitted. A failed decode is logged
//! and never reported, and the tile keeps its placeholder.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use winit::event_loop::EventLoopProxy;

/// RGBA8 pixels with premultiplied alpha, top row first
pub struct DecodedImage {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// User events delivered to the winit event loop
pub enum LoaderEvent {
    Decoded(DecodedImage),
}

/// Decode every source in order on a background thread.
pub fn spawn_decoder(
    sources: Vec<(usize, PathBuf)>,
    proxy: EventLoopProxy<LoaderEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("image-decoder".into())
        .spawn(move || {
            for (index, path) in sources {
                let image = match decode(index, &path) {
                    Ok(image) => image,
                    Err(err) => {
                        tracing::warn!(tile = index, path = %path.display(), "failed to load image: {}", err);
                        continue;
                    }
                };
                tracing::debug!(tile = index, width = image.width, height = image.height, "image decoded");
                if proxy.send_event(LoaderEvent::Decoded(image)).is_err() {
                    // Event loop is gone; nobody is waiting for the rest
                    return;
                }
            }
        })
}

/// Decode one image file into premultiplied RGBA8.
pub fn decode(index: usize, path: &Path) -> Result<DecodedImage, image::ImageError> {
    let mut img = image::open(path)?.into_rgba8();

    // Convert to premultiplied alpha (required by egui)
    for pixel in img.pixels_mut() {
        let a = pixel[3] as f32 / 255.0;
        pixel[0] = (pixel[0] as f32 * a) as u8;
        pixel[1] = (pixel[1] as f32 * a) as u8;
        pixel[2] = (pixel[2] as f32 * a) as u8;
    }

    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        index,
        width,
        height,
        pixels: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_decode_reports_natural_size_and_premultiplies() {
        let path = std::env::temp_dir().join(format!("drift-gallery-{}.png", std::process::id()));
        let mut img = RgbaImage::from_pixel(4, 2, Rgba([200, 100, 50, 255]));
        img.put_pixel(0, 0, Rgba([200, 100, 50, 0]));
        img.save(&path).unwrap();

        let decoded = decode(9, &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((decoded.index, decoded.width, decoded.height), (9, 4, 2));
        assert_eq!(decoded.pixels.len(), 4 * 2 * 4);
        // Fully transparent pixel loses its colour
        assert_eq!(&decoded.pixels[0..4], &[0, 0, 0, 0]);
        assert_eq!(&decoded.pixels[4..8], &[200, 100, 50, 255]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(decode(0, Path::new("no/such/image.png")).is_err());
    }
}
