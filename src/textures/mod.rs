//! Background texture loading
//!
//! Each artwork selection starts up to two decode threads, one per texture
//! tier. Every thread publishes into a slot it alone writes, and the render
//! loop polls the slots, so there is nothing to race on. A selection change
//! simply drops the old slots; a late completion then writes into a
//! superseded `Arc` that is freed afterwards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::gallery::Artwork;

/// Decoded RGBA8 image ready for GPU upload.
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

type Slot = Arc<Mutex<Option<DecodedImage>>>;

#[derive(Clone, Copy)]
enum Tier {
    Base,
    HighRes,
}

/// In-flight (or completed) loads for one artwork selection.
pub struct ArtworkImages {
    base: Slot,
    high_res: Slot,
}

impl ArtworkImages {
    /// Start decoding both tiers for `art`, with image paths resolved against
    /// `asset_root`. The high-res tier is attempted only when the naming
    /// convention yields a candidate path; a missing or broken file just
    /// leaves its slot empty.
    pub fn begin_load(art: &Artwork, asset_root: &Path) -> Self {
        let base = Slot::default();
        let high_res = Slot::default();

        spawn_decode(asset_root.join(&art.src), base.clone(), Tier::Base);
        if let Some(high_src) = art.high_res_src() {
            spawn_decode(asset_root.join(high_src), high_res.clone(), Tier::HighRes);
        }

        Self { base, high_res }
    }

    /// Take the decoded base image, if it has arrived since the last poll.
    pub fn take_base(&self) -> Option<DecodedImage> {
        self.base.lock().take()
    }

    /// Take the decoded high-resolution image, if any.
    pub fn take_high_res(&self) -> Option<DecodedImage> {
        self.high_res.lock().take()
    }
}

fn spawn_decode(path: PathBuf, slot: Slot, tier: Tier) {
    let spawned = std::thread::Builder::new()
        .name("texture-decode".to_string())
        .spawn(move || match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                log::info!("Decoded {} ({}x{})", path.display(), width, height);
                *slot.lock() = Some(DecodedImage {
                    data: rgba.into_raw(),
                    width,
                    height,
                });
            }
            Err(e) => match tier {
                Tier::Base => log::warn!("Failed to decode {}: {}", path.display(), e),
                // Fallback to the base tier, by design of the naming convention
                Tier::HighRes => {
                    log::info!("No high-res variant at {}: {}", path.display(), e)
                }
            },
        });

    if let Err(e) = spawned {
        log::warn!("Failed to spawn decode thread: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn sample_art(src: &str, dir: &Path) -> (Artwork, PathBuf) {
        let art = Artwork {
            id: "test".to_string(),
            title: "test".to_string(),
            artist: "test".to_string(),
            year: 2000,
            src: src.to_string(),
            width_px: 4,
            height_px: 4,
        };
        (art, dir.to_path_buf())
    }

    fn poll_base(images: &ArtworkImages, timeout: Duration) -> Option<DecodedImage> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(img) = images.take_base() {
                return Some(img);
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_base_decode_arrives() {
        let dir = std::env::temp_dir().join("relativity-gallery-test-base");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let (art, root) = sample_art("tiny.png", &dir);
        let images = ArtworkImages::begin_load(&art, &root);

        let decoded = poll_base(&images, Duration::from_secs(5)).expect("decode timed out");
        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 4);
        assert_eq!(decoded.data.len(), 4 * 4 * 4);
        assert_eq!(&decoded.data[0..4], &[10, 20, 30, 255]);

        // No high-res tier for a .png source
        assert!(images.take_high_res().is_none());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_high_res_is_not_fatal() {
        let dir = std::env::temp_dir().join("relativity-gallery-test-highres");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("base.jpg");
        image::RgbImage::from_pixel(4, 4, image::Rgb([200, 100, 50]))
            .save(&path)
            .unwrap();

        let (art, root) = sample_art("base.jpg", &dir);
        let images = ArtworkImages::begin_load(&art, &root);

        // Base arrives even though base-high-res.jpg does not exist
        assert!(poll_base(&images, Duration::from_secs(5)).is_some());
        assert!(images.take_high_res().is_none());
        let _ = std::fs::remove_file(path);
    }
}
