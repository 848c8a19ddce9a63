//! Artwork catalog
//!
//! Artworks are described by a static JSON list (`artworks.json`) in the
//! asset directory. A high-resolution variant of each image is located by
//! file-name convention; its absence is not an error.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image pixels per world-space unit for the rendered plane.
const PIXELS_PER_UNIT: f32 = 100.0;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: i32,
    /// Image path relative to the asset directory.
    pub src: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl Artwork {
    /// World-space plane dimensions derived from the image pixel size.
    pub fn plane_size(&self) -> (f32, f32) {
        (
            self.width_px as f32 / PIXELS_PER_UNIT,
            self.height_px as f32 / PIXELS_PER_UNIT,
        )
    }

    /// Path of the high-resolution variant: `x.jpg` becomes `x-high-res.jpg`.
    /// Non-jpg sources have no high-res tier.
    pub fn high_res_src(&self) -> Option<String> {
        self.src
            .strip_suffix(".jpg")
            .map(|stem| format!("{stem}-high-res.jpg"))
    }

    /// Catalog titles are kebab/snake case; render them as Title Case.
    pub fn display_title(&self) -> String {
        self.title
            .split(['-', '_', ' '])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Errors while loading the catalog file.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to read artwork catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse artwork catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the static artwork list.
pub fn load_catalog(path: &Path) -> Result<Vec<Artwork>, GalleryError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Artwork {
        Artwork {
            id: "starry-night".to_string(),
            title: "the-starry-night".to_string(),
            artist: "Vincent van Gogh".to_string(),
            year: 1889,
            src: "the-starry-night.jpg".to_string(),
            width_px: 1280,
            height_px: 1014,
        }
    }

    #[test]
    fn test_plane_size() {
        let (w, h) = sample().plane_size();
        assert!((w - 12.8).abs() < 1e-6);
        assert!((h - 10.14).abs() < 1e-6);
    }

    #[test]
    fn test_high_res_convention() {
        assert_eq!(
            sample().high_res_src().as_deref(),
            Some("the-starry-night-high-res.jpg")
        );

        let mut png = sample();
        png.src = "scan.png".to_string();
        assert_eq!(png.high_res_src(), None);
    }

    #[test]
    fn test_display_title() {
        assert_eq!(sample().display_title(), "The Starry Night");

        let mut snake = sample();
        snake.title = "girl_with_a_PEARL_earring".to_string();
        assert_eq!(snake.display_title(), "Girl With A Pearl Earring");
    }

    #[test]
    fn test_catalog_parse() {
        let json = r#"[
            {
                "id": "wave",
                "title": "the-great-wave",
                "artist": "Hokusai",
                "year": 1831,
                "src": "the-great-wave.jpg",
                "width_px": 1200,
                "height_px": 800
            }
        ]"#;
        let catalog: Vec<Artwork> = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].artist, "Hokusai");
    }

    #[test]
    fn test_catalog_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/artworks.json"));
        assert!(matches!(result, Err(GalleryError::Io(_))));
    }
}
