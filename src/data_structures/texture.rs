//! Flat-color fallback textures.
//!
//! When a material channel has no texture file, the baker writes a small
//! single-color PNG instead so every mesh ships exactly four textures. This
//! module provides [`FlatTexture`] and the float-to-byte color mapping used
//! for all of them.

use std::path::Path;

use anyhow::*;
use image::{ImageFormat, RgbImage};

/// Edge length of a synthesized texture when nothing else is configured.
pub const DEFAULT_TEXTURE_SIZE: u32 = 16;

/// Largest multiplier that still maps 1.0 to 255 after truncation.
const MAX_COLOR: f64 = 256.0 - f64::EPSILON * 128.0;

/// Map a color component in `[0, 1]` to an 8-bit channel.
///
/// The value is truncated, not rounded: 0.5 becomes 127 and 1.0 becomes 255.
/// Values outside `[0, 1]` saturate at 0 or 255.
pub fn float_to_color_channel(value: f64) -> u8 {
    (value * MAX_COLOR) as u8
}

/// A square RGB image filled with one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatTexture {
    pub size: u32,
    pub rgb: [u8; 3],
}

impl FlatTexture {
    pub fn new(size: u32, rgb: [u8; 3]) -> Self {
        Self { size, rgb }
    }

    /// Build a texture from float components, each mapped with
    /// [`float_to_color_channel`].
    pub fn from_factors(size: u32, rgb: [f32; 3]) -> Self {
        Self::new(size, rgb.map(|c| float_to_color_channel(c as f64)))
    }

    pub fn base_color(size: u32, factor: [f32; 3]) -> Self {
        Self::from_factors(size, factor)
    }

    /// Metallic in red, roughness in green, blue left at zero.
    pub fn metallic_roughness(size: u32, factor: [f32; 2]) -> Self {
        Self::new(
            size,
            [
                float_to_color_channel(factor[0] as f64),
                float_to_color_channel(factor[1] as f64),
                0,
            ],
        )
    }

    pub fn normal(size: u32, factor: [f32; 3]) -> Self {
        Self::from_factors(size, factor)
    }

    /// Occlusion in red; green and blue are always full.
    pub fn ambient_occlusion(size: u32, factor: f32) -> Self {
        Self::new(size, [float_to_color_channel(factor as f64), 255, 255])
    }

    pub fn to_image(&self) -> Result<RgbImage> {
        ensure!(self.size > 0, "flat texture must be at least 1x1 pixels");
        let data: Vec<u8> = self
            .rgb
            .iter()
            .cycle()
            .take(self.size as usize * self.size as usize * 3)
            .copied()
            .collect();
        RgbImage::from_raw(self.size, self.size, data)
            .with_context(|| format!("pixel buffer does not fit a {0}x{0} image", self.size))
    }

    /// Encode as PNG at `path`, replacing any existing file.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        self.to_image()?
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("failed to write texture {}", path.display()))
    }
}
