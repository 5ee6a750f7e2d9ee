/// Decoded RGBA texture for use as a shader uniform. Sampling is
/// nearest-neighbor with wrapping; there is no filtering or mipmapping.
use std::path::Path;

use log::info;

use crate::geometry::Color;

use super::LoadError;

#[derive(Clone, Debug)]
pub struct Texture {
    width: usize,
    height: usize,
    /// Tightly packed RGBA8, row-major, `width * height * 4` bytes.
    pixels: Vec<u8>,
}

impl Texture {
    /// Wrap an already-decoded pixel buffer.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode an image file. A missing or undecodable file is a hard
    /// failure for the caller.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let image = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = image.dimensions();
        info!(
            "loaded texture {}: {}x{}",
            path.as_ref().display(),
            width,
            height
        );
        Ok(Self::from_rgba(
            width as usize,
            height as usize,
            image.into_raw(),
        ))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Nearest-neighbor sample with wrap. `(0, 0)` is the top-left texel.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::BLACK;
        }
        let uu = u - u.floor();
        let vv = v - v.floor();
        let x = ((uu * self.width as f32) as usize).min(self.width - 1);
        let y = ((vv * self.height as f32) as usize).min(self.height - 1);
        let i = (y * self.width + x) * 4;
        Color::new_rgba(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Texture {
        // Red, green / blue, white.
        let pixels = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        Texture::from_rgba(2, 2, pixels)
    }

    #[test]
    fn samples_nearest_texel() {
        let t = two_by_two();
        assert_eq!(t.sample(0.0, 0.0), Color::RED);
        assert_eq!(t.sample(0.9, 0.1), Color::GREEN);
        assert_eq!(t.sample(0.1, 0.9), Color::BLUE);
        assert_eq!(t.sample(0.9, 0.9), Color::WHITE);
    }

    #[test]
    fn coordinates_wrap() {
        let t = two_by_two();
        assert_eq!(t.sample(1.0, 0.0), Color::RED);
        assert_eq!(t.sample(-0.1, 0.0), Color::GREEN);
        assert_eq!(t.sample(2.9, 1.1), Color::GREEN);
    }

    #[test]
    fn missing_texture_file_fails() {
        assert!(Texture::load("/nonexistent/softpipe-texture.png").is_err());
    }
}
