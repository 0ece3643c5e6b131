//! In-memory 2D texture built from decoded pixels

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use texgen_core::{Result, TexGenError};

/// Largest edge length accepted for a texture
pub const MAX_TEXTURE_DIMENSION: u32 = 16384;

/// An RGBA8 texture ready to be stored in the content library
#[derive(Debug, Clone)]
pub struct Texture2D {
    image: RgbaImage,
}

impl Texture2D {
    /// Build a texture from row-major RGBA quads.
    ///
    /// Fails when either dimension is zero or above [`MAX_TEXTURE_DIMENSION`],
    /// or when the quad count is not `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TexGenError::TextureCreationError(format!(
                "texture dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
            return Err(TexGenError::TextureCreationError(format!(
                "{}x{} exceeds the maximum texture size of {}",
                width, height, MAX_TEXTURE_DIMENSION
            )));
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TexGenError::TextureCreationError(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }

        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        let image = RgbaImage::from_raw(width, height, raw).ok_or_else(|| {
            TexGenError::TextureCreationError("failed to create image buffer".to_string())
        })?;

        Ok(Self { image })
    }

    pub(crate) fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGBA value at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Encode as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| TexGenError::TextureCreationError(format!("PNG encode failed: {}", e)))?;
        Ok(out.into_inner())
    }
}
