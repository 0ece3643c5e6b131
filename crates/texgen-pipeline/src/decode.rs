//! PNG decode adapter

use image::ImageFormat;
use texgen_core::{Result, TexGenError};

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Decoded RGBA8 pixels at the image's natural size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePixels {
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` entries
    pub pixels: Vec<[u8; 4]>,
}

/// Decode a PNG buffer to RGBA8.
///
/// Input that is not a complete, decodable PNG returns
/// [`TexGenError::DecodeError`].
pub fn decode_png(bytes: &[u8]) -> Result<ImagePixels> {
    if !bytes.starts_with(PNG_SIGNATURE) {
        return Err(TexGenError::DecodeError(
            "data is not a PNG (bad signature)".to_string(),
        ));
    }

    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| TexGenError::DecodeError(format!("PNG decode failed: {}", e)))?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba.pixels().map(|p| p.0).collect();

    Ok(ImagePixels {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: &image::DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_yields_width_times_height_quads() {
        let img = RgbaImage::from_fn(7, 3, |x, y| Rgba([x as u8, y as u8, 0, 200]));
        let decoded = decode_png(&encode(&img.into())).unwrap();

        assert_eq!((decoded.width, decoded.height), (7, 3));
        assert_eq!(decoded.pixels.len(), 21);
        assert_eq!(decoded.pixels[7 + 4], [4, 1, 0, 200]);
    }

    #[test]
    fn test_rgb_png_gains_opaque_alpha() {
        let img = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        let decoded = decode_png(&encode(&img.into())).unwrap();
        assert!(decoded.pixels.iter().all(|p| *p == [1, 2, 3, 255]));
    }

    #[test]
    fn test_truncated_png_fails() {
        let img = RgbaImage::from_pixel(32, 32, Rgba([9, 9, 9, 255]));
        let bytes = encode(&img.into());
        let err = decode_png(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, TexGenError::DecodeError(_)));
    }

    #[test]
    fn test_non_png_fails() {
        assert!(matches!(
            decode_png(b"<html>Not Found</html>"),
            Err(TexGenError::DecodeError(_))
        ));
        assert!(decode_png(&[]).is_err());

        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let mut jpeg = Cursor::new(Vec::new());
        image::DynamicImage::from(img)
            .to_rgb8()
            .write_to(&mut jpeg, ImageFormat::Jpeg)
            .unwrap();
        assert!(decode_png(jpeg.get_ref()).is_err());
    }
}
