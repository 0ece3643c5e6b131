//! Offline transport
//!
//! Answers the generation call with a `mock://` URL and the download call
//! with a solid-colour PNG of the requested size, without any network calls.

use crate::request::GenerationRequest;
use crate::response::{GenerationResponse, ImageUrl};
use crate::transport::Transport;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use texgen_asset::MAX_TEXTURE_DIMENSION;
use texgen_core::{Result, TexGenError};

const SCHEME: &str = "mock://";

/// A transport that fabricates images locally
#[derive(Default)]
pub struct MockTransport;

impl MockTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let (width, height) = parse_size(&request.size).ok_or_else(|| {
            TexGenError::HttpStatus {
                call: "generation",
                code: 400,
            }
        })?;
        let tint = prompt_tint(&request.prompt);

        let data = (0..request.count.max(1))
            .map(|i| ImageUrl {
                url: format!("{}{}x{}/{:06x}/{}", SCHEME, width, height, tint, i),
            })
            .collect();

        Ok(GenerationResponse {
            created: None,
            data,
        })
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let (width, height, tint) = parse_mock_url(url).ok_or_else(|| {
            TexGenError::HttpStatus {
                call: "download",
                code: 404,
            }
        })?;
        solid_png(width, height, tint)
    }
}

/// Parse a `WIDTHxHEIGHT` size string. Sizes no texture could hold are
/// refused, the way the service refuses them.
fn parse_size(size: &str) -> Option<(u32, u32)> {
    let (w, h) = size.split_once('x')?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    let valid = 1..=MAX_TEXTURE_DIMENSION;
    (valid.contains(&w) && valid.contains(&h)).then_some((w, h))
}

fn parse_mock_url(url: &str) -> Option<(u32, u32, u32)> {
    let mut parts = url.strip_prefix(SCHEME)?.split('/');
    let (width, height) = parse_size(parts.next()?)?;
    let tint = u32::from_str_radix(parts.next()?, 16).ok()?;
    Some((width, height, tint))
}

/// A colour derived from the prompt, so different prompts look different
fn prompt_tint(prompt: &str) -> u32 {
    prompt
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32))
        & 0x00FF_FFFF
}

fn solid_png(width: u32, height: u32, tint: u32) -> Result<Vec<u8>> {
    let r = ((tint >> 16) & 0xFF) as u8;
    let g = ((tint >> 8) & 0xFF) as u8;
    let b = (tint & 0xFF) as u8;

    let img = RgbaImage::from_pixel(width, height, image::Rgba([r, g, b, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| TexGenError::TransportError(format!("Failed to encode mock PNG: {}", e)))?;
    Ok(out.into_inner())
}
