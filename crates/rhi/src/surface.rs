//! CPU-side images handed to [`RenderBackend::create_texture`](crate::RenderBackend::create_texture).

use crate::error::{RhiError, RhiResult};

/// Bytes per RGBA8 pixel.
const BYTES_PER_PIXEL: usize = 4;

/// A tightly packed RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Wraps existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`RhiError::TextureError`] if the image is empty or the
    /// buffer length does not equal `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> RhiResult<Self> {
        if width == 0 || height == 0 {
            return Err(RhiError::TextureError(format!(
                "surface must not be empty, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RhiError::TextureError(format!(
                "expected {expected} bytes for a {width}x{height} RGBA8 surface, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a surface filled with a single color.
    ///
    /// # Errors
    ///
    /// Returns [`RhiError::TextureError`] if either dimension is zero.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RhiResult<Self> {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::new(width, height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row by row.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
