//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG into an owned 8-bit gray buffer.
//! - `GrayImageU8::resized`: nearest-neighbour resize to a detection window.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageU8;
use crate::error::{HogError, Result};
use image::imageops::{self, FilterType};
use image::GrayImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given tightly packed bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(HogError::InvalidInput(format!(
                "gray buffer holds {} bytes, expected {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8::new(self.width, self.height, &self.data)
    }

    /// Nearest-neighbour resize to `width × height`; returns a clone when the
    /// dimensions already match.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        if width == 0 || height == 0 {
            return Err(HogError::InvalidInput(format!(
                "cannot resize to {width}x{height}"
            )));
        }
        let src = self.to_luma()?;
        let out = imageops::resize(&src, width as u32, height as u32, FilterType::Nearest);
        Self::new(width, height, out.into_raw())
    }

    fn to_luma(&self) -> Result<GrayImage> {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone()).ok_or_else(
            || HogError::InvalidInput("Failed to create image buffer".to_string()),
        )
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8> {
    let img = image::open(path)?.into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    GrayImageU8::new(width, height, img.into_raw())
}

/// Save an 8-bit grayscale buffer; the format follows the file extension.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    buffer.to_luma()?.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_to_window_uses_nearest_samples() {
        // 2x2 blown up to 4x4: every output pixel is one of the inputs.
        let img = GrayImageU8::new(2, 2, vec![10, 20, 30, 40]).unwrap();
        let out = img.resized(4, 4).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        assert!(out.as_bytes().iter().all(|v| [10, 20, 30, 40].contains(v)));
        assert_eq!(out.as_bytes()[0], 10);
        assert_eq!(out.as_bytes()[15], 40);
    }

    #[test]
    fn same_size_resize_is_identity() {
        let img = GrayImageU8::new(3, 1, vec![1, 2, 3]).unwrap();
        assert_eq!(img.resized(3, 1).unwrap(), img);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(GrayImageU8::new(2, 2, vec![0; 3]).is_err());
    }
}
