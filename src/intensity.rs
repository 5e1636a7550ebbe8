//! Conversion between 8-bit grayscale samples and the normalized float grid.
//!
//! The forward direction divides every sample by 257 so an 8-bit image lands
//! in `[0, 1)`. The reverse adapter multiplies by a factor (257 unless the
//! caller supplies one) and truncates to a byte; it exists for visualizing
//! magnitude or orientation planes and is not used by the descriptor itself.
use crate::config::INTENSITY_SCALE;
use crate::error::{HogError, Result};
use crate::image::io::GrayImageU8;
use crate::image::{ImageF32, ImageU8, ImageView, ImageViewMut};

/// Factor that spreads orientation degrees over the byte range the same way
/// the reference visualizer does (`π · 257 / 180`).
pub const ORIENTATION_IMAGE_SCALE: f32 = std::f32::consts::PI * INTENSITY_SCALE / 180.0;

/// Normalize an 8-bit grayscale view into an intensity grid of the same shape.
pub fn to_intensity_grid(gray: &ImageU8<'_>) -> Result<ImageF32> {
    gray.validate()?;
    let mut out = ImageF32::new(gray.w, gray.h);
    for y in 0..gray.h {
        let src = gray.row(y);
        let dst = out.row_mut(y);
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s as f32 / INTENSITY_SCALE;
        }
    }
    Ok(out)
}

/// Map a float grid back to bytes: `(v * factor) as u8`, saturating at both
/// ends. `None` uses the inverse of the normalizer's scale.
pub fn grid_to_gray(grid: &ImageF32, factor: Option<f32>) -> Result<GrayImageU8> {
    if grid.h == 0 {
        return Err(HogError::InvalidInput("pixel data is empty".to_string()));
    }
    if grid.w == 0 {
        return Err(HogError::InvalidInput(
            "rows of pixel data are empty".to_string(),
        ));
    }
    let factor = factor.unwrap_or(INTENSITY_SCALE);
    let mut data = Vec::with_capacity(grid.w * grid.h);
    for row in grid.rows() {
        // `as u8` saturates and maps NaN to 0.
        data.extend(row.iter().map(|&v| (v * factor) as u8));
    }
    GrayImageU8::new(grid.w, grid.h, data)
}
