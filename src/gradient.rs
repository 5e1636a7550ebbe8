//! Centered-difference gradients with magnitude and unsigned orientation.
//!
//! - `gx(x, y) = I(x+1, y) − I(x−1, y)`
//! - `gy(x, y) = I(x, y−1) − I(x, y+1)` ("up minus down")
//!
//! Samples outside the grid read as zero, so the first/last column and row
//! fall back to the one-sided difference against 0 without any out-of-range
//! access. Orientation is in degrees; see [`OrientationMode`] for the range.
//!
//! Complexity: O(W·H); memory: four float planes.
use crate::config::OrientationMode;
use crate::image::{ImageF32, ImageView};

/// Per-pixel gradient planes, all co-indexed with the source grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    /// Horizontal difference
    pub gx: ImageF32,
    /// Vertical difference (up minus down)
    pub gy: ImageF32,
    /// `sqrt(gx^2 + gy^2)`, never negative
    pub magnitude: ImageF32,
    /// Orientation in degrees
    pub orientation: ImageF32,
}

impl GradientField {
    pub fn width(&self) -> usize {
        self.magnitude.w
    }

    pub fn height(&self) -> usize {
        self.magnitude.h
    }
}

/// Euclidean gradient magnitude.
#[inline]
pub fn gradient_magnitude(gx: f32, gy: f32) -> f32 {
    (gx as f64).hypot(gy as f64) as f32
}

/// `|atan(gy / gx)|` in radians, zero when `gx == 0`.
#[inline]
fn reference_orientation_rad(gx: f32, gy: f32) -> f64 {
    if gx == 0.0 {
        return 0.0;
    }
    (gy as f64 / gx as f64).atan().abs()
}

/// Orientation in degrees under the selected mode.
#[inline]
pub fn gradient_orientation(gx: f32, gy: f32, mode: OrientationMode) -> f32 {
    match mode {
        OrientationMode::Reference => reference_orientation_rad(gx, gy).to_degrees() as f32,
        OrientationMode::Unsigned => {
            if gx == 0.0 && gy == 0.0 {
                return 0.0;
            }
            let deg = (gy as f64).atan2(gx as f64).to_degrees().rem_euclid(180.0) as f32;
            // Angles just below 180 can round up to 180 in f32.
            if deg >= 180.0 {
                0.0
            } else {
                deg
            }
        }
    }
}

/// Visit every pixel with its centered differences `(dx, dy)`, reading zero
/// outside the grid.
fn for_each_difference(l: &ImageF32, mut visit: impl FnMut(usize, usize, f32, f32)) {
    let (w, h) = (l.w, l.h);
    for y in 0..h {
        let row = l.row(y);
        let up = (y > 0).then(|| l.row(y - 1));
        let down = (y + 1 < h).then(|| l.row(y + 1));
        for x in 0..w {
            let left = if x > 0 { row[x - 1] } else { 0.0 };
            let right = if x + 1 < w { row[x + 1] } else { 0.0 };
            let above = up.map_or(0.0, |r| r[x]);
            let below = down.map_or(0.0, |r| r[x]);
            visit(x, y, right - left, above - below);
        }
    }
}

/// Compute the gradient field of an intensity grid.
pub fn gradient_field(l: &ImageF32, mode: OrientationMode) -> GradientField {
    let mut gx = ImageF32::new(l.w, l.h);
    let mut gy = ImageF32::new(l.w, l.h);
    let mut magnitude = ImageF32::new(l.w, l.h);
    let mut orientation = ImageF32::new(l.w, l.h);

    for_each_difference(l, |x, y, dx, dy| {
        gx.set(x, y, dx);
        gy.set(x, y, dy);
        magnitude.set(x, y, gradient_magnitude(dx, dy));
        orientation.set(x, y, gradient_orientation(dx, dy, mode));
    });

    GradientField {
        gx,
        gy,
        magnitude,
        orientation,
    }
}

/// Magnitude and orientation planes only, skipping the raw difference planes.
pub fn magnitude_orientation(l: &ImageF32, mode: OrientationMode) -> (ImageF32, ImageF32) {
    let mut magnitude = ImageF32::new(l.w, l.h);
    let mut orientation = ImageF32::new(l.w, l.h);
    for_each_difference(l, |x, y, dx, dy| {
        magnitude.set(x, y, gradient_magnitude(dx, dy));
        orientation.set(x, y, gradient_orientation(dx, dy, mode));
    });
    (magnitude, orientation)
}
