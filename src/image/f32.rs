//! Owned single-channel f32 grid in row-major layout (stride == width).
//!
//! Backs every dense per-pixel stage of the descriptor pipeline: the
//! normalized intensity grid and the gradient magnitude/orientation planes.
//! Dimensions are fixed at construction; only values are written afterwards.
use crate::error::{HogError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Grid width in pixels
    pub w: usize,
    /// Grid height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing row-major buffer, checking its length.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != w * h {
            return Err(HogError::InvalidInput(format!(
                "buffer holds {} samples, expected {}x{}={}",
                data.len(),
                w,
                h,
                w * h
            )));
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Build a grid from nested rows. All rows must share the first row's length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(w * h);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != w {
                return Err(HogError::InvalidInput(format!(
                    "row {y} has {} samples, expected {w}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Nested row representation, used for JSON dumps.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        (0..self.h)
            .map(|y| {
                let start = y * self.stride;
                self.data[start..start + self.w].to_vec()
            })
            .collect()
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// `(width, height)` pair, handy for shape checks.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Arithmetic mean over all samples; zero for an empty grid.
    pub fn mean(&self) -> f32 {
        let n = self.w * self.h;
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = (0..self.h)
            .map(|y| {
                let start = y * self.stride;
                self.data[start..start + self.w]
                    .iter()
                    .map(|&v| v as f64)
                    .sum::<f64>()
            })
            .sum();
        (sum / n as f64) as f32
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
