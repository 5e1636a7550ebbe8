//! Per-cell orientation histograms with linear soft binning.
//!
//! A pixel with magnitude `m` and orientation `θ` is split between the two
//! bins whose centres bracket `θ`:
//!
//! - `j = floor(θ / w − 0.5)` where `w` is the bin width,
//! - bin `j` receives `m · (C(j+1) − θ) / w` with `C(k) = w · (k + 0.5)`,
//! - bin `j + 1` receives the remainder.
//!
//! Indices outside `[0, bins)` are resolved by [`EdgeBinPolicy`]. Cells are
//! non-overlapping `S × S` tiles laid out row-major.
use crate::config::{EdgeBinPolicy, HogParams};
use crate::error::{HogError, Result};
use crate::image::{ImageF32, ImageView};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

/// Grid of cell histograms stored row-major, `bins` floats per cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellGrid {
    pub rows: usize,
    pub cols: usize,
    pub bins: usize,
    #[serde(skip)]
    pub data: Vec<f32>,
}

impl CellGrid {
    /// Histogram of the cell at (`row`, `col`).
    #[inline]
    pub fn histogram(&self, row: usize, col: usize) -> &[f32] {
        let start = (row * self.cols + col) * self.bins;
        &self.data[start..start + self.bins]
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// `rows × cols × bins` nested representation for JSON dumps.
    pub fn to_nested(&self) -> Vec<Vec<Vec<f32>>> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| self.histogram(r, c).to_vec())
                    .collect()
            })
            .collect()
    }
}

/// Split of one pixel's magnitude between two adjacent bins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoftBin {
    /// Lower bin index `j`; may be `-1` (or `bins - 1` for the upper bin to
    /// overflow) before the edge policy is applied.
    pub index: i32,
    /// Share deposited into bin `index`.
    pub primary: f32,
    /// Share deposited into bin `index + 1`.
    pub secondary: f32,
}

/// Lower bracketing bin: `floor(angle / bin_width − 0.5)`.
#[inline]
pub fn bin_index(angle: f32, bin_width: f32) -> i32 {
    ((angle / bin_width) - 0.5).floor() as i32
}

/// Centre of bin `j` in degrees.
#[inline]
pub fn bin_center(j: i32, bin_width: f32) -> f32 {
    bin_width * (j as f32 + 0.5)
}

/// Share of `magnitude` owed to bin `j` (the lower of the pair).
#[inline]
pub fn primary_share(magnitude: f32, angle: f32, j: i32, bin_width: f32) -> f32 {
    let upper_center = bin_center(j + 1, bin_width);
    magnitude * ((upper_center - angle) / bin_width)
}

#[inline]
pub fn soft_bin(magnitude: f32, angle: f32, bin_width: f32) -> SoftBin {
    let index = bin_index(angle, bin_width);
    let primary = primary_share(magnitude, angle, index, bin_width);
    SoftBin {
        index,
        primary,
        secondary: magnitude - primary,
    }
}

#[inline]
fn deposit(bins: &mut [f32], index: i32, value: f32, policy: EdgeBinPolicy) {
    let n = bins.len() as i32;
    if (0..n).contains(&index) {
        bins[index as usize] += value;
        return;
    }
    match policy {
        EdgeBinPolicy::Wrap => bins[index.rem_euclid(n) as usize] += value,
        EdgeBinPolicy::Clamp => bins[index.clamp(0, n - 1) as usize] += value,
        EdgeBinPolicy::Drop => {}
    }
}

/// Copy the `size × size` window whose top-left corner is (`x`, `y`).
pub fn partition(grid: &ImageF32, y: usize, x: usize, size: usize) -> Result<ImageF32> {
    if y + size > grid.h || x + size > grid.w {
        return Err(HogError::InvalidInput(format!(
            "window {size}x{size} at ({x}, {y}) exceeds {}x{} grid",
            grid.w, grid.h
        )));
    }
    let mut out = Vec::with_capacity(size * size);
    for row in grid.rows().skip(y).take(size) {
        out.extend_from_slice(&row[x..x + size]);
    }
    ImageF32::from_vec(size, size, out)
}

/// Accumulate the histogram of the cell at (`row`, `col`) into `bins`.
fn accumulate_cell(
    magnitude: &ImageF32,
    orientation: &ImageF32,
    row: usize,
    col: usize,
    params: &HogParams,
    bins: &mut [f32],
) {
    let size = params.cell_size;
    let bin_width = params.bin_width();
    let (x0, y0) = (col * size, row * size);
    for y in y0..y0 + size {
        let mags = &magnitude.row(y)[x0..x0 + size];
        let angles = &orientation.row(y)[x0..x0 + size];
        for (&m, &theta) in mags.iter().zip(angles) {
            let split = soft_bin(m, theta, bin_width);
            deposit(bins, split.index, split.primary, params.edge_bins);
            deposit(bins, split.index + 1, split.secondary, params.edge_bins);
        }
    }
}

/// Histogram of a single cell from co-indexed magnitude and orientation
/// planes.
pub fn cell_histogram(
    magnitude: &ImageF32,
    orientation: &ImageF32,
    row: usize,
    col: usize,
    params: &HogParams,
) -> Result<Vec<f32>> {
    params.validate()?;
    let (w, h) = check_planes(magnitude, orientation)?;
    let size = params.cell_size;
    if (row + 1) * size > h || (col + 1) * size > w {
        return Err(HogError::InvalidInput(format!(
            "cell ({row}, {col}) of size {size} lies outside the {w}x{h} field"
        )));
    }
    let mut bins = vec![0.0f32; params.number_of_bins];
    accumulate_cell(magnitude, orientation, row, col, params, &mut bins);
    Ok(bins)
}

/// Shared `(width, height)` of the magnitude and orientation planes.
fn check_planes(magnitude: &ImageF32, orientation: &ImageF32) -> Result<(usize, usize)> {
    let expected = magnitude.dims();
    let actual = orientation.dims();
    if expected != actual {
        return Err(HogError::ShapeMismatch { expected, actual });
    }
    let (w, h) = expected;
    if w == 0 || h == 0 {
        return Err(HogError::InvalidInput(format!(
            "gradient field has zero extent ({w}x{h})"
        )));
    }
    Ok(expected)
}

fn cell_row(
    magnitude: &ImageF32,
    orientation: &ImageF32,
    row: usize,
    cols: usize,
    params: &HogParams,
) -> Vec<f32> {
    let mut out = vec![0.0f32; cols * params.number_of_bins];
    for (col, bins) in out.chunks_exact_mut(params.number_of_bins).enumerate() {
        accumulate_cell(magnitude, orientation, row, col, params, bins);
    }
    out
}

/// Build the full cell grid from co-indexed magnitude and orientation planes.
pub fn cell_histograms(
    magnitude: &ImageF32,
    orientation: &ImageF32,
    params: &HogParams,
) -> Result<CellGrid> {
    params.validate()?;
    let (w, h) = check_planes(magnitude, orientation)?;
    let size = params.cell_size;
    if size == 0 || w % size != 0 || h % size != 0 {
        return Err(HogError::InvalidCellSize {
            width: w,
            height: h,
            cell_size: size,
        });
    }

    let rows = h / size;
    let cols = w / size;

    #[cfg(feature = "parallel")]
    let row_data: Vec<Vec<f32>> = (0..rows)
        .into_par_iter()
        .map(|r| cell_row(magnitude, orientation, r, cols, params))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let row_data: Vec<Vec<f32>> = (0..rows)
        .map(|r| cell_row(magnitude, orientation, r, cols, params))
        .collect();

    Ok(CellGrid {
        rows,
        cols,
        bins: params.number_of_bins,
        data: row_data.concat(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrientationMode;

    /// Magnitude and orientation planes filled with one value each.
    fn uniform_field(w: usize, h: usize, magnitude: f32, angle: f32) -> (ImageF32, ImageF32) {
        let mut mag = ImageF32::new(w, h);
        let mut ori = ImageF32::new(w, h);
        mag.data.fill(magnitude);
        ori.data.fill(angle);
        (mag, ori)
    }

    #[test]
    fn bin_index_matches_reference_angles() {
        let cases = [
            (89.699_55_f32, 3),
            (88.745_36, 3),
            (69.121_575, 2),
            (46.838_6, 1),
            (24.476_863, 0),
            (14.041_091, 0),
            (69.857_194, 2),
            (40.989_48, 1),
            (5.0, -1),
        ];
        for (angle, expected) in cases {
            assert_eq!(bin_index(angle, 20.0), expected, "angle {angle}");
        }
    }

    #[test]
    fn bin_centers_sit_mid_bin() {
        for (j, expected) in [(0, 10.0), (1, 30.0), (2, 50.0), (3, 70.0), (4, 90.0)] {
            assert_eq!(bin_center(j, 20.0), expected);
        }
    }

    #[test]
    fn primary_share_matches_reference_values() {
        let cases = [
            (0.002_121_697_f32, 40.989_482_f32, 1, 0.000_955_879_34_f32),
            (0.005_973_429, 51.403_385, 2, 0.005_554_278),
            (0.034_484_31, 24.476_863, 0, 0.009_523_077),
            (0.049_294_21, 46.838_597, 1, 0.007_791_944),
        ];
        for (m, angle, j, expected) in cases {
            let got = primary_share(m, angle, j, 20.0);
            assert!((got - expected).abs() < 1e-7, "m={m} got {got} want {expected}");
        }
    }

    #[test]
    fn soft_bin_conserves_magnitude() {
        let split = soft_bin(2.0, 41.0, 20.0);
        assert_eq!(split.index, 1);
        // 41° sits 11° above centre 30 and 9° below centre 50.
        assert!((split.primary - 0.9).abs() < 1e-5);
        assert!((split.secondary - 1.1).abs() < 1e-5);
        assert!((split.primary + split.secondary - 2.0).abs() < 1e-6);
    }

    #[test]
    fn partition_extracts_window() {
        let rows: Vec<Vec<f32>> = (0..9)
            .map(|r| (0..9).map(|c| (r * 9 + c + 1) as f32).collect())
            .collect();
        let grid = ImageF32::from_rows(&rows).unwrap();
        let block = partition(&grid, 1, 2, 3).unwrap();
        assert_eq!(
            block.to_rows(),
            vec![
                vec![12.0, 13.0, 14.0],
                vec![21.0, 22.0, 23.0],
                vec![30.0, 31.0, 32.0],
            ]
        );
        assert!(partition(&grid, 7, 0, 3).is_err());
    }

    #[test]
    fn cell_accumulates_every_pixel() {
        let (mag, ori) = uniform_field(8, 8, 1.0, 30.0);
        let hist = cell_histogram(&mag, &ori, 0, 0, &HogParams::default()).unwrap();
        // 30° is exactly centre of bin 1: all 64 pixels land there.
        assert!((hist[1] - 64.0).abs() < 1e-4);
        assert!(hist.iter().enumerate().all(|(i, &v)| i == 1 || v.abs() < 1e-4));
    }

    #[test]
    fn low_angle_wraps_into_last_bin() {
        let (mag, ori) = uniform_field(8, 8, 1.0, 5.0);
        let hist = cell_histogram(&mag, &ori, 0, 0, &HogParams::default()).unwrap();
        // j = -1: (10 - 5) / 20 = 0.25 to the last bin, 0.75 to bin 0.
        assert!((hist[8] - 64.0 * 0.25).abs() < 1e-4);
        assert!((hist[0] - 64.0 * 0.75).abs() < 1e-4);
    }

    #[test]
    fn edge_policies_differ_only_out_of_range() {
        let (mag, ori) = uniform_field(8, 8, 1.0, 5.0);
        let clamp = cell_histogram(
            &mag,
            &ori,
            0,
            0,
            &HogParams::default().with_edge_bins(EdgeBinPolicy::Clamp),
        )
        .unwrap();
        assert!((clamp[0] - 64.0).abs() < 1e-4);
        assert_eq!(clamp[8], 0.0);

        let drop = cell_histogram(
            &mag,
            &ori,
            0,
            0,
            &HogParams::default().with_edge_bins(EdgeBinPolicy::Drop),
        )
        .unwrap();
        assert!((drop[0] - 48.0).abs() < 1e-4);
        assert_eq!(drop.iter().sum::<f32>(), drop[0]);
    }

    #[test]
    fn high_unsigned_angle_wraps_into_first_bin() {
        let (mag, ori) = uniform_field(8, 8, 1.0, 175.0);
        let params = HogParams::default().with_orientation(OrientationMode::Unsigned);
        let hist = cell_histogram(&mag, &ori, 0, 0, &params).unwrap();
        // j = 8: (190 - 175) / 20 = 0.75 stays in bin 8, 0.25 wraps to bin 0.
        assert!((hist[8] - 48.0).abs() < 1e-4);
        assert!((hist[0] - 16.0).abs() < 1e-4);
    }

    #[test]
    fn grid_shape_follows_cell_size() {
        let (mag, ori) = uniform_field(64, 128, 0.5, 45.0);
        let grid = cell_histograms(&mag, &ori, &HogParams::default()).unwrap();
        assert_eq!((grid.rows, grid.cols, grid.bins), (16, 8, 9));
        assert_eq!(grid.data.len(), 16 * 8 * 9);
        assert!(grid.data.iter().all(|&v| v >= 0.0));
        assert_eq!(grid.to_nested()[15][7].len(), 9);
    }

    #[test]
    fn indivisible_field_is_rejected() {
        let (mag, ori) = uniform_field(60, 128, 0.5, 45.0);
        let err = cell_histograms(&mag, &ori, &HogParams::default()).unwrap_err();
        assert!(matches!(err, HogError::InvalidCellSize { width: 60, .. }));
    }

    #[test]
    fn mismatched_planes_are_rejected() {
        let (mag, _) = uniform_field(16, 16, 0.5, 45.0);
        let ori = ImageF32::new(16, 8);
        let err = cell_histograms(&mag, &ori, &HogParams::default()).unwrap_err();
        assert!(matches!(err, HogError::ShapeMismatch { .. }));
    }

    #[test]
    fn zero_bins_are_rejected_before_binning() {
        let (mag, ori) = uniform_field(16, 16, 0.5, 45.0);
        let params = HogParams::default().with_bins(0);
        assert!(matches!(
            cell_histograms(&mag, &ori, &params),
            Err(HogError::InvalidConfig(_))
        ));
        assert!(matches!(
            cell_histogram(&mag, &ori, 0, 0, &params),
            Err(HogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn cell_outside_field_is_rejected() {
        let (mag, ori) = uniform_field(16, 16, 0.5, 45.0);
        let params = HogParams::default();
        assert!(cell_histogram(&mag, &ori, 1, 1, &params).is_ok());
        assert!(matches!(
            cell_histogram(&mag, &ori, 2, 0, &params),
            Err(HogError::InvalidInput(_))
        ));
    }
}
