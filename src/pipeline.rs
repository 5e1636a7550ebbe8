//! End-to-end HOG descriptor computation.
//!
//! Stages, in order:
//! 1. intensity normalization (`u8 / 257`)
//! 2. centered-difference gradients, magnitude and orientation
//! 3. soft-binned cell histograms
//! 4. overlapping block normalization
//! 5. flattening into the descriptor
//!
//! # Example
//! ```no_run
//! use hog_descriptor::prelude::*;
//!
//! # fn example() -> hog_descriptor::Result<()> {
//! let pixels = vec![0u8; 64 * 128];
//! let hog = HogDescriptor::new(HogParams::default())?;
//! let descriptor = hog.compute(&ImageU8::new(64, 128, &pixels))?;
//! assert_eq!(descriptor.len(), 3780);
//! # Ok(())
//! # }
//! ```
use crate::block::block_vectors;
use crate::config::HogParams;
use crate::descriptor::{flatten_blocks, Descriptor};
use crate::diagnostics::{GridShape, HogReport, InputDescriptor, PipelineTrace, TimingBreakdown};
use crate::error::Result;
use crate::gradient::{gradient_field, magnitude_orientation};
use crate::histogram::cell_histograms;
use crate::image::ImageU8;
use crate::intensity::to_intensity_grid;
use log::debug;
use std::time::Instant;

/// Configured descriptor extractor. Stateless between calls.
#[derive(Clone, Debug)]
pub struct HogDescriptor {
    params: HogParams,
}

impl HogDescriptor {
    /// Validate `params` and build the extractor.
    pub fn new(params: HogParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &HogParams {
        &self.params
    }

    /// Descriptor length produced for a `width × height` image, `None` when
    /// the image cannot be tiled into whole cells.
    pub fn descriptor_len(&self, width: usize, height: usize) -> Option<usize> {
        self.params.descriptor_len(width, height)
    }

    /// Compute the descriptor of an 8-bit grayscale image.
    ///
    /// Keeps only what the next stage needs; use
    /// [`compute_with_diagnostics`](Self::compute_with_diagnostics) to inspect
    /// intermediate grids.
    pub fn compute(&self, gray: &ImageU8<'_>) -> Result<Descriptor> {
        let intensity = to_intensity_grid(gray)?;
        let (magnitude, orientation) = magnitude_orientation(&intensity, self.params.orientation);
        let cells = cell_histograms(&magnitude, &orientation, &self.params)?;
        let blocks = block_vectors(&cells, &self.params)?;
        flatten_blocks(&blocks)
    }

    /// Compute the descriptor and keep every intermediate stage.
    pub fn compute_with_diagnostics(&self, gray: &ImageU8<'_>) -> Result<HogReport> {
        debug!(
            "HogDescriptor::compute start w={} h={} bins={} cell={} block={} orientation={:?} edge_bins={:?}",
            gray.w,
            gray.h,
            self.params.number_of_bins,
            self.params.cell_size,
            self.params.block_size,
            self.params.orientation,
            self.params.edge_bins
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage_start = Instant::now();
        let intensity = to_intensity_grid(gray)?;
        timings.push("intensity", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let gradients = gradient_field(&intensity, self.params.orientation);
        timings.push("gradient", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let cells = cell_histograms(&gradients.magnitude, &gradients.orientation, &self.params)?;
        timings.push("cells", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let blocks = block_vectors(&cells, &self.params)?;
        timings.push("blocks", elapsed_ms(stage_start));

        let stage_start = Instant::now();
        let descriptor = flatten_blocks(&blocks)?;
        timings.push("flatten", elapsed_ms(stage_start));

        timings.total_ms = elapsed_ms(total_start);

        let trace = PipelineTrace {
            input: InputDescriptor {
                width: gray.w,
                height: gray.h,
            },
            cells: GridShape::from(&cells),
            blocks: GridShape::from(&blocks),
            descriptor_len: descriptor.len(),
            mean_intensity: intensity.mean(),
            mean_magnitude: gradients.magnitude.mean(),
            timings,
        };
        debug!(
            "HogDescriptor::compute done cells={}x{} blocks={}x{} len={} total_ms={:.3}",
            trace.cells.rows,
            trace.cells.cols,
            trace.blocks.rows,
            trace.blocks.cols,
            trace.descriptor_len,
            trace.timings.total_ms
        );

        Ok(HogReport {
            intensity,
            gradients,
            cells,
            blocks,
            descriptor,
            trace,
        })
    }
}

impl Default for HogDescriptor {
    fn default() -> Self {
        Self {
            params: HogParams::default(),
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrientationMode;
    use crate::error::HogError;

    #[test]
    fn invalid_params_are_rejected_up_front() {
        let err = HogDescriptor::new(HogParams::default().with_cell_size(0)).unwrap_err();
        assert!(matches!(err, HogError::InvalidConfig(_)));
    }

    #[test]
    fn report_trace_matches_stages() {
        let pixels: Vec<u8> = (0..32 * 16).map(|i| (i * 37 % 251) as u8).collect();
        let hog = HogDescriptor::default();
        let report = hog
            .compute_with_diagnostics(&ImageU8::new(16, 32, &pixels))
            .unwrap();
        assert_eq!(report.trace.cells, GridShape { rows: 4, cols: 2, depth: 9 });
        assert_eq!(report.trace.blocks, GridShape { rows: 3, cols: 1, depth: 36 });
        assert_eq!(report.trace.descriptor_len, 108);
        assert_eq!(Some(report.descriptor.len()), hog.descriptor_len(16, 32));
        let labels: Vec<&str> = report
            .trace
            .timings
            .stages
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, ["intensity", "gradient", "cells", "blocks", "flatten"]);
        assert!(report.trace.mean_intensity > 0.0);
    }

    #[test]
    fn lean_path_matches_diagnostics_path() {
        let pixels: Vec<u8> = (0..64 * 128).map(|i| (i * 97 % 253) as u8).collect();
        let image = ImageU8::new(64, 128, &pixels);
        for orientation in [OrientationMode::Reference, OrientationMode::Unsigned] {
            let hog = HogDescriptor::new(HogParams::default().with_orientation(orientation)).unwrap();
            let lean = hog.compute(&image).unwrap();
            let report = hog.compute_with_diagnostics(&image).unwrap();
            assert_eq!(lean, report.descriptor);
        }
    }

    #[test]
    fn window_smaller_than_a_block_fails() {
        let pixels = vec![10u8; 8 * 16];
        let err = HogDescriptor::default()
            .compute(&ImageU8::new(8, 16, &pixels))
            .unwrap_err();
        assert!(matches!(err, HogError::InvalidInput(_)));
    }
}
