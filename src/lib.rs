#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;

// Stage modules: public for tools and tests that inspect intermediate grids.
pub mod block;
pub mod gradient;
pub mod histogram;
pub mod intensity;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::{EdgeBinPolicy, HogParams, OrientationMode};
pub use crate::descriptor::{Descriptor, Flatten};
pub use crate::diagnostics::{HogReport, PipelineTrace};
pub use crate::error::{HogError, Result};
pub use crate::pipeline::HogDescriptor;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use hog_descriptor::prelude::*;
///
/// # fn main() -> hog_descriptor::Result<()> {
/// let (w, h) = (64usize, 128usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8::new(w, h, &gray);
///
/// let report = HogDescriptor::new(HogParams::default())?.compute_with_diagnostics(&img)?;
/// println!("len={} total_ms={:.3}", report.descriptor.len(), report.trace.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{Descriptor, EdgeBinPolicy, HogDescriptor, HogParams, OrientationMode};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::block::{block_vectors, gather_block, l2_norm, normalize_block, BlockGrid};
    pub use crate::descriptor::flatten_blocks;
    pub use crate::gradient::{gradient_field, magnitude_orientation, GradientField};
    pub use crate::histogram::{cell_histogram, cell_histograms, partition, soft_bin, CellGrid};
    pub use crate::intensity::{grid_to_gray, to_intensity_grid, ORIENTATION_IMAGE_SCALE};

    pub use crate::diagnostics::{GridShape, InputDescriptor, StageTiming, TimingBreakdown};
}
