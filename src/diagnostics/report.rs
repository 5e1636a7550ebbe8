use super::TimingBreakdown;
use crate::block::BlockGrid;
use crate::descriptor::Descriptor;
use crate::gradient::GradientField;
use crate::histogram::CellGrid;
use crate::image::ImageF32;
use serde::Serialize;

/// Result produced by
/// [`HogDescriptor::compute_with_diagnostics`](crate::HogDescriptor::compute_with_diagnostics).
///
/// Holds every intermediate stage so callers can dump or visualize them.
#[derive(Clone, Debug)]
pub struct HogReport {
    pub intensity: ImageF32,
    pub gradients: GradientField,
    pub cells: CellGrid,
    pub blocks: BlockGrid,
    pub descriptor: Descriptor,
    pub trace: PipelineTrace,
}

/// Serializable summary of one pipeline run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub cells: GridShape,
    pub blocks: GridShape,
    pub descriptor_len: usize,
    pub mean_intensity: f32,
    pub mean_magnitude: f32,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// `rows × cols` grid with `depth` floats per entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
    pub depth: usize,
}

impl From<&CellGrid> for GridShape {
    fn from(c: &CellGrid) -> Self {
        Self {
            rows: c.rows,
            cols: c.cols,
            depth: c.bins,
        }
    }
}

impl From<&BlockGrid> for GridShape {
    fn from(b: &BlockGrid) -> Self {
        Self {
            rows: b.rows,
            cols: b.cols,
            depth: b.len,
        }
    }
}
