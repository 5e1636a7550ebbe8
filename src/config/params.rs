//! Parameter types configuring the descriptor stages.
//!
//! One `HogParams` value is fixed when a [`crate::HogDescriptor`] is built and
//! threaded through every stage that consumes it. Defaults reproduce the
//! classic 9-bin / 8-pixel-cell / 2×2-block layout.

use crate::error::{HogError, Result};
use serde::{Deserialize, Serialize};

/// Angular span covered by the orientation histogram, in degrees.
pub const ORIENTATION_SPAN_DEG: f32 = 180.0;

/// Scale that maps an 8-bit sample into `[0, 1)`.
pub const INTENSITY_SCALE: f32 = 257.0;

/// How gradient orientation is derived from `(gx, gy)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// `|atan(gy / gx)|` in degrees, zero when `gx == 0`. Range `[0, 90]`.
    #[default]
    Reference,
    /// `atan2(gy, gx)` folded modulo 180°. Range `[0, 180)`.
    Unsigned,
}

/// Destination of a soft-binning share whose bin index falls outside
/// `[0, number_of_bins)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeBinPolicy {
    /// Circular: below bin 0 lands in the last bin, past the last lands in bin 0.
    #[default]
    Wrap,
    /// Saturate to the nearest valid bin.
    Clamp,
    /// Discard the share.
    Drop,
}

/// Pipeline-wide configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HogParams {
    /// Number of orientation bins spanning 180°.
    pub number_of_bins: usize,
    /// Cell side in pixels.
    pub cell_size: usize,
    /// Block side in cells. Blocks advance by one cell.
    pub block_size: usize,
    /// Stabilizer added to the block L2 norm.
    pub epsilon: f32,
    pub orientation: OrientationMode,
    pub edge_bins: EdgeBinPolicy,
}

impl Default for HogParams {
    fn default() -> Self {
        Self {
            number_of_bins: 9,
            cell_size: 8,
            block_size: 2,
            epsilon: 1e-5,
            orientation: OrientationMode::default(),
            edge_bins: EdgeBinPolicy::default(),
        }
    }
}

impl HogParams {
    pub fn with_bins(mut self, number_of_bins: usize) -> Self {
        self.number_of_bins = number_of_bins;
        self
    }

    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_orientation(mut self, orientation: OrientationMode) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_edge_bins(mut self, edge_bins: EdgeBinPolicy) -> Self {
        self.edge_bins = edge_bins;
        self
    }

    /// Width of one orientation bin in degrees.
    #[inline]
    pub fn bin_width(&self) -> f32 {
        ORIENTATION_SPAN_DEG / self.number_of_bins as f32
    }

    /// Length of one normalized block vector.
    #[inline]
    pub fn block_len(&self) -> usize {
        self.block_size * self.block_size * self.number_of_bins
    }

    /// Descriptor length for a `width × height` window, or `None` when the
    /// window does not tile into whole cells.
    pub fn descriptor_len(&self, width: usize, height: usize) -> Option<usize> {
        if self.cell_size == 0 || width % self.cell_size != 0 || height % self.cell_size != 0 {
            return None;
        }
        let blocks_wide = (width / self.cell_size + 1).saturating_sub(self.block_size);
        let blocks_high = (height / self.cell_size + 1).saturating_sub(self.block_size);
        Some(blocks_wide * blocks_high * self.block_len())
    }

    pub fn validate(&self) -> Result<()> {
        if self.number_of_bins == 0 {
            return Err(HogError::InvalidConfig(
                "number_of_bins must be positive".to_string(),
            ));
        }
        if self.cell_size == 0 {
            return Err(HogError::InvalidConfig(
                "cell_size must be positive".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(HogError::InvalidConfig(
                "block_size must be positive".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(HogError::InvalidConfig(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_reference_window_length() {
        let params = HogParams::default();
        assert_eq!(params.bin_width(), 20.0);
        assert_eq!(params.block_len(), 36);
        assert_eq!(params.descriptor_len(64, 128), Some(3780));
        assert_eq!(params.descriptor_len(60, 128), None);
    }

    #[test]
    fn window_smaller_than_block_has_empty_descriptor() {
        let params = HogParams::default();
        assert_eq!(params.descriptor_len(8, 8), Some(0));
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        assert!(HogParams::default().validate().is_ok());
        assert!(HogParams::default().with_bins(0).validate().is_err());
        assert!(HogParams::default().with_cell_size(0).validate().is_err());
        assert!(HogParams::default().with_block_size(0).validate().is_err());
        assert!(HogParams::default().with_epsilon(-1.0).validate().is_err());
        assert!(HogParams::default()
            .with_epsilon(f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: HogParams =
            serde_json::from_str(r#"{"number_of_bins": 12, "edge_bins": "drop"}"#).unwrap();
        assert_eq!(params.number_of_bins, 12);
        assert_eq!(params.cell_size, 8);
        assert_eq!(params.edge_bins, EdgeBinPolicy::Drop);
        assert_eq!(params.orientation, OrientationMode::Reference);
    }
}
