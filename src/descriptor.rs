//! Final descriptor assembly.
//!
//! Block vectors are concatenated in row-major block order. [`Flatten`] is
//! the typed recursive flattening used for nested block/cell/bin containers,
//! so `Vec<Vec<Vec<f32>>>` dumps and the packed [`BlockGrid`] flatten to the
//! same sequence.
use crate::block::BlockGrid;
use crate::error::{HogError, Result};
use serde::{Deserialize, Serialize};

/// Recursively append scalar leaves in order.
pub trait Flatten {
    fn flatten_into(&self, out: &mut Vec<f32>);

    fn flatten(&self) -> Vec<f32> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

impl Flatten for f32 {
    #[inline]
    fn flatten_into(&self, out: &mut Vec<f32>) {
        out.push(*self);
    }
}

impl<T: Flatten> Flatten for [T] {
    fn flatten_into(&self, out: &mut Vec<f32>) {
        for item in self {
            item.flatten_into(out);
        }
    }
}

impl<T: Flatten> Flatten for Vec<T> {
    fn flatten_into(&self, out: &mut Vec<f32>) {
        self.as_slice().flatten_into(out);
    }
}

impl<T: Flatten, const N: usize> Flatten for [T; N] {
    fn flatten_into(&self, out: &mut Vec<f32>) {
        self.as_slice().flatten_into(out);
    }
}

impl Flatten for BlockGrid {
    fn flatten_into(&self, out: &mut Vec<f32>) {
        // Storage is already row-major blocks × values.
        out.extend_from_slice(&self.data);
    }
}

/// Flat HOG feature vector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(pub Vec<f32>);

impl Descriptor {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

impl AsRef<[f32]> for Descriptor {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// Concatenate all block vectors. An empty block grid is an error.
pub fn flatten_blocks(blocks: &BlockGrid) -> Result<Descriptor> {
    if blocks.is_empty() {
        return Err(HogError::InvalidInput(
            "block grid is empty; window is smaller than one block".to_string(),
        ));
    }
    let expected = blocks.rows * blocks.cols * blocks.len;
    if blocks.data.len() != expected {
        return Err(HogError::InvalidInput(format!(
            "block grid {}x{}x{} holds {} values",
            blocks.rows,
            blocks.cols,
            blocks.len,
            blocks.data.len()
        )));
    }
    Ok(Descriptor(blocks.flatten()))
}
