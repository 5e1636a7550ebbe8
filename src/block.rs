//! Overlapping block normalization.
//!
//! Every `B × B` neighbourhood of cells (stride one cell) is concatenated in
//! row-major order and scaled by `1 / (‖v‖₂ + ε)`. A grid of `R × C` cells
//! yields `(R − B + 1) × (C − B + 1)` blocks; fewer cells than `B` in either
//! direction yields an empty block grid.
use crate::config::HogParams;
use crate::error::{HogError, Result};
use crate::histogram::CellGrid;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

/// Normalized block vectors stored row-major, `len` floats per block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGrid {
    pub rows: usize,
    pub cols: usize,
    pub len: usize,
    #[serde(skip)]
    pub data: Vec<f32>,
}

impl BlockGrid {
    #[inline]
    pub fn block(&self, row: usize, col: usize) -> &[f32] {
        let start = (row * self.cols + col) * self.len;
        &self.data[start..start + self.len]
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0 || self.len == 0
    }

    /// `rows × cols × len` nested representation.
    pub fn to_nested(&self) -> Vec<Vec<Vec<f32>>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.block(r, c).to_vec()).collect())
            .collect()
    }
}

/// Euclidean norm, accumulated in f64.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter()
        .map(|&x| {
            let x = x as f64;
            x * x
        })
        .sum::<f64>()
        .sqrt() as f32
}

fn normalize_in_place(v: &mut [f32], epsilon: f32) {
    let denom = l2_norm(v) + epsilon;
    if denom == 0.0 {
        // all-zero block with epsilon = 0: leave it zero instead of NaN
        return;
    }
    for x in v.iter_mut() {
        *x /= denom;
    }
}

/// `v / (‖v‖₂ + ε)`.
pub fn normalize_block(v: &[f32], epsilon: f32) -> Vec<f32> {
    let mut out = v.to_vec();
    normalize_in_place(&mut out, epsilon);
    out
}

/// Concatenate the `block_size × block_size` cell histograms whose top-left
/// cell is (`row`, `col`), row-major.
pub fn gather_block(cells: &CellGrid, row: usize, col: usize, block_size: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(block_size * block_size * cells.bins);
    for dr in 0..block_size {
        for dc in 0..block_size {
            out.extend_from_slice(cells.histogram(row + dr, col + dc));
        }
    }
    out
}

fn block_row(cells: &CellGrid, row: usize, cols: usize, params: &HogParams) -> Vec<f32> {
    let mut out = Vec::with_capacity(cols * params.block_len());
    for col in 0..cols {
        let mut v = gather_block(cells, row, col, params.block_size);
        normalize_in_place(&mut v, params.epsilon);
        out.extend_from_slice(&v);
    }
    out
}

/// Normalize every block of the cell grid.
pub fn block_vectors(cells: &CellGrid, params: &HogParams) -> Result<BlockGrid> {
    params.validate()?;
    if cells.bins != params.number_of_bins {
        return Err(HogError::InvalidInput(format!(
            "cell grid carries {} bins, configuration expects {}",
            cells.bins, params.number_of_bins
        )));
    }
    if cells.data.len() != cells.rows * cells.cols * cells.bins {
        return Err(HogError::InvalidInput(format!(
            "cell grid {}x{}x{} holds {} values",
            cells.rows,
            cells.cols,
            cells.bins,
            cells.data.len()
        )));
    }

    let b = params.block_size;
    let rows = (cells.rows + 1).saturating_sub(b);
    let cols = (cells.cols + 1).saturating_sub(b);
    let (rows, cols) = if rows == 0 || cols == 0 {
        (0, 0)
    } else {
        (rows, cols)
    };

    #[cfg(feature = "parallel")]
    let row_data: Vec<Vec<f32>> = (0..rows)
        .into_par_iter()
        .map(|r| block_row(cells, r, cols, params))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let row_data: Vec<Vec<f32>> = (0..rows).map(|r| block_row(cells, r, cols, params)).collect();

    Ok(BlockGrid {
        rows,
        cols,
        len: params.block_len(),
        data: row_data.concat(),
    })
}
