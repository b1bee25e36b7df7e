//! Dense row-major feature matrix

use crate::error::{ModelError, Result};

/// Row-major matrix of numeric features
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    n_cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Create an empty matrix with a fixed row width
    pub fn new(n_cols: usize) -> Self {
        Self {
            n_cols,
            data: Vec::new(),
        }
    }

    /// Create an empty matrix with room for `n_rows` rows
    pub fn with_capacity(n_cols: usize, n_rows: usize) -> Self {
        Self {
            n_cols,
            data: Vec::with_capacity(n_cols * n_rows),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.n_cols {
            return Err(ModelError::WidthMismatch {
                expected: self.n_cols,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Row `i`
    ///
    /// # Panics
    /// Panics if `i >= n_rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.n_cols.max(1))
    }

    pub fn n_rows(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.data.len() / self.n_cols
        }
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }
}
