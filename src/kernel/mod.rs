//! Kernel weight matrices and their anchor geometry.
//!
//! A kernel is immutable once built. The anchor selects which weight is aligned
//! with the output cell being computed; the margins to its right and below it
//! bound the valid output region together with the anchor itself.

use crate::util::{GridCorrError, GridCorrResult, ShapeError, Weight};

mod presets;

pub use presets::{
    horizontal_difference, laplace4, laplace8, laplacian_of_gaussian5, vertical_difference,
};

/// Kernel cell aligned with the output cell under evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// Row index inside the kernel.
    pub row: usize,
    /// Column index inside the kernel.
    pub column: usize,
}

impl Anchor {
    /// Creates an anchor at `(row, column)`.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Geometric center of a `rows x columns` kernel, rounding toward the
    /// top-left for even extents.
    pub const fn center(rows: usize, columns: usize) -> Self {
        Self {
            row: rows.saturating_sub(1) / 2,
            column: columns.saturating_sub(1) / 2,
        }
    }
}

/// Immutable row-major weight matrix with an anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel<W> {
    weights: Vec<W>,
    rows: usize,
    columns: usize,
    anchor: Anchor,
}

impl<W: Weight> Kernel<W> {
    /// Creates a kernel from `rows * columns` row-major weights, anchored at
    /// the center.
    pub fn new(weights: Vec<W>, rows: usize, columns: usize) -> GridCorrResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(ShapeError::ZeroExtent {
                width: columns,
                height: rows,
            }
            .into());
        }
        let needed = rows.checked_mul(columns).ok_or(ShapeError::TooLarge {
            width: columns,
            height: rows,
        })?;
        if weights.len() != needed {
            return Err(ShapeError::LengthMismatch {
                expected: needed,
                got: weights.len(),
            }
            .into());
        }
        Ok(Self {
            weights,
            rows,
            columns,
            anchor: Anchor::center(rows, columns),
        })
    }

    /// Creates a kernel from a flat buffer and its n-dimensional `shape`.
    ///
    /// `shape` must be `[rows, columns]`. When `anchor` is `None` the kernel
    /// is anchored at its center.
    pub fn from_shape(
        weights: Vec<W>,
        shape: &[usize],
        anchor: Option<Anchor>,
    ) -> GridCorrResult<Self> {
        let &[rows, columns] = shape else {
            return Err(ShapeError::NotTwoDimensional { ndim: shape.len() }.into());
        };
        let kernel = Self::new(weights, rows, columns)?;
        match anchor {
            Some(anchor) => kernel.with_anchor(anchor),
            None => Ok(kernel),
        }
    }

    /// Creates a centered kernel from nested rows of equal length.
    pub fn from_rows<R: AsRef<[W]>>(rows: &[R]) -> GridCorrResult<Self> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut weights = Vec::with_capacity(columns.saturating_mul(rows.len()));
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(ShapeError::RaggedRows {
                    row: idx,
                    expected: columns,
                    got: row.len(),
                }
                .into());
            }
            weights.extend_from_slice(row);
        }
        Self::new(weights, rows.len(), columns)
    }

    /// Returns the kernel with its anchor moved to `anchor`.
    pub fn with_anchor(mut self, anchor: Anchor) -> GridCorrResult<Self> {
        if anchor.row >= self.rows || anchor.column >= self.columns {
            return Err(GridCorrError::InvalidAnchor {
                row: anchor.row,
                column: anchor.column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        self.anchor = anchor;
        Ok(self)
    }
}

impl<W> Kernel<W> {
    /// Number of weight rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of weight columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Anchor position inside the kernel.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Columns to the right of the anchor.
    pub fn right_margin(&self) -> usize {
        self.columns - 1 - self.anchor.column
    }

    /// Rows below the anchor.
    pub fn bottom_margin(&self) -> usize {
        self.rows - 1 - self.anchor.row
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[W] {
        &self.weights
    }

    /// Weights of kernel row `r`.
    pub fn row(&self, r: usize) -> Option<&[W]> {
        if r >= self.rows {
            return None;
        }
        let start = r * self.columns;
        self.weights.get(start..start + self.columns)
    }
}
