//! Direct-summation correlation of a kernel over a grid.
//!
//! The engine computes correlation, not convolution: the kernel is never
//! flipped, so weight `(r, c)` multiplies the sample `r - anchor.row` rows and
//! `c - anchor.column` columns away from the output cell. For symmetric
//! kernels such as the Laplacians both definitions agree.
//!
//! Only cells where the kernel fully overlaps the grid are computed. Every
//! other output cell is zero. An empty valid region yields an all-zero grid.

use std::ops::Range;

use crate::grid::{Grid, GridView};
use crate::kernel::Kernel;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{Accumulator, GridCorrResult, Weight};

mod plan;
#[cfg(feature = "rayon")]
pub mod rayon;

pub(crate) use plan::CorrelationPlan;

/// Output coordinates where the kernel fully overlaps the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidRegion {
    /// Output rows `anchor.row .. height - bottom_margin`.
    pub rows: Range<usize>,
    /// Output columns `anchor.column .. width - right_margin`.
    pub columns: Range<usize>,
}

impl ValidRegion {
    /// Computes the valid region of `kernel` over a `width x height` grid.
    pub fn new<W>(kernel: &Kernel<W>, width: usize, height: usize) -> Self {
        let anchor = kernel.anchor();
        Self {
            rows: clamped(anchor.row, height.saturating_sub(kernel.bottom_margin())),
            columns: clamped(anchor.column, width.saturating_sub(kernel.right_margin())),
        }
    }

    /// Returns `true` if no output cell can be computed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Returns `true` if column `x`, row `y` is inside the region.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.rows.contains(&y) && self.columns.contains(&x)
    }

    /// Number of computed cells.
    pub fn area(&self) -> usize {
        self.rows.len() * self.columns.len()
    }
}

fn clamped(start: usize, end: usize) -> Range<usize> {
    start..end.max(start)
}

/// Correlates `kernel` over `grid` and returns a grid of the same shape.
///
/// Samples are promoted into the kernel's accumulator type before
/// multiplication, so `u8` images with integer kernels accumulate in `i64`.
/// Integer sums saturate at `i64::MIN` and `i64::MAX`. That bound is only
/// reachable with `i64` samples; every narrower sample type fits exactly.
pub fn apply<W, T>(kernel: &Kernel<W>, grid: GridView<'_, T>) -> Grid<W::Acc>
where
    W: Weight,
    T: Copy + Into<W::Acc>,
{
    let width = grid.width();
    let height = grid.height();
    let _span = trace_span!(
        "apply",
        width = width,
        height = height,
        kernel_rows = kernel.rows(),
        kernel_columns = kernel.columns()
    )
    .entered();

    let region = ValidRegion::new(kernel, width, height);
    let mut out = vec![<W::Acc as Accumulator>::ZERO; width * height];
    if region.is_empty() {
        trace_debug!("empty_valid_region", width = width, height = height);
        return Grid::from_raw(out, width, height);
    }

    let plan = CorrelationPlan::new(kernel);
    for y in region.rows.clone() {
        let out_row = &mut out[y * width..(y + 1) * width];
        plan.correlate_row(grid, y, region.columns.clone(), out_row);
    }

    trace_event!(
        "apply_done",
        valid_rows = region.rows.len(),
        valid_columns = region.columns.len()
    );
    Grid::from_raw(out, width, height)
}

/// Correlates `kernel` over nested rows, rejecting ragged input.
pub fn apply_rows<W, T, R>(kernel: &Kernel<W>, rows: &[R]) -> GridCorrResult<Grid<W::Acc>>
where
    W: Weight,
    T: Copy + Into<W::Acc>,
    R: AsRef<[T]>,
{
    let grid = Grid::from_rows(rows)?;
    Ok(apply(kernel, grid.view()))
}

/// Weighted sum for the single output cell at column `x`, row `y`.
///
/// Returns `None` when the cell is outside the valid region.
pub fn correlate_at<W, T>(
    kernel: &Kernel<W>,
    grid: GridView<'_, T>,
    x: usize,
    y: usize,
) -> Option<W::Acc>
where
    W: Weight,
    T: Copy + Into<W::Acc>,
{
    let region = ValidRegion::new(kernel, grid.width(), grid.height());
    if !region.contains(x, y) {
        return None;
    }
    Some(CorrelationPlan::new(kernel).correlate_cell(grid, x, y))
}

#[cfg(test)]
mod tests {
    use super::{apply, correlate_at, ValidRegion};
    use crate::grid::Grid;
    use crate::kernel::{laplace4, Anchor, Kernel};

    #[test]
    fn valid_region_follows_anchor_and_margins() {
        let k = laplace4();
        let region = ValidRegion::new(&k, 6, 5);
        assert_eq!(region.rows, 1..4);
        assert_eq!(region.columns, 1..5);
        assert_eq!(region.area(), 12);

        let k = Kernel::new(vec![1i32; 6], 2, 3)
            .unwrap()
            .with_anchor(Anchor::new(1, 2))
            .unwrap();
        let region = ValidRegion::new(&k, 4, 4);
        assert_eq!(region.rows, 1..4);
        assert_eq!(region.columns, 2..4);
    }

    #[test]
    fn valid_region_is_empty_for_oversized_kernel() {
        let k = Kernel::new(vec![1i32; 25], 5, 5).unwrap();
        let region = ValidRegion::new(&k, 3, 8);
        assert!(region.is_empty());
        assert_eq!(region.area(), 0);
    }

    #[test]
    fn oversized_kernel_gives_zero_grid() {
        let k = Kernel::new(vec![1i32; 25], 5, 5).unwrap();
        let grid = Grid::filled(4, 4, 7u8).unwrap();
        let out = apply(&k, grid.view());
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 4);
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn asymmetric_kernel_is_not_flipped() {
        let k = Kernel::from_rows(&[[1i32, 2, 3]]).unwrap();
        let grid = Grid::from_rows(&[[1u8, 10, 100]]).unwrap();
        let out = apply(&k, grid.view());
        assert_eq!(out.data(), &[0, 321, 0]);
    }

    #[test]
    fn extreme_i64_samples_saturate() {
        let k = Kernel::from_rows(&[[2i64]]).unwrap();
        let grid = Grid::from_rows(&[[i64::MAX, i64::MIN, -3]]).unwrap();
        let out = apply(&k, grid.view());
        assert_eq!(out.data(), &[i64::MAX, i64::MIN, -6]);

        let k = Kernel::from_rows(&[[1i32, 1]]).unwrap();
        let grid = Grid::from_rows(&[[i64::MAX, 1]]).unwrap();
        assert_eq!(apply(&k, grid.view()).data(), &[i64::MAX, 0]);
    }

    #[test]
    fn correlate_at_rejects_border_cells() {
        let grid = Grid::filled(3, 3, 1u8).unwrap();
        let k = laplace4();
        assert_eq!(correlate_at(&k, grid.view(), 1, 1), Some(0));
        assert_eq!(correlate_at(&k, grid.view(), 0, 1), None);
        assert_eq!(correlate_at(&k, grid.view(), 1, 2), None);
    }
}
