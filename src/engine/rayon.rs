//! Row-parallel correlation (feature-gated).
//!
//! Rows of the valid region are distributed across the rayon pool. Each output
//! cell depends only on the input, so the result is bit-identical to
//! [`apply`](crate::engine::apply).

use rayon::prelude::*;

use crate::engine::{CorrelationPlan, ValidRegion};
use crate::grid::{Grid, GridView};
use crate::kernel::Kernel;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{Accumulator, Weight};

/// Row-parallel version of [`apply`](crate::engine::apply).
pub fn apply_par<W, T>(kernel: &Kernel<W>, grid: GridView<'_, T>) -> Grid<W::Acc>
where
    W: Weight,
    T: Copy + Into<W::Acc> + Sync,
{
    let width = grid.width();
    let height = grid.height();
    let _span = trace_span!(
        "apply_par",
        width = width,
        height = height,
        kernel_rows = kernel.rows(),
        kernel_columns = kernel.columns(),
        parallel = true
    )
    .entered();

    let region = ValidRegion::new(kernel, width, height);
    let mut out = vec![<W::Acc as Accumulator>::ZERO; width * height];
    if region.is_empty() {
        trace_debug!("empty_valid_region", width = width, height = height);
        return Grid::from_raw(out, width, height);
    }

    let plan = CorrelationPlan::new(kernel);
    let first = region.rows.start;
    let columns = region.columns.clone();
    out[first * width..region.rows.end * width]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(offset, out_row)| {
            plan.correlate_row(grid, first + offset, columns.clone(), out_row);
        });

    trace_event!(
        "apply_done",
        valid_rows = region.rows.len(),
        valid_columns = region.columns.len()
    );
    Grid::from_raw(out, width, height)
}
