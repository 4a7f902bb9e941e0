//! Kernel weights promoted into the accumulator type.

use std::ops::Range;

use crate::grid::GridView;
use crate::kernel::{Anchor, Kernel};
use crate::util::{Accumulator, Weight};

/// Per-call plan: widened weights plus kernel geometry.
pub(crate) struct CorrelationPlan<A> {
    weights: Vec<A>,
    columns: usize,
    anchor: Anchor,
}

impl<A: Accumulator> CorrelationPlan<A> {
    pub(crate) fn new<W: Weight<Acc = A>>(kernel: &Kernel<W>) -> Self {
        Self {
            weights: kernel.weights().iter().map(|w| w.widen()).collect(),
            columns: kernel.columns(),
            anchor: kernel.anchor(),
        }
    }

    /// Sum for the cell at column `x`, row `y`; the caller guarantees it is
    /// inside the valid region.
    #[inline]
    pub(crate) fn correlate_cell<T: Copy + Into<A>>(
        &self,
        grid: GridView<'_, T>,
        x: usize,
        y: usize,
    ) -> A {
        let top = y - self.anchor.row;
        let left = x - self.anchor.column;
        let mut acc = A::ZERO;
        for (kr, weights) in self.weights.chunks_exact(self.columns).enumerate() {
            let src = grid.row(top + kr).expect("row within valid region");
            let src = &src[left..left + self.columns];
            for (&w, &v) in weights.iter().zip(src) {
                acc = acc.add_product(w, v.into());
            }
        }
        acc
    }

    /// Fills `columns` of output row `y`; other cells of `out_row` are untouched.
    pub(crate) fn correlate_row<T: Copy + Into<A>>(
        &self,
        grid: GridView<'_, T>,
        y: usize,
        columns: Range<usize>,
        out_row: &mut [A],
    ) {
        for x in columns {
            out_row[x] = self.correlate_cell(grid, x, y);
        }
    }
}
