//! Edge detection: correlation followed by magnitude and thresholding.
//!
//! `EdgeDetector` binds a kernel to an `EdgeConfig` so the same filter can be
//! run over many images. The kernel itself stays a plain value; the detector
//! only chooses the execution path and the post-processing steps.

use std::cmp::Ordering;

use crate::engine::apply;
use crate::grid::{Grid, GridView};
use crate::kernel::Kernel;
use crate::post;
use crate::trace::trace_span;
use crate::util::{Accumulator, GridCorrError, GridCorrResult, Weight};

/// Configuration for [`EdgeDetector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeConfig<A> {
    /// Magnitudes below this value are zeroed; `None` keeps every magnitude.
    pub threshold: Option<A>,
    /// Run row-parallel when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl<A> Default for EdgeConfig<A> {
    fn default() -> Self {
        Self {
            threshold: None,
            parallel: false,
        }
    }
}

impl<A: Accumulator> EdgeConfig<A> {
    /// Rejects negative or NaN thresholds.
    pub fn validate(&self) -> GridCorrResult<()> {
        if let Some(t) = self.threshold {
            if matches!(t.partial_cmp(&A::ZERO), None | Some(Ordering::Less)) {
                return Err(GridCorrError::InvalidConfig(
                    "threshold must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

/// Reusable kernel + configuration pair.
#[derive(Clone, Debug)]
pub struct EdgeDetector<W: Weight> {
    kernel: Kernel<W>,
    config: EdgeConfig<W::Acc>,
}

impl<W: Weight> EdgeDetector<W> {
    /// Creates a detector with the default configuration.
    pub fn new(kernel: Kernel<W>) -> Self {
        Self {
            kernel,
            config: EdgeConfig::default(),
        }
    }

    /// Replaces the configuration; it is validated on each detection call.
    pub fn with_config(mut self, config: EdgeConfig<W::Acc>) -> Self {
        self.config = config;
        self
    }

    /// Returns the kernel.
    pub fn kernel(&self) -> &Kernel<W> {
        &self.kernel
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EdgeConfig<W::Acc> {
        &self.config
    }

    /// Raw signed correlation response.
    pub fn response<T>(&self, grid: GridView<'_, T>) -> Grid<W::Acc>
    where
        T: Copy + Into<W::Acc> + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            if self.config.parallel {
                return crate::engine::rayon::apply_par(&self.kernel, grid);
            }
        }
        apply(&self.kernel, grid)
    }

    /// Absolute correlation response.
    pub fn magnitude<T>(&self, grid: GridView<'_, T>) -> Grid<W::Acc>
    where
        T: Copy + Into<W::Acc> + Sync,
    {
        post::abs(&self.response(grid))
    }

    /// Absolute response with magnitudes below the threshold zeroed.
    pub fn detect<T>(&self, grid: GridView<'_, T>) -> GridCorrResult<Grid<W::Acc>>
    where
        T: Copy + Into<W::Acc> + Sync,
    {
        self.config.validate()?;
        let _span = trace_span!(
            "detect",
            width = grid.width(),
            height = grid.height(),
            thresholded = self.config.threshold.is_some()
        )
        .entered();

        let magnitude = self.magnitude(grid);
        Ok(match self.config.threshold {
            Some(t) => post::threshold(&magnitude, t),
            None => magnitude,
        })
    }

    /// Binary edge mask (0 or 255); requires a threshold.
    pub fn detect_mask<T>(&self, grid: GridView<'_, T>) -> GridCorrResult<Grid<u8>>
    where
        T: Copy + Into<W::Acc> + Sync,
    {
        self.config.validate()?;
        let t = self
            .config
            .threshold
            .ok_or(GridCorrError::InvalidConfig("edge mask requires a threshold"))?;
        Ok(post::edge_mask(&self.response(grid), t))
    }
}
