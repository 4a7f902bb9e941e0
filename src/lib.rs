//! gridcorr is a small 2D correlation engine for single-channel grids.
//!
//! A [`Kernel`] holds an immutable weight matrix and an anchor. [`apply`]
//! slides it over a [`GridView`] by direct summation, producing a grid of the
//! same shape whose border (where the kernel would leave the input) is zero.
//! The [`post`] helpers and [`EdgeDetector`] turn the response into edge maps.
//! Optional features add row parallelism (`rayon`), spans (`tracing`) and
//! image file I/O (`image-io`).

pub mod detect;
pub mod engine;
pub mod grid;
pub mod kernel;
pub mod lowlevel;
pub mod post;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use grid::io;

pub use detect::{EdgeConfig, EdgeDetector};
pub use engine::{apply, apply_rows, ValidRegion};
#[cfg(feature = "rayon")]
pub use engine::rayon::apply_par;
pub use grid::{Grid, GridView};
pub use kernel::{Anchor, Kernel};
pub use util::{GridCorrError, GridCorrResult, ShapeError};
