//! Shared utility helpers.

pub mod error;
pub mod num;

pub use error::{GridCorrError, GridCorrResult, ShapeError};
pub use num::{Accumulator, Weight};
