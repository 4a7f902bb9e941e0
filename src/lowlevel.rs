//! Low-level building blocks for custom filtering pipelines.
//!
//! These expose per-cell evaluation, the valid-region geometry and the numeric
//! traits behind the accumulator choice. Most users should prefer
//! [`apply`](crate::apply) and [`EdgeDetector`](crate::EdgeDetector).

pub use crate::engine::{correlate_at, ValidRegion};
pub use crate::util::{Accumulator, Weight};
