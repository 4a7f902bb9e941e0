//! Elementwise post-processing of correlation output.
//!
//! Edge maps are built from the raw response by taking magnitudes and zeroing
//! everything below a threshold. None of these functions depend on how the
//! response was computed.

use crate::grid::Grid;
use crate::util::Accumulator;

/// Absolute value of every cell.
pub fn abs<A: Accumulator>(grid: &Grid<A>) -> Grid<A> {
    grid.map(|&v| v.magnitude())
}

/// Zeroes every cell whose magnitude is below `threshold`; other cells are
/// kept unchanged.
pub fn threshold<A: Accumulator>(grid: &Grid<A>, threshold: A) -> Grid<A> {
    grid.map(|&v| if v.magnitude() < threshold { A::ZERO } else { v })
}

/// Binary edge mask: 255 where `|v| >= threshold`, 0 elsewhere.
pub fn edge_mask<A: Accumulator>(grid: &Grid<A>, threshold: A) -> Grid<u8> {
    grid.map(|&v| if v.magnitude() < threshold { 0 } else { 255 })
}

/// Smallest and largest cell values, or `None` for an empty grid.
pub fn min_max<A: Accumulator>(grid: &Grid<A>) -> Option<(A, A)> {
    let (&first, rest) = grid.data().split_first()?;
    Some(rest.iter().fold((first, first), |(lo, hi), &v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    }))
}

/// Linearly rescales values so the minimum maps to 0 and the maximum to 255.
///
/// A constant or empty grid maps to all zeros.
pub fn normalize_to_u8<A: Accumulator>(grid: &Grid<A>) -> Grid<u8> {
    let Some((lo, hi)) = min_max(grid) else {
        return grid.map(|_| 0);
    };
    let lo = lo.to_f64();
    let span = hi.to_f64() - lo;
    if span.is_nan() || span <= 0.0 {
        return grid.map(|_| 0);
    }
    let scale = 255.0 / span;
    grid.map(|&v| ((v.to_f64() - lo) * scale).round().clamp(0.0, 255.0) as u8)
}

/// Number of non-zero cells.
pub fn count_nonzero<A: Accumulator>(grid: &Grid<A>) -> usize {
    grid.data().iter().filter(|&&v| v != A::ZERO).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_keeps_sign_of_survivors() {
        let grid = Grid::from_rows(&[[-15i64, 5], [10, -9]]).unwrap();
        let out = threshold(&grid, 10);
        assert_eq!(out.data(), &[-15, 0, 10, 0]);
    }

    #[test]
    fn abs_then_threshold_on_floats() {
        let grid = Grid::from_rows(&[[-0.5f64, 2.0], [-3.0, 0.0]]).unwrap();
        let out = threshold(&abs(&grid), 1.0);
        assert_eq!(out.data(), &[0.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn edge_mask_is_binary() {
        let grid = Grid::from_rows(&[[-15i64, 5, 10]]).unwrap();
        assert_eq!(edge_mask(&grid, 10).data(), &[255, 0, 255]);
    }

    #[test]
    fn normalize_maps_extremes() {
        let grid = Grid::from_rows(&[[-10i64, 0, 10]]).unwrap();
        assert_eq!(normalize_to_u8(&grid).data(), &[0, 128, 255]);
        assert_eq!(min_max(&grid), Some((-10, 10)));
    }

    #[test]
    fn normalize_constant_grid_is_zero() {
        let grid = Grid::filled(3, 2, 42i64).unwrap();
        assert!(normalize_to_u8(&grid).data().iter().all(|&v| v == 0));
    }

    #[test]
    fn empty_grid_has_no_extremes() {
        let grid = Grid::<i64>::from_vec(Vec::new(), 0, 4).unwrap();
        assert_eq!(min_max(&grid), None);
        let image = normalize_to_u8(&grid);
        assert_eq!((image.width(), image.height()), (0, 4));
        assert_eq!(count_nonzero(&threshold(&abs(&grid), 1)), 0);
    }

    #[test]
    fn count_nonzero_skips_zeros() {
        let grid = Grid::from_rows(&[[0i64, 3], [0, -1]]).unwrap();
        assert_eq!(count_nonzero(&grid), 2);
    }
}
