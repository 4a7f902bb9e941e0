//! Edge-detection kernels with their default anchors.

use crate::kernel::Kernel;

fn build(weights: &[i32], rows: usize, columns: usize) -> Kernel<i32> {
    Kernel::new(weights.to_vec(), rows, columns).expect("preset extents match weights")
}

/// 4-neighbourhood Laplacian.
pub fn laplace4() -> Kernel<i32> {
    build(&[0, 1, 0, 1, -4, 1, 0, 1, 0], 3, 3)
}

/// 8-neighbourhood Laplacian.
pub fn laplace8() -> Kernel<i32> {
    build(&[1, 1, 1, 1, -8, 1, 1, 1, 1], 3, 3)
}

/// 5x5 Laplacian of Gaussian.
pub fn laplacian_of_gaussian5() -> Kernel<i32> {
    #[rustfmt::skip]
    let weights = [
         0,  0, -1,  0,  0,
         0, -1, -2, -1,  0,
        -1, -2, 16, -2, -1,
         0, -1, -2, -1,  0,
         0,  0, -1,  0,  0,
    ];
    build(&weights, 5, 5)
}

/// Forward difference along a row, `[[1, -1]]`, anchored on the left cell.
pub fn horizontal_difference() -> Kernel<i32> {
    build(&[1, -1], 1, 2)
}

/// Forward difference along a column, `[[1], [-1]]`, anchored on the top cell.
pub fn vertical_difference() -> Kernel<i32> {
    build(&[1, -1], 2, 1)
}
