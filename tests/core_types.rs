use gridcorr::{Anchor, Grid, GridCorrError, GridView, Kernel, ShapeError};

#[test]
fn grid_view_accepts_zero_extent() {
    let data = [0u8; 4];

    let view = GridView::from_slice(&data, 0, 1).unwrap();
    assert_eq!((view.width(), view.height()), (0, 1));

    let view = GridView::from_slice(&data, 1, 0).unwrap();
    assert_eq!((view.width(), view.height()), (1, 0));
}

#[test]
fn grid_accepts_zero_extent() {
    let grid = Grid::<u8>::from_vec(Vec::new(), 0, 0).unwrap();
    assert_eq!((grid.width(), grid.height()), (0, 0));

    let rows: Vec<Vec<i32>> = vec![vec![]; 3];
    let grid = Grid::from_rows(&rows).unwrap();
    assert_eq!((grid.width(), grid.height()), (0, 3));
}

#[test]
fn kernel_rejects_zero_extent() {
    let err = Kernel::<i32>::new(Vec::new(), 3, 0).err().unwrap();
    assert_eq!(
        err,
        GridCorrError::Shape(ShapeError::ZeroExtent {
            width: 0,
            height: 3,
        })
    );
}

#[test]
fn grid_view_rejects_invalid_stride() {
    let data = [0i16; 8];

    let err = GridView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        GridCorrError::Shape(ShapeError::InvalidStride {
            width: 4,
            stride: 3,
        })
    );
}

#[test]
fn grid_from_vec_requires_exact_length() {
    let err = Grid::from_vec(vec![0u8; 5], 2, 2).err().unwrap();
    assert_eq!(
        err,
        GridCorrError::Shape(ShapeError::LengthMismatch {
            expected: 4,
            got: 5,
        })
    );
    let grid = Grid::from_vec(vec![1u8, 2, 3, 4], 2, 2).unwrap();
    assert_eq!(grid.get(1, 0).copied(), Some(2));
    assert_eq!(grid.rows().count(), 2);
}

#[test]
fn ragged_grid_is_shape_error() {
    let rows = vec![vec![1u8, 2, 3], vec![4, 5, 6], vec![7, 8]];
    let err = Grid::from_rows(&rows).err().unwrap();
    assert!(err.is_shape());
    assert_eq!(
        err,
        GridCorrError::Shape(ShapeError::RaggedRows {
            row: 2,
            expected: 3,
            got: 2,
        })
    );
}

#[test]
fn kernel_from_flat_array_is_shape_error() {
    let err = Kernel::from_shape(vec![1i32, -2, 1], &[3], None)
        .err()
        .unwrap();
    assert_eq!(
        err,
        GridCorrError::Shape(ShapeError::NotTwoDimensional { ndim: 1 })
    );

    let err = Kernel::from_shape(vec![1.0f32; 8], &[2, 2, 2], None)
        .err()
        .unwrap();
    assert_eq!(
        err,
        GridCorrError::Shape(ShapeError::NotTwoDimensional { ndim: 3 })
    );
}

#[test]
fn kernel_anchor_past_last_row_is_rejected() {
    let weights = vec![0i32, 1, 0, 1, -4, 1, 0, 1, 0];
    let err = Kernel::from_shape(weights, &[3, 3], Some(Anchor::new(3, 0)))
        .err()
        .unwrap();
    assert_eq!(
        err,
        GridCorrError::InvalidAnchor {
            row: 3,
            column: 0,
            rows: 3,
            columns: 3,
        }
    );
}

#[test]
fn kernel_geometry_matches_anchor() {
    let kernel = Kernel::new(vec![1i32; 15], 3, 5).unwrap();
    assert_eq!(kernel.rows(), 3);
    assert_eq!(kernel.columns(), 5);
    assert_eq!(kernel.anchor(), Anchor::new(1, 2));
    assert_eq!(kernel.right_margin(), 2);
    assert_eq!(kernel.bottom_margin(), 1);

    let kernel = kernel.with_anchor(Anchor::new(0, 4)).unwrap();
    assert_eq!(kernel.right_margin(), 0);
    assert_eq!(kernel.bottom_margin(), 2);
}

#[test]
fn even_kernel_centers_toward_top_left() {
    let kernel = Kernel::new(vec![0.25f64; 4], 2, 2).unwrap();
    assert_eq!(kernel.anchor(), Anchor::new(0, 0));
    assert_eq!(kernel.right_margin(), 1);
    assert_eq!(kernel.bottom_margin(), 1);
}
