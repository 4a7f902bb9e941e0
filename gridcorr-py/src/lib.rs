//! Python bindings for the gridcorr correlation engine.
//!
//! Exposes `Kernel`, `apply` and the thresholding helpers over numpy arrays.
//! Kernels are float64; grids may be float64 or uint8.

use numpy::ndarray::Array2;
use numpy::{PyArray2, PyReadonlyArray2, PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use gridcorr::post;
use gridcorr::{
    apply as rust_apply, apply_par, Anchor, Grid, GridCorrError, GridView, Kernel as RustKernel,
};

/// Convert a GridCorrError to a Python exception.
fn to_py_err(err: GridCorrError) -> PyErr {
    match err {
        GridCorrError::ImageIo { .. } => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn into_pyarray<'py>(py: Python<'py>, grid: Grid<f64>) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let shape = (grid.height(), grid.width());
    let array = Array2::from_shape_vec(shape, grid.into_vec())
        .map_err(|err| PyRuntimeError::new_err(err.to_string()))?;
    Ok(PyArray2::from_owned_array(py, array))
}

/// Copies a 2D numpy array into a row-major grid.
///
/// `as_slice` also succeeds for Fortran-ordered arrays, whose memory is
/// column-major, so only C-ordered arrays take the direct copy.
fn grid_from_array<T>(array: &PyReadonlyArray2<'_, T>) -> PyResult<Grid<T>>
where
    T: numpy::Element + Copy,
{
    let shape = array.shape();
    let data: Vec<T> = if array.is_c_contiguous() {
        array.as_slice()?.to_vec()
    } else {
        array.as_array().iter().copied().collect()
    };
    Grid::from_shape(data, shape).map_err(to_py_err)
}

/// Immutable correlation kernel with an anchor.
#[pyclass]
#[derive(Clone)]
pub struct Kernel {
    inner: RustKernel<f64>,
}

impl Kernel {
    fn from_preset(preset: RustKernel<i32>) -> PyResult<Self> {
        let weights = preset.weights().iter().map(|&w| f64::from(w)).collect();
        let inner = RustKernel::from_shape(
            weights,
            &[preset.rows(), preset.columns()],
            Some(preset.anchor()),
        )
        .map_err(to_py_err)?;
        Ok(Self { inner })
    }
}

#[pymethods]
impl Kernel {
    /// Create a kernel from a 2D array of weights.
    ///
    /// Args:
    ///     weights: float64 array; must be exactly 2-dimensional
    ///     anchor: (row, column) aligned with the output cell
    ///         (default: center, rounded toward the top-left)
    #[new]
    #[pyo3(signature = (weights, anchor = None))]
    fn new(
        weights: PyReadonlyArrayDyn<'_, f64>,
        anchor: Option<(usize, usize)>,
    ) -> PyResult<Self> {
        let shape = weights.shape().to_vec();
        let data: Vec<f64> = weights.as_array().iter().copied().collect();
        let anchor = anchor.map(|(row, column)| Anchor::new(row, column));
        let inner = RustKernel::from_shape(data, &shape, anchor).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// 4-neighbourhood Laplacian.
    #[staticmethod]
    fn laplace4() -> PyResult<Self> {
        Self::from_preset(gridcorr::kernel::laplace4())
    }

    /// 8-neighbourhood Laplacian.
    #[staticmethod]
    fn laplace8() -> PyResult<Self> {
        Self::from_preset(gridcorr::kernel::laplace8())
    }

    /// 5x5 Laplacian of Gaussian.
    #[staticmethod]
    fn laplacian_of_gaussian5() -> PyResult<Self> {
        Self::from_preset(gridcorr::kernel::laplacian_of_gaussian5())
    }

    #[getter]
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    fn columns(&self) -> usize {
        self.inner.columns()
    }

    #[getter]
    fn anchor(&self) -> (usize, usize) {
        let anchor = self.inner.anchor();
        (anchor.row, anchor.column)
    }

    #[getter]
    fn right_margin(&self) -> usize {
        self.inner.right_margin()
    }

    #[getter]
    fn bottom_margin(&self) -> usize {
        self.inner.bottom_margin()
    }

    fn __repr__(&self) -> String {
        let anchor = self.inner.anchor();
        format!(
            "Kernel(rows={}, columns={}, anchor=({}, {}))",
            self.inner.rows(),
            self.inner.columns(),
            anchor.row,
            anchor.column
        )
    }
}

fn run<T>(kernel: &Kernel, view: GridView<'_, T>, parallel: bool) -> Grid<f64>
where
    T: Copy + Into<f64> + Sync,
{
    if parallel {
        apply_par(&kernel.inner, view)
    } else {
        rust_apply(&kernel.inner, view)
    }
}

/// Correlate a kernel over a float64 grid.
///
/// Args:
///     kernel: Kernel
///     grid: 2D float64 numpy array (height x width)
///     parallel: split rows across threads (default: False)
///
/// Returns:
///     float64 array of the same shape; border cells are zero
#[pyfunction]
#[pyo3(signature = (kernel, grid, parallel = false))]
fn apply<'py>(
    py: Python<'py>,
    kernel: &Kernel,
    grid: PyReadonlyArray2<'py, f64>,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let grid = grid_from_array(&grid)?;
    into_pyarray(py, run(kernel, grid.view(), parallel))
}

/// Correlate a kernel over a uint8 grid (e.g. a grayscale image).
#[pyfunction]
#[pyo3(signature = (kernel, grid, parallel = false))]
fn apply_u8<'py>(
    py: Python<'py>,
    kernel: &Kernel,
    grid: PyReadonlyArray2<'py, u8>,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let grid = grid_from_array(&grid)?;
    into_pyarray(py, run(kernel, grid.view(), parallel))
}

/// Zero every value whose magnitude is below `threshold`.
#[pyfunction]
fn threshold<'py>(
    py: Python<'py>,
    grid: PyReadonlyArray2<'py, f64>,
    threshold: f64,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let grid = grid_from_array(&grid)?;
    into_pyarray(py, post::threshold(&grid, threshold))
}

/// Absolute value of every cell.
#[pyfunction]
fn magnitude<'py>(
    py: Python<'py>,
    grid: PyReadonlyArray2<'py, f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let grid = grid_from_array(&grid)?;
    into_pyarray(py, post::abs(&grid))
}

/// Load an image file as a 2D uint8 grayscale array.
#[pyfunction]
fn load_gray<'py>(py: Python<'py>, path: &str) -> PyResult<Bound<'py, PyArray2<u8>>> {
    let grid = gridcorr::io::load_gray_grid(path).map_err(to_py_err)?;
    let array = Array2::from_shape_vec((grid.height(), grid.width()), grid.into_vec())
        .map_err(|err| PyRuntimeError::new_err(err.to_string()))?;
    Ok(PyArray2::from_owned_array(py, array))
}

/// Python module for the gridcorr correlation engine.
#[pymodule]
fn _gridcorr(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Kernel>()?;
    m.add_function(wrap_pyfunction!(apply, m)?)?;
    m.add_function(wrap_pyfunction!(apply_u8, m)?)?;
    m.add_function(wrap_pyfunction!(threshold, m)?)?;
    m.add_function(wrap_pyfunction!(magnitude, m)?)?;
    m.add_function(wrap_pyfunction!(load_gray, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
