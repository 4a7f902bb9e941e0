use crate::grid::GridView;
use crate::util::{GridCorrResult, ShapeError};

/// Owned contiguous row-major grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    /// Wraps a contiguous buffer of exactly `width * height` samples.
    pub fn from_vec(data: Vec<T>, width: usize, height: usize) -> GridCorrResult<Self> {
        let needed = width
            .checked_mul(height)
            .ok_or(ShapeError::TooLarge { width, height })?;
        if data.len() != needed {
            return Err(ShapeError::LengthMismatch {
                expected: needed,
                got: data.len(),
            }
            .into());
        }
        Ok(Self::from_raw(data, width, height))
    }

    /// Wraps a flat buffer described by an n-dimensional `shape`.
    ///
    /// The shape must be `[height, width]`; anything else is rejected rather
    /// than reshaped.
    pub fn from_shape(data: Vec<T>, shape: &[usize]) -> GridCorrResult<Self> {
        match *shape {
            [height, width] => Self::from_vec(data, width, height),
            _ => Err(ShapeError::NotTwoDimensional { ndim: shape.len() }.into()),
        }
    }

    pub(crate) fn from_raw(data: Vec<T>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the samples in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the grid and returns its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the element at column `x`, row `y` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Returns row `y`.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.height).map(move |y| &self.data[y * self.width..(y + 1) * self.width])
    }

    /// Returns `true` if the grid holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a borrowed view of the grid.
    pub fn view(&self) -> GridView<'_, T> {
        GridView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Applies `f` to every sample, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid::from_raw(self.data.iter().map(f).collect(), self.width, self.height)
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> GridCorrResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(ShapeError::TooLarge { width, height })?;
        Ok(Self::from_raw(vec![value; len], width, height))
    }

    /// Builds a grid from nested rows; all rows must have the same length.
    ///
    /// No rows gives a `0x0` grid, and empty rows give a `0 x rows.len()` one.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> GridCorrResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::RaggedRows {
                    row: idx,
                    expected: width,
                    got: row.len(),
                }
                .into());
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_raw(data, width, height))
    }
}

impl<T: Clone> Grid<T> {
    /// Copies a possibly strided view into a contiguous grid.
    pub fn from_view(view: GridView<'_, T>) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            if let Some(row) = view.row(y) {
                data.extend_from_slice(row);
            }
        }
        Self::from_raw(data, view.width(), view.height())
    }
}
