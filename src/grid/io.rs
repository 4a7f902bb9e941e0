//! Convenience helpers for loading and saving grids via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Color inputs are reduced
//! to a single luma channel before they reach the engine.

use crate::grid::{Grid, GridView};
use crate::util::{GridCorrError, GridCorrResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> GridCorrResult<GridView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    GridView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned grid from a dynamic image, converting it to grayscale.
pub fn grid_from_dynamic_image(img: &image::DynamicImage) -> GridCorrResult<Grid<u8>> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    Grid::from_vec(gray.into_raw(), width, height)
}

/// Loads an image from disk and converts it to a grayscale grid.
pub fn load_gray_grid<P: AsRef<Path>>(path: P) -> GridCorrResult<Grid<u8>> {
    let img = image::open(path).map_err(|err| GridCorrError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_dynamic_image(&img)
}

/// Saves a grid as a grayscale image; the format follows the file extension.
pub fn save_gray_grid<P: AsRef<Path>>(path: P, grid: &Grid<u8>) -> GridCorrResult<()> {
    let width = u32::try_from(grid.width())
        .map_err(|_| GridCorrError::InvalidConfig("grid too wide for an image"))?;
    let height = u32::try_from(grid.height())
        .map_err(|_| GridCorrError::InvalidConfig("grid too tall for an image"))?;
    let img = image::GrayImage::from_raw(width, height, grid.data().to_vec()).ok_or(
        GridCorrError::ImageIo {
            reason: "buffer does not match image extent".to_string(),
        },
    )?;
    img.save(path).map_err(|err| GridCorrError::ImageIo {
        reason: err.to_string(),
    })
}
