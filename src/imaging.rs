//! Conversions between rasters and `image` buffers.
//!
//! Decoding and rendering stay outside the numeric pipeline; these helpers
//! only move pixel values between [`Raster`]s and `image` buffers.

use image::{buffer::ConvertBuffer, GrayImage, Luma, Rgb, RgbImage};
use imageproc::definitions::{HasBlack, HasWhite};
use rayon::prelude::*;

use crate::{CannyConfig, CannyError, CannyResult, EdgeMap, Grid, Raster, EDGE};

/// Integer luminance `(30·R + 59·G + 11·B) / 100`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> i32 {
    (30 * r as i32 + 59 * g as i32 + 11 * b as i32) / 100
}

impl From<&GrayImage> for Raster {
    fn from(image: &GrayImage) -> Self {
        Grid::from_fn(image.width() as usize, image.height() as usize, |x, y| {
            image.get_pixel(x as u32, y as u32)[0] as i32
        })
    }
}

impl From<&RgbImage> for Raster {
    fn from(image: &RgbImage) -> Self {
        Grid::from_fn(image.width() as usize, image.height() as usize, |x, y| {
            let Rgb([r, g, b]) = *image.get_pixel(x as u32, y as u32);
            luminance(r, g, b)
        })
    }
}

/// Renders a raster as an 8-bit image, clamping values to `0..=255`.
pub fn raster_to_luma8(raster: &Raster) -> GrayImage {
    GrayImage::from_fn(raster.width() as u32, raster.height() as u32, |x, y| {
        Luma([raster.get(x as usize, y as usize).clamp(0, 255) as u8])
    })
}

/// Renders an edge map: [`EDGE`] pixels white, everything else black.
pub fn edge_map_to_luma8(edges: &EdgeMap) -> GrayImage {
    GrayImage::from_fn(edges.width() as u32, edges.height() as u32, |x, y| {
        if edges.get(x as usize, y as usize) == EDGE {
            Luma::<u8>::white()
        } else {
            Luma::<u8>::black()
        }
    })
}

/// Overlays edge pixels in red on the grayscale source image.
///
/// Fails with [`CannyError::DimensionMismatch`] when `edges` was not
/// computed from an image of this size.
///
/// # Examples
///
/// ```rust,no_run
/// use image::open;
/// use canny_edge::{visualize_edges, CannyConfig, Raster};
///
/// let image = open("input.png").unwrap().to_luma8();
/// let edges = CannyConfig::default().detect(&Raster::from(&image)).unwrap();
/// let visualization = visualize_edges(&image, &edges).unwrap();
/// visualization.save("edges_visualization.png").unwrap();
/// ```
pub fn visualize_edges(image: &GrayImage, edges: &EdgeMap) -> CannyResult<RgbImage> {
    let expected = (image.width() as usize, image.height() as usize);
    if edges.dimensions() != expected {
        return Err(CannyError::DimensionMismatch {
            expected,
            actual: edges.dimensions(),
        });
    }

    let mut canvas: RgbImage = image.convert();
    let red = Rgb([255u8, 0, 0]);

    let width = edges.width();
    let points: Vec<(u32, u32)> = edges
        .as_slice()
        .par_iter()
        .enumerate()
        .filter(|(_, v)| **v == EDGE)
        .map(|(i, _)| ((i % width) as u32, (i / width) as u32))
        .collect();

    // Serial drawing, the point list is small compared to the image
    for (x, y) in points {
        canvas.put_pixel(x, y, red);
    }

    Ok(canvas)
}

/// Runs the pipeline on an 8-bit image and renders the result.
pub fn detect_edges_in_image(image: &GrayImage, config: &CannyConfig) -> CannyResult<GrayImage> {
    let edges = config.detect(&Raster::from(image))?;
    Ok(edge_map_to_luma8(&edges))
}
