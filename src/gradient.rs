//! Sobel gradients and gradient magnitude.

use rayon::prelude::*;

use crate::{convolve, CannyResult, GradientField, Grid, Kernel, Raster};

/// Gradient components and magnitude of a blurred raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// Response to [`SOBEL_X`](crate::SOBEL_X)
    pub dx: Raster,
    /// Response to [`SOBEL_Y`](crate::SOBEL_Y)
    pub dy: Raster,
    /// `sqrt(dx² + dy²)` per pixel
    pub magnitude: GradientField,
}

/// Computes Sobel gradients of `blurred` and their magnitude.
///
/// Both components come from [`convolve`], so their outermost frame holds
/// the raw pixel values of `blurred` instead of a derivative. The magnitude
/// is evaluated at every pixel, border included, which means the border of
/// `magnitude` mixes those raw values. Later stages only read the border as
/// a comparison neighbor.
pub fn compute_gradient(blurred: &Raster) -> CannyResult<Gradient> {
    let dx = convolve(blurred, &Kernel::sobel_x());
    let dy = convolve(blurred, &Kernel::sobel_y());
    let magnitude = gradient_magnitude(&dx, &dy)?;
    debug!("gradient {}x{} ok", blurred.width(), blurred.height());
    Ok(Gradient { dx, dy, magnitude })
}

/// `sqrt(dx² + dy²)` for externally supplied gradient components.
///
/// Fails with [`CannyError::DimensionMismatch`](crate::CannyError::DimensionMismatch)
/// when `dx` and `dy` differ in size.
pub fn gradient_magnitude(dx: &Raster, dy: &Raster) -> CannyResult<GradientField> {
    dx.ensure_same_dimensions(dy)?;
    let data: Vec<f64> = dx
        .as_slice()
        .par_iter()
        .zip(dy.as_slice().par_iter())
        .map(|(gx, gy)| {
            let (gx, gy) = (*gx as f64, *gy as f64);
            (gx * gx + gy * gy).sqrt()
        })
        .collect();
    Grid::from_vec(dx.width(), dx.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CannyError;

    #[test]
    fn vertical_step_has_no_dx() {
        let raster = Raster::from_fn(6, 6, |x, _| if x >= 3 { 200 } else { 10 });
        let gradient = compute_gradient(&raster).unwrap();
        for y in 1..5 {
            for x in 1..5 {
                assert_eq!(gradient.dx.get(x, y), 0);
            }
        }
        // step lies between columns 2 and 3
        assert_eq!(gradient.dy.get(2, 2), 4 * (10 - 200));
        assert_eq!(gradient.dy.get(3, 2), 4 * (10 - 200));
        assert_eq!(gradient.dy.get(1, 2), 0);
        assert_eq!(gradient.magnitude.get(2, 2), 760.0);
    }

    #[test]
    fn horizontal_step_has_no_dy() {
        let raster = Raster::from_fn(6, 6, |_, y| if y >= 3 { 90 } else { 0 });
        let gradient = compute_gradient(&raster).unwrap();
        for y in 1..5 {
            for x in 1..5 {
                assert_eq!(gradient.dy.get(x, y), 0);
            }
        }
        assert_eq!(gradient.dx.get(2, 2), -360);
        assert_eq!(gradient.magnitude.get(2, 3), 360.0);
    }

    #[test]
    fn border_magnitude_comes_from_raw_pixels() {
        let raster = Raster::from_fn(5, 5, |x, y| (x + 2 * y) as i32);
        let gradient = compute_gradient(&raster).unwrap();
        // (0, 3) keeps the raw value 6 in both components
        assert_eq!(gradient.dx.get(0, 3), 6);
        assert_eq!(gradient.dy.get(0, 3), 6);
        assert_eq!(gradient.magnitude.get(0, 3), (72.0f64).sqrt());
    }

    #[test]
    fn magnitude_is_euclidean() {
        let dx = Raster::from_vec(2, 1, vec![3, -5]).unwrap();
        let dy = Raster::from_vec(2, 1, vec![4, 12]).unwrap();
        let magnitude = gradient_magnitude(&dx, &dy).unwrap();
        assert_eq!(magnitude.as_slice(), &[5.0, 13.0]);
    }

    #[test]
    fn mismatched_components_are_rejected() {
        let dx: Raster = Grid::new(4, 4);
        let dy: Raster = Grid::new(4, 5);
        assert_eq!(
            gradient_magnitude(&dx, &dy),
            Err(CannyError::DimensionMismatch {
                expected: (4, 4),
                actual: (4, 5)
            })
        );
    }
}
