//! Non-maximum suppression along the quantized gradient direction.

use rayon::prelude::*;

use crate::{CannyResult, GradientField, Grid, Raster};

/// Frame width left untouched (zero) by suppression.
pub const SUPPRESSION_MARGIN: usize = 2;

/// `tan(22.5°)`, rounded
const TAN_22_5: f64 = 0.4142;
/// `tan(67.5°)`, rounded
const TAN_67_5: f64 = 2.4142;
/// Tangent used when `dx == 0`; lies in the vertical band.
const VERTICAL_TANGENT: f64 = 3.0;

/// Orientation of the edge through a pixel, one of four octant bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// `tangent` in `[-0.4142, 0.4142)`
    Horizontal,
    /// `tangent < -2.4142` or `tangent >= 2.4142`
    Vertical,
    /// `tangent` in `[-2.4142, -0.4142)`
    Diagonal45,
    /// `tangent` in `[0.4142, 2.4142)`
    Diagonal135,
}

impl GradientDirection {
    /// Classify the integer quotient `dy / dx`, or
    /// [`GradientDirection::Vertical`] when `dx == 0`.
    ///
    /// The quotient truncates toward zero before it is banded, so every
    /// `|dy| < |dx|` is [`GradientDirection::Horizontal`], quotients of ±1
    /// and ±2 are diagonal and anything of magnitude 3 or more is
    /// [`GradientDirection::Vertical`].
    pub fn from_components(dx: i32, dy: i32) -> Self {
        let tangent = if dx == 0 {
            VERTICAL_TANGENT
        } else {
            (dy / dx) as f64
        };
        Self::from_tangent(tangent)
    }

    pub fn from_tangent(tangent: f64) -> Self {
        if (-TAN_22_5..TAN_22_5).contains(&tangent) {
            GradientDirection::Horizontal
        } else if (-TAN_67_5..-TAN_22_5).contains(&tangent) {
            GradientDirection::Diagonal45
        } else if (TAN_22_5..TAN_67_5).contains(&tangent) {
            GradientDirection::Diagonal135
        } else {
            GradientDirection::Vertical
        }
    }

    /// The two neighbors `(x, y)` is compared against.
    ///
    /// Callers must keep `x` and `y` at least one pixel inside the grid.
    #[inline]
    pub fn neighbors(self, x: usize, y: usize) -> [(usize, usize); 2] {
        match self {
            GradientDirection::Horizontal => [(x, y + 1), (x, y - 1)],
            GradientDirection::Vertical => [(x + 1, y), (x - 1, y)],
            GradientDirection::Diagonal45 => [(x + 1, y - 1), (x - 1, y + 1)],
            GradientDirection::Diagonal135 => [(x + 1, y + 1), (x - 1, y - 1)],
        }
    }
}

/// Thins gradient ridges to one pixel by keeping local maxima only.
///
/// Pixels with `x` in `[2, width - 2)` and `y` in `[2, height - 2)` are
/// examined; everything else is zero in the output. A pixel is suppressed to
/// zero when its magnitude is strictly less than either neighbor selected
/// by [`GradientDirection`]; otherwise it keeps its magnitude truncated
/// toward zero.
///
/// Fails with [`CannyError::DimensionMismatch`](crate::CannyError::DimensionMismatch)
/// unless `magnitude`, `dx` and `dy` share one size.
pub fn non_maximum_suppression(
    magnitude: &GradientField,
    dx: &Raster,
    dy: &Raster,
) -> CannyResult<Raster> {
    magnitude.ensure_same_dimensions(dx)?;
    magnitude.ensure_same_dimensions(dy)?;

    let (width, height) = magnitude.dimensions();
    let mut out: Raster = Grid::new(width, height);
    if width <= 2 * SUPPRESSION_MARGIN || height <= 2 * SUPPRESSION_MARGIN {
        return Ok(out);
    }

    out.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .skip(SUPPRESSION_MARGIN)
        .take(height - 2 * SUPPRESSION_MARGIN)
        .for_each(|(y, row)| {
            for (x, value) in row
                .iter_mut()
                .enumerate()
                .take(width - SUPPRESSION_MARGIN)
                .skip(SUPPRESSION_MARGIN)
            {
                let mag = magnitude.get(x, y);
                let direction = GradientDirection::from_components(dx.get(x, y), dy.get(x, y));
                let [(ax, ay), (bx, by)] = direction.neighbors(x, y);

                *value = if mag < magnitude.get(ax, ay) || mag < magnitude.get(bx, by) {
                    0
                } else {
                    mag as i32
                };
            }
        });

    debug!(
        "suppression kept {} of {} pixels",
        out.count(|v| v != 0),
        width * height
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CannyError;

    #[test]
    fn tangent_bands() {
        use GradientDirection::*;
        assert_eq!(GradientDirection::from_tangent(0.0), Horizontal);
        assert_eq!(GradientDirection::from_tangent(-0.4142), Horizontal);
        assert_eq!(GradientDirection::from_tangent(0.4141), Horizontal);
        assert_eq!(GradientDirection::from_tangent(0.4142), Diagonal135);
        assert_eq!(GradientDirection::from_tangent(2.4141), Diagonal135);
        assert_eq!(GradientDirection::from_tangent(2.4142), Vertical);
        assert_eq!(GradientDirection::from_tangent(-0.4143), Diagonal45);
        assert_eq!(GradientDirection::from_tangent(-2.4142), Diagonal45);
        assert_eq!(GradientDirection::from_tangent(-2.4143), Vertical);
        assert_eq!(GradientDirection::from_tangent(-100.0), Vertical);
    }

    #[test]
    fn zero_dx_is_vertical() {
        assert_eq!(
            GradientDirection::from_components(0, 0),
            GradientDirection::Vertical
        );
        assert_eq!(
            GradientDirection::from_components(0, -50),
            GradientDirection::Vertical
        );
        assert_eq!(
            GradientDirection::from_components(10, 3),
            GradientDirection::Horizontal
        );
        assert_eq!(
            GradientDirection::from_components(10, -10),
            GradientDirection::Diagonal45
        );
    }

    #[test]
    fn tangent_truncates_before_banding() {
        use GradientDirection::*;
        assert_eq!(GradientDirection::from_components(2, -1), Horizontal);
        assert_eq!(GradientDirection::from_components(2, 1), Horizontal);
        assert_eq!(GradientDirection::from_components(-7, 6), Horizontal);
        assert_eq!(GradientDirection::from_components(2, 5), Diagonal135);
        assert_eq!(GradientDirection::from_components(3, -7), Diagonal45);
        assert_eq!(GradientDirection::from_components(-4, 11), Diagonal45);
        assert_eq!(GradientDirection::from_components(1, 3), Vertical);
        assert_eq!(GradientDirection::from_components(-1, 3), Vertical);
    }

    #[test]
    fn shallow_gradient_is_suppressed_along_columns() {
        // dy / dx = -1 / 2 truncates to 0: neighbors are (3, 2) and (3, 4),
        // so the bright corner at (4, 2) does not suppress the centre
        let magnitude = GradientField::from_fn(7, 7, |x, y| match (x, y) {
            (3, 3) => 50.0,
            (4, 2) => 99.0,
            _ => 10.0,
        });
        let (dx, dy) = uniform(2, -1);
        let out = non_maximum_suppression(&magnitude, &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 50);

        let magnitude = GradientField::from_fn(7, 7, |x, y| match (x, y) {
            (3, 3) => 50.0,
            (3, 2) => 99.0,
            _ => 10.0,
        });
        let out = non_maximum_suppression(&magnitude, &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 0);
    }

    /// 7x7 fields with a single direction everywhere.
    fn uniform(dx: i32, dy: i32) -> (Raster, Raster) {
        (Raster::from_fn(7, 7, |_, _| dx), Raster::from_fn(7, 7, |_, _| dy))
    }

    #[test]
    fn vertical_ridge_keeps_its_maximum() {
        let magnitude = GradientField::from_fn(7, 7, |x, _| match x {
            3 => 90.7,
            2 | 4 => 40.0,
            _ => 5.0,
        });
        let (dx, dy) = uniform(0, 100);
        let out = non_maximum_suppression(&magnitude, &dx, &dy).unwrap();
        for y in 0..7 {
            for x in 0..7 {
                let expected = if x == 3 && (2..5).contains(&y) { 90 } else { 0 };
                assert_eq!(out.get(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn horizontal_band_compares_rows() {
        // ridge along row 3, gradient pointing along the horizontal band
        let magnitude = GradientField::from_fn(7, 7, |_, y| if y == 3 { 50.0 } else { 60.0 });
        let (dx, dy) = uniform(10, 0);
        let out = non_maximum_suppression(&magnitude, &dx, &dy).unwrap();
        // row 3 is below its neighbors above and below
        assert_eq!(out.get(3, 3), 0);

        let magnitude = GradientField::from_fn(7, 7, |_, y| if y == 3 { 60.0 } else { 50.0 });
        let out = non_maximum_suppression(&magnitude, &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 60);
        // rows beside the ridge lose to it
        assert_eq!(out.get(3, 2), 0);
        assert_eq!(out.get(3, 4), 0);
    }

    #[test]
    fn plateau_is_kept() {
        let magnitude = GradientField::from_fn(7, 7, |_, _| 12.9);
        let (dx, dy) = uniform(5, 1);
        let out = non_maximum_suppression(&magnitude, &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 12);
        assert_eq!(out.count(|v| v == 12), 9);
    }

    #[test]
    fn diagonal_bands_pick_opposite_corners() {
        let peak = |nx: usize, ny: usize| {
            GradientField::from_fn(7, 7, move |x, y| if (x, y) == (nx, ny) { 99.0 } else { 10.0 })
        };

        // +45: (x+1, y-1) and (x-1, y+1)
        let (dx, dy) = uniform(10, -10);
        let out = non_maximum_suppression(&peak(4, 2), &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 0);
        let out = non_maximum_suppression(&peak(4, 4), &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 10);

        // -45: (x+1, y+1) and (x-1, y-1)
        let (dx, dy) = uniform(10, 10);
        let out = non_maximum_suppression(&peak(2, 2), &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 0);
        let out = non_maximum_suppression(&peak(2, 4), &dx, &dy).unwrap();
        assert_eq!(out.get(3, 3), 10);
    }

    #[test]
    fn small_fields_are_all_zero() {
        let magnitude = GradientField::from_fn(4, 9, |_, _| 100.0);
        let (dx, dy) = (Raster::new(4, 9), Raster::new(4, 9));
        let out = non_maximum_suppression(&magnitude, &dx, &dy).unwrap();
        assert_eq!(out.count(|v| v != 0), 0);
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let magnitude = GradientField::new(7, 7);
        let dx = Raster::new(7, 7);
        let dy = Raster::new(6, 7);
        assert_eq!(
            non_maximum_suppression(&magnitude, &dx, &dy),
            Err(CannyError::DimensionMismatch {
                expected: (7, 7),
                actual: (6, 7)
            })
        );
    }
}
