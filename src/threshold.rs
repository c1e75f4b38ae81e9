//! Double-threshold classification with single-pass hysteresis.

use rayon::prelude::*;

use crate::{EdgeMap, Grid, Raster, EDGE, NOT_EDGE, POSSIBLE_EDGE};

/// Classifies suppressed magnitudes into an [`EdgeMap`].
///
/// Pixels within `margin` of any border are always [`NOT_EDGE`]. Inside,
/// a value `>= high_thresh` becomes [`EDGE`], a value `>= low_thresh`
/// becomes [`POSSIBLE_EDGE`], anything else [`NOT_EDGE`].
///
/// A single hysteresis pass then promotes every possible edge with at least
/// one [`EDGE`] among its 8 neighbors and drops the rest. Neighbors are read
/// from the first classification, so a weak pixel only connects to a strong
/// pixel it touches directly: a chain strong → weak → weak keeps just the
/// first weak pixel.
///
/// Thresholds are not checked; `high_thresh < low_thresh` simply classifies
/// everything at or above `low_thresh` as an edge.
///
/// # Examples
///
/// ```
/// use canny_edge::{threshold, Raster, EDGE, NOT_EDGE};
///
/// let local_max = Raster::from_fn(5, 3, |x, _| [0, 50, 20, 20, 0][x]);
/// let edges = threshold(&local_max, 40.0, 10.0, 1);
///
/// assert_eq!(edges.row(1), &[NOT_EDGE, EDGE, EDGE, NOT_EDGE, NOT_EDGE]);
/// ```
pub fn threshold(local_max: &Raster, high_thresh: f64, low_thresh: f64, margin: usize) -> EdgeMap {
    let classified = classify(local_max, high_thresh, low_thresh, margin);
    debug!(
        "threshold: {} strong, {} weak",
        classified.count(|v| v == EDGE),
        classified.count(|v| v == POSSIBLE_EDGE)
    );

    let (width, height) = classified.dimensions();
    fill_interior(width, height, margin, |x, y| match classified.get(x, y) {
        POSSIBLE_EDGE if touches_edge(&classified, x, y) => EDGE,
        POSSIBLE_EDGE => NOT_EDGE,
        class => class,
    })
}

/// First pass: interior pixels become [`EDGE`], [`POSSIBLE_EDGE`] or [`NOT_EDGE`].
fn classify(local_max: &Raster, high_thresh: f64, low_thresh: f64, margin: usize) -> EdgeMap {
    let (width, height) = local_max.dimensions();
    fill_interior(width, height, margin, |x, y| {
        let v = local_max.get(x, y) as f64;
        if v < low_thresh {
            NOT_EDGE
        } else if v >= high_thresh {
            EDGE
        } else {
            POSSIBLE_EDGE
        }
    })
}

/// A [`NOT_EDGE`] map with every pixel at least `margin` inside the border
/// set to `class(x, y)`. Rows are filled in parallel.
fn fill_interior<F>(width: usize, height: usize, margin: usize, class: F) -> EdgeMap
where
    F: Fn(usize, usize) -> i32 + Sync,
{
    let mut out: EdgeMap = Grid::new(width, height);
    if width <= 2 * margin || height <= 2 * margin {
        return out;
    }

    out.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .skip(margin)
        .take(height - 2 * margin)
        .for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate().take(width - margin).skip(margin) {
                *value = class(x, y);
            }
        });

    out
}

/// Whether any of the 8 neighbors of `(x, y)` is [`EDGE`]. Neighbors
/// outside the grid are ignored.
fn touches_edge(edges: &EdgeMap, x: usize, y: usize) -> bool {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];

    OFFSETS.iter().any(|&(ox, oy)| {
        match (x.checked_add_signed(ox), y.checked_add_signed(oy)) {
            (Some(nx), Some(ny)) => edges.get_checked(nx, ny) == Some(EDGE),
            _ => false,
        }
    })
}
