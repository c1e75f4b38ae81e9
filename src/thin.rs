//! Single-pass morphological thinning of an edge map.

use crate::{EdgeMap, EDGE, NOT_EDGE};

/// Removes the bottom-right pixel of every solid 2×2 block of [`EDGE`].
///
/// Pixels `(x, y)` with `x` in `[1, width - 1)` and `y` in `[1, height - 1)`
/// are visited row by row. A pixel is cleared when it and its left, upper
/// and upper-left neighbors are all [`EDGE`].
///
/// The scan runs in place, so later checks see pixels cleared earlier in
/// the same pass. The result depends on that order and the pass must stay
/// sequential.
pub fn thin(edges: &mut EdgeMap) {
    let (width, height) = edges.dimensions();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if is_excess(edges, x, y) {
                edges.set(x, y, NOT_EDGE);
            }
        }
    }

    debug!("thin: {} edge pixels remain", edges.count(|v| v == EDGE));
}

#[inline]
fn is_excess(edges: &EdgeMap, x: usize, y: usize) -> bool {
    edges.get(x, y) == EDGE
        && edges.get(x - 1, y - 1) == EDGE
        && edges.get(x, y - 1) == EDGE
        && edges.get(x - 1, y) == EDGE
}
