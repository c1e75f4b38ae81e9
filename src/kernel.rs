//! Convolution kernels and the fixed tables used by the pipeline.
//!
//! Kernels follow the raster convention: `kernel[(i, j)]` is the weight
//! applied to the pixel offset by `i` columns and `j` rows from the kernel
//! center. Tables written as `[[T; N]; N]` are read the same way, so
//! `table[i][j]` is the weight at x-offset `i`, y-offset `j`.

use crate::{CannyError, CannyResult, Grid};

/// Sobel kernel producing the `dx` component.
///
/// Laid out `[x][y]`: each inner array is one kernel column.
/// ```text
/// [ 1  0 -1]
/// [ 2  0 -2]
/// [ 1  0 -1]
/// ```
pub const SOBEL_X: [[i32; 3]; 3] = [[1, 0, -1], [2, 0, -2], [1, 0, -1]];

/// Sobel kernel producing the `dy` component, laid out `[x][y]`.
/// ```text
/// [ 1  2  1]
/// [ 0  0  0]
/// [-1 -2 -1]
/// ```
pub const SOBEL_Y: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Precomputed 5×5 Gaussian kernel for `sigma = 1.4`.
///
/// Returned verbatim by [`gaussian_kernel`] for `(5, 1.4)` so the common
/// configuration is bit-for-bit reproducible.
#[allow(clippy::excessive_precision)]
pub const GAUSSIAN_5X5_SIGMA_1_4: [[f64; 5]; 5] = [
    [
        0.0121461242019898,
        0.0261099442007322,
        0.0336973192407131,
        0.0261099442007322,
        0.0121461242019898,
    ],
    [
        0.0261099442007322,
        0.0561273024075996,
        0.0724375208467849,
        0.0561273024075996,
        0.0261099442007322,
    ],
    [
        0.0336973192407131,
        0.0724375208467849,
        0.0934873796057929,
        0.0724375208467849,
        0.0336973192407131,
    ],
    [
        0.0261099442007322,
        0.0561273024075996,
        0.0724375208467849,
        0.0561273024075996,
        0.0261099442007322,
    ],
    [
        0.0121461242019898,
        0.0261099442007322,
        0.0336973192407131,
        0.0261099442007322,
        0.0121461242019898,
    ],
];

/// A square convolution kernel.
///
/// Sizes are expected to be odd (`2n + 1`). Even sizes are accepted but the
/// convolver only reads the leading `2n + 1` rows and columns, with
/// `n = (size - 1) / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel<T> {
    weights: Grid<T>,
}

impl<T: Copy> Kernel<T> {
    /// Build a kernel from a `[x][y]` table.
    pub fn from_array<const N: usize>(table: [[T; N]; N]) -> Self {
        Self {
            weights: Grid::from_fn(N, N, |x, y| table[x][y]),
        }
    }

    /// Wrap a grid of weights. Fails unless the grid is square.
    pub fn from_grid(weights: Grid<T>) -> CannyResult<Self> {
        let (width, height) = weights.dimensions();
        if width != height {
            return Err(CannyError::NonSquareKernel { width, height });
        }
        Ok(Self { weights })
    }

    /// Side length of the kernel.
    #[inline]
    pub fn size(&self) -> usize {
        self.weights.width()
    }

    /// `n` in `size = 2n + 1`
    #[inline]
    pub fn half_width(&self) -> usize {
        self.size().saturating_sub(1) / 2
    }

    /// Weight at x-offset index `i` and y-offset index `j` (both `0..size`).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.weights.get(i, j)
    }
}

impl<T: Copy + Into<f64>> Kernel<T> {
    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights
            .as_slice()
            .iter()
            .map(|w| Into::<f64>::into(*w))
            .sum()
    }
}

impl Kernel<i32> {
    /// [`SOBEL_X`] as a kernel.
    pub fn sobel_x() -> Self {
        Self::from_array(SOBEL_X)
    }

    /// [`SOBEL_Y`] as a kernel.
    pub fn sobel_y() -> Self {
        Self::from_array(SOBEL_Y)
    }
}

/// Generate a normalized Gaussian smoothing kernel.
///
/// `(5, 1.4)` returns [`GAUSSIAN_5X5_SIGMA_1_4`]. Any other combination
/// samples `exp(-(i² + j²) / 2σ²) / 2πσ²` for offsets `i, j` in `[-n, n]`
/// and divides every weight by the total, so the kernel sums to 1.
///
/// `size` should be odd. For an even size the last row and column stay zero.
pub fn gaussian_kernel(size: usize, sigma: f64) -> Kernel<f64> {
    if size == 5 && sigma == 1.4 {
        return Kernel::from_array(GAUSSIAN_5X5_SIGMA_1_4);
    }

    let mut weights: Grid<f64> = Grid::new(size, size);
    if size == 0 {
        return Kernel { weights };
    }

    let n = (size - 1) / 2;
    let d2 = 1.0 / (2.0 * sigma * sigma);
    let d1 = d2 / std::f64::consts::PI;

    let mut total = 0.0;
    for i in 0..=2 * n {
        for j in 0..=2 * n {
            let di = i as f64 - n as f64;
            let dj = j as f64 - n as f64;
            let w = d1 * (-(di * di + dj * dj) * d2).exp();
            weights.set(i, j, w);
            total += w;
        }
    }

    Kernel {
        weights: weights.map(|w| w / total),
    }
}
