//! Owned 2D grids in row-major layout.
//!
//! Every stage of the pipeline produces a fresh [`Grid`] sized like its
//! input. Pixels are addressed as `(x, y)` with `x` in `0..width` and `y` in
//! `0..height`; the backing buffer stores row `y` at `y * width..(y + 1) * width`.

use std::ops::{Index, IndexMut};

use crate::{CannyError, CannyResult};

/// Integer raster: source image, blurred image, gradient components.
pub type Raster = Grid<i32>;

/// Per-pixel gradient magnitude `sqrt(dx² + dy²)`.
pub type GradientField = Grid<f64>;

/// Classified edge map holding [`NOT_EDGE`], [`POSSIBLE_EDGE`] or [`EDGE`].
///
/// [`POSSIBLE_EDGE`] only exists between the two threshold passes; a
/// finished pipeline never returns it.
pub type EdgeMap = Grid<i32>;

/// Background pixel in an [`EdgeMap`]
pub const NOT_EDGE: i32 = 0;
/// Weak pixel awaiting hysteresis
pub const POSSIBLE_EDGE: i32 = 128;
/// Edge pixel
pub const EDGE: i32 = 255;

/// A `width × height` grid of values stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Wrap a row-major buffer.
    ///
    /// Fails with [`CannyError::BufferSize`] when `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> CannyResult<Self> {
        if data.len() != width * height {
            return Err(CannyError::BufferSize {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Value at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get_checked(&self, x: usize, y: usize) -> Option<T> {
        (x < self.width && y < self.height).then(|| self.get(x, y))
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let i = self.idx(x, y);
        self.data[i] = value;
    }

    /// Apply `f` to every value, keeping the layout.
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Number of values for which `pred` holds.
    pub fn count(&self, mut pred: impl FnMut(T) -> bool) -> usize {
        self.data.iter().filter(|v| pred(**v)).count()
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Row `y` as a slice of `width` values.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Fail with [`CannyError::DimensionMismatch`] unless `other` has the same size.
    pub fn ensure_same_dimensions<U>(&self, other: &Grid<U>) -> CannyResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(CannyError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.data[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        &mut self.data[y * self.width + x]
    }
}
