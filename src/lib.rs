//! # Canny Edge Detection Library
//!
//! This crate turns a grayscale integer raster into a classified edge map using a
//! fixed Canny-style pipeline:
//!
//! 1. Gaussian smoothing with a generated (or precomputed 5×5) kernel
//! 2. Sobel gradients and gradient magnitude
//! 3. Non-maximum suppression along four quantized directions
//! 4. Double thresholding with a single hysteresis pass
//! 5. Single-pass thinning of solid 2×2 edge blocks
//!
//! Every stage allocates a fresh grid of the input size; only the final
//! thinning step mutates its input. Stages 1–4 are parallelized across rows
//! with rayon, thinning runs sequentially.
//!
//! ## Features
//!
//! - Generic convolution over integer and floating-point kernels
//! - Exact reproduction of the border handling: each convolution copies a
//!   frame of the unfiltered input
//! - Access to every intermediate grid via [`CannyStages`]
//! - Conversion from and to `image` buffers
//! - Optional debug logging (enable with `logger` feature)
//!
//! ## Basic Usage
//!
//! ```rust
//! use canny_edge::{detect_edges_default, Raster, EDGE};
//!
//! // Two bright columns on a dark background
//! let raster = Raster::from_fn(10, 10, |x, _| if x == 4 || x == 5 { 255 } else { 0 });
//! let edges = detect_edges_default(&raster).unwrap();
//!
//! assert_eq!(edges.dimensions(), (10, 10));
//! assert!(edges.count(|v| v == EDGE) > 0);
//! ```
//!
//! ## Working With Images
//!
//! ```rust,no_run
//! use image::open;
//! use canny_edge::{detect_edges_in_image, CannyConfig};
//!
//! let image = open("input.png").unwrap().to_luma8();
//! let edges = detect_edges_in_image(&image, &CannyConfig::default()).unwrap();
//! edges.save("edges.png").unwrap();
//! ```
//!
//! ## Optional Features
//!
//! ### Logger Feature
//!
//! Enable debug logging to monitor the pipeline:
//!
//! ```toml
//! [dependencies]
//! canny-edge = { version = "0.1.0", features = ["logger"] }
//! log = "0.4"
//! env_logger = "0.11"
//! ```
//!
//! ```rust,no_run
//! use canny_edge::{detect_edges_default, Raster};
//!
//! // Initialize logger to see debug output
//! env_logger::init();
//!
//! let raster = Raster::from_fn(64, 64, |x, y| ((x ^ y) & 0xff) as i32);
//! let edges = detect_edges_default(&raster).unwrap();
//! // With logger feature, you'll see debug messages like:
//! // DEBUG canny_edge: blurred with 5x5 kernel
//! // DEBUG canny_edge::threshold: threshold: 120 strong, 48 weak
//! ```
//!
//! ## Inspecting Intermediate Stages
//!
//! ```rust
//! use canny_edge::{CannyConfig, Raster};
//!
//! let raster = Raster::from_fn(16, 16, |x, _| if x >= 8 { 200 } else { 20 });
//! let stages = CannyConfig::new(60.0, 20.0).detect_stages(&raster).unwrap();
//!
//! // Rows 3..13 see a clean vertical step: dx vanishes there
//! assert!((3..13).all(|y| stages.dx.get(8, y) == 0));
//! assert_eq!(stages.edges.dimensions(), (16, 16));
//! ```

// Conditional logging macros
#[cfg(feature = "logger")]
macro_rules! debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(feature = "logger"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

pub mod convolve;
mod error;
pub mod gradient;
pub mod grid;
pub mod imaging;
pub mod kernel;
pub mod nms;
pub mod thin;
pub mod threshold;

pub use convolve::convolve;
pub use error::{CannyError, CannyResult};
pub use gradient::{compute_gradient, gradient_magnitude, Gradient};
pub use grid::{EdgeMap, GradientField, Grid, Raster, EDGE, NOT_EDGE, POSSIBLE_EDGE};
pub use imaging::{
    detect_edges_in_image, edge_map_to_luma8, luminance, raster_to_luma8, visualize_edges,
};
pub use kernel::{gaussian_kernel, Kernel, GAUSSIAN_5X5_SIGMA_1_4, SOBEL_X, SOBEL_Y};
pub use nms::{non_maximum_suppression, GradientDirection, SUPPRESSION_MARGIN};
pub use thin::thin;
pub use threshold::threshold;

/// Parameters of one pipeline run.
///
/// Thresholds are compared against truncated gradient magnitudes after
/// non-maximum suppression. They are not validated: a `high_threshold`
/// below `low_threshold` silently turns every pixel at or above
/// `low_threshold` into an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyConfig {
    /// Magnitudes at or above this value are edges outright.
    pub high_threshold: f64,

    /// Magnitudes at or above this value (and below `high_threshold`) are
    /// kept only when touching an edge pixel.
    pub low_threshold: f64,

    /// Side of the Gaussian kernel. Should be odd.
    pub kernel_size: usize,

    /// Standard deviation of the Gaussian kernel.
    pub kernel_sigma: f64,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            high_threshold: 40.0,
            low_threshold: 10.0,
            kernel_size: 5,
            kernel_sigma: 1.4,
        }
    }
}

impl CannyConfig {
    /// Default 5×5, σ = 1.4 smoothing with the given thresholds.
    pub fn new(high_threshold: f64, low_threshold: f64) -> Self {
        Self {
            high_threshold,
            low_threshold,
            ..Self::default()
        }
    }

    pub fn with_kernel(mut self, kernel_size: usize, kernel_sigma: f64) -> Self {
        self.kernel_size = kernel_size;
        self.kernel_sigma = kernel_sigma;
        self
    }

    /// Border excluded from thresholding: `(kernel_size - 1) / 2`.
    pub fn margin(&self) -> usize {
        self.kernel_size.saturating_sub(1) / 2
    }

    /// The smoothing kernel described by this configuration.
    pub fn gaussian_kernel(&self) -> Kernel<f64> {
        gaussian_kernel(self.kernel_size, self.kernel_sigma)
    }

    /// Runs the full pipeline and returns the thinned edge map.
    pub fn detect(&self, raster: &Raster) -> CannyResult<EdgeMap> {
        Ok(self.detect_stages(raster)?.edges)
    }

    /// Runs the full pipeline and keeps every intermediate grid.
    ///
    /// # Algorithm Pipeline
    ///
    /// 1. Convolve with the Gaussian kernel
    /// 2. Sobel `dx`, `dy` and magnitude of the blurred raster
    /// 3. Non-maximum suppression
    /// 4. Thresholding with a margin of [`CannyConfig::margin`] and one
    ///    hysteresis pass
    /// 5. In-place thinning
    pub fn detect_stages(&self, raster: &Raster) -> CannyResult<CannyStages> {
        debug!("start canny on {}x{} raster", raster.width(), raster.height());

        let kernel = self.gaussian_kernel();
        let blurred = convolve(raster, &kernel);
        debug!("blurred with {}x{} kernel", kernel.size(), kernel.size());

        let Gradient { dx, dy, magnitude } = compute_gradient(&blurred)?;

        let local_max = non_maximum_suppression(&magnitude, &dx, &dy)?;

        let mut edges = threshold(
            &local_max,
            self.high_threshold,
            self.low_threshold,
            self.margin(),
        );

        thin(&mut edges);
        debug!("canny done, {} edge pixels", edges.count(|v| v == EDGE));

        Ok(CannyStages {
            blurred,
            dx,
            dy,
            magnitude,
            local_max,
            edges,
        })
    }
}

/// Every grid produced by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct CannyStages {
    /// Input after Gaussian smoothing
    pub blurred: Raster,
    /// Sobel response along [`SOBEL_X`]
    pub dx: Raster,
    /// Sobel response along [`SOBEL_Y`]
    pub dy: Raster,
    /// Gradient magnitude
    pub magnitude: GradientField,
    /// Truncated magnitudes surviving non-maximum suppression
    pub local_max: Raster,
    /// Final edge map, values in {[`NOT_EDGE`], [`EDGE`]}
    pub edges: EdgeMap,
}

/// Detects edges in `raster`.
///
/// # Arguments
///
/// * `raster` - Grayscale raster, values conventionally 0–255
/// * `high_threshold` - Magnitude at which a pixel is an edge (typically 40)
/// * `low_threshold` - Magnitude at which a pixel may be an edge (typically 10)
/// * `kernel_size` - Odd side of the Gaussian kernel (typically 5)
/// * `kernel_sigma` - Gaussian standard deviation (typically 1.4)
///
/// # Returns
///
/// An [`EdgeMap`] of the same size as `raster` holding only [`EDGE`] and
/// [`NOT_EDGE`].
///
/// # Examples
///
/// ```rust
/// use canny_edge::{detect_edges, Raster, EDGE, NOT_EDGE};
///
/// let raster = Raster::from_fn(12, 12, |_, y| if y < 6 { 30 } else { 220 });
/// let edges = detect_edges(&raster, 40.0, 10.0, 3, 1.0).unwrap();
///
/// assert!(edges.as_slice().iter().all(|v| *v == EDGE || *v == NOT_EDGE));
/// ```
pub fn detect_edges(
    raster: &Raster,
    high_threshold: f64,
    low_threshold: f64,
    kernel_size: usize,
    kernel_sigma: f64,
) -> CannyResult<EdgeMap> {
    CannyConfig::new(high_threshold, low_threshold)
        .with_kernel(kernel_size, kernel_sigma)
        .detect(raster)
}

/// Detects edges with thresholds 40 / 10 and the 5×5, σ = 1.4 kernel.
pub fn detect_edges_default(raster: &Raster) -> CannyResult<EdgeMap> {
    CannyConfig::default().detect(raster)
}
