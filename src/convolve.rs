//! 2D convolution of an integer raster with a square kernel.

use rayon::prelude::*;

use crate::{Kernel, Raster};

/// Convolves `raster` with `kernel`, returning a raster of the same size.
///
/// The output starts as a copy of the input. Only pixels at least `n` away
/// from every border (with `n` the kernel half-width) are overwritten, so a
/// frame of width `n` keeps the original, unfiltered values.
///
/// For every interior pixel the weighted sum
/// `Σ raster[x + i, y + j] · kernel[n + i, n + j]` over `i, j` in `[-n, n]`
/// is accumulated in `f64` and rounded half to even. Results are not clamped,
/// so Sobel responses may be negative or exceed 255.
///
/// Works for any kernel element convertible to `f64`; integer Sobel kernels
/// and floating-point Gaussian kernels share this one implementation.
///
/// Rows are processed in parallel.
///
/// # Examples
///
/// ```
/// use canny_edge::{convolve, Kernel, Raster};
///
/// let raster = Raster::from_fn(5, 5, |x, _| if x >= 2 { 100 } else { 0 });
/// let dy = convolve(&raster, &Kernel::sobel_y());
///
/// // border column is copied, interior holds the response
/// assert_eq!(dy.get(0, 2), 0);
/// assert_eq!(dy.get(1, 2), -400);
/// ```
pub fn convolve<K>(raster: &Raster, kernel: &Kernel<K>) -> Raster
where
    K: Copy + Into<f64> + Sync,
{
    let mut out = raster.clone();
    let (width, height) = raster.dimensions();
    if kernel.size() == 0 {
        return out;
    }

    let n = kernel.half_width();
    let span = 2 * n;
    if width <= span || height <= span {
        debug!("convolve: {}x{} raster smaller than kernel, copied", width, height);
        return out;
    }

    out.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .skip(n)
        .take(height - span)
        .for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate().take(width - n).skip(n) {
                let mut sum = 0.0f64;
                for i in 0..=span {
                    for j in 0..=span {
                        let pixel = raster.get(x + i - n, y + j - n) as f64;
                        let weight: f64 = kernel.get(i, j).into();
                        sum += pixel * weight;
                    }
                }
                *value = sum.round_ties_even() as i32;
            }
        });

    out
}
