//! Row-parallel iteration helpers.
//!
//! Per-pixel stages write each output row independently, so they can be
//! spread over Rayon's pool when the `parallel` feature is enabled. Without
//! the feature the same closures run sequentially; output is identical in
//! both modes.
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::parallel::for_each_row;
//!
//! let mut rows = vec![0.0f32; 4 * 3];
//! for_each_row(&mut rows, 4, |y, row| row.fill(y as f32));
//! assert_eq!(rows[8], 2.0);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs `f(y, row)` over every `row_len`-sized chunk of `dst`.
///
/// `row_len` must be non-zero.
pub fn for_each_row<T, F>(dst: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
