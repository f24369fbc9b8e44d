//! Evenly spaced sample grids.

/// `n` evenly spaced values from `start` to `end`, both endpoints included.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty grid.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last sample so the grid is exactly symmetric when asked to be.
            out[n - 1] = end;
            out
        }
    }
}

/// A grid of `n` samples centred on zero with the given half-width.
pub fn symmetric(half_width: f64, n: usize) -> Vec<f64> {
    linspace(-half_width, half_width, n)
}
