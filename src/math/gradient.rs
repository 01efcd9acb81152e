//! Finite-difference gradient on a (possibly non-uniform) sample grid.
//!
//! Interior points use second-order central differences; the two end points use
//! one-sided first-order differences.

/// Gradient of `y` with respect to `x`.
///
/// Returns an empty vector if the slices differ in length or hold fewer than
/// two samples.
pub fn gradient(y: &[f64], x: &[f64]) -> Vec<f64> {
    let n = y.len();
    if n < 2 || x.len() != n {
        return Vec::new();
    }

    let mut out = vec![0.0; n];
    out[0] = (y[1] - y[0]) / (x[1] - x[0]);
    out[n - 1] = (y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]);

    for i in 1..n - 1 {
        let h0 = x[i] - x[i - 1];
        let h1 = x[i + 1] - x[i];
        // Weighted central difference; reduces to (y[i+1]-y[i-1])/(2h) on a uniform grid.
        out[i] = (h0 * h0 * y[i + 1] - h1 * h1 * y[i - 1] + (h1 * h1 - h0 * h0) * y[i])
            / (h0 * h1 * (h0 + h1));
    }

    out
}
