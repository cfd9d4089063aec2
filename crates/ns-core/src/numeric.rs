use crate::NsError;

/// Floating point type used by every model.
pub type Real = f64;

/// Reject the first non-finite entry of `values`.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), NsError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(NsError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| start + i as Real * step).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// True when the sequence never decreases.
pub fn is_non_decreasing(values: &[Real]) -> bool {
    values.windows(2).all(|w| w[1] >= w[0])
}
