//! Cumulative Simpson integration on non-uniform grids.
//!
//! Every sub-interval is integrated exactly for the parabola through three
//! neighbouring samples: even intervals use the triple that starts at their
//! left end, odd intervals (and a trailing even one) the triple centred on
//! their left end.

use crate::error::{SosError, SosResult};
use ns_core::Real;

/// Integral over `[x0, x0 + h1]` of the parabola through
/// `(x0, f0), (x0 + h1, f1), (x0 + h1 + h2, f2)`.
fn first_interval(f0: Real, f1: Real, f2: Real, h1: Real, h2: Real) -> Real {
    let r31 = h1 / (h1 + h2);
    let r32 = h1 / h2;
    let rr = r31 * r32;
    h1 / 6.0 * ((3.0 - r31) * f0 + (3.0 + rr + r31) * f1 - rr * f2)
}

/// Running integral of `y(x)`, starting at `initial`.
///
/// Returns one value per sample; the first is `initial`. `x` must be
/// strictly increasing.
pub fn cumulative_simpson(y: &[Real], x: &[Real], initial: Real) -> SosResult<Vec<Real>> {
    if y.len() != x.len() {
        return Err(SosError::InvalidGrid {
            what: "samples and abscissae differ in length",
        });
    }
    if x.is_empty() {
        return Err(SosError::InvalidGrid { what: "empty grid" });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(SosError::InvalidGrid {
            what: "non-finite value",
        });
    }
    if x.windows(2).any(|w| w[1] <= w[0]) {
        return Err(SosError::InvalidGrid {
            what: "abscissae not strictly increasing",
        });
    }

    let n = x.len();
    let h: Vec<Real> = x.windows(2).map(|w| w[1] - w[0]).collect();

    let mut out = Vec::with_capacity(n);
    out.push(initial);
    let mut acc = initial;
    for k in 0..n - 1 {
        let piece = if n == 2 {
            0.5 * h[0] * (y[0] + y[1])
        } else if k % 2 == 0 && k + 2 < n {
            first_interval(y[k], y[k + 1], y[k + 2], h[k], h[k + 1])
        } else {
            first_interval(y[k + 1], y[k], y[k - 1], h[k], h[k - 1])
        };
        acc += piece;
        out.push(acc);
    }
    Ok(out)
}
