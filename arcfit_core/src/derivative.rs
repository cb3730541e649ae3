//! First-difference derivative indexed by its left endpoint.

use crate::curve::{Curve, Point};
use crate::error::{ArcfitError, Result};

/// `out[i] = (in[i].x, in[i + 1].y - in[i].y)`; length `n - 1`.
pub fn derivative(curve: &Curve) -> Result<Curve> {
    let pts = curve.points();
    if pts.len() < 2 {
        return Err(ArcfitError::CurveTooShort {
            stage: "derivative",
            needed: 2,
            len: pts.len(),
        });
    }
    Ok(pts
        .windows(2)
        .map(|w| Point::new(w[0].x, w[1].y - w[0].y))
        .collect())
}
