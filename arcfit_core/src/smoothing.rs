//! Gaussian smoothing with replicate-boundary clamping.

use std::f64::consts::PI;

use crate::curve::{Curve, Point};
use crate::error::{ArcfitError, Result};

/// Normalized discrete Gaussian of length `2 * kernel_radius + 1`, `sigma = radius / 2`.
///
/// Radius 0 is the identity kernel `[1.0]`.
pub fn gaussian_kernel(kernel_radius: usize) -> Vec<f64> {
    if kernel_radius == 0 {
        return vec![1.0];
    }
    let sigma = kernel_radius as f64 / 2.0;
    let s = 2.0 * sigma * sigma;
    let r = kernel_radius as i64;
    let raw: Vec<f64> = (-r..=r)
        .map(|k| (-((k * k) as f64) / s).exp() / (PI * s))
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|v| v / sum).collect()
}

/// Smooth `curve` and rebase its x axis on the input's `kernel_radius`-th point.
///
/// Returns the smoothed curve and the rebasing offset, so that
/// `input_x = output_x + offset`.
pub fn gauss_smooth_with_offset(curve: &Curve, kernel_radius: usize) -> Result<(Curve, f64)> {
    let pts = curve.points();
    if pts.is_empty() {
        return Err(ArcfitError::EmptyCurve("smoothing"));
    }
    if kernel_radius >= pts.len() {
        return Err(ArcfitError::CurveTooShort {
            stage: "smoothing",
            needed: kernel_radius + 1,
            len: pts.len(),
        });
    }

    let kernel = gaussian_kernel(kernel_radius);
    let x_offset = pts[kernel_radius].x;
    let last = pts.len() - 1;
    let smoothed = pts
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let y: f64 = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let source = (index + k).saturating_sub(kernel_radius).min(last);
                    pts[source].y * w
                })
                .sum();
            Point::new(point.x - x_offset, y)
        })
        .collect();
    tracing::trace!(len = pts.len(), kernel_radius, x_offset, "gauss smooth");
    Ok((smoothed, x_offset))
}

pub fn gauss_smooth(curve: &Curve, kernel_radius: usize) -> Result<Curve> {
    gauss_smooth_with_offset(curve, kernel_radius).map(|(c, _)| c)
}
