//! Circle primitives: analytic 3-point fit, edge weighting and weighted error.

use crate::curve::{Curve, Point};
use crate::error::{ArcfitError, Result};
use crate::phase::TimeWindow;

/// Determinant magnitude below which three points count as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-7;

/// Candidate or final fitted circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEstimation {
    pub radius: f64,
    pub center: Point,
}

impl CircleEstimation {
    #[inline]
    pub const fn new(radius: f64, center: Point) -> Self {
        Self { radius, center }
    }
}

/// Result of a bounded error evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Full weighted error sum.
    Evaluated(f64),
    /// The running sum reached the bound; the candidate cannot win.
    Pruned,
}

/// Circumcircle through three points (perpendicular bisector intersection).
pub fn circle_from_3_points(p1: Point, p2: Point, p3: Point) -> Result<CircleEstimation> {
    let offset = p2.x * p2.x + p2.y * p2.y;
    let bc = (p1.x * p1.x + p1.y * p1.y - offset) / 2.0;
    let cd = (offset - p3.x * p3.x - p3.y * p3.y) / 2.0;
    let det = (p1.x - p2.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p2.y);
    if det.is_nan() || det.abs() < COLLINEAR_EPSILON {
        return Err(ArcfitError::DegenerateGeometry);
    }
    let idet = 1.0 / det;
    let cx = (bc * (p2.y - p3.y) - cd * (p1.y - p2.y)) * idet;
    let cy = (cd * (p1.x - p2.x) - bc * (p2.x - p3.x)) * idet;
    let center = Point::new(cx, cy);
    Ok(CircleEstimation::new(p2.distance(center), center))
}

/// Per-point weights: 1.0 at the window midpoint falling to 0.8 at its edges.
///
/// A window without positive width weights every point at 1.0.
pub fn weights(curve: &Curve, window: TimeWindow) -> Vec<f64> {
    let half = window.half_width();
    if half.is_nan() || half <= 0.0 {
        return vec![1.0; curve.len()];
    }
    let middle = window.midpoint();
    curve
        .points()
        .iter()
        .map(|p| {
            let closeness = 1.0 - (p.x - middle).abs() / half;
            0.8 + 0.2 * closeness
        })
        .collect()
}

#[inline]
fn point_error(p: &Point, c: &CircleEstimation) -> f64 {
    let dx = c.center.x - p.x;
    let dy = c.center.y - p.y;
    ((dx * dx + dy * dy).sqrt() - c.radius).abs()
}

/// Unbounded `Σ |dist(p, centre) - r| * w`.
pub fn total_error(points: &[Point], weights: &[f64], candidate: &CircleEstimation) -> f64 {
    points
        .iter()
        .zip(weights)
        .map(|(p, w)| point_error(p, candidate) * w)
        .sum()
}

/// Weighted error that stops as soon as the running sum reaches `best_error`.
pub fn evaluate(
    points: &[Point],
    weights: &[f64],
    candidate: &CircleEstimation,
    best_error: f64,
) -> Evaluation {
    evaluate_bounded(points, weights, candidate, best_error, f64::INFINITY)
}

/// Prune on `sum >= inclusive` or `sum > strict`.
///
/// `inclusive` is a bound set by an earlier candidate (ties keep the earlier one);
/// `strict` may come from any candidate, so an exact tie must survive it.
#[inline]
pub(crate) fn evaluate_bounded(
    points: &[Point],
    weights: &[f64],
    candidate: &CircleEstimation,
    inclusive: f64,
    strict: f64,
) -> Evaluation {
    let mut error = 0.0;
    for (p, w) in points.iter().zip(weights) {
        error += point_error(p, candidate) * w;
        if error >= inclusive || error > strict {
            return Evaluation::Pruned;
        }
    }
    Evaluation::Evaluated(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_circle(cx: f64, cy: f64, r: f64, deg: f64) -> Point {
        let t = deg.to_radians();
        Point::new(cx + r * t.cos(), cy + r * t.sin())
    }

    #[test]
    fn fits_known_circle() {
        let c = circle_from_3_points(
            on_circle(2.0, -1.0, 3.0, 170.0),
            on_circle(2.0, -1.0, 3.0, 95.0),
            on_circle(2.0, -1.0, 3.0, 20.0),
        )
        .unwrap();
        assert!((c.radius - 3.0).abs() < 1e-9);
        assert!((c.center.x - 2.0).abs() < 1e-9);
        assert!((c.center.y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let r = circle_from_3_points(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        );
        assert_eq!(r, Err(ArcfitError::DegenerateGeometry));
    }

    #[test]
    fn repeated_point_is_degenerate() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(
            circle_from_3_points(p, p, Point::new(3.0, 0.0)),
            Err(ArcfitError::DegenerateGeometry)
        );
    }

    #[test]
    fn weights_peak_at_middle() {
        let c: Curve = vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)].into();
        let w = weights(&c, TimeWindow::new(0.0, 2.0));
        assert!((w[0] - 0.8).abs() < 1e-12);
        assert!((w[1] - 1.0).abs() < 1e-12);
        assert!((w[2] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn zero_width_window_weights_uniformly() {
        let c: Curve = vec![(1.0, 0.0), (1.0, 1.0)].into();
        assert_eq!(weights(&c, TimeWindow::new(1.0, 1.0)), vec![1.0, 1.0]);
    }

    #[test]
    fn pruned_is_distinct_from_zero_error() {
        let pts = [Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let w = [1.0, 1.0];
        let exact = CircleEstimation::new(1.0, Point::new(0.0, 0.0));
        assert_eq!(evaluate(&pts, &w, &exact, 1.0), Evaluation::Evaluated(0.0));
        // A zero bound prunes even a perfect fit: the sum reaches it immediately.
        assert_eq!(evaluate(&pts, &w, &exact, 0.0), Evaluation::Pruned);
    }

    #[test]
    fn pruning_stops_at_bound() {
        let pts = [Point::new(3.0, 0.0), Point::new(0.0, 3.0)];
        let w = [1.0, 0.5];
        let c = CircleEstimation::new(1.0, Point::new(0.0, 0.0));
        assert_eq!(total_error(&pts, &w, &c), 3.0);
        assert_eq!(evaluate(&pts, &w, &c, 10.0), Evaluation::Evaluated(3.0));
        assert_eq!(evaluate(&pts, &w, &c, 3.0), Evaluation::Pruned);
        assert_eq!(evaluate(&pts, &w, &c, 2.0), Evaluation::Pruned);
    }

    #[test]
    fn strict_bound_keeps_exact_ties() {
        let pts = [Point::new(3.0, 0.0)];
        let w = [1.0];
        let c = CircleEstimation::new(1.0, Point::new(0.0, 0.0));
        assert_eq!(
            evaluate_bounded(&pts, &w, &c, f64::INFINITY, 2.0),
            Evaluation::Evaluated(2.0)
        );
        assert_eq!(
            evaluate_bounded(&pts, &w, &c, f64::INFINITY, 1.5),
            Evaluation::Pruned
        );
    }
}
