//! Weighted grid search around the 3-point seed circle.
//!
//! Candidates are visited radius-major (`radius`, then `x`, then `y`). Each
//! candidate's error sum is abandoned the moment it can no longer beat the
//! best so far. With `threads > 1` whole radius rows are handed to scoped
//! workers through a channel; workers share the best error through an
//! `AtomicU64` holding `f64` bits (relaxed, possibly stale) and the partial
//! winners are merged by lowest error, then lowest candidate index. The
//! outcome is identical to the sequential scan.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel as xch;
use tracing::{debug, info};

use crate::circle::{
    CircleEstimation, Evaluation, circle_from_3_points, evaluate, evaluate_bounded, total_error,
    weights,
};
use crate::config::SearchCfg;
use crate::curve::{Curve, Point};
use crate::error::{ArcfitError, Result};
use crate::phase::TimeWindow;
use crate::util::{lerp, resolve_threads};

/// One search dimension sampled at `lerp(min, max, step / steps)` for
/// `step in 0..steps`. The divisor is `steps`, so `max` itself is never sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchAxis {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl SearchAxis {
    pub const fn new(min: f64, max: f64, steps: usize) -> Self {
        Self { min, max, steps }
    }

    #[inline]
    pub fn value(&self, step: usize) -> f64 {
        lerp(self.min, self.max, step as f64 / self.steps as f64)
    }

    pub fn values(self) -> impl Iterator<Item = f64> {
        (0..self.steps).map(move |step| self.value(step))
    }
}

/// Data-dependent search box around the seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    pub radius: SearchAxis,
    pub x: SearchAxis,
    pub y: SearchAxis,
}

impl SearchBounds {
    /// Radius in `[r / f, r * f]`; each centre axis in `seed ± |p1 - p2| * f`
    /// using that axis' delta between the first and middle seed points.
    pub fn around(seed: &CircleEstimation, first: Point, middle: Point, cfg: &SearchCfg) -> Self {
        let x_delta = (first.x - middle.x).abs() * cfg.coordinate_move_factor;
        let y_delta = (first.y - middle.y).abs() * cfg.coordinate_move_factor;
        Self {
            radius: SearchAxis::new(
                seed.radius / cfg.radius_move_factor,
                seed.radius * cfg.radius_move_factor,
                cfg.radius_steps,
            ),
            x: SearchAxis::new(
                seed.center.x - x_delta,
                seed.center.x + x_delta,
                cfg.coordinate_steps,
            ),
            y: SearchAxis::new(
                seed.center.y - y_delta,
                seed.center.y + y_delta,
                cfg.coordinate_steps,
            ),
        }
    }

    pub fn candidate_count(&self) -> u64 {
        (self.radius.steps as u64) * (self.x.steps as u64) * (self.y.steps as u64)
    }
}

/// Result of [`estimate_circle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub best: CircleEstimation,
    pub best_error: f64,
    pub seed: CircleEstimation,
    pub seed_error: f64,
    pub bounds: SearchBounds,
    /// Candidates whose error sum ran to completion.
    pub evaluated: u64,
    /// Candidates abandoned early.
    pub pruned: u64,
}

#[derive(Debug, Clone, Copy)]
struct Best {
    /// 0 for the seed, then `1 + (r * nx + xi) * ny + yi`.
    index: u64,
    error: f64,
    circle: CircleEstimation,
}

impl Best {
    #[inline]
    fn beats(&self, other: &Best) -> bool {
        self.error < other.error || (self.error == other.error && self.index < other.index)
    }
}

#[derive(Debug, Clone, Copy)]
struct Scan {
    best: Best,
    evaluated: u64,
    pruned: u64,
}

impl Scan {
    fn merge(self, other: Scan) -> Scan {
        Scan {
            best: if other.best.beats(&self.best) {
                other.best
            } else {
                self.best
            },
            evaluated: self.evaluated + other.evaluated,
            pruned: self.pruned + other.pruned,
        }
    }
}

struct Grid<'a> {
    points: &'a [Point],
    weights: &'a [f64],
    radii: Vec<f64>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    pruning: bool,
}

impl Grid<'_> {
    #[inline]
    fn index(&self, r: usize, xi: usize, yi: usize) -> u64 {
        1 + ((r * self.xs.len() + xi) * self.ys.len() + yi) as u64
    }

    /// Fold one radius row into `scan`. `shared` is the cross-worker best error.
    fn scan_row(&self, r: usize, mut scan: Scan, shared: Option<&AtomicU64>) -> Scan {
        let radius = self.radii[r];
        for (xi, &x) in self.xs.iter().enumerate() {
            for (yi, &y) in self.ys.iter().enumerate() {
                let candidate = CircleEstimation::new(radius, Point::new(x, y));
                let evaluation = if !self.pruning {
                    Evaluation::Evaluated(total_error(self.points, self.weights, &candidate))
                } else if let Some(s) = shared {
                    evaluate_bounded(
                        self.points,
                        self.weights,
                        &candidate,
                        scan.best.error,
                        f64::from_bits(s.load(Ordering::Relaxed)),
                    )
                } else {
                    evaluate(self.points, self.weights, &candidate, scan.best.error)
                };
                match evaluation {
                    Evaluation::Evaluated(error) => {
                        scan.evaluated += 1;
                        if error < scan.best.error {
                            scan.best = Best {
                                index: self.index(r, xi, yi),
                                error,
                                circle: candidate,
                            };
                            if let Some(s) = shared {
                                // Non-negative f64 bit patterns order like the values.
                                s.fetch_min(error.to_bits(), Ordering::Relaxed);
                            }
                        }
                    }
                    Evaluation::Pruned => scan.pruned += 1,
                }
            }
        }
        scan
    }

    fn scan_sequential(&self, initial: Scan) -> Scan {
        (0..self.radii.len()).fold(initial, |scan, r| self.scan_row(r, scan, None))
    }

    fn scan_parallel(&self, initial: Scan, threads: usize) -> Scan {
        let (tx, rx) = xch::unbounded::<usize>();
        for r in 0..self.radii.len() {
            if tx.send(r).is_err() {
                break;
            }
        }
        drop(tx);

        let shared = AtomicU64::new(initial.best.error.to_bits());
        let fresh = Scan {
            evaluated: 0,
            pruned: 0,
            ..initial
        };
        std::thread::scope(|s| {
            let workers: Vec<_> = (0..threads)
                .map(|_| {
                    let rx = rx.clone();
                    let shared = &shared;
                    // Rows arrive in FIFO order, so a worker's own best always
                    // precedes the candidate being evaluated.
                    s.spawn(move || {
                        rx.iter()
                            .fold(fresh, |scan, r| self.scan_row(r, scan, Some(shared)))
                    })
                })
                .collect();
            workers
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .fold(initial, Scan::merge)
        })
    }
}

fn check_cfg(cfg: &SearchCfg) -> Result<()> {
    if !(cfg.radius_move_factor.is_finite() && cfg.radius_move_factor > 0.0) {
        return Err(ArcfitError::InvalidParameter(format!(
            "radius_move_factor must be finite and > 0, got {}",
            cfg.radius_move_factor
        )));
    }
    if !(cfg.coordinate_move_factor.is_finite() && cfg.coordinate_move_factor > 0.0) {
        return Err(ArcfitError::InvalidParameter(format!(
            "coordinate_move_factor must be finite and > 0, got {}",
            cfg.coordinate_move_factor
        )));
    }
    if cfg.radius_steps == 0 || cfg.coordinate_steps == 0 {
        return Err(ArcfitError::InvalidParameter(
            "radius_steps and coordinate_steps must be >= 1".to_string(),
        ));
    }
    Ok(())
}

/// Fit a circle to `curve`, already restricted to `window`.
///
/// Seeds with the circumcircle of the first, middle and last points, then
/// searches `radius_steps * coordinate_steps^2` candidates. Ties keep the
/// earliest candidate, the seed first.
pub fn estimate_circle(
    curve: &Curve,
    window: TimeWindow,
    cfg: &SearchCfg,
) -> Result<SearchOutcome> {
    check_cfg(cfg)?;
    let points = curve.points();
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Err(ArcfitError::EmptyCurve("circle estimation"));
    };
    let middle = points[points.len() / 2];
    let seed = circle_from_3_points(first, middle, last)?;

    let weights = weights(curve, window);
    let seed_error = total_error(points, &weights, &seed);
    let bounds = SearchBounds::around(&seed, first, middle, cfg);
    debug!(
        points = points.len(),
        seed_radius = seed.radius,
        seed_x = seed.center.x,
        seed_y = seed.center.y,
        seed_error,
        radius_min = bounds.radius.min,
        radius_max = bounds.radius.max,
        x_min = bounds.x.min,
        x_max = bounds.x.max,
        y_min = bounds.y.min,
        y_max = bounds.y.max,
        candidates = bounds.candidate_count(),
        "grid search start"
    );

    let grid = Grid {
        points,
        weights: &weights,
        radii: bounds.radius.values().collect(),
        xs: bounds.x.values().collect(),
        ys: bounds.y.values().collect(),
        pruning: cfg.pruning,
    };
    let initial = Scan {
        best: Best {
            index: 0,
            error: if seed_error.is_nan() {
                f64::INFINITY
            } else {
                seed_error
            },
            circle: seed,
        },
        evaluated: 0,
        pruned: 0,
    };
    let threads = resolve_threads(cfg.threads).min(cfg.radius_steps);
    let scan = if threads <= 1 {
        grid.scan_sequential(initial)
    } else {
        grid.scan_parallel(initial, threads)
    };

    info!(
        radius = scan.best.circle.radius,
        x = scan.best.circle.center.x,
        y = scan.best.circle.center.y,
        error = scan.best.error,
        evaluated = scan.evaluated,
        pruned = scan.pruned,
        threads,
        "circle estimated"
    );
    Ok(SearchOutcome {
        best: scan.best.circle,
        best_error: scan.best.error,
        seed,
        seed_error,
        bounds,
        evaluated: scan.evaluated,
        pruned: scan.pruned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(n: usize, cx: f64, cy: f64, r: f64) -> Curve {
        (0..n)
            .map(|i| {
                let t = std::f64::consts::PI * (1.0 - i as f64 / (n - 1) as f64);
                Point::new(cx + r * t.cos(), cy + r * t.sin())
            })
            .collect()
    }

    fn small_cfg() -> SearchCfg {
        SearchCfg {
            radius_steps: 8,
            coordinate_steps: 8,
            ..SearchCfg::default()
        }
    }

    #[test]
    fn axis_never_reaches_upper_bound() {
        let axis = SearchAxis::new(1.0, 2.0, 4);
        let values: Vec<f64> = axis.values().collect();
        assert_eq!(values, vec![1.0, 1.25, 1.5, 1.75]);
    }

    #[test]
    fn bounds_are_anisotropic() {
        let seed = CircleEstimation::new(4.0, Point::new(1.0, 2.0));
        let b = SearchBounds::around(
            &seed,
            Point::new(0.0, 0.0),
            Point::new(1.0, 3.0),
            &SearchCfg::default(),
        );
        assert_eq!((b.radius.min, b.radius.max), (2.0, 8.0));
        assert_eq!((b.x.min, b.x.max), (-1.0, 3.0));
        assert_eq!((b.y.min, b.y.max), (-4.0, 8.0));
        assert_eq!(b.candidate_count(), 200 * 200 * 200);
    }

    #[test]
    fn exact_arc_keeps_seed() {
        let c = arc(41, 3.0, -2.0, 2.5);
        let out = estimate_circle(&c, TimeWindow::new(0.5, 5.5), &small_cfg()).unwrap();
        assert!((out.best.radius - 2.5).abs() < 1e-9);
        assert!(out.best_error <= out.seed_error);
        assert_eq!(out.evaluated + out.pruned, 8 * 8 * 8);
    }

    #[test]
    fn empty_curve_is_reported() {
        assert_eq!(
            estimate_circle(&Curve::default(), TimeWindow::new(0.0, 1.0), &small_cfg()),
            Err(ArcfitError::EmptyCurve("circle estimation"))
        );
    }

    #[test]
    fn collinear_seed_is_reported() {
        let c: Curve = (0..5).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
        assert_eq!(
            estimate_circle(&c, TimeWindow::new(0.0, 4.0), &small_cfg()),
            Err(ArcfitError::DegenerateGeometry)
        );
    }

    #[test]
    fn zero_steps_are_invalid() {
        let c = arc(10, 0.0, 0.0, 1.0);
        let cfg = SearchCfg {
            coordinate_steps: 0,
            ..small_cfg()
        };
        assert!(matches!(
            estimate_circle(&c, TimeWindow::new(-1.0, 1.0), &cfg),
            Err(ArcfitError::InvalidParameter(_))
        ));
    }

    #[test]
    fn tie_break_prefers_lower_index() {
        let seed = Best {
            index: 0,
            error: 1.0,
            circle: CircleEstimation::new(1.0, Point::default()),
        };
        let later = Best { index: 5, ..seed };
        assert!(!later.beats(&seed));
        assert!(seed.beats(&later));
        let better = Best {
            index: 9,
            error: 0.5,
            ..seed
        };
        assert!(better.beats(&seed));
    }
}
