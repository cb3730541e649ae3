//! Phase window detection on the smoothed 2nd derivative.

use tracing::{debug, warn};

use crate::config::PhaseCfg;
use crate::curve::Curve;
use crate::error::{ArcfitError, Result};

/// Time interval used for circle fitting.
///
/// `start > end` is representable: detection reports the threshold crossing
/// first and the peak second, whichever comes first in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    #[inline]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Signed width, negative for an inverted window.
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width() * 0.5
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.start + self.half_width()
    }

    pub fn shifted(&self, dx: f64) -> Self {
        Self::new(self.start + dx, self.end + dx)
    }

    /// Grow both sides by `width * factor`.
    pub fn enlarged(&self, factor: f64) -> Self {
        let enlarge = self.width() * factor;
        Self::new(self.start - enlarge, self.end + enlarge)
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.start..=self.end).contains(&x)
    }
}

/// Locate the transition window on `d2`.
///
/// - threshold = `|Δy(d2) * multiplier|`
/// - crossing = first point (sequence order) with `y > threshold`
/// - peak = first point whose `y` equals the global maximum
/// - window = `(crossing.x, peak.x)`, enlarged by `enlarge_factor`
pub fn detect_phase(d2: &Curve, cfg: &PhaseCfg) -> Result<TimeWindow> {
    let extents = d2.extents()?;
    let threshold = (extents.delta_y * cfg.peak_detection_multiplier).abs();

    let crossing = d2
        .points()
        .iter()
        .find(|p| p.y > threshold)
        .ok_or(ArcfitError::PhaseNotFound { threshold })?;
    let peak = d2
        .points()
        .iter()
        .find(|p| p.y == extents.max_y)
        .ok_or(ArcfitError::PhaseNotFound { threshold })?;

    let base = TimeWindow::new(crossing.x, peak.x);
    let window = base.enlarged(cfg.enlarge_factor);
    debug!(
        threshold,
        crossing_x = crossing.x,
        peak_x = peak.x,
        start = window.start,
        end = window.end,
        "phase detected"
    );
    if window.is_inverted() {
        warn!(
            start = window.start,
            end = window.end,
            "detected window is inverted; peak precedes threshold crossing"
        );
    }
    Ok(window)
}
