//! Smoothed curve plus two smoothed derivatives.

use tracing::debug;

use crate::config::PreprocessCfg;
use crate::curve::Curve;
use crate::derivative::derivative;
use crate::error::Result;
use crate::smoothing::gauss_smooth_with_offset;

/// Output of [`preprocess`].
///
/// Each smoothing pass rebases x, so every derived curve carries the offset
/// that maps it back onto the source time axis: `source_x = x + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedCurves {
    pub curve: Curve,
    pub smoothed: Curve,
    pub d1: Curve,
    pub d2: Curve,
    pub smoothed_offset: f64,
    pub d1_offset: f64,
    pub d2_offset: f64,
}

impl PreprocessedCurves {
    /// Smoothed curve on the source time axis.
    pub fn smoothed_aligned(&self) -> Curve {
        self.smoothed.shift_x(self.smoothed_offset)
    }

    pub fn d1_aligned(&self) -> Curve {
        self.d1.shift_x(self.d1_offset)
    }

    pub fn d2_aligned(&self) -> Curve {
        self.d2.shift_x(self.d2_offset)
    }
}

pub fn preprocess(curve: Curve, cfg: &PreprocessCfg) -> Result<PreprocessedCurves> {
    let r0 = cfg.smooth_radius();
    let r1 = cfg.derivative_radius();

    let (smoothed, a) = gauss_smooth_with_offset(&curve, r0)?;
    let (d1, b) = gauss_smooth_with_offset(&derivative(&smoothed)?, r1)?;
    let (d2, c) = gauss_smooth_with_offset(&derivative(&d1)?, r1)?;

    debug!(
        len = curve.len(),
        smooth_radius = r0,
        derivative_radius = r1,
        d2_offset = a + b + c,
        "preprocessed"
    );

    Ok(PreprocessedCurves {
        curve,
        smoothed,
        d1,
        d2,
        smoothed_offset: a,
        d1_offset: a + b,
        d2_offset: a + b + c,
    })
}
