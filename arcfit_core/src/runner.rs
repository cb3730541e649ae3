//! End-to-end orchestration: read, preprocess, select window, fit.

use arcfit_traits::CurveSource;
use tracing::{debug, info};

use crate::circle::CircleEstimation;
use crate::config::{PhaseCfg, PreprocessCfg, SearchCfg};
use crate::curve::Curve;
use crate::error::{ArcfitError, Result};
use crate::phase::{TimeWindow, detect_phase};
use crate::preprocess::{PreprocessedCurves, preprocess};
use crate::search::{SearchOutcome, estimate_circle};

/// Everything a full analysis needs besides the samples.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    pub preprocess: PreprocessCfg,
    pub phase: PhaseCfg,
    pub search: SearchCfg,
    /// Manual window in source time; `None` runs phase detection.
    pub window: Option<TimeWindow>,
}

/// Where the fitting window came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSource {
    Manual,
    /// Detected on `d2`; `raw` is the window on `d2`'s own time axis.
    Detected { raw: TimeWindow },
}

/// Result of [`detect`].
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub preprocessed: PreprocessedCurves,
    /// Window on `d2`'s time axis.
    pub raw: TimeWindow,
    /// Window on the source time axis.
    pub window: TimeWindow,
}

/// Result of [`run`] / [`analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub preprocessed: PreprocessedCurves,
    pub window: TimeWindow,
    pub window_source: WindowSource,
    /// Source curve restricted to `window`.
    pub windowed: Curve,
    pub outcome: SearchOutcome,
}

impl Analysis {
    #[inline]
    pub fn estimation(&self) -> CircleEstimation {
        self.outcome.best
    }
}

/// Pull every sample out of `source`.
pub fn read_curve<S: CurveSource + ?Sized>(source: &mut S) -> Result<Curve> {
    let samples = source
        .read_samples()
        .map_err(|e| ArcfitError::Read(e.to_string()))?;
    if samples.is_empty() {
        return Err(ArcfitError::EmptyCurve("input curve"));
    }
    debug!(samples = samples.len(), "curve read");
    Ok(Curve::from(samples))
}

fn detect_on(preprocessed: &PreprocessedCurves, phase: &PhaseCfg) -> Result<(TimeWindow, TimeWindow)> {
    let raw = detect_phase(&preprocessed.d2, phase)?;
    Ok((raw, raw.shifted(preprocessed.d2_offset)))
}

/// Preprocess and detect the phase window without fitting.
pub fn detect_curve(curve: Curve, preprocess_cfg: &PreprocessCfg, phase: &PhaseCfg) -> Result<Detection> {
    let preprocessed = preprocess(curve, preprocess_cfg)?;
    let (raw, window) = detect_on(&preprocessed, phase)?;
    info!(start = window.start, end = window.end, "phase window detected");
    Ok(Detection {
        preprocessed,
        raw,
        window,
    })
}

pub fn detect<S: CurveSource + ?Sized>(source: &mut S, params: &RunParams) -> Result<Detection> {
    detect_curve(read_curve(source)?, &params.preprocess, &params.phase)
}

fn fit(curve: &Curve, window: TimeWindow, search: &SearchCfg) -> Result<(Curve, SearchOutcome)> {
    let windowed = curve.slice(window.start, window.end);
    debug!(
        start = window.start,
        end = window.end,
        points = windowed.len(),
        "window sliced"
    );
    let outcome = estimate_circle(&windowed, window, search)?;
    Ok((windowed, outcome))
}

/// Full analysis of an in-memory curve.
pub fn analyze(curve: Curve, params: &RunParams) -> Result<Analysis> {
    let preprocessed = preprocess(curve, &params.preprocess)?;
    let (window, window_source) = match params.window {
        Some(w) => (w, WindowSource::Manual),
        None => {
            let (raw, aligned) = detect_on(&preprocessed, &params.phase)?;
            (aligned, WindowSource::Detected { raw })
        }
    };
    let (windowed, outcome) = fit(&preprocessed.curve, window, &params.search)?;
    Ok(Analysis {
        preprocessed,
        window,
        window_source,
        windowed,
        outcome,
    })
}

pub fn run<S: CurveSource + ?Sized>(source: &mut S, params: &RunParams) -> Result<Analysis> {
    analyze(read_curve(source)?, params)
}
