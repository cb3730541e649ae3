#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Arc radius estimation from noisy time/value traces.
//!
//! ## Pipeline
//!
//! - **Curve**: ordered `(x, y)` samples with derived extents (`curve` module)
//! - **Preprocessing**: Gaussian smoothing and two smoothed first differences
//!   (`smoothing`, `derivative`, `preprocess`)
//! - **Phase detection**: the time window where the 2nd derivative
//!   transitions (`phase`)
//! - **Circle estimation**: 3-point seed plus a weighted grid search with
//!   branch-and-bound pruning (`circle`, `search`)
//! - **Runner**: read, preprocess, select window, fit (`runner`)
//! - **Render plan**: drives any `arcfit_traits::PlotSink` (`plot`)
//!
//! Every transform returns a new `Curve`; nothing is mutated in place.

pub mod circle;
pub mod config;
pub mod conversions;
pub mod curve;
pub mod derivative;
pub mod error;
pub mod mocks;
pub mod phase;
pub mod plot;
pub mod preprocess;
pub mod runner;
pub mod search;
pub mod smoothing;
pub mod util;

pub use circle::{CircleEstimation, Evaluation, circle_from_3_points};
pub use config::{PhaseCfg, PreprocessCfg, SearchCfg};
pub use curve::{Curve, CurveExtents, Point};
pub use derivative::derivative;
pub use error::{ArcfitError, Result};
pub use phase::{TimeWindow, detect_phase};
pub use preprocess::{PreprocessedCurves, preprocess};
pub use runner::{Analysis, RunParams, WindowSource};
pub use search::{SearchAxis, SearchBounds, SearchOutcome, estimate_circle};
pub use smoothing::{gauss_smooth, gaussian_kernel};
