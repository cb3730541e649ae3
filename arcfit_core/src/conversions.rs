//! `From` implementations bridging `arcfit_config` types to `arcfit_core` types.

use crate::config::{PhaseCfg, PreprocessCfg, SearchCfg};
use crate::phase::TimeWindow;
use crate::runner::RunParams;

// ── PreprocessCfg ────────────────────────────────────────────────────────────

impl From<&arcfit_config::PreprocessCfg> for PreprocessCfg {
    fn from(c: &arcfit_config::PreprocessCfg) -> Self {
        Self {
            smooth_samples: c.smooth_samples,
            derivative_smooth_samples: c.derivative_smooth_samples,
        }
    }
}

// ── PhaseCfg ─────────────────────────────────────────────────────────────────

impl From<&arcfit_config::PhaseCfg> for PhaseCfg {
    fn from(c: &arcfit_config::PhaseCfg) -> Self {
        Self {
            peak_detection_multiplier: c.peak_detection_multiplier,
            enlarge_factor: c.enlarge_factor,
        }
    }
}

// ── SearchCfg ────────────────────────────────────────────────────────────────

impl From<&arcfit_config::SearchCfg> for SearchCfg {
    fn from(c: &arcfit_config::SearchCfg) -> Self {
        Self {
            radius_move_factor: c.radius_move_factor,
            coordinate_move_factor: c.coordinate_move_factor,
            radius_steps: c.radius_steps,
            coordinate_steps: c.coordinate_steps,
            threads: c.threads,
            pruning: c.pruning,
        }
    }
}

// ── RunParams ────────────────────────────────────────────────────────────────

impl From<&arcfit_config::Config> for RunParams {
    fn from(c: &arcfit_config::Config) -> Self {
        Self {
            preprocess: (&c.preprocess).into(),
            phase: (&c.phase).into(),
            search: (&c.search).into(),
            window: c.window.bounds().map(|(s, e)| TimeWindow::new(s, e)),
        }
    }
}
