//! Configuration types for the estimation pipeline.
//!
//! These are the runtime structs consumed by the pipeline stages.
//! They are separate from the TOML-deserialized config in `arcfit_config`.

/// Smoothing applied by the preprocessor.
#[derive(Debug, Clone)]
pub struct PreprocessCfg {
    /// Samples spanned by the kernel on the raw curve; kernel radius is half of it.
    pub smooth_samples: usize,
    /// Samples spanned by the kernel on each derivative.
    pub derivative_smooth_samples: usize,
}

impl PreprocessCfg {
    #[inline]
    pub fn smooth_radius(&self) -> usize {
        self.smooth_samples / 2
    }

    #[inline]
    pub fn derivative_radius(&self) -> usize {
        self.derivative_smooth_samples / 2
    }
}

impl Default for PreprocessCfg {
    fn default() -> Self {
        Self {
            smooth_samples: 80,
            derivative_smooth_samples: 20,
        }
    }
}

/// Phase window detection on the smoothed 2nd derivative.
#[derive(Debug, Clone)]
pub struct PhaseCfg {
    /// Threshold as a fraction of the 2nd derivative's y-range, in [0, 1].
    pub peak_detection_multiplier: f64,
    /// Fraction of the base window width added on each side.
    pub enlarge_factor: f64,
}

impl Default for PhaseCfg {
    fn default() -> Self {
        Self {
            peak_detection_multiplier: 0.1,
            enlarge_factor: 0.3,
        }
    }
}

/// Grid search around the 3-point seed circle.
#[derive(Debug, Clone)]
pub struct SearchCfg {
    pub radius_move_factor: f64,
    pub coordinate_move_factor: f64,
    pub radius_steps: usize,
    pub coordinate_steps: usize,
    /// Worker threads for the radius loop (0 = all cores, 1 = sequential).
    pub threads: usize,
    /// Abort a candidate's error sum once it can no longer win.
    pub pruning: bool,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            radius_move_factor: 2.0,
            coordinate_move_factor: 2.0,
            radius_steps: 200,
            coordinate_steps: 200,
            threads: 1,
            pruning: true,
        }
    }
}
