#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and sample-file readers for the arc radius estimator.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//!   Every section is optional; defaults reproduce the historical tool.
//! - `samples` reads `(time, value)` traces from whitespace-separated text
//!   or from a strict `time,value` CSV.
use serde::Deserialize;

pub mod samples;

pub use samples::{
    CsvFileSource, ReadError, SampleRow, TextFileSource, load_samples_csv, load_samples_text,
    parse_samples_csv, parse_samples_text,
};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PreprocessCfg {
    /// Samples spanned by the Gaussian smoothing kernel of the raw curve.
    pub smooth_samples: usize,
    /// Samples spanned by the kernel applied to each derivative.
    pub derivative_smooth_samples: usize,
}

impl Default for PreprocessCfg {
    fn default() -> Self {
        Self {
            smooth_samples: 80,
            derivative_smooth_samples: 20,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PhaseCfg {
    /// Fraction of the 2nd derivative's y-range used as the threshold, [0..1].
    pub peak_detection_multiplier: f64,
    /// Symmetric window enlargement (0 keeps it, 1 triples its width).
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

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchCfg {
    /// Radius range is `[seed / factor, seed * factor]`.
    pub radius_move_factor: f64,
    /// Centre range is `seed ± |p1 - p2| * factor` per axis.
    pub coordinate_move_factor: f64,
    pub radius_steps: usize,
    pub coordinate_steps: usize,
    /// Worker threads for the radius loop; 0 uses every available core.
    pub threads: usize,
    /// Abort a candidate's error sum once it cannot beat the best.
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

/// Manually supplied fitting window. Used only when both bounds are set.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(default)]
pub struct WindowCfg {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl WindowCfg {
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlotCfg {
    pub enabled: bool,
    /// Panel width and height in pixels; the image stacks three panels.
    pub width: u32,
    pub file: String,
}

impl Default for PlotCfg {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 1024,
            file: "out.png".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub preprocess: PreprocessCfg,
    pub phase: PhaseCfg,
    pub search: SearchCfg,
    pub window: WindowCfg,
    pub plot: PlotCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub const MIN_PLOT_WIDTH: u32 = 16;
pub const MAX_PLOT_WIDTH: u32 = 16_384;

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Phase
        let m = self.phase.peak_detection_multiplier;
        if !(0.0..=1.0).contains(&m) {
            eyre::bail!("phase.peak_detection_multiplier must be in [0.0, 1.0]");
        }
        if !self.phase.enlarge_factor.is_finite() || self.phase.enlarge_factor < 0.0 {
            eyre::bail!("phase.enlarge_factor must be a finite value >= 0.0");
        }

        // Search
        if !(self.search.radius_move_factor.is_finite() && self.search.radius_move_factor > 1.0) {
            eyre::bail!("search.radius_move_factor must be a finite value > 1.0");
        }
        if !(self.search.coordinate_move_factor.is_finite()
            && self.search.coordinate_move_factor > 1.0)
        {
            eyre::bail!("search.coordinate_move_factor must be a finite value > 1.0");
        }
        if self.search.radius_steps == 0 {
            eyre::bail!("search.radius_steps must be >= 1");
        }
        if self.search.coordinate_steps == 0 {
            eyre::bail!("search.coordinate_steps must be >= 1");
        }

        // Window
        if let Some(s) = self.window.start
            && !s.is_finite()
        {
            eyre::bail!("window.start must be finite");
        }
        if let Some(e) = self.window.end
            && !e.is_finite()
        {
            eyre::bail!("window.end must be finite");
        }

        // Plot
        if self.plot.enabled {
            if !(MIN_PLOT_WIDTH..=MAX_PLOT_WIDTH).contains(&self.plot.width) {
                eyre::bail!(
                    "plot.width must be in [{MIN_PLOT_WIDTH}, {MAX_PLOT_WIDTH}], got {}",
                    self.plot.width
                );
            }
            if self.plot.file.trim().is_empty() {
                eyre::bail!("plot.file must not be empty");
            }
        }

        // Logging
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rotation:?}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_historical_defaults() {
        let cfg = load_toml("").unwrap();
        assert_eq!(cfg.preprocess.smooth_samples, 80);
        assert_eq!(cfg.preprocess.derivative_smooth_samples, 20);
        assert_eq!(cfg.search.radius_steps, 200);
        assert_eq!(cfg.search.coordinate_steps, 200);
        assert!(cfg.search.pruning);
        assert!(cfg.window.bounds().is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn window_needs_both_bounds() {
        let w = WindowCfg {
            start: Some(1.0),
            end: None,
        };
        assert!(w.bounds().is_none());
        let w = WindowCfg {
            start: Some(1.0),
            end: Some(2.0),
        };
        assert_eq!(w.bounds(), Some((1.0, 2.0)));
    }
}
