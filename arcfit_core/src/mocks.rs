//! Test and helper mocks for arcfit_core

use std::path::{Path, PathBuf};

use arcfit_traits::{BoxError, CurveSource, PlotSink, Rgb};

/// Samples held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub samples: Vec<(f64, f64)>,
}

impl MemorySource {
    pub fn new(samples: Vec<(f64, f64)>) -> Self {
        Self { samples }
    }

    /// Sample `f` at `n` evenly spaced times from `t0` with spacing `dt`.
    pub fn from_fn(n: usize, t0: f64, dt: f64, f: impl Fn(f64) -> f64) -> Self {
        Self::new(
            (0..n)
                .map(|i| {
                    let t = (i as f64).mul_add(dt, t0);
                    (t, f(t))
                })
                .collect(),
        )
    }
}

impl CurveSource for MemorySource {
    fn read_samples(&mut self) -> Result<Vec<(f64, f64)>, BoxError> {
        Ok(self.samples.clone())
    }
}

/// A source that always errors.
#[derive(Debug, Clone)]
pub struct FailingSource(pub String);

impl CurveSource for FailingSource {
    fn read_samples(&mut self) -> Result<Vec<(f64, f64)>, BoxError> {
        Err(Box::new(std::io::Error::other(self.0.clone())))
    }
}

/// One recorded [`PlotSink`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotCall {
    UniformScale {
        panel: usize,
        min: (f64, f64),
        max: (f64, f64),
    },
    ShareXFitY {
        panel: usize,
        from: usize,
        min_y: f64,
        max_y: f64,
    },
    HorizontalLine(f64, Rgb),
    VerticalLine(f64, Rgb),
    Polyline {
        panel: usize,
        len: usize,
        color: Rgb,
    },
    Circle {
        panel: usize,
        center: (f64, f64),
        radius: f64,
    },
}

/// Sink that records calls instead of drawing.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    pub panels: usize,
    pub calls: Vec<PlotCall>,
    pub saved: Option<PathBuf>,
}

impl RecordingSink {
    pub fn new(panels: usize) -> Self {
        Self {
            panels,
            calls: Vec::new(),
            saved: None,
        }
    }
}

impl PlotSink for RecordingSink {
    fn panels(&self) -> usize {
        self.panels
    }

    fn set_uniform_scale(&mut self, panel: usize, min: (f64, f64), max: (f64, f64)) {
        self.calls.push(PlotCall::UniformScale { panel, min, max });
    }

    fn share_x_fit_y(&mut self, panel: usize, from: usize, min_y: f64, max_y: f64) {
        self.calls.push(PlotCall::ShareXFitY {
            panel,
            from,
            min_y,
            max_y,
        });
    }

    fn horizontal_line(&mut self, y: f64, color: Rgb) {
        self.calls.push(PlotCall::HorizontalLine(y, color));
    }

    fn vertical_line(&mut self, x: f64, color: Rgb) {
        self.calls.push(PlotCall::VerticalLine(x, color));
    }

    fn polyline(&mut self, panel: usize, points: &[(f64, f64)], color: Rgb) {
        self.calls.push(PlotCall::Polyline {
            panel,
            len: points.len(),
            color,
        });
    }

    fn circle(&mut self, panel: usize, center: (f64, f64), radius: f64) {
        self.calls.push(PlotCall::Circle {
            panel,
            center,
            radius,
        });
    }

    fn save(&mut self, path: &Path) -> Result<(), BoxError> {
        self.saved = Some(path.to_path_buf());
        Ok(())
    }
}
