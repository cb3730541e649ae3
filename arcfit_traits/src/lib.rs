pub mod color;

pub use color::Rgb;

use std::path::Path;

/// Error type crossing the collaborator seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Supplier of an ordered `(time, value)` sample sequence.
pub trait CurveSource {
    fn read_samples(&mut self) -> Result<Vec<(f64, f64)>, BoxError>;
}

/// Drawing surface made of vertically stacked panels sharing one image.
///
/// Coordinates are in data units; the sink owns the data-to-pixel mapping.
pub trait PlotSink {
    /// Number of stacked panels.
    fn panels(&self) -> usize;

    /// Fit `panel` so both axes use the same scale and the given extents fit.
    fn set_uniform_scale(&mut self, panel: usize, min: (f64, f64), max: (f64, f64));

    /// Reuse the x mapping of panel `from` and fit `[min_y, max_y]` vertically.
    fn share_x_fit_y(&mut self, panel: usize, from: usize, min_y: f64, max_y: f64);

    /// Horizontal line at data `y`, drawn on every panel.
    fn horizontal_line(&mut self, y: f64, color: Rgb);

    /// Vertical line at data `x`, drawn on every panel.
    fn vertical_line(&mut self, x: f64, color: Rgb);

    fn polyline(&mut self, panel: usize, points: &[(f64, f64)], color: Rgb);

    /// Circle outline plus a centre mark.
    fn circle(&mut self, panel: usize, center: (f64, f64), radius: f64);

    /// Persist the drawing.
    fn save(&mut self, path: &Path) -> Result<(), BoxError>;
}
