//! Render plan: the drawing sequence for one [`Analysis`], independent of the
//! raster backend.

use arcfit_traits::{PlotSink, Rgb};

use crate::error::{ArcfitError, Result};
use crate::runner::Analysis;

/// Curve, smoothed 1st derivative, smoothed 2nd derivative.
pub const PANELS: usize = 3;

pub const CURVE_PANEL: usize = 0;
pub const D1_PANEL: usize = 1;
pub const D2_PANEL: usize = 2;

/// Issue every drawing call for `analysis`. Saving is left to the caller.
pub fn render<P: PlotSink + ?Sized>(analysis: &Analysis, sink: &mut P) -> Result<()> {
    if sink.panels() < PANELS {
        return Err(ArcfitError::InvalidParameter(format!(
            "plot sink has {} panels, {PANELS} required",
            sink.panels()
        )));
    }
    let pre = &analysis.preprocessed;

    let curve = pre.curve.extents()?;
    sink.set_uniform_scale(
        CURVE_PANEL,
        (curve.min_x, curve.min_y),
        (curve.max_x, curve.max_y),
    );
    let d1 = pre.d1.extents()?;
    sink.share_x_fit_y(D1_PANEL, CURVE_PANEL, d1.min_y, d1.max_y);
    let d2 = pre.d2.extents()?;
    sink.share_x_fit_y(D2_PANEL, CURVE_PANEL, d2.min_y, d2.max_y);

    sink.horizontal_line(0.0, Rgb::GRAY);
    sink.vertical_line(analysis.window.start, Rgb::DARK_GRAY);
    sink.vertical_line(analysis.window.end, Rgb::DARK_GRAY);

    sink.polyline(CURVE_PANEL, &pre.curve.to_pairs(), Rgb::YELLOW);
    sink.polyline(CURVE_PANEL, &pre.smoothed_aligned().to_pairs(), Rgb::GREEN);
    sink.polyline(CURVE_PANEL, &analysis.windowed.to_pairs(), Rgb::RED);

    let fit = analysis.estimation();
    sink.circle(CURVE_PANEL, fit.center.into(), fit.radius);

    sink.polyline(D1_PANEL, &pre.d1_aligned().to_pairs(), Rgb::BLUE);
    sink.polyline(D2_PANEL, &pre.d2_aligned().to_pairs(), Rgb::MAGENTA);
    Ok(())
}
