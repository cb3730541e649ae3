//! Data-to-pixel mapping for one panel. Screen y grows downwards.

/// Affine map from data units into a `width x height` panel whose top edge
/// sits at `canvas_y` on the shared image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMapper {
    canvas_y: f64,
    width: f64,
    height: f64,
    offset_x: f64,
    offset_y: f64,
    scale_x: f64,
    scale_y: f64,
}

// Zero or non-finite spans fall back to one data unit.
#[inline]
fn span(min: f64, max: f64) -> f64 {
    let d = max - min;
    if d.is_finite() && d > 0.0 { d } else { 1.0 }
}

impl PointMapper {
    pub fn new(canvas_y: u32, width: u32, height: u32) -> Self {
        Self {
            canvas_y: f64::from(canvas_y),
            width: f64::from(width),
            height: f64::from(height),
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// One scale on both axes, chosen so `[min, max]` fits the panel.
    /// The top-left corner shows `(min.0, max.1)`.
    pub fn set_uniform_scale(&mut self, min: (f64, f64), max: (f64, f64)) {
        let scale = (self.width / span(min.0, max.0)).min(self.height / span(min.1, max.1));
        self.scale_x = scale;
        self.scale_y = scale;
        self.offset_x = min.0;
        self.offset_y = max.1;
    }

    pub fn copy_x(&mut self, other: &PointMapper) {
        self.scale_x = other.scale_x;
        self.offset_x = other.offset_x;
    }

    /// Stretch `[min_y, max_y]` over the full panel height.
    pub fn fit_y(&mut self, min_y: f64, max_y: f64) {
        self.scale_y = self.height / span(min_y, max_y);
        self.offset_y = max_y;
    }

    #[inline]
    pub fn map_point(&self, p: (f64, f64)) -> (f64, f64) {
        (
            (p.0 - self.offset_x) * self.scale_x,
            (p.1 - self.offset_y).mul_add(-self.scale_y, self.canvas_y),
        )
    }

    /// Radius in pixels; `None` unless both axes share one scale.
    pub fn map_radius(&self, radius: f64) -> Option<f64> {
        #[allow(clippy::float_cmp)]
        let uniform = self.scale_x == self.scale_y;
        uniform.then(|| radius * self.scale_x)
    }

    pub fn top(&self) -> f64 {
        self.canvas_y
    }

    pub fn bottom(&self) -> f64 {
        self.canvas_y + self.height
    }
}
