//! RGB raster backend for `PlotSink`.

use std::fs;
use std::path::Path;

use arcfit_traits::{BoxError, PlotSink, Rgb};
use image::{ImageFormat, RgbImage};
use tracing::{debug, warn};

use crate::error::{PlotError, Result};
use crate::mapper::PointMapper;

/// Black canvas of `width x (width * panels)` split into square panels
/// stacked top to bottom.
#[derive(Debug, Clone)]
pub struct PlotCanvas {
    image: RgbImage,
    width: u32,
    mappers: Vec<PointMapper>,
}

impl PlotCanvas {
    pub fn new(width: u32, panels: usize) -> Result<Self> {
        let height = u32::try_from(panels)
            .ok()
            .and_then(|p| width.checked_mul(p))
            .filter(|h| width > 0 && *h > 0)
            .ok_or(PlotError::InvalidSize { width, panels })?;
        let mappers = (0..panels as u32)
            .map(|i| PointMapper::new(i * width, width, width))
            .collect();
        Ok(Self {
            // RgbImage::new is zero-filled, i.e. black.
            image: RgbImage::new(width, height),
            width,
            mappers,
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn mapper(&self, panel: usize) -> Result<&PointMapper> {
        self.mappers.get(panel).ok_or(PlotError::InvalidPanel(panel))
    }

    fn mapper_mut(&mut self, panel: usize) -> Option<&mut PointMapper> {
        let m = self.mappers.get_mut(panel);
        if m.is_none() {
            warn!(panel, "ignoring drawing call for missing panel");
        }
        m
    }

    /// Out-of-canvas pixels are dropped.
    #[inline]
    fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height()) {
            return;
        }
        self.image
            .put_pixel(x as u32, y as u32, image::Rgb(color.to_array()));
    }

    /// Bresenham line between two pixel positions, both ends included.
    pub fn line(&mut self, from: (i64, i64), to: (i64, i64), color: Rgb) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle outline.
    pub fn circle_outline(&mut self, center: (i64, i64), radius: i64, color: Rgb) {
        let (cx, cy) = center;
        if radius <= 0 {
            self.put(cx, cy, color);
            return;
        }
        let mut x = radius;
        let mut y = 0;
        let mut d = 1 - radius;
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.put(cx + px, cy + py, color);
            }
            y += 1;
            if d < 0 {
                d += 2 * y + 1;
            } else {
                x -= 1;
                d += 2 * (y - x) + 1;
            }
        }
    }
}

/// Pixel coordinates are kept within this distance of the origin.
const PIXEL_LIMIT: f64 = 1_048_576.0;

// Truncates towards zero; far-away values are pinned and later clipped.
#[inline]
fn px(v: f64) -> i64 {
    if v.is_nan() {
        return -(PIXEL_LIMIT as i64);
    }
    v.clamp(-PIXEL_LIMIT, PIXEL_LIMIT) as i64
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| PlotError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

impl PlotSink for PlotCanvas {
    fn panels(&self) -> usize {
        self.mappers.len()
    }

    fn set_uniform_scale(&mut self, panel: usize, min: (f64, f64), max: (f64, f64)) {
        if let Some(m) = self.mapper_mut(panel) {
            m.set_uniform_scale(min, max);
        }
    }

    fn share_x_fit_y(&mut self, panel: usize, from: usize, min_y: f64, max_y: f64) {
        let Some(source) = self.mappers.get(from).copied() else {
            warn!(panel = from, "ignoring scale copy from missing panel");
            return;
        };
        if let Some(m) = self.mapper_mut(panel) {
            m.copy_x(&source);
            m.fit_y(min_y, max_y);
        }
    }

    fn horizontal_line(&mut self, y: f64, color: Rgb) {
        let right = i64::from(self.width);
        for i in 0..self.mappers.len() {
            let sy = px(self.mappers[i].map_point((0.0, y)).1);
            self.line((0, sy), (right, sy), color);
        }
    }

    fn vertical_line(&mut self, x: f64, color: Rgb) {
        for i in 0..self.mappers.len() {
            let m = self.mappers[i];
            let sx = px(m.map_point((x, 0.0)).0);
            self.line((sx, px(m.top())), (sx, px(m.bottom())), color);
        }
    }

    fn polyline(&mut self, panel: usize, points: &[(f64, f64)], color: Rgb) {
        let Some(m) = self.mapper_mut(panel).copied() else {
            return;
        };
        let mapped: Vec<(i64, i64)> = points
            .iter()
            .map(|&p| {
                let (x, y) = m.map_point(p);
                (px(x), px(y))
            })
            .collect();
        for pair in mapped.windows(2) {
            self.line(pair[0], pair[1], color);
        }
    }

    fn circle(&mut self, panel: usize, center: (f64, f64), radius: f64) {
        let Some(m) = self.mapper_mut(panel).copied() else {
            return;
        };
        let Some(r) = m.map_radius(radius) else {
            warn!(panel, "circle needs a uniform scale; skipped");
            return;
        };
        let (x, y) = m.map_point(center);
        let c = (px(x), px(y));
        self.put(c.0, c.1, Rgb::MAGENTA);
        self.circle_outline(c, px(r), Rgb::ORANGE);
    }

    fn save(&mut self, path: &Path) -> std::result::Result<(), BoxError> {
        ensure_parent_dir(path)?;
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(PlotError::from)?;
        debug!(path = %path.display(), width = self.image.width(), height = self.image.height(), "plot saved");
        Ok(())
    }
}
