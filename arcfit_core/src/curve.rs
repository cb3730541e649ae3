//! Curve data model: ordered 2-D samples and their extents.

use crate::error::{ArcfitError, Result};

/// A time (`x`) / value (`y`) sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Ordered sequence of points. Order is whatever the caller supplied;
/// nothing here re-sorts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    points: Vec<Point>,
}

/// Bounding box of a curve, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveExtents {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl Curve {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points whose x lies in the closed interval `[start_x, end_x]`, in order.
    ///
    /// The range is taken literally: `start_x > end_x` yields an empty curve.
    pub fn slice(&self, start_x: f64, end_x: f64) -> Curve {
        let range = start_x..=end_x;
        self.points
            .iter()
            .copied()
            .filter(|p| range.contains(&p.x))
            .collect()
    }

    /// Apply `f` to every point.
    pub fn modify<F>(&self, f: F) -> Curve
    where
        F: FnMut(Point) -> Point,
    {
        self.points.iter().copied().map(f).collect()
    }

    /// Same curve with every x moved by `dx`.
    pub fn shift_x(&self, dx: f64) -> Curve {
        self.modify(|p| Point::new(p.x + dx, p.y))
    }

    pub fn extents(&self) -> Result<CurveExtents> {
        let first = self
            .points
            .first()
            .ok_or(ArcfitError::EmptyCurve("extents"))?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Ok(CurveExtents {
            min_x,
            max_x,
            min_y,
            max_y,
            delta_x: max_x - min_x,
            delta_y: max_y - min_y,
        })
    }

    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().copied().map(Into::into).collect()
    }
}

impl FromIterator<Point> for Curve {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<(f64, f64)>> for Curve {
    fn from(samples: Vec<(f64, f64)>) -> Self {
        samples.into_iter().map(Point::from).collect()
    }
}
