use derive_more::{Constructor, Display, From};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DashboardError, ValidationResult};

/// Value Object - position in the chart rectangle, origin top-left, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Value Object - straight connector between two consecutive points.
///
/// `length` and `angle_deg` are what a renderer without a line primitive needs:
/// a bar of width `length`, anchored at `start`, rotated by `angle_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub length: f64,
    pub angle_deg: f64,
}

impl Segment {
    pub fn between(start: Point, end: Point) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        Self {
            start,
            end,
            length: dx.hypot(dy),
            angle_deg: dy.atan2(dx).to_degrees(),
        }
    }

    /// End point recomputed from `start`, `length` and `angle_deg`
    pub fn projected_end(&self) -> Point {
        let radians = self.angle_deg.to_radians();
        Point::new(
            self.start.x + self.length * radians.cos(),
            self.start.y + self.length * radians.sin(),
        )
    }
}

/// Output of the geometry engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineGeometry {
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
    pub min_value: f64,
    pub max_value: f64,
}

/// Value Object - opaque colour handed through to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Default for ColorToken {
    fn default() -> Self {
        // accent
        Self::from("#7B68EE")
    }
}

/// Everything needed to draw one line chart; no hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    series: Vec<f64>,
    width: f64,
    height: f64,
    color: ColorToken,
}

impl ChartSpec {
    pub fn new(
        series: Vec<f64>,
        width: f64,
        height: f64,
        color: ColorToken,
    ) -> ValidationResult<Self> {
        if !(width > 0.0 && width.is_finite()) || !(height > 0.0 && height.is_finite()) {
            return Err(DashboardError::ValidationError(format!(
                "Chart dimensions must be positive, got {width}x{height}"
            )));
        }
        if let Some(bad) = series.iter().find(|v| !v.is_finite()) {
            return Err(DashboardError::ValidationError(format!(
                "Chart series contains a non-finite value: {bad}"
            )));
        }
        Ok(Self { series, width, height, color })
    }

    pub fn series(&self) -> &[f64] {
        &self.series
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn color(&self) -> &ColorToken {
        &self.color
    }

    /// `None` when the series has fewer than two samples
    pub fn render(&self) -> Option<LineGeometry> {
        super::geometry::render(&self.series, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(ChartSpec::new(vec![1.0, 2.0], 0.0, 100.0, ColorToken::default()).is_err());
        assert!(ChartSpec::new(vec![1.0, 2.0], 300.0, -1.0, ColorToken::default()).is_err());
        assert!(ChartSpec::new(vec![1.0, f64::NAN], 300.0, 100.0, ColorToken::default()).is_err());
    }

    #[test]
    fn segment_angle_is_in_degrees() {
        let down = Segment::between(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!((down.angle_deg - 45.0).abs() < 1e-9);
        assert!((down.length - 200f64.sqrt()).abs() < 1e-9);

        let up = Segment::between(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        assert!((up.angle_deg + 45.0).abs() < 1e-9);
    }
}
