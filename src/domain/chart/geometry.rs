//! Line chart geometry: maps a numeric series onto points and connectors
//! inside a `width x height` rectangle.

use super::value_objects::{LineGeometry, Point, Segment};

/// Fewest samples that still produce a line
pub const MIN_SERIES_LEN: usize = 2;

/// Render `series` into screen space.
///
/// The series is stretched to fill `[0, width]` exactly: sample `i` sits at
/// `width * i / (n - 1)`. Values are scaled between the series minimum
/// (`y = height`) and maximum (`y = 0`). A flat series uses a range of 1, so
/// every point lands on `y = height`.
pub fn render(series: &[f64], width: f64, height: f64) -> Option<LineGeometry> {
    if series.len() < MIN_SERIES_LEN {
        return None;
    }

    let min_value = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = match max_value - min_value {
        r if r == 0.0 => 1.0,
        r => r,
    };

    let last = (series.len() - 1) as f64;
    let points: Vec<Point> = series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = width * i as f64 / last;
            let normalized = (value - min_value) / range;
            Point::new(x, height - normalized * height)
        })
        .collect();

    let segments = points.windows(2).map(|pair| Segment::between(pair[0], pair[1])).collect();

    Some(LineGeometry { points, segments, min_value, max_value })
}
