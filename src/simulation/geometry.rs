//! Geometry helpers shared by the simulator and the map renderer.
//!
//! Contains:
//! - Euclidean distance (plain and squared)
//! - Circle outline parametrization used for the wavefront and range circles

use super::types::Point;

/// Squared Euclidean distance in world units (avoids a sqrt where only
/// comparisons are needed, e.g. click selection and coincidence checks).
pub fn distance2(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Euclidean distance in world units.
pub fn distance(a: &Point, b: &Point) -> f64 {
    distance2(a, b).sqrt()
}

/// Parametrize a circle outline as a closed polyline.
///
/// Returns `segments + 1` points: the angle sweeps `0..=2π` inclusive so the
/// first and last points coincide and the polyline closes cleanly when drawn.
///
/// # Parameters
///
/// * `center` - Circle center in world units
/// * `radius` - Circle radius in world units
/// * `segments` - Number of line segments approximating the circle
pub fn circle_outline(center: &Point, radius: f64, segments: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(segments + 1);
    for k in 0..=segments {
        let theta = 2.0 * std::f64::consts::PI * (k as f64) / (segments as f64);
        points.push(Point {
            x: center.x + radius * theta.cos(),
            y: center.y + radius * theta.sin(),
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn distance_matches_pythagoras() {
        assert_eq!(distance(&p(0.0, 0.0), &p(3.0, 4.0)), 5.0);
        assert_eq!(distance(&p(-1.0, -1.0), &p(-1.0, -1.0)), 0.0);
        assert_eq!(distance2(&p(1.0, 2.0), &p(4.0, 6.0)), 25.0);
    }

    #[test]
    fn circle_outline_points_lie_on_the_circle() {
        let center = p(2.0, -3.0);
        let radius = 1.5;
        let points = circle_outline(&center, radius, 200);
        assert_eq!(points.len(), 201);
        for pt in &points {
            assert!((distance(pt, &center) - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn circle_outline_is_closed() {
        let points = circle_outline(&p(0.0, 0.0), 2.0, 64);
        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!((first.x - last.x).abs() < 1e-9);
        assert!((first.y - last.y).abs() < 1e-9);
    }
}
