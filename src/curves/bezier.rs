//! Cubic Bezier segments
//!
//! A segment is defined by four control points p0..p3. The curve starts at
//! p0, ends at p3, and is pulled towards p1 and p2 without (in general)
//! passing through them.
//!
//! ```text
//! B(t)  = (1-t)³ p0 + 3t(1-t)² p1 + 3t²(1-t) p2 + t³ p3
//! B'(t) = -3(1-t)² p0 + 3(1-t)(1-3t) p1 + 3t(2-3t) p2 + 3t² p3
//! ```

use nalgebra::{Point3, Vector3};

use super::path::PathError;
use super::traits::Curve;

/// The four control points of one cubic Bezier segment
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlPolygon {
    points: [Point3<f32>; 4],
}

impl ControlPolygon {
    /// Number of control points in a cubic segment
    pub const POINTS: usize = 4;

    /// Create a segment from its four control points
    pub const fn new(
        p0: Point3<f32>,
        p1: Point3<f32>,
        p2: Point3<f32>,
        p3: Point3<f32>,
    ) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// Create a segment from a slice that must hold exactly four finite points
    pub fn from_slice(points: &[Point3<f32>]) -> Result<Self, PathError> {
        let points: [Point3<f32>; 4] = points
            .try_into()
            .map_err(|_| PathError::WrongControlPointCount {
                found: points.len(),
            })?;

        if points.iter().any(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(PathError::NonFinite);
        }

        Ok(Self { points })
    }

    /// All four control points, in order
    pub fn points(&self) -> &[Point3<f32>; 4] {
        &self.points
    }

    /// First control point (where the curve starts)
    pub fn start(&self) -> Point3<f32> {
        self.points[0]
    }

    /// Last control point (where the curve ends)
    pub fn end(&self) -> Point3<f32> {
        self.points[3]
    }

    /// Tangent direction leaving the start point, `p1 - p0`
    pub fn start_tangent(&self) -> Vector3<f32> {
        self.points[1] - self.points[0]
    }

    /// Tangent direction arriving at the end point, `p3 - p2`
    pub fn end_tangent(&self) -> Vector3<f32> {
        self.points[3] - self.points[2]
    }

    /// Axis-aligned bounding box of the control points
    ///
    /// The curve itself never leaves this box for t in [0, 1].
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut min = self.points[0];
        let mut max = self.points[0];

        for p in &self.points[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }

        (min, max)
    }
}

/// Cubic Bernstein weights of p0..p3 at `t`
fn bernstein(t: f32) -> [f32; 4] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t]
}

impl Curve for ControlPolygon {
    fn position(&self, t: f32) -> Point3<f32> {
        let [p0, p1, p2, p3] = self.points;
        let [b0, b1, b2, b3] = bernstein(t);

        Point3::from(p0.coords * b0 + p1.coords * b1 + p2.coords * b2 + p3.coords * b3)
    }

    fn velocity(&self, t: f32) -> Vector3<f32> {
        let [p0, p1, p2, p3] = self.points;
        let s = 1.0 - t;

        let d0 = -3.0 * s * s;
        let d1 = 3.0 * s * (1.0 - 3.0 * t);
        let d2 = 3.0 * t * (2.0 - 3.0 * t);
        let d3 = 3.0 * t * t;

        p0.coords * d0 + p1.coords * d1 + p2.coords * d2 + p3.coords * d3
    }

    /// The chord from first to last control point
    fn fallback_direction(&self) -> Vector3<f32> {
        self.end() - self.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hook() -> ControlPolygon {
        ControlPolygon::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    fn twisted() -> ControlPolygon {
        ControlPolygon::new(
            Point3::new(-1.0, 0.2, 0.5),
            Point3::new(0.3, 1.5, -0.7),
            Point3::new(1.2, -0.4, 0.9),
            Point3::new(2.0, 0.8, -1.1),
        )
    }

    fn assert_parallel(a: Vector3<f32>, b: Vector3<f32>) {
        assert!(a.cross(&b).norm() < 1e-5, "{a:?} is not parallel to {b:?}");
        assert!(a.dot(&b) > 0.0, "{a:?} points away from {b:?}");
    }

    #[test]
    fn test_midpoint() {
        let p = hook().position(0.5);
        assert_relative_eq!(p, Point3::new(0.75, 0.5, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_endpoint_interpolation() {
        for poly in [hook(), twisted()] {
            assert_relative_eq!(poly.position(0.0), poly.start(), epsilon = 1e-6);
            assert_relative_eq!(poly.position(1.0), poly.end(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_stays_inside_control_bounds() {
        for poly in [hook(), twisted()] {
            let (min, max) = poly.bounds();
            for i in 0..=100 {
                let p = poly.position(i as f32 / 100.0);
                for axis in 0..3 {
                    assert!(p[axis] >= min[axis] - 1e-6 && p[axis] <= max[axis] + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_weights_form_a_convex_combination() {
        // Non-negative weights summing to one keep B(t) in the convex hull
        for i in 0..=200 {
            let t = i as f32 / 200.0;
            let weights = bernstein(t);
            assert!(weights.iter().all(|&w| w >= 0.0), "t = {t}: {weights:?}");
            assert_relative_eq!(weights.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_no_clamping() {
        // Extrapolation past t = 1 keeps following the cubic
        let p = hook().position(2.0);
        assert_relative_eq!(p, Point3::new(-6.0, -4.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_end_tangents() {
        for poly in [hook(), twisted()] {
            assert_parallel(poly.velocity(0.0), poly.start_tangent());
            assert_parallel(poly.velocity(1.0), poly.end_tangent());
            // Scale is 3x the control leg
            assert_relative_eq!(poly.velocity(0.0), poly.start_tangent() * 3.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let poly = twisted();
        let h = 1e-3;
        for &t in &[0.1, 0.35, 0.6, 0.9] {
            let numeric = (poly.position(t + h) - poly.position(t - h)) / (2.0 * h);
            assert_relative_eq!(poly.velocity(t), numeric, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_frame_is_orthonormal() {
        for poly in [hook(), twisted()] {
            for i in 0..=20 {
                let t = i as f32 / 20.0;
                let frame = poly.frame(t);
                assert!(frame.is_orthonormal(1e-5), "t = {t}: {frame:?}");
                assert_relative_eq!(frame.position, poly.position(t), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_coincident_control_points() {
        // p0 == p1 makes the velocity vanish at t = 0
        let poly = ControlPolygon::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(poly.velocity(0.0), Vector3::zeros());

        let frame = poly.frame(0.0);
        assert!(frame.is_orthonormal(1e-5));
        assert_relative_eq!(frame.forward, Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_fully_collapsed_segment() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let poly = ControlPolygon::new(p, p, p, p);

        let frame = poly.frame(0.4);
        assert!(frame.is_orthonormal(1e-5));
        assert_relative_eq!(frame.position, p, epsilon = 1e-6);
    }

    #[test]
    fn test_vertical_climb() {
        let poly = ControlPolygon::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        let frame = poly.frame(0.5);
        assert!(frame.is_orthonormal(1e-5));
        assert_relative_eq!(frame.forward, Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_from_slice() {
        let points = hook().points().to_vec();
        assert_eq!(ControlPolygon::from_slice(&points).unwrap(), hook());

        let err = ControlPolygon::from_slice(&points[..3]).unwrap_err();
        assert!(matches!(err, PathError::WrongControlPointCount { found: 3 }));

        let mut bad = points.clone();
        bad[2].y = f32::NAN;
        assert!(matches!(
            ControlPolygon::from_slice(&bad),
            Err(PathError::NonFinite)
        ));
    }
}
