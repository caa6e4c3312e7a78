//! Paths made of chained cubic Bezier segments
//!
//! Consecutive segments share an endpoint, so the path is continuous in
//! position (C0). Tangents are NOT required to line up at the joins, so a
//! path may have a visible kink (and an orientation snap when animated)
//! wherever two segments meet. [`BezierPath::join_kink`] measures it.

use nalgebra::Point3;
use thiserror::Error;

use super::bezier::ControlPolygon;
use super::traits::Curve;

/// Largest gap between one segment's end and the next one's start that
/// still counts as a shared endpoint
pub const JOIN_TOLERANCE: f32 = 1e-4;

/// Errors that can occur while building a path
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Path has no segments")]
    Empty,

    #[error("Cubic segment needs 4 control points, found {found}")]
    WrongControlPointCount { found: usize },

    #[error("Packed control points must number 3n+1 (n >= 1), found {found}")]
    BadPackedLength { found: usize },

    #[error("Segment {segment} starts {gap} away from where the previous segment ends")]
    DiscontinuousJoin { segment: usize, gap: f32 },

    #[error("Control points must be finite")]
    NonFinite,
}

/// Where a path parameter lands: which segment, and how far along it
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathLocation {
    /// Index of the segment, in [0, segment_count)
    pub segment: usize,
    /// Parameter within the segment, in [0, 1)
    pub local_t: f32,
}

/// An ordered, validated sequence of cubic Bezier segments
#[derive(Clone, Debug)]
pub struct BezierPath {
    segments: Vec<ControlPolygon>,
    name: String,
}

impl BezierPath {
    /// Create a path from segments, checking that neighbours share endpoints
    pub fn from_segments(
        segments: Vec<ControlPolygon>,
        name: impl Into<String>,
    ) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        if segments
            .iter()
            .flat_map(|s| s.points().iter())
            .any(|p| !p.iter().all(|c| c.is_finite()))
        {
            return Err(PathError::NonFinite);
        }

        for (i, pair) in segments.windows(2).enumerate() {
            let gap = (pair[1].start() - pair[0].end()).norm();
            if gap > JOIN_TOLERANCE {
                return Err(PathError::DiscontinuousJoin {
                    segment: i + 1,
                    gap,
                });
            }
        }

        let path = Self {
            segments,
            name: name.into(),
        };

        for join in 0..path.join_count() {
            log::debug!(
                "{}: join {} kink {:.1} degrees",
                path.name,
                join,
                path.join_kink(join).unwrap_or(0.0).to_degrees()
            );
        }

        Ok(path)
    }

    /// Create a path from a packed point list
    ///
    /// Neighbouring segments share their boundary point, so `n` segments
    /// take `3n + 1` points: segment `i` uses `points[3i..=3i+3]`.
    pub fn from_points(points: &[Point3<f32>], name: impl Into<String>) -> Result<Self, PathError> {
        if points.len() < ControlPolygon::POINTS || (points.len() - 1) % 3 != 0 {
            return Err(PathError::BadPackedLength {
                found: points.len(),
            });
        }

        let segments = (0..(points.len() - 1) / 3)
            .map(|i| ControlPolygon::from_slice(&points[3 * i..3 * i + 4]))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_segments(segments, name)
    }

    /// The closed four-segment loop the airplane flies by default
    pub fn aerial() -> Self {
        let third = 1.0 / 3.0;
        let two_thirds = 2.0 / 3.0;
        let points = [
            Point3::new(two_thirds, 0.0, two_thirds),
            Point3::new(1.0, 0.0, third),
            Point3::new(1.0, 0.1, -third),
            Point3::new(two_thirds, 0.1, -two_thirds),
            Point3::new(third, 0.1, -1.0),
            Point3::new(-third, 0.4, -1.0),
            Point3::new(-two_thirds, 0.4, -two_thirds),
            Point3::new(-1.0, 0.4, -third),
            Point3::new(-1.0, 0.0, third),
            Point3::new(-two_thirds, 0.0, two_thirds),
            Point3::new(-third, 0.0, 1.0),
            Point3::new(third, 0.0, 1.0),
            Point3::new(two_thirds, 0.0, two_thirds),
        ];

        let segments = points
            .windows(ControlPolygon::POINTS)
            .step_by(3)
            .map(|w| ControlPolygon::new(w[0], w[1], w[2], w[3]))
            .collect();

        Self {
            segments,
            name: "Aerial".to_string(),
        }
    }

    /// Get the number of segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Get a reference to the segments
    pub fn segments(&self) -> &[ControlPolygon] {
        &self.segments
    }

    /// Get a segment by index
    pub fn segment(&self, index: usize) -> Option<&ControlPolygon> {
        self.segments.get(index)
    }

    /// Name of the path (for UI display)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the last segment ends where the first one starts
    pub fn is_closed(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => (first.start() - last.end()).norm() <= JOIN_TOLERANCE,
            _ => false,
        }
    }

    /// Number of joins between segments (including the wraparound join of a
    /// closed path)
    pub fn join_count(&self) -> usize {
        if self.is_closed() {
            self.segments.len()
        } else {
            self.segments.len().saturating_sub(1)
        }
    }

    /// Angle in radians between the tangent arriving at join `index` and
    /// the tangent leaving it
    ///
    /// Join `i` sits between segment `i` and segment `i + 1` (wrapping to
    /// segment 0 on a closed path). Zero means the path is C1 there.
    pub fn join_kink(&self, index: usize) -> Option<f32> {
        if index >= self.join_count() {
            return None;
        }

        let incoming = self.segments[index].velocity(1.0);
        let outgoing = self.segments[(index + 1) % self.segments.len()].velocity(0.0);

        if incoming.norm() < f32::EPSILON || outgoing.norm() < f32::EPSILON {
            return Some(0.0);
        }

        Some(incoming.cross(&outgoing).norm().atan2(incoming.dot(&outgoing)))
    }

    /// Map a parameter measured in "segments traversed" onto the path
    ///
    /// The parameter wraps modulo the segment count, so it may grow without
    /// bound (or be negative). The segment index is clamped to guard against
    /// rounding at the wrap boundary.
    pub fn locate(&self, param: f32) -> PathLocation {
        let count = self.segments.len();
        let looped = param.rem_euclid(count as f32);

        let segment = (looped.floor().max(0.0) as usize).min(count - 1);
        let local_t = (looped - segment as f32).clamp(0.0, 1.0);

        PathLocation { segment, local_t }
    }

    /// Axis-aligned bounding box of every control point
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut bounds = self.segments[0].bounds();

        for segment in &self.segments[1..] {
            let (min, max) = segment.bounds();
            bounds.0 = bounds.0.inf(&min);
            bounds.1 = bounds.1.sup(&max);
        }

        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_points() -> Vec<Point3<f32>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
            Point3::new(3.0, 3.0, 0.0),
        ]
    }

    #[test]
    fn test_aerial_is_valid_and_closed() {
        let aerial = BezierPath::aerial();
        assert_eq!(aerial.segment_count(), 4);
        assert!(aerial.is_closed());
        assert_eq!(aerial.join_count(), 4);

        // Re-validating the stock table must succeed
        let rebuilt = BezierPath::from_segments(aerial.segments().to_vec(), "copy").unwrap();
        assert_eq!(rebuilt.segment_count(), 4);
    }

    #[test]
    fn test_aerial_join_tangents_line_up() {
        // The stock table happens to be C1 in direction, though nothing
        // enforces that
        let aerial = BezierPath::aerial();
        let kinks: Vec<f32> = (0..aerial.join_count())
            .filter_map(|i| aerial.join_kink(i))
            .collect();
        assert_eq!(kinks.len(), 4);
        assert!(kinks.iter().all(|&k| k < 1e-3), "{kinks:?}");
    }

    #[test]
    fn test_from_points() {
        let path = BezierPath::from_points(&square_points(), "L").unwrap();
        assert_eq!(path.segment_count(), 2);
        assert!(!path.is_closed());
        assert_eq!(path.join_count(), 1);
        assert_eq!(path.segment(1).unwrap().start(), Point3::new(3.0, 0.0, 0.0));
        assert!(path.segment(2).is_none());

        // Straight into a right angle
        assert_relative_eq!(
            path.join_kink(0).unwrap(),
            std::f32::consts::FRAC_PI_2,
            epsilon = 1e-5
        );
        assert!(path.join_kink(1).is_none());
    }

    #[test]
    fn test_bad_packed_length() {
        let points = square_points();
        for len in [0, 1, 3, 5, 6] {
            assert_eq!(
                BezierPath::from_points(&points[..len], "bad").unwrap_err(),
                PathError::BadPackedLength { found: len }
            );
        }
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(
            BezierPath::from_segments(Vec::new(), "empty").unwrap_err(),
            PathError::Empty
        );
    }

    #[test]
    fn test_discontinuous_join() {
        let a = ControlPolygon::from_slice(&square_points()[..4]).unwrap();
        let b = ControlPolygon::new(
            Point3::new(3.0, 0.5, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
            Point3::new(3.0, 3.0, 0.0),
        );

        match BezierPath::from_segments(vec![a, b], "gap") {
            Err(PathError::DiscontinuousJoin { segment, gap }) => {
                assert_eq!(segment, 1);
                assert_relative_eq!(gap, 0.5, epsilon = 1e-6);
            }
            other => panic!("expected a discontinuous join, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_segment() {
        let bad = ControlPolygon::new(
            Point3::origin(),
            Point3::new(f32::INFINITY, 0.0, 0.0),
            Point3::origin(),
            Point3::origin(),
        );
        assert_eq!(
            BezierPath::from_segments(vec![bad], "inf").unwrap_err(),
            PathError::NonFinite
        );
    }

    #[test]
    fn test_locate() {
        let path = BezierPath::aerial();

        let at = |param: f32| {
            let loc = path.locate(param);
            (loc.segment, loc.local_t)
        };

        assert_eq!(at(0.0), (0, 0.0));
        assert_eq!(at(1.0), (1, 0.0));
        assert_eq!(at(2.5), (2, 0.5));
        assert_eq!(at(4.0), (0, 0.0));
        assert_eq!(at(9.25), (1, 0.25));
        assert_eq!(at(-0.5), (3, 0.5));
    }

    #[test]
    fn test_locate_stays_in_range() {
        let path = BezierPath::aerial();
        let count = path.segment_count();
        for i in 0..1000 {
            let loc = path.locate(i as f32 * 0.0371);
            assert!(loc.segment < count);
            assert!((0.0..1.0).contains(&loc.local_t), "{loc:?}");
        }
        for i in 1..200 {
            let loc = path.locate(i as f32 * -0.0371);
            assert!(loc.segment < count);
            assert!((0.0..=1.0).contains(&loc.local_t), "{loc:?}");
        }
        // Just below the wrap point
        let loc = path.locate(count as f32 - f32::EPSILON * 4.0);
        assert!(loc.segment < count);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = BezierPath::aerial().bounds();
        assert_relative_eq!(min, Point3::new(-1.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(max, Point3::new(1.0, 0.4, 1.0), epsilon = 1e-6);
    }
}
