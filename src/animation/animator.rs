//! Piecewise path animator
//!
//! Maps elapsed wall-clock time onto a looping path. Every segment gets the
//! same share of the loop duration:
//!
//! ```text
//! progress = N * elapsed / duration      (segments traversed, unbounded)
//! looped   = progress mod N              in [0, N)
//! segment  = floor(looped)               clamped to [0, N-1]
//! local_t  = looped - segment            in [0, 1)
//! ```
//!
//! The same elapsed time always yields the same frame; the animator holds
//! no per-frame state.
//!
//! Clock readings are wrapped into `[0, duration)` in `f64` before any
//! `f32` math, so the motion stays smooth however long the clock has run.

use std::time::Duration;

use nalgebra::{Matrix4, Point3};
use thiserror::Error;

use super::clock::AnimationClock;
use crate::curves::{BezierPath, Curve, Frame, PathError, PathLocation};

/// Errors that can occur while configuring an animator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimatorError {
    #[error("Loop duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f32),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Drives a frame around a path, one full loop every `duration` seconds
#[derive(Clone, Debug)]
pub struct PathAnimator {
    path: BezierPath,
    duration: f32,
}

impl PathAnimator {
    /// Create an animator for a path
    ///
    /// Fails if `duration` is zero, negative or not finite.
    pub fn new(path: BezierPath, duration: f32) -> Result<Self, AnimatorError> {
        check_duration(duration)?;

        if !path.is_closed() {
            log::warn!(
                "Path '{}' is open; the animation will jump back to its start every loop",
                path.name()
            );
        }

        log::debug!(
            "Animating '{}': {} segments, {:.2}s per loop",
            path.name(),
            path.segment_count(),
            duration
        );

        Ok(Self { path, duration })
    }

    /// Create an animator from a packed control point list (3n+1 points)
    pub fn from_points(points: &[Point3<f32>], duration: f32) -> Result<Self, AnimatorError> {
        let path = BezierPath::from_points(points, "Path")?;
        Self::new(path, duration)
    }

    /// Get a reference to the path
    pub fn path(&self) -> &BezierPath {
        &self.path
    }

    /// Seconds for one full loop
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Change the loop duration, with the same check as construction
    pub fn set_duration(&mut self, duration: f32) -> Result<(), AnimatorError> {
        check_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// Total progress in segments traversed (grows without bound)
    pub fn progress(&self, elapsed: f32) -> f32 {
        self.path.segment_count() as f32 * elapsed / self.duration
    }

    /// Which segment, and where on it, the animation is at `elapsed`
    pub fn locate(&self, elapsed: f32) -> PathLocation {
        self.path.locate(self.progress(elapsed))
    }

    /// Frame on the path at `elapsed` seconds
    pub fn frame_at(&self, elapsed: f32) -> Frame {
        let PathLocation { segment, local_t } = self.locate(elapsed);
        self.path.segments()[segment].frame(local_t)
    }

    /// Object-to-world transform at `elapsed` seconds
    pub fn transform_at(&self, elapsed: f32) -> Matrix4<f32> {
        self.frame_at(elapsed).to_matrix()
    }

    /// Seconds into the current loop for a clock reading, in [0, duration)
    pub fn loop_time(&self, elapsed: Duration) -> f32 {
        let looped = elapsed.as_secs_f64().rem_euclid(f64::from(self.duration)) as f32;
        // Narrowing can round up to a full loop
        if looped >= self.duration {
            0.0
        } else {
            looped
        }
    }

    /// Which segment, and where on it, the animation is at the clock's reading
    pub fn locate_now(&self, clock: &AnimationClock) -> PathLocation {
        self.locate(self.loop_time(clock.elapsed()))
    }

    /// Frame on the path at the clock's current reading
    pub fn frame_now(&self, clock: &AnimationClock) -> Frame {
        self.frame_at(self.loop_time(clock.elapsed()))
    }
}

fn check_duration(duration: f32) -> Result<(), AnimatorError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(AnimatorError::InvalidDuration(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Instant;

    /// Two segments: a hook up and a hook back down to the start
    fn two_hooks() -> BezierPath {
        BezierPath::from_points(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
            ],
            "hooks",
        )
        .unwrap()
    }

    #[test]
    fn test_boundary_entry() {
        let animator = PathAnimator::new(two_hooks(), 10.0).unwrap();
        let loc = animator.locate(5.0);
        assert_eq!(loc.segment, 1);
        assert_eq!(loc.local_t, 0.0);
    }

    #[test]
    fn test_locate_quarter_points() {
        let animator = PathAnimator::new(two_hooks(), 10.0).unwrap();
        assert_eq!(animator.locate(0.0), PathLocation { segment: 0, local_t: 0.0 });
        assert_eq!(animator.locate(2.5), PathLocation { segment: 0, local_t: 0.5 });
        assert_eq!(animator.locate(7.5), PathLocation { segment: 1, local_t: 0.5 });
        assert_eq!(animator.locate(12.5), PathLocation { segment: 0, local_t: 0.5 });
    }

    #[test]
    fn test_loop_closure() {
        for duration in [3.0, 10.0, 0.75] {
            let animator = PathAnimator::new(BezierPath::aerial(), duration).unwrap();
            let start = animator.frame_at(0.0).position;
            assert_relative_eq!(animator.frame_at(duration).position, start, epsilon = 1e-5);
            assert_relative_eq!(
                animator.frame_at(7.0 * duration).position,
                start,
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_position_continuous_at_boundaries() {
        let duration = 3.0;
        let animator = PathAnimator::new(BezierPath::aerial(), duration).unwrap();
        let count = animator.path().segment_count();
        let eps = 1e-4;

        for i in 1..=count {
            let boundary = duration * i as f32 / count as f32;
            let before = animator.frame_at(boundary - eps).position;
            let after = animator.frame_at(boundary + eps).position;
            assert!(
                (after - before).norm() < 1e-2,
                "gap at boundary {i}: {before:?} -> {after:?}"
            );
        }
    }

    #[test]
    fn test_frames_orthonormal_along_loop() {
        let animator = PathAnimator::new(BezierPath::aerial(), 3.0).unwrap();
        for i in 0..300 {
            let frame = animator.frame_at(i as f32 * 0.01);
            assert!(frame.is_orthonormal(1e-5), "{frame:?}");
        }
    }

    #[test]
    fn test_transform_matches_frame() {
        let animator = PathAnimator::new(BezierPath::aerial(), 3.0).unwrap();
        let frame = animator.frame_at(1.2);
        let m = animator.transform_at(1.2);
        assert_relative_eq!(m.transform_point(&Point3::origin()), frame.position, epsilon = 1e-6);
    }

    #[test]
    fn test_idempotent() {
        let animator = PathAnimator::new(BezierPath::aerial(), 3.0).unwrap();
        assert_eq!(animator.frame_at(1.7), animator.frame_at(1.7));
    }

    #[test]
    fn test_invalid_duration() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = PathAnimator::new(BezierPath::aerial(), bad);
            assert!(matches!(result, Err(AnimatorError::InvalidDuration(_))));
        }
    }

    #[test]
    fn test_set_duration() {
        let mut animator = PathAnimator::new(BezierPath::aerial(), 3.0).unwrap();
        assert!(animator.set_duration(0.0).is_err());
        assert_eq!(animator.duration(), 3.0);

        animator.set_duration(6.0).unwrap();
        assert_eq!(animator.locate(1.5).segment, 1);
    }

    #[test]
    fn test_from_points_propagates_path_errors() {
        let result = PathAnimator::from_points(&[Point3::origin(); 5], 3.0);
        assert_eq!(
            result.unwrap_err(),
            AnimatorError::Path(PathError::BadPackedLength { found: 5 })
        );
    }

    #[test]
    fn test_loop_time_wraps() {
        let animator = PathAnimator::new(BezierPath::aerial(), 3.0).unwrap();
        assert_eq!(animator.loop_time(Duration::ZERO), 0.0);
        assert_relative_eq!(animator.loop_time(Duration::from_millis(4500)), 1.5, epsilon = 1e-6);
        assert_eq!(animator.loop_time(Duration::from_secs(9)), 0.0);
    }

    #[test]
    fn test_smooth_after_days_of_running() {
        let animator = PathAnimator::new(BezierPath::aerial(), 3.0).unwrap();
        let t0 = Instant::now();
        let clock = AnimationClock::starting_at(t0);
        let later = t0 + Duration::from_secs(10 * 86_400);

        let a = animator.loop_time(clock.elapsed_at(later));
        let b = animator.loop_time(clock.elapsed_at(later + Duration::from_millis(16)));
        assert_relative_eq!(b - a, 0.016, epsilon = 1e-4);

        // Consecutive 60 Hz frames move the airplane
        let pa = animator.frame_at(a).position;
        let pb = animator.frame_at(b).position;
        assert!((pb - pa).norm() > 1e-4, "{pa:?} -> {pb:?}");
        assert!(animator.locate(b).local_t > 0.0);
    }

    #[test]
    fn test_frame_now_follows_clock() {
        let animator = PathAnimator::new(BezierPath::aerial(), 3.0).unwrap();
        // Started a second ago, paused at 0.75s
        let t0 = Instant::now() - Duration::from_secs(1);
        let mut clock = AnimationClock::starting_at(t0);
        clock.pause_at(t0 + Duration::from_millis(750));

        assert_eq!(animator.frame_now(&clock), animator.frame_at(0.75));
        assert_eq!(animator.locate_now(&clock), PathLocation { segment: 1, local_t: 0.0 });
    }
}
