//! Curve trait definition
//!
//! The `Curve` trait is the core abstraction for parametric 3D curves.
//! Anything that can report a position and a derivative at parameter `t`
//! gets a moving orientation frame for free.

use nalgebra::{Point3, Vector3};

use super::frame::Frame;

/// A parametric curve in 3D space
///
/// ## Parametric Representation
///
/// - `t = 0.0` → Start of the curve
/// - `t = 1.0` → End of the curve
///
/// Values outside [0, 1] are not clamped. Implementations extrapolate,
/// which is valid math but rarely what a caller wants.
pub trait Curve {
    /// Point on the curve at parameter t
    fn position(&self, t: f32) -> Point3<f32>;

    /// First derivative of the curve at parameter t
    ///
    /// Not normalized. May be zero where control points coincide.
    fn velocity(&self, t: f32) -> Vector3<f32>;

    /// Direction used when the velocity vanishes at `t`
    ///
    /// Default implementation has no better guess than the default
    /// forward axis.
    fn fallback_direction(&self) -> Vector3<f32> {
        Frame::DEFAULT_FORWARD
    }

    /// Orientation frame anchored at `position(t)`, facing along `velocity(t)`
    fn frame(&self, t: f32) -> Frame {
        Frame::from_motion(
            self.position(t),
            self.velocity(t),
            self.fallback_direction(),
        )
    }
}
