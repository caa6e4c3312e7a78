//! Orientation frames along a curve

use nalgebra::{Matrix4, Point3, Vector3};

/// Velocities shorter than this are treated as zero
const DEGENERATE_LENGTH: f32 = 1e-6;

/// Forward directions closer than this (sine of the angle) to the world up
/// axis are treated as vertical
const PARALLEL_SINE: f32 = 1e-4;

/// Position plus a right-handed orthonormal basis
///
/// - `forward`: direction of travel (normalized tangent)
/// - `right`: `forward × up_world`
/// - `up`: `right × forward`
///
/// Frames are computed fresh for every query and never mutated in place.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub position: Point3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
    pub forward: Vector3<f32>,
}

impl Frame {
    /// Fixed world up axis
    pub const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

    /// Up axis substituted when the direction of travel is vertical
    pub const VERTICAL_UP: Vector3<f32> = Vector3::new(1.0, 0.0, 0.0);

    /// Forward axis used when nothing better is known
    pub const DEFAULT_FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);

    /// Build a frame at `position` facing along `velocity`
    ///
    /// A zero `velocity` faces along `fallback` instead (and along
    /// [`Frame::DEFAULT_FORWARD`] if that is zero too). A vertical direction
    /// of travel uses [`Frame::VERTICAL_UP`] in place of the world up axis.
    /// The result never contains NaN for finite input.
    pub fn from_motion(
        position: Point3<f32>,
        velocity: Vector3<f32>,
        fallback: Vector3<f32>,
    ) -> Self {
        let forward = velocity
            .try_normalize(DEGENERATE_LENGTH)
            .or_else(|| fallback.try_normalize(DEGENERATE_LENGTH))
            .unwrap_or(Self::DEFAULT_FORWARD);

        let world_up = if forward.cross(&Self::WORLD_UP).norm() < PARALLEL_SINE {
            Self::VERTICAL_UP
        } else {
            Self::WORLD_UP
        };

        let right = forward
            .cross(&world_up)
            .try_normalize(DEGENERATE_LENGTH)
            .unwrap_or(Self::VERTICAL_UP);
        let up = right.cross(&forward).normalize();

        Self {
            position,
            right,
            up,
            forward,
        }
    }

    /// Object-to-world transform
    ///
    /// Columns are (right, up, -forward, position), so a model whose nose
    /// points down its local -Z axis flies nose first.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let (r, u, f, p) = (self.right, self.up, self.forward, self.position);
        #[rustfmt::skip]
        let m = Matrix4::new(
            r.x, u.x, -f.x, p.x,
            r.y, u.y, -f.y, p.y,
            r.z, u.z, -f.z, p.z,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Whether the basis is unit length and mutually orthogonal
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let unit = |v: &Vector3<f32>| (v.norm() - 1.0).abs() <= tolerance;
        unit(&self.right)
            && unit(&self.up)
            && unit(&self.forward)
            && self.right.dot(&self.up).abs() <= tolerance
            && self.right.dot(&self.forward).abs() <= tolerance
            && self.up.dot(&self.forward).abs() <= tolerance
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::from_motion(Point3::origin(), Self::DEFAULT_FORWARD, Self::DEFAULT_FORWARD)
    }
}
