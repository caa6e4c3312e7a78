//! Orbit camera
//!
//! Right-handed coordinates, Y up. The camera looks from `position` at
//! `target`; dragging orbits around the target, shift-dragging pans both,
//! and the wheel moves closer or farther.

use std::f32::consts::PI;

use nalgebra::{Matrix4, Point2, Point3, Vector3};

use super::Viewport;

/// Closest the camera may zoom to its target
const MIN_DISTANCE: f32 = 0.5;

/// Highest orbit tilt above (or below) the target's horizon, in radians
const MAX_ELEVATION: f32 = PI / 2.0 - 0.1;

/// Shortest usable line of sight, and the smallest sine between it and up
const MIN_SIGHT: f32 = 1e-4;

/// Camera offset from its target as heading, elevation and radius
#[derive(Clone, Copy, Debug)]
struct Spherical {
    heading: f32,
    elevation: f32,
    radius: f32,
}

impl Spherical {
    fn from_offset(offset: Vector3<f32>) -> Option<Self> {
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return None;
        }
        Some(Self {
            heading: offset.z.atan2(offset.x),
            elevation: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            radius,
        })
    }

    fn to_offset(self) -> Vector3<f32> {
        let (sin_e, cos_e) = self.elevation.sin_cos();
        let (sin_h, cos_h) = self.heading.sin_cos();
        Vector3::new(cos_e * cos_h, sin_e, cos_e * sin_h) * self.radius
    }
}

/// Camera for 3D viewing
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position
    pub position: Point3<f32>,
    /// Point the camera is looking at
    pub target: Point3<f32>,
    /// Up vector
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 1.5, 4.5),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: PI / 6.0, // 30 degrees
            near: 0.01,
            far: 500.0,
        }
    }
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Camera-to-clip transform for a viewport of the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, self.fov, self.near, self.far)
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Set the vertical field of view, clamped to 5..=120 degrees
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fov = degrees.clamp(5.0, 120.0).to_radians();
    }

    /// Distance from camera to target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Whether no view can be built: the camera sits on its target, or
    /// looks straight along its up vector
    pub fn is_degenerate(&self) -> bool {
        let sight = self.target - self.position;
        let length = sight.norm();
        length <= MIN_SIGHT || sight.cross(&self.up).norm() <= length * MIN_SIGHT
    }

    /// Camera axes in world space: (right, up, forward)
    pub fn basis(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);
        (right, up, forward)
    }

    /// Swing the camera around its target
    ///
    /// `heading` turns about the vertical axis, `elevation` tilts up or
    /// down; the tilt stops short of straight above or below the target.
    pub fn orbit(&mut self, heading: f32, elevation: f32) {
        let Some(offset) = Spherical::from_offset(self.position - self.target) else {
            return;
        };

        let swung = Spherical {
            heading: offset.heading + heading,
            elevation: (offset.elevation + elevation).clamp(-MAX_ELEVATION, MAX_ELEVATION),
            ..offset
        };
        self.position = self.target + swung.to_offset();
    }

    /// Scale the camera's distance from its target, down to a minimum
    pub fn zoom(&mut self, factor: f32) {
        let Some(direction) = (self.position - self.target).try_normalize(f32::EPSILON) else {
            return;
        };
        self.position = self.target + direction * (self.distance() * factor).max(MIN_DISTANCE);
    }

    /// Slide camera and target together within the view plane
    pub fn pan(&mut self, right_amount: f32, up_amount: f32) {
        let (right, up, _) = self.basis();
        let offset = right * right_amount + up * up_amount;
        self.position += offset;
        self.target += offset;
    }

    /// Distance of a point in front of the camera, along the view direction
    pub fn depth_of(&self, point: &Point3<f32>) -> f32 {
        let (_, _, forward) = self.basis();
        (*point - self.position).dot(&forward)
    }

    /// World units covered by one pixel at the given depth
    pub fn world_per_pixel(&self, depth: f32, viewport: Viewport) -> f32 {
        2.0 * depth * (self.fov / 2.0).tan() / viewport.height.max(1.0)
    }

    /// Project a world point to viewport pixels (origin top-left, Y down)
    ///
    /// Returns `None` for points at or behind the camera.
    pub fn project(&self, point: &Point3<f32>, viewport: Viewport) -> Option<Point2<f32>> {
        let vp = self.projection_matrix(viewport.aspect()) * self.view_matrix();
        let clip = vp * point.to_homogeneous();

        if clip.w <= self.near {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;

        Some(Point2::new(
            (ndc_x + 1.0) / 2.0 * viewport.width,
            (1.0 - ndc_y) / 2.0 * viewport.height,
        ))
    }
}
