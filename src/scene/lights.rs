//! Point lights and dragging them around
//!
//! A light is dragged parallel to the view plane: it keeps its depth from
//! the camera and follows the cursor, so it stays under the pointer for the
//! whole drag.

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::Viewport;

/// A point light
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: [f32; 3],
}

impl Light {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }

    pub fn point(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    pub fn set_point(&mut self, point: Point3<f32>) {
        self.position = point.into();
    }

    /// The three lights the scene starts with
    pub fn default_set() -> Vec<Light> {
        vec![
            Light::new(0.5, 0.0, 1.0),
            Light::new(1.0, 1.0, 0.0),
            Light::new(0.1, 0.75, 0.0),
        ]
    }
}

/// Drag state for one light
///
/// Positions are computed from where the drag began, not accumulated per
/// move event, so rounding never drifts the light off the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightMover {
    origin: Point3<f32>,
    anchor: Point2<f32>,
}

impl LightMover {
    /// Start dragging a light at `origin` from cursor position `anchor`
    pub fn down(origin: Point3<f32>, anchor: Point2<f32>) -> Self {
        Self { origin, anchor }
    }

    /// New light position for the cursor at `cursor`
    ///
    /// A light at or behind the camera cannot be dragged and stays put.
    pub fn drag(&self, cursor: Point2<f32>, camera: &Camera, viewport: Viewport) -> Point3<f32> {
        let depth = camera.depth_of(&self.origin);
        if depth <= camera.near {
            return self.origin;
        }

        let scale = camera.world_per_pixel(depth, viewport);
        let (right, up, _) = camera.basis();
        let delta = cursor - self.anchor;

        // Screen Y grows downward
        self.origin + right * (delta.x * scale) - up * (delta.y * scale)
    }
}
