//! Scene module - the viewing harness around the animated path
//!
//! This module provides:
//! - `Camera` with orbit, pan, zoom and projection to pixels
//! - `Light` and `LightMover` for dragging lights in the view plane
//! - `Interaction` with the `Picked` tag for whatever a drag is moving
//! - `Scene`: camera, lights and pointer state bundled for the view
//!
//! Nothing in `curves` or `animation` depends on this module.

mod camera;
mod interaction;
mod lights;

pub use camera::Camera;
pub use interaction::{CameraDrag, Interaction, Picked, PICK_RADIUS};
pub use lights::{Light, LightMover};

/// Everything the pointer can move, passed explicitly to the view
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub interaction: Interaction,
}

impl Scene {
    pub fn new(camera: Camera, lights: Vec<Light>) -> Self {
        Self {
            camera,
            lights,
            interaction: Interaction::new(),
        }
    }
}

/// Size of the drawing area in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height (1.0 for an empty viewport)
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}
