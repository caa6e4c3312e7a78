//! Pointer interaction - what a mouse drag is currently moving
//!
//! A press over a light picks that light; a press anywhere else picks the
//! camera (orbit, or pan while shift is held). The pick lasts until the
//! button is released.

use nalgebra::Point2;

use super::camera::Camera;
use super::lights::{Light, LightMover};
use super::Viewport;

/// How close (in pixels) a press must be to a light to pick it
pub const PICK_RADIUS: f32 = 10.0;

/// Orbit angle per pixel dragged
const ORBIT_RADIANS_PER_PIXEL: f32 = 0.01;

/// Zoom factor per wheel notch
const WHEEL_ZOOM: f32 = 0.9;

/// What a camera drag does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraDrag {
    Orbit,
    Pan,
}

/// The object under the current drag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Picked {
    #[default]
    None,
    Camera(CameraDrag),
    Light(usize),
}

/// Pointer state shared by press, drag and release
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    picked: Picked,
    last_cursor: Option<Point2<f32>>,
    mover: Option<LightMover>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// What is currently picked
    pub fn picked(&self) -> Picked {
        self.picked
    }

    /// Index of the light nearest to `cursor`, if within [`PICK_RADIUS`]
    pub fn light_under(
        cursor: Point2<f32>,
        camera: &Camera,
        lights: &[Light],
        viewport: Viewport,
    ) -> Option<usize> {
        lights
            .iter()
            .enumerate()
            .filter_map(|(i, light)| {
                let screen = camera.project(&light.point(), viewport)?;
                let distance = (screen - cursor).norm();
                (distance <= PICK_RADIUS).then_some((i, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Button pressed at `cursor`
    pub fn press(
        &mut self,
        cursor: Point2<f32>,
        shift: bool,
        camera: &Camera,
        lights: &[Light],
        viewport: Viewport,
    ) -> Picked {
        self.last_cursor = Some(cursor);
        self.mover = None;

        self.picked = match Self::light_under(cursor, camera, lights, viewport) {
            Some(index) => {
                self.mover = Some(LightMover::down(lights[index].point(), cursor));
                Picked::Light(index)
            }
            None if shift => Picked::Camera(CameraDrag::Pan),
            None => Picked::Camera(CameraDrag::Orbit),
        };

        log::trace!("Picked {:?}", self.picked);
        self.picked
    }

    /// Pointer moved to `cursor` with the button held
    pub fn drag(
        &mut self,
        cursor: Point2<f32>,
        camera: &mut Camera,
        lights: &mut [Light],
        viewport: Viewport,
    ) {
        let Some(last) = self.last_cursor.replace(cursor) else {
            return;
        };
        let delta = cursor - last;

        match self.picked {
            Picked::None => {}
            Picked::Camera(CameraDrag::Orbit) => {
                camera.orbit(
                    delta.x * ORBIT_RADIANS_PER_PIXEL,
                    delta.y * ORBIT_RADIANS_PER_PIXEL,
                );
            }
            Picked::Camera(CameraDrag::Pan) => {
                // Scene follows the cursor at the target's depth
                let scale = camera.world_per_pixel(camera.distance(), viewport);
                camera.pan(-delta.x * scale, delta.y * scale);
            }
            Picked::Light(index) => {
                if let (Some(mover), Some(light)) = (self.mover, lights.get_mut(index)) {
                    light.set_point(mover.drag(cursor, camera, viewport));
                }
            }
        }
    }

    /// Button released
    pub fn release(&mut self) {
        self.picked = Picked::None;
        self.last_cursor = None;
        self.mover = None;
    }

    /// Mouse wheel turned by `notches` (positive moves closer)
    pub fn wheel(&mut self, notches: f32, camera: &mut Camera) {
        if notches != 0.0 {
            camera.zoom(WHEEL_ZOOM.powf(notches));
        }
    }
}
