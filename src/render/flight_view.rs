//! Flight view widget
//!
//! Paints the flight path, its control polygons, the lights and the posed
//! airplane by projecting 3D geometry through the scene camera onto an
//! egui painter. Pointer input over the widget is routed to the scene's
//! `Interaction`: drag a light to move it, drag elsewhere to orbit
//! (shift to pan), scroll to zoom.

use eframe::egui::{self, Color32, Pos2, Rect, Stroke, Vec2};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

use super::wireframe::Wireframe;
use crate::curves::{sample_polyline, BezierPath, Frame};
use crate::scene::{Interaction, Picked, Scene, Viewport};

/// Scroll distance (in points) counted as one wheel notch
const POINTS_PER_NOTCH: f32 = 50.0;

/// Length of the drawn frame axes in world units
const AXIS_LENGTH: f32 = 0.3;

/// Display settings for the flight view
#[derive(Clone)]
pub struct FlightViewSettings {
    /// Background color
    pub background: Color32,

    /// Curve color
    pub curve_color: Color32,

    /// Control point and control polygon color
    pub point_color: Color32,

    /// Airplane body color
    pub body_color: Color32,

    /// Propeller color
    pub propeller_color: Color32,

    /// Straight pieces per curve segment
    pub curve_resolution: usize,

    /// Curve thickness in pixels
    pub curve_width: f32,

    /// Control polygon thickness in pixels
    pub polygon_width: f32,

    /// Whether to show the ground grid
    pub show_grid: bool,

    /// Whether to show control polygons and points
    pub show_control_polygon: bool,

    /// Whether to show the moving frame's axes
    pub show_frame_axes: bool,

    /// Whether to show lights
    pub show_lights: bool,
}

impl Default for FlightViewSettings {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            curve_color: Color32::from_rgb(34, 34, 34),
            point_color: Color32::from_rgb(26, 153, 26),
            body_color: Color32::from_rgb(255, 105, 180),
            propeller_color: Color32::from_rgb(0, 0, 255),
            curve_resolution: 50,
            curve_width: 3.5,
            polygon_width: 2.5,
            show_grid: true,
            show_control_polygon: true,
            show_frame_axes: false,
            show_lights: true,
        }
    }
}

/// What the animation looks like this frame
pub struct FlightPose<'a> {
    /// The path being flown
    pub path: &'a BezierPath,
    /// Frame of the airplane on the path
    pub frame: Frame,
    /// World transforms of the rig parts (body first, then propeller)
    pub parts: &'a [Matrix4<f32>],
}

/// Flight view widget
pub struct FlightView {
    /// Display settings
    pub settings: FlightViewSettings,

    body: Wireframe,
    propeller: Wireframe,
}

impl Default for FlightView {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightView {
    /// Create a new view with default settings
    pub fn new() -> Self {
        Self::with_settings(FlightViewSettings::default())
    }

    /// Create a new view with custom settings
    pub fn with_settings(settings: FlightViewSettings) -> Self {
        Self {
            settings,
            body: Wireframe::airplane_body(),
            propeller: Wireframe::propeller(),
        }
    }

    /// Draw the view and handle pointer input
    ///
    /// # Arguments
    /// * `ui` - The egui UI context
    /// * `scene` - Camera, lights and pointer state (mutated by input)
    /// * `pose` - Path and airplane placement for this frame
    ///
    /// # Returns
    /// The response from the widget
    pub fn show(&mut self, ui: &mut egui::Ui, scene: &mut Scene, pose: &FlightPose<'_>) -> egui::Response {
        let size = ui.available_size().max(Vec2::splat(64.0));
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let rect = response.rect;
        let viewport = Viewport::new(rect.width(), rect.height());

        self.handle_input(ui, &response, scene, viewport);

        painter.rect_filled(rect, 4.0, self.settings.background);

        let projector = Projector {
            scene: &*scene,
            rect,
            viewport,
        };

        if self.settings.show_grid {
            self.draw_grid(&painter, &projector);
        }

        self.draw_path(&painter, &projector, pose.path);
        self.draw_airplane(&painter, &projector, pose.parts);

        if self.settings.show_frame_axes {
            self.draw_frame_axes(&painter, &projector, &pose.frame);
        }

        if self.settings.show_lights {
            let hovered = response
                .hover_pos()
                .map(|pos| to_local(pos, rect))
                .and_then(|cursor| {
                    Interaction::light_under(cursor, &scene.camera, &scene.lights, viewport)
                });
            self.draw_lights(&painter, &projector, hovered);
        }

        response
    }

    /// Route pointer events to the scene interaction
    fn handle_input(
        &self,
        ui: &egui::Ui,
        response: &egui::Response,
        scene: &mut Scene,
        viewport: Viewport,
    ) {
        let rect = response.rect;

        if response.drag_started() {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = origin {
                let shift = ui.input(|i| i.modifiers.shift);
                scene.interaction.press(
                    to_local(pos, rect),
                    shift,
                    &scene.camera,
                    &scene.lights,
                    viewport,
                );
            }
        }

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                scene.interaction.drag(
                    to_local(pos, rect),
                    &mut scene.camera,
                    &mut scene.lights,
                    viewport,
                );
            }
        }

        if response.drag_stopped() {
            scene.interaction.release();
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                scene
                    .interaction
                    .wheel(scroll / POINTS_PER_NOTCH, &mut scene.camera);
            }
        }
    }

    /// Draw the ground grid (y = 0 plane)
    fn draw_grid(&self, painter: &egui::Painter, projector: &Projector<'_>) {
        let grid = Stroke::new(0.5, Color32::from_rgba_unmultiplied(120, 120, 120, 80));
        let axis = Stroke::new(1.0, Color32::from_rgba_unmultiplied(90, 90, 90, 140));

        for i in -4..=4 {
            let c = i as f32 * 0.5;
            let stroke = if i == 0 { axis } else { grid };
            projector.line(painter, Point3::new(c, 0.0, -2.0), Point3::new(c, 0.0, 2.0), stroke);
            projector.line(painter, Point3::new(-2.0, 0.0, c), Point3::new(2.0, 0.0, c), stroke);
        }
    }

    /// Draw every segment, then its control polygon and points
    fn draw_path(&self, painter: &egui::Painter, projector: &Projector<'_>, path: &BezierPath) {
        let curve = Stroke::new(self.settings.curve_width, self.settings.curve_color);
        let polygon = Stroke::new(self.settings.polygon_width, self.settings.point_color);

        for segment in path.segments() {
            let points = sample_polyline(segment, self.settings.curve_resolution);
            for pair in points.windows(2) {
                projector.line(painter, pair[0], pair[1], curve);
            }

            if !self.settings.show_control_polygon {
                continue;
            }

            for leg in segment.points().windows(2) {
                if let (Some(a), Some(b)) = (projector.screen(&leg[0]), projector.screen(&leg[1])) {
                    painter.extend(egui::Shape::dashed_line(&[a, b], polygon, 6.0, 4.0));
                }
            }

            for point in segment.points() {
                if let Some(pos) = projector.screen(point) {
                    painter.circle_filled(pos, self.settings.polygon_width * 2.0, self.settings.point_color);
                }
            }
        }
    }

    /// Draw the rig parts as wireframes
    fn draw_airplane(&self, painter: &egui::Painter, projector: &Projector<'_>, parts: &[Matrix4<f32>]) {
        let models = [
            (&self.body, self.settings.body_color),
            (&self.propeller, self.settings.propeller_color),
        ];

        for ((model, color), transform) in models.into_iter().zip(parts) {
            let stroke = Stroke::new(1.5, color);
            for (a, b) in model.world_edges(transform) {
                projector.line(painter, a, b, stroke);
            }
        }
    }

    /// Draw right (red), up (green) and forward (blue) from the frame origin
    fn draw_frame_axes(&self, painter: &egui::Painter, projector: &Projector<'_>, frame: &Frame) {
        let axes: [(Vector3<f32>, Color32); 3] = [
            (frame.right, Color32::from_rgb(220, 40, 40)),
            (frame.up, Color32::from_rgb(40, 170, 40)),
            (frame.forward, Color32::from_rgb(40, 80, 220)),
        ];

        for (axis, color) in axes {
            projector.line(
                painter,
                frame.position,
                frame.position + axis * AXIS_LENGTH,
                Stroke::new(2.0, color),
            );
        }
    }

    /// Draw lights, ringing the hovered or dragged one
    fn draw_lights(&self, painter: &egui::Painter, projector: &Projector<'_>, hovered: Option<usize>) {
        let fill = Color32::from_rgb(255, 200, 40);
        let ring = Stroke::new(2.0, Color32::from_rgb(200, 60, 0));
        let dragged = match projector.scene.interaction.picked() {
            Picked::Light(index) => Some(index),
            _ => None,
        };

        for (i, light) in projector.scene.lights.iter().enumerate() {
            if let Some(pos) = projector.screen(&light.point()) {
                painter.circle_filled(pos, 6.0, fill);
                if Some(i) == hovered || Some(i) == dragged {
                    painter.circle_stroke(pos, 9.0, ring);
                }
            }
        }
    }
}

/// Convert an egui position to viewport pixels
fn to_local(pos: Pos2, rect: Rect) -> Point2<f32> {
    Point2::new(pos.x - rect.left(), pos.y - rect.top())
}

/// Camera projection bound to a screen rectangle
struct Projector<'a> {
    scene: &'a Scene,
    rect: Rect,
    viewport: Viewport,
}

impl Projector<'_> {
    /// Screen position of a world point, if it is in front of the camera
    fn screen(&self, point: &Point3<f32>) -> Option<Pos2> {
        self.scene
            .camera
            .project(point, self.viewport)
            .map(|p| Pos2::new(self.rect.left() + p.x, self.rect.top() + p.y))
    }

    /// Draw a world-space line; skipped if either end is behind the camera
    fn line(&self, painter: &egui::Painter, a: Point3<f32>, b: Point3<f32>, stroke: Stroke) {
        if let (Some(a), Some(b)) = (self.screen(&a), self.screen(&b)) {
            painter.line_segment([a, b], stroke);
        }
    }
}
