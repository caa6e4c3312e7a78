//! bezier-flight - Cubic Bezier flight-path animation
//!
//! A small airplane flies a looping path of cubic Bezier segments.
//! Drag to orbit the camera (shift-drag pans), scroll to zoom, and drag
//! a light to move it.

use eframe::egui::{self, Color32};
use nalgebra::Point3;

use bezier_flight::animation::{AnimationClock, AnimatorError, PathAnimator, Rig};
use bezier_flight::curves::BezierPath;
use bezier_flight::render::{FlightPose, FlightView, FlightViewSettings};
use bezier_flight::scene::{Camera, Scene};
use bezier_flight::settings::{FlightSettings, MAX_CURVE_RESOLUTION};

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting bezier-flight");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_title("bezier-flight"),
        ..Default::default()
    };

    eframe::run_native(
        "bezier-flight",
        options,
        Box::new(|cc| Ok(Box::new(FlightApp::new(cc)?))),
    )
}

fn to_color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

fn from_color(color: Color32) -> [u8; 3] {
    [color.r(), color.g(), color.b()]
}

/// Main application state
struct FlightApp {
    animator: PathAnimator,
    clock: AnimationClock,
    rig: Rig,
    scene: Scene,
    view: FlightView,
    settings: FlightSettings,
}

impl FlightApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, AnimatorError> {
        let settings = FlightSettings::load();
        let animator = PathAnimator::new(BezierPath::aerial(), settings.duration)?;

        let mut clock = AnimationClock::new();
        if settings.paused {
            clock.pause();
        }

        let mut app = Self {
            animator,
            clock,
            rig: Rig::airplane(settings.propeller_speed),
            scene: Scene::default(),
            view: FlightView::new(),
            settings,
        };
        app.apply_settings();

        Ok(app)
    }

    /// Push persisted settings into the camera, lights and view
    fn apply_settings(&mut self) {
        let s = &self.settings;

        let [px, py, pz] = s.camera_position;
        let [tx, ty, tz] = s.camera_target;
        let mut camera = Camera::new(Point3::new(px, py, pz), Point3::new(tx, ty, tz));
        camera.set_fov_degrees(s.fov_degrees);
        self.scene = Scene::new(camera, s.lights.clone());

        self.view.settings = FlightViewSettings {
            background: to_color(s.background),
            curve_color: to_color(s.curve_color),
            point_color: to_color(s.point_color),
            body_color: to_color(s.body_color),
            propeller_color: to_color(s.propeller_color),
            curve_resolution: s.curve_resolution,
            curve_width: s.curve_width,
            polygon_width: s.polygon_width,
            show_grid: s.show_grid,
            show_control_polygon: s.show_control_polygon,
            show_frame_axes: s.show_frame_axes,
            show_lights: s.show_lights,
        };
    }

    /// Copy the live state back into the persisted settings
    fn capture_settings(&mut self) {
        let view = &self.view.settings;
        let camera = &self.scene.camera;
        let s = &mut self.settings;

        s.paused = self.clock.is_paused();
        s.duration = self.animator.duration();

        s.curve_resolution = view.curve_resolution;
        s.curve_width = view.curve_width;
        s.polygon_width = view.polygon_width;

        s.show_grid = view.show_grid;
        s.show_control_polygon = view.show_control_polygon;
        s.show_frame_axes = view.show_frame_axes;
        s.show_lights = view.show_lights;

        s.fov_degrees = camera.fov_degrees();
        s.camera_position = [camera.position.x, camera.position.y, camera.position.z];
        s.camera_target = [camera.target.x, camera.target.y, camera.target.z];
        s.lights = self.scene.lights.clone();

        s.curve_color = from_color(view.curve_color);
        s.point_color = from_color(view.point_color);
        s.body_color = from_color(view.body_color);
        s.propeller_color = from_color(view.propeller_color);
        s.background = from_color(view.background);
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Animation");
        ui.separator();

        let mut duration = self.animator.duration();
        if ui
            .add(
                egui::Slider::new(&mut duration, 0.5..=30.0)
                    .text("Loop (s)")
                    .logarithmic(true),
            )
            .changed()
        {
            if let Err(e) = self.animator.set_duration(duration) {
                log::warn!("Rejected loop duration: {}", e);
            }
        }

        if ui
            .add(
                egui::Slider::new(&mut self.settings.propeller_speed, 0.0..=3600.0)
                    .text("Propeller (°/s)"),
            )
            .changed()
        {
            let elapsed = self.clock.elapsed().as_secs_f64();
            if let Some(propeller) = self.rig.find("propeller") {
                self.rig
                    .set_spin_rate(propeller, self.settings.propeller_speed, elapsed);
            }
        }

        ui.separator();

        ui.collapsing("Curves", |ui| {
            let view = &mut self.view.settings;
            ui.add(egui::Slider::new(&mut view.curve_resolution, 1..=MAX_CURVE_RESOLUTION).text("Resolution"));
            ui.add(egui::Slider::new(&mut view.curve_width, 0.5..=8.0).text("Curve width"));
            ui.add(egui::Slider::new(&mut view.polygon_width, 0.5..=8.0).text("Polygon width"));
        });

        ui.separator();

        ui.collapsing("Display", |ui| {
            let view = &mut self.view.settings;
            ui.checkbox(&mut view.show_grid, "Show grid");
            ui.checkbox(&mut view.show_control_polygon, "Show control polygon");
            ui.checkbox(&mut view.show_frame_axes, "Show frame axes");
            ui.checkbox(&mut view.show_lights, "Show lights");
        });

        ui.separator();

        ui.collapsing("Color", |ui| {
            let view = &mut self.view.settings;
            egui::Grid::new("colors").num_columns(2).show(ui, |ui| {
                for (label, color) in [
                    ("Curve", &mut view.curve_color),
                    ("Points", &mut view.point_color),
                    ("Body", &mut view.body_color),
                    ("Propeller", &mut view.propeller_color),
                    ("Background", &mut view.background),
                ] {
                    ui.label(label);
                    ui.color_edit_button_srgba(color);
                    ui.end_row();
                }
            });
        });

        ui.separator();

        ui.collapsing("Camera", |ui| {
            let mut fov = self.scene.camera.fov_degrees();
            if ui
                .add(egui::Slider::new(&mut fov, 5.0..=120.0).text("FOV (°)"))
                .changed()
            {
                self.scene.camera.set_fov_degrees(fov);
            }

            if ui.button("Reset view").clicked() {
                let fov = self.scene.camera.fov_degrees();
                self.scene.camera = Camera::default();
                self.scene.camera.set_fov_degrees(fov);
            }
        });

        ui.separator();

        if ui.button("💾 Save settings").clicked() {
            self.capture_settings();
            self.settings.save();
        }
    }
}

impl eframe::App for FlightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.clock.is_paused() {
            ctx.request_repaint();
        }

        let elapsed = self.clock.elapsed();
        let location = self.animator.locate_now(&self.clock);

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("bezier-flight");
                ui.separator();

                let button_text = if self.clock.is_paused() {
                    "▶ Play"
                } else {
                    "⏸ Pause"
                };

                if ui.button(button_text).clicked() {
                    self.clock.toggle();
                }

                ui.separator();
                ui.toggle_value(&mut self.settings.show_settings, "⚙ Settings");
                ui.separator();
                ui.label(format!(
                    "{}: segment {} of {}, t = {:.2}, {:.1}s",
                    self.animator.path().name(),
                    location.segment + 1,
                    self.animator.path().segment_count(),
                    location.local_t,
                    elapsed.as_secs_f64(),
                ));
            });
        });

        if self.settings.show_settings {
            egui::SidePanel::left("settings_panel")
                .min_width(220.0)
                .show(ctx, |ui| self.settings_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let frame = self.animator.frame_now(&self.clock);
            let parts = self.rig.pose(&frame.to_matrix(), self.clock.elapsed().as_secs_f64());
            let pose = FlightPose {
                path: self.animator.path(),
                frame,
                parts: &parts,
            };
            self.view.show(ui, &mut self.scene, &pose);
        });
    }
}
