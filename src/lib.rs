//! bezier-flight - Cubic Bezier flight-path animation
//!
//! An airplane flies a closed loop of cubic Bezier segments. The crate is
//! layered so the math never depends on the viewer:
//!
//! - **curves**: Bezier evaluation, orientation frames, validated paths
//! - **animation**: clock, elapsed time → frame mapping, rigs
//! - **scene**: camera, lights and pointer picking
//! - **render**: egui widget painting the projected scene
//! - **settings**: persisted JSON configuration

pub mod animation;
pub mod curves;
pub mod render;
pub mod scene;
pub mod settings;

pub use animation::{AnimationClock, PathAnimator, Rig};
pub use curves::{BezierPath, ControlPolygon, Curve, Frame};
