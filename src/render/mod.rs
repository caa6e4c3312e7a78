//! Render module - drawing the animated scene
//!
//! This module provides:
//! - Flight view widget (path, control polygons, lights, airplane)
//! - Built-in wireframe models posed by the rig

mod flight_view;
mod wireframe;

pub use flight_view::{FlightPose, FlightView, FlightViewSettings};
pub use wireframe::Wireframe;
