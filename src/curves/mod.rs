//! Curves module - parametric Bezier geometry
//!
//! This module provides:
//! - `Curve` trait for anything with a position and a derivative
//! - `ControlPolygon`: one cubic Bezier segment
//! - `BezierPath`: segments chained end to end
//! - `Frame`: position plus orthonormal basis along a curve
//!
//! Everything here is pure math: no state, no I/O, no rendering.

mod bezier;
mod frame;
mod path;
mod traits;

pub use bezier::ControlPolygon;
pub use frame::Frame;
pub use path::{BezierPath, PathError, PathLocation, JOIN_TOLERANCE};
pub use traits::Curve;

use nalgebra::Point3;

/// Sample a curve as a polyline for drawing
///
/// Returns `resolution + 1` points at evenly spaced parameters from 0 to 1
/// inclusive, so consecutive points form `resolution` straight pieces.
/// A resolution of 0 is treated as 1.
pub fn sample_polyline<C: Curve + ?Sized>(curve: &C, resolution: usize) -> Vec<Point3<f32>> {
    let resolution = resolution.max(1);

    (0..=resolution)
        .map(|i| curve.position(i as f32 / resolution as f32))
        .collect()
}
