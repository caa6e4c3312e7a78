//! Rigs - hierarchies of parts posed from one animated transform
//!
//! Each part has a fixed offset relative to its parent (or to the root
//! transform) and may spin about a local axis at a constant rate. The stock
//! airplane rig is a body plus a propeller spinning in front of it.
//!
//! Times are `f64` seconds: spin angles grow with the clock and are reduced
//! modulo a turn before narrowing to `f32`.

use nalgebra::{Matrix4, Rotation3, Unit, Vector3};
use thiserror::Error;

/// Errors that can occur while building a rig
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RigError {
    #[error("Part {part} names parent {parent}, which does not come before it")]
    ForwardParent { part: usize, parent: usize },
}

/// Constant-rate rotation about a local axis
#[derive(Clone, Debug, PartialEq)]
pub struct Spin {
    pub axis: Unit<Vector3<f32>>,
    degrees_per_second: f32,
    /// Angle at t = 0, in [0, 360)
    phase_degrees: f64,
}

impl Spin {
    pub fn new(axis: Unit<Vector3<f32>>, degrees_per_second: f32) -> Self {
        Self {
            axis,
            degrees_per_second,
            phase_degrees: 0.0,
        }
    }

    pub fn degrees_per_second(&self) -> f32 {
        self.degrees_per_second
    }

    /// Angle in degrees after `elapsed` seconds, reduced modulo 360
    pub fn angle(&self, elapsed: f64) -> f32 {
        (f64::from(self.degrees_per_second) * elapsed + self.phase_degrees).rem_euclid(360.0) as f32
    }

    /// Rotation after `elapsed` seconds
    pub fn rotation(&self, elapsed: f64) -> Matrix4<f32> {
        Rotation3::from_axis_angle(&self.axis, self.angle(elapsed).to_radians()).to_homogeneous()
    }

    /// Change the rate at `elapsed` without a jump in the current angle
    pub fn set_rate(&mut self, degrees_per_second: f32, elapsed: f64) {
        let current = f64::from(self.degrees_per_second) * elapsed + self.phase_degrees;
        self.phase_degrees =
            (current - f64::from(degrees_per_second) * elapsed).rem_euclid(360.0);
        self.degrees_per_second = degrees_per_second;
    }
}

/// One part of a rig
#[derive(Clone, Debug, PartialEq)]
pub struct RigPart {
    pub name: String,
    /// Index of the parent part; `None` attaches to the root transform
    pub parent: Option<usize>,
    /// Fixed transform relative to the parent
    pub offset: Matrix4<f32>,
    /// Optional spin, applied after the offset
    pub spin: Option<Spin>,
}

impl RigPart {
    /// Create a part attached to the root
    pub fn new(name: impl Into<String>, offset: Matrix4<f32>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            offset,
            spin: None,
        }
    }

    /// Attach to a parent part (builder pattern)
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Spin about a local axis (builder pattern)
    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = Some(spin);
        self
    }

    fn local_transform(&self, elapsed: f64) -> Matrix4<f32> {
        match &self.spin {
            Some(spin) => self.offset * spin.rotation(elapsed),
            None => self.offset,
        }
    }
}

/// An ordered set of parts; parents always precede their children
#[derive(Clone, Debug, Default)]
pub struct Rig {
    parts: Vec<RigPart>,
}

/// Rotation about Y in degrees, as a homogeneous matrix
fn rotate_y(degrees: f32) -> Matrix4<f32> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.to_radians()).to_homogeneous()
}

impl Rig {
    /// Create an empty rig
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Add a part, returning its index
    pub fn add_part(&mut self, part: RigPart) -> Result<usize, RigError> {
        let index = self.parts.len();

        if let Some(parent) = part.parent {
            if parent >= index {
                return Err(RigError::ForwardParent {
                    part: index,
                    parent,
                });
            }
        }

        self.parts.push(part);
        Ok(index)
    }

    /// The stock airplane: a body whose nose faces the direction of travel,
    /// and a propeller spinning at `propeller_degrees_per_second` on its nose
    pub fn airplane(propeller_degrees_per_second: f32) -> Self {
        let body = RigPart::new(
            "body",
            Matrix4::new_scaling(0.35) * rotate_y(-90.0),
        );
        let propeller = RigPart::new(
            "propeller",
            Matrix4::new_translation(&Vector3::new(-0.6, 0.0, 0.0))
                * rotate_y(-90.0)
                * Matrix4::new_scaling(0.25),
        )
        .with_parent(0)
        .with_spin(Spin::new(Vector3::z_axis(), propeller_degrees_per_second));

        Self {
            parts: vec![body, propeller],
        }
    }

    /// Get a reference to the parts
    pub fn parts(&self) -> &[RigPart] {
        &self.parts
    }

    /// Change the spin rate of a part at `elapsed`, keeping its angle
    ///
    /// Returns false if the part does not exist or does not spin.
    pub fn set_spin_rate(&mut self, index: usize, degrees_per_second: f32, elapsed: f64) -> bool {
        match self.parts.get_mut(index).and_then(|p| p.spin.as_mut()) {
            Some(spin) => {
                spin.set_rate(degrees_per_second, elapsed);
                true
            }
            None => false,
        }
    }

    /// Find a part by name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.parts.iter().position(|p| p.name == name)
    }

    /// Get the number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the rig is empty
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// World transform of every part, in part order
    ///
    /// A part's transform is `parent * offset * spin(elapsed)`, with `root`
    /// standing in for the parent of top-level parts (and of parts whose
    /// parent index was edited to point past them).
    pub fn pose(&self, root: &Matrix4<f32>, elapsed: f64) -> Vec<Matrix4<f32>> {
        let mut world: Vec<Matrix4<f32>> = Vec::with_capacity(self.parts.len());

        for part in &self.parts {
            let parent = part
                .parent
                .and_then(|i| world.get(i).copied())
                .unwrap_or(*root);
            world.push(parent * part.local_transform(elapsed));
        }

        world
    }
}
