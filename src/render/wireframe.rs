//! Built-in wireframe models
//!
//! Models are vertex lists plus index pairs, authored in their own local
//! space and placed in the world by a rig part's transform. The airplane
//! body points its nose down local -X, which the rig turns to face the
//! direction of travel.

use nalgebra::{Matrix4, Point3};

/// A wireframe consisting of vertices and edges
#[derive(Clone, Debug)]
pub struct Wireframe {
    /// Vertex positions
    pub vertices: Vec<Point3<f32>>,
    /// Edges as pairs of vertex indices
    pub edges: Vec<(usize, usize)>,
    /// Name of the model
    pub name: String,
}

impl Wireframe {
    /// Create a wireframe from vertices and edges
    pub fn from_data(
        vertices: Vec<Point3<f32>>,
        edges: Vec<(usize, usize)>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            vertices,
            edges,
            name: name.into(),
        }
    }

    /// Airplane body: fuselage, wings, tailplane and fin
    pub fn airplane_body() -> Self {
        let vertices = vec![
            // Fuselage: nose, four mid-body corners, tail
            Point3::new(-0.6, 0.0, 0.0),
            Point3::new(-0.2, 0.08, 0.08),
            Point3::new(-0.2, 0.08, -0.08),
            Point3::new(-0.2, -0.08, -0.08),
            Point3::new(-0.2, -0.08, 0.08),
            Point3::new(1.0, 0.02, 0.0),
            // Wings
            Point3::new(-0.15, 0.0, 0.08),
            Point3::new(0.15, 0.0, 0.08),
            Point3::new(0.1, 0.0, 1.0),
            Point3::new(-0.05, 0.0, 1.0),
            Point3::new(-0.15, 0.0, -0.08),
            Point3::new(0.15, 0.0, -0.08),
            Point3::new(0.1, 0.0, -1.0),
            Point3::new(-0.05, 0.0, -1.0),
            // Tailplane
            Point3::new(0.8, 0.02, 0.0),
            Point3::new(1.0, 0.02, 0.35),
            Point3::new(1.0, 0.02, -0.35),
            // Fin
            Point3::new(0.95, 0.35, 0.0),
        ];

        let edges = vec![
            // Nose cone
            (0, 1),
            (0, 2),
            (0, 3),
            (0, 4),
            // Mid-body ring
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 1),
            // Tapering to the tail
            (1, 5),
            (2, 5),
            (3, 5),
            (4, 5),
            // Right wing
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 6),
            // Left wing
            (10, 11),
            (11, 12),
            (12, 13),
            (13, 10),
            // Tailplane
            (14, 15),
            (15, 16),
            (16, 14),
            // Fin
            (14, 17),
            (17, 5),
        ];

        Self::from_data(vertices, edges, "Body")
    }

    /// Two-bladed propeller in the local XY plane, spinning about Z
    pub fn propeller() -> Self {
        let w = 0.12;
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            // Blade along +X
            Point3::new(1.0, w, 0.0),
            Point3::new(1.0, -w, 0.0),
            // Blade along -X
            Point3::new(-1.0, w, 0.0),
            Point3::new(-1.0, -w, 0.0),
        ];

        let edges = vec![(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)];

        Self::from_data(vertices, edges, "Propeller")
    }

    /// World-space endpoints of every edge under `transform`
    ///
    /// Edges naming a missing vertex are skipped.
    pub fn world_edges(&self, transform: &Matrix4<f32>) -> Vec<(Point3<f32>, Point3<f32>)> {
        let world: Vec<Point3<f32>> = self
            .vertices
            .iter()
            .map(|v| transform.transform_point(v))
            .collect();

        self.edges
            .iter()
            .filter_map(|&(a, b)| Some((*world.get(a)?, *world.get(b)?)))
            .collect()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
