//! A mesh placed in the simulation domain

use crate::grid::TriangleMesh;
use crate::traits::TriangleGeometry;

const IDENTITY: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

fn matmul4(a: &[[f64; 4]; 4], b: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = (0..4).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// A placed copy of a mesh
///
/// The part shares the nodes and triangles of its mesh and applies an affine
/// transformation to the nodes when they are read. Several parts can be
/// placed from the same mesh.
#[derive(Debug, Clone)]
pub struct Part<'a> {
    mesh: &'a TriangleMesh,
    initial_location: Option<[f64; 3]>,
    transformation: [[f64; 4]; 4],
}

impl<'a> Part<'a> {
    /// Place a mesh at the origin
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self {
            mesh,
            initial_location: None,
            transformation: IDENTITY,
        }
    }

    /// Place a mesh at a given location
    pub fn at(mesh: &'a TriangleMesh, location: [f64; 3]) -> Self {
        let mut part = Self {
            mesh,
            initial_location: Some(location),
            transformation: IDENTITY,
        };
        part.reset();
        part
    }

    /// The mesh that this part was placed from
    pub fn mesh(&self) -> &TriangleMesh {
        self.mesh
    }

    /// The current 4x4 affine transformation
    pub fn transformation_matrix(&self) -> &[[f64; 4]; 4] {
        &self.transformation
    }

    /// Undo all transformations except the initial placement
    pub fn reset(&mut self) {
        self.transformation = IDENTITY;
        if let Some(location) = self.initial_location {
            self.translate(location);
        }
    }

    /// Translate the part by an offset
    pub fn translate(&mut self, offset: [f64; 3]) {
        let mut translation = IDENTITY;
        for (row, o) in translation.iter_mut().zip(offset) {
            row[3] = o;
        }
        self.transformation = matmul4(&translation, &self.transformation);
    }

    /// Rotate the part about an axis through the origin
    ///
    /// The angle is in degrees. The rotation matrix is built from the
    /// Euler-Rodrigues parameters of the rotation. The axis must be non-zero.
    pub fn rotate(&mut self, axis: [f64; 3], angle: f64) {
        let size = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        debug_assert!(size > 0.0, "Cannot rotate about a zero axis");
        let half_angle = 0.5 * angle.to_radians();
        let a = half_angle.cos();
        let s = half_angle.sin() / size;
        let (b, c, d) = (axis[0] * s, axis[1] * s, axis[2] * s);

        let rotation = [
            [
                a * a + b * b - c * c - d * d,
                2.0 * (b * c - a * d),
                2.0 * (b * d + a * c),
                0.0,
            ],
            [
                2.0 * (b * c + a * d),
                a * a + c * c - b * b - d * d,
                2.0 * (c * d - a * b),
                0.0,
            ],
            [
                2.0 * (b * d - a * c),
                2.0 * (c * d + a * b),
                a * a + d * d - b * b - c * c,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ];
        self.transformation = matmul4(&rotation, &self.transformation);
    }

    /// The transformed coordinates of all nodes
    pub fn nodes(&self) -> Vec<[f64; 3]> {
        (0..self.mesh.number_of_nodes())
            .map(|i| self.node(i))
            .collect()
    }
}

impl TriangleGeometry for Part<'_> {
    fn number_of_nodes(&self) -> usize {
        self.mesh.number_of_nodes()
    }
    fn number_of_triangles(&self) -> usize {
        self.mesh.number_of_triangles()
    }
    fn node(&self, index: usize) -> [f64; 3] {
        let p = self.mesh.node(index);
        let m = &self.transformation;
        let mut out = [0.0; 3];
        for (i, o) in out.iter_mut().enumerate() {
            *o = m[i][0] * p[0] + m[i][1] * p[1] + m[i][2] * p[2] + m[i][3];
        }
        out
    }
    fn triangle(&self, index: usize) -> [usize; 3] {
        self.mesh.triangle(index)
    }
}
