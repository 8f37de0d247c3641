//! Flat triangle mesh

use crate::helpers::{cross3, norm3, sub3};
use crate::traits::TriangleGeometry;
use crate::types::{check_index, RwgResult};

/// A flat triangle surface mesh
///
/// The mesh is immutable once created. Areas, centroids and unit normals are
/// computed on creation.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    nodes: Vec<[f64; 3]>,
    triangles: Vec<[usize; 3]>,
    areas: Vec<f64>,
    centroids: Vec<[f64; 3]>,
    normals: Vec<[f64; 3]>,
}

impl TriangleMesh {
    /// Create a mesh from node coordinates and triangles.
    ///
    /// Every node index used by a triangle must be smaller than the number of nodes.
    pub fn new(nodes: Vec<[f64; 3]>, triangles: Vec<[usize; 3]>) -> RwgResult<Self> {
        for t in &triangles {
            for n in t {
                check_index("triangle node", *n, nodes.len())?;
            }
        }

        let mut areas = Vec::with_capacity(triangles.len());
        let mut centroids = Vec::with_capacity(triangles.len());
        let mut normals = Vec::with_capacity(triangles.len());

        for t in &triangles {
            let v0 = nodes[t[0]];
            let v1 = nodes[t[1]];
            let v2 = nodes[t[2]];
            let n = cross3(&sub3(&v1, &v0), &sub3(&v2, &v0));
            let size = norm3(&n);
            areas.push(0.5 * size);
            centroids.push([
                (v0[0] + v1[0] + v2[0]) / 3.0,
                (v0[1] + v1[1] + v2[1]) / 3.0,
                (v0[2] + v1[2] + v2[2]) / 3.0,
            ]);
            normals.push([n[0] / size, n[1] / size, n[2] / size]);
        }

        Ok(Self {
            nodes,
            triangles,
            areas,
            centroids,
            normals,
        })
    }

    /// The node coordinates
    pub fn nodes(&self) -> &[[f64; 3]] {
        &self.nodes
    }

    /// The node indices of each triangle
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// The area of a triangle
    pub fn area(&self, index: usize) -> f64 {
        self.areas[index]
    }

    /// The centroid of a triangle
    pub fn centroid(&self, index: usize) -> [f64; 3] {
        self.centroids[index]
    }

    /// The unit normal of a triangle, oriented by the right-hand rule on its node order
    pub fn normal(&self, index: usize) -> [f64; 3] {
        self.normals[index]
    }
}

impl TriangleGeometry for TriangleMesh {
    fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }
    fn number_of_triangles(&self) -> usize {
        self.triangles.len()
    }
    fn node(&self, index: usize) -> [f64; 3] {
        self.nodes[index]
    }
    fn triangle(&self, index: usize) -> [usize; 3] {
        self.triangles[index]
    }
}
