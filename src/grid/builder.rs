//! Mesh builder

use crate::grid::TriangleMesh;
use crate::types::{RwgError, RwgResult};
use std::collections::HashMap;

/// Builder for a [`TriangleMesh`]
///
/// Points and cells are added with user-chosen ids. The ids of points are
/// translated into indices when the mesh is created, in the order in which
/// the points were added.
#[derive(Debug, Default)]
pub struct TriangleMeshBuilder {
    points: Vec<[f64; 3]>,
    cells: Vec<[usize; 3]>,
    point_indices_to_ids: Vec<usize>,
    point_ids_to_indices: HashMap<usize, usize>,
    cell_indices_to_ids: Vec<usize>,
    duplicate_point: Option<usize>,
}

impl TriangleMeshBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder with space for `npoints` points and `ncells` cells
    pub fn new_with_capacity(npoints: usize, ncells: usize) -> Self {
        Self {
            points: Vec::with_capacity(npoints),
            cells: Vec::with_capacity(ncells),
            point_indices_to_ids: Vec::with_capacity(npoints),
            point_ids_to_indices: HashMap::with_capacity(npoints),
            cell_indices_to_ids: Vec::with_capacity(ncells),
            duplicate_point: None,
        }
    }

    /// Add a point
    ///
    /// A point whose id was already used is not added, and [`Self::create_mesh`]
    /// will fail.
    pub fn add_point(&mut self, id: usize, data: [f64; 3]) {
        if self.point_ids_to_indices.contains_key(&id) {
            self.duplicate_point.get_or_insert(id);
            return;
        }
        self.point_ids_to_indices
            .insert(id, self.point_indices_to_ids.len());
        self.point_indices_to_ids.push(id);
        self.points.push(data);
    }

    /// Add a cell given by the ids of its three points
    pub fn add_cell(&mut self, id: usize, cell_data: [usize; 3]) {
        self.cell_indices_to_ids.push(id);
        self.cells.push(cell_data);
    }

    /// The coordinates of a point that has already been added
    pub fn point(&self, id: usize) -> Option<[f64; 3]> {
        self.point_ids_to_indices.get(&id).map(|i| self.points[*i])
    }

    /// The ids of the cells, in the order used by the mesh
    pub fn cell_ids(&self) -> &[usize] {
        &self.cell_indices_to_ids
    }

    /// Create the mesh
    ///
    /// Fails if a point id was added twice or a cell refers to a point id
    /// that was never added.
    pub fn create_mesh(self) -> RwgResult<TriangleMesh> {
        if let Some(id) = self.duplicate_point {
            return Err(RwgError::DuplicateId {
                what: "point id",
                id,
            });
        }
        let npoints = self.points.len();
        let mut triangles = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let mut t = [0; 3];
            for (index, id) in t.iter_mut().zip(cell) {
                *index = *self.point_ids_to_indices.get(id).ok_or(
                    RwgError::IndexOutOfRange {
                        what: "point id",
                        index: *id,
                        bound: npoints,
                    },
                )?;
            }
            triangles.push(t);
        }
        TriangleMesh::new(self.points, triangles)
    }
}
