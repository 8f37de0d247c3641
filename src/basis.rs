//! RWG basis functions
//!
//! An RWG (Rao-Wilton-Glisson) basis function lives on an interior edge and
//! the two triangles that share it. On the `+` triangle it is the vector from
//! the free vertex to the observation point; on the `-` triangle it is the
//! vector from the observation point to the free vertex.

use crate::traits::TriangleGeometry;
use crate::types::{check_index, check_len, RwgError, RwgResult};
use itertools::izip;
use std::collections::BTreeMap;

/// Index data of a single RWG basis function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RwgBasisFunction {
    /// The triangle on the positive side of the edge
    pub tri_plus: usize,
    /// The triangle on the negative side of the edge
    pub tri_minus: usize,
    /// Local index (0, 1 or 2) of the free vertex of the positive triangle
    pub node_plus: usize,
    /// Local index (0, 1 or 2) of the free vertex of the negative triangle
    pub node_minus: usize,
}

impl RwgBasisFunction {
    /// Create a new basis function
    pub fn new(tri_plus: usize, tri_minus: usize, node_plus: usize, node_minus: usize) -> Self {
        Self {
            tri_plus,
            tri_minus,
            node_plus,
            node_minus,
        }
    }

    /// The same basis function with opposite orientation
    pub fn flipped(&self) -> Self {
        Self {
            tri_plus: self.tri_minus,
            tri_minus: self.tri_plus,
            node_plus: self.node_minus,
            node_minus: self.node_plus,
        }
    }

    /// The `(triangle, free vertex, sign)` of the two sides, positive side first
    pub fn sides(&self) -> [(usize, usize, f64); 2] {
        [
            (self.tri_plus, self.node_plus, 1.0),
            (self.tri_minus, self.node_minus, -1.0),
        ]
    }
}

/// The RWG basis functions of a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct RwgBasis {
    functions: Vec<RwgBasisFunction>,
    number_of_triangles: usize,
}

impl RwgBasis {
    /// Create a basis from its functions.
    ///
    /// `number_of_triangles` is the number of triangles of the mesh the basis is defined on.
    /// Every triangle index must be smaller than this, every free-vertex index smaller
    /// than 3, and the two triangles of a function must differ.
    pub fn new(functions: Vec<RwgBasisFunction>, number_of_triangles: usize) -> RwgResult<Self> {
        for (m, f) in functions.iter().enumerate() {
            check_index("tri_plus", f.tri_plus, number_of_triangles)?;
            check_index("tri_minus", f.tri_minus, number_of_triangles)?;
            check_index("node_plus", f.node_plus, 3)?;
            check_index("node_minus", f.node_minus, 3)?;
            if f.tri_plus == f.tri_minus {
                return Err(RwgError::DegenerateBasisFunction { basis: m });
            }
        }
        Ok(Self {
            functions,
            number_of_triangles,
        })
    }

    /// Create a basis from four index arrays of equal length.
    pub fn from_arrays(
        tri_plus: &[usize],
        tri_minus: &[usize],
        node_plus: &[usize],
        node_minus: &[usize],
        number_of_triangles: usize,
    ) -> RwgResult<Self> {
        let n = tri_plus.len();
        check_len("tri_minus", n, tri_minus.len())?;
        check_len("node_plus", n, node_plus.len())?;
        check_len("node_minus", n, node_minus.len())?;
        let functions = izip!(tri_plus, tri_minus, node_plus, node_minus)
            .map(|(tp, tm, np, nm)| RwgBasisFunction::new(*tp, *tm, *np, *nm))
            .collect();
        Self::new(functions, number_of_triangles)
    }

    /// Enumerate the RWG basis functions of a mesh.
    ///
    /// Every edge shared by exactly two triangles gives one basis function,
    /// with the triangle of lower index on the positive side. Edges on the
    /// boundary of the mesh are skipped. Functions are ordered by the node
    /// indices of their edge.
    pub fn from_mesh(geometry: &impl TriangleGeometry) -> RwgResult<Self> {
        let ntriangles = geometry.number_of_triangles();
        let mut edges: BTreeMap<(usize, usize), Vec<(usize, usize)>> = BTreeMap::new();

        for t in 0..ntriangles {
            let nodes = geometry.triangle(t);
            for free in 0..3 {
                let a = nodes[(free + 1) % 3];
                let b = nodes[(free + 2) % 3];
                let key = if a < b { (a, b) } else { (b, a) };
                edges.entry(key).or_default().push((t, free));
            }
        }

        let mut functions = Vec::with_capacity(3 * ntriangles / 2);
        for ((a, b), cells) in &edges {
            match cells.as_slice() {
                [_] => {}
                [(tri_plus, node_plus), (tri_minus, node_minus)] => functions.push(
                    RwgBasisFunction::new(*tri_plus, *tri_minus, *node_plus, *node_minus),
                ),
                _ => {
                    return Err(RwgError::NonManifoldEdge {
                        vertices: [*a, *b],
                        count: cells.len(),
                    })
                }
            }
        }
        Self::new(functions, ntriangles)
    }

    /// The number of basis functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether there are no basis functions
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The number of triangles of the underlying mesh
    pub fn number_of_triangles(&self) -> usize {
        self.number_of_triangles
    }

    /// The basis functions
    pub fn functions(&self) -> &[RwgBasisFunction] {
        &self.functions
    }

    /// A single basis function
    pub fn get(&self, index: usize) -> Option<&RwgBasisFunction> {
        self.functions.get(index)
    }

    /// Reverse the orientation of one basis function
    pub fn flip(&mut self, index: usize) -> RwgResult<()> {
        check_index("basis function", index, self.len())?;
        self.functions[index] = self.functions[index].flipped();
        Ok(())
    }

    /// The entries `(row, column, value)` of the matrix mapping per-face
    /// quantities to basis quantities.
    ///
    /// The matrix has shape `[len, 3 * number_of_triangles]`. Row `m` has the
    /// entry `+1` in column `3 * tri_plus + node_plus` and `-1` in column
    /// `3 * tri_minus + node_minus`.
    pub fn face_transformation(&self) -> Vec<(usize, usize, f64)> {
        self.functions
            .iter()
            .enumerate()
            .flat_map(|(m, f)| {
                f.sides()
                    .map(|(triangle, node, sign)| (m, 3 * triangle + node, sign))
            })
            .collect()
    }
}
