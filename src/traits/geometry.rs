//! Geometry access

/// Read-only access to the nodes and triangles of a surface mesh
pub trait TriangleGeometry {
    //! Triangle geometry

    /// The number of nodes
    fn number_of_nodes(&self) -> usize;

    /// The number of triangles
    fn number_of_triangles(&self) -> usize;

    /// The coordinates of a node
    fn node(&self, index: usize) -> [f64; 3];

    /// The node indices of a triangle
    fn triangle(&self, index: usize) -> [usize; 3];

    /// Write the coordinates of the three vertices of a triangle into `vertices`
    fn triangle_vertices(&self, index: usize, vertices: &mut [[f64; 3]; 3]) {
        for (v, n) in vertices.iter_mut().zip(self.triangle(index)) {
            *v = self.node(n);
        }
    }
}
