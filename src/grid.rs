//! Mesh creation and storage

mod builder;
mod part;
mod triangle_mesh;

pub use builder::TriangleMeshBuilder;
pub use part::Part;
pub use triangle_mesh::TriangleMesh;
