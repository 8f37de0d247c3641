//! Trait definitions

mod geometry;
mod interactions;

pub use geometry::TriangleGeometry;
pub use interactions::FaceInteractions;
