//! Face-pair interaction data
use cauchy::c64;

/// Raw interaction integrals between pairs of triangles
///
/// These are produced by an external singular integration routine. An entry
/// that was not computed is reported as `None`.
pub trait FaceInteractions {
    //! Face interactions

    /// The number of observer (test) triangles
    fn number_of_observer_faces(&self) -> usize;

    /// The number of source (trial) triangles
    fn number_of_source_faces(&self) -> usize;

    /// The vector part `vector_face[observer, source, i, j]`, where `i` and `j`
    /// are the local free-vertex indices in the observer and source triangles
    fn vector_entry(&self, observer: usize, source: usize, i: usize, j: usize) -> Option<c64>;

    /// The scalar part `scalar_face[observer, source]`
    fn scalar_entry(&self, observer: usize, source: usize) -> Option<c64>;
}
