//! Types specific to rwg-mom

/// Errors raised by the kernels.
///
/// Every variant describes invalid input. None of them is recovered from
/// internally: they are returned to the caller before any output is produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RwgError {
    /// Two arrays that must agree in size do not
    #[error("Shape mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// What was being checked
        what: &'static str,
        /// Expected size
        expected: usize,
        /// Actual size
        found: usize,
    },
    /// An index points outside the array it refers to
    #[error("Index {index} of {what} is out of range (bound {bound})")]
    IndexOutOfRange {
        /// What the index refers to
        what: &'static str,
        /// The offending index
        index: usize,
        /// The exclusive upper bound
        bound: usize,
    },
    /// The same id was given to two entities
    #[error("Duplicate {what} {id}")]
    DuplicateId {
        /// What the id refers to
        what: &'static str,
        /// The repeated id
        id: usize,
    },
    /// A basis function whose plus and minus triangles are the same
    #[error("Basis function {basis} uses the same triangle on both sides of its edge")]
    DegenerateBasisFunction {
        /// Index of the basis function
        basis: usize,
    },
    /// A face pair needed by a basis pair was not supplied
    #[error("No face interaction supplied for observer face {observer_face} and source face {source_face}")]
    MissingFaceEntry {
        /// Observer triangle
        observer_face: usize,
        /// Source triangle
        source_face: usize,
    },
    /// A face pair needed by a basis pair is NaN or infinite
    #[error("Non-finite face interaction for observer face {observer_face} and source face {source_face}")]
    NonFiniteFaceEntry {
        /// Observer triangle
        observer_face: usize,
        /// Source triangle
        source_face: usize,
    },
    /// An edge that is shared by more than two triangles
    #[error("Edge ({}, {}) is shared by {} triangles", .vertices[0], .vertices[1], .count)]
    NonManifoldEdge {
        /// The two mesh nodes of the edge
        vertices: [usize; 2],
        /// Number of triangles sharing the edge
        count: usize,
    },
    /// An unusable quadrature rule
    #[error("Invalid quadrature: {0}")]
    InvalidQuadrature(String),
    /// The worker pool could not be started
    #[error("Could not create thread pool: {0}")]
    ThreadPool(String),
}

/// Result type
pub type RwgResult<T> = std::result::Result<T, RwgError>;

/// Check that `index < bound`.
pub(crate) fn check_index(what: &'static str, index: usize, bound: usize) -> RwgResult<()> {
    if index < bound {
        Ok(())
    } else {
        Err(RwgError::IndexOutOfRange { what, index, bound })
    }
}

/// Check that an array has the expected length.
pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> RwgResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(RwgError::ShapeMismatch {
            what,
            expected,
            found,
        })
    }
}
