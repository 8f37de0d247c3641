//! Conversion of face-pair interactions into RWG basis interactions
use crate::assembly::common::{create_pool, worker_count};
use crate::basis::{RwgBasis, RwgBasisFunction};
use crate::traits::FaceInteractions;
use crate::types::{check_index, check_len, RwgError, RwgResult};
use cauchy::c64;
use log::debug;
use num::Zero;
use rayon::prelude::*;
use rlst::{
    rlst_dynamic_array2, rlst_dynamic_array4, DynamicArray, RandomAccessByRef, RandomAccessMut,
    RawAccessMut, Shape,
};
use std::collections::HashMap;

/// Face-pair interactions stored as dense arrays
///
/// `vector` has shape `[observer faces, source faces, 3, 3]` and `scalar` has
/// shape `[observer faces, source faces]`.
pub struct FaceTensors {
    vector: DynamicArray<c64, 4>,
    scalar: DynamicArray<c64, 2>,
}

impl FaceTensors {
    /// Create from dense arrays
    pub fn new(vector: DynamicArray<c64, 4>, scalar: DynamicArray<c64, 2>) -> RwgResult<Self> {
        let [nobserver, nsource, ni, nj] = vector.shape();
        check_len("vector_face local observer index", 3, ni)?;
        check_len("vector_face local source index", 3, nj)?;
        check_len("scalar_face observer faces", nobserver, scalar.shape()[0])?;
        check_len("scalar_face source faces", nsource, scalar.shape()[1])?;
        Ok(Self { vector, scalar })
    }

    /// Create by evaluating a function for each entry
    pub fn from_fn(
        nobserver: usize,
        nsource: usize,
        vector: impl Fn(usize, usize, usize, usize) -> c64,
        scalar: impl Fn(usize, usize) -> c64,
    ) -> Self {
        let mut v = rlst_dynamic_array4!(c64, [nobserver, nsource, 3, 3]);
        let mut s = rlst_dynamic_array2!(c64, [nobserver, nsource]);
        for p in 0..nobserver {
            for q in 0..nsource {
                for i in 0..3 {
                    for j in 0..3 {
                        if let Some(entry) = v.get_mut([p, q, i, j]) {
                            *entry = vector(p, q, i, j);
                        }
                    }
                }
                if let Some(entry) = s.get_mut([p, q]) {
                    *entry = scalar(p, q);
                }
            }
        }
        Self {
            vector: v,
            scalar: s,
        }
    }

    /// The vector part
    pub fn vector(&self) -> &DynamicArray<c64, 4> {
        &self.vector
    }

    /// The scalar part
    pub fn scalar(&self) -> &DynamicArray<c64, 2> {
        &self.scalar
    }
}

impl FaceInteractions for FaceTensors {
    fn number_of_observer_faces(&self) -> usize {
        self.scalar.shape()[0]
    }
    fn number_of_source_faces(&self) -> usize {
        self.scalar.shape()[1]
    }
    fn vector_entry(&self, observer: usize, source: usize, i: usize, j: usize) -> Option<c64> {
        self.vector.get([observer, source, i, j]).copied()
    }
    fn scalar_entry(&self, observer: usize, source: usize) -> Option<c64> {
        self.scalar.get([observer, source]).copied()
    }
}

/// The interactions of one pair of faces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePairInteraction {
    /// `vector[i][j]` for local free vertices `i` (observer) and `j` (source)
    pub vector: [[c64; 3]; 3],
    /// Scalar part
    pub scalar: c64,
}

/// Face-pair interactions for a subset of pairs
///
/// Pairs that were never inserted are reported as missing.
#[derive(Debug, Clone)]
pub struct SparseFaceTensors {
    nobserver: usize,
    nsource: usize,
    entries: HashMap<(usize, usize), FacePairInteraction>,
}

impl SparseFaceTensors {
    /// Create an empty set of interactions between `nobserver` and `nsource` faces
    pub fn new(nobserver: usize, nsource: usize) -> Self {
        Self {
            nobserver,
            nsource,
            entries: HashMap::new(),
        }
    }

    /// Insert the interactions of a pair, replacing any previous value
    pub fn insert(
        &mut self,
        observer: usize,
        source: usize,
        value: FacePairInteraction,
    ) -> RwgResult<()> {
        check_index("observer face", observer, self.nobserver)?;
        check_index("source face", source, self.nsource)?;
        self.entries.insert((observer, source), value);
        Ok(())
    }

    /// The number of stored pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pairs are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FaceInteractions for SparseFaceTensors {
    fn number_of_observer_faces(&self) -> usize {
        self.nobserver
    }
    fn number_of_source_faces(&self) -> usize {
        self.nsource
    }
    fn vector_entry(&self, observer: usize, source: usize, i: usize, j: usize) -> Option<c64> {
        self.entries
            .get(&(observer, source))
            .and_then(|e| e.vector.get(i).and_then(|row| row.get(j)).copied())
    }
    fn scalar_entry(&self, observer: usize, source: usize) -> Option<c64> {
        self.entries.get(&(observer, source)).map(|e| e.scalar)
    }
}

/// Options for the face-to-RWG conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Number of workers; `None` uses the available hardware parallelism
    num_threads: Option<usize>,
}

impl ConverterOptions {
    /// Set the number of workers
    pub fn num_threads(&mut self, num_threads: usize) {
        self.num_threads = Some(num_threads);
    }
}

/// Interactions between two sets of RWG basis functions
///
/// Both matrices have shape `[observer basis functions, source basis functions]`.
pub struct RwgMatrices {
    /// Vector part
    pub vector: DynamicArray<c64, 2>,
    /// Scalar part
    pub scalar: DynamicArray<c64, 2>,
}

fn checked(value: Option<c64>, observer_face: usize, source_face: usize) -> RwgResult<c64> {
    match value {
        None => Err(RwgError::MissingFaceEntry {
            observer_face,
            source_face,
        }),
        Some(v) if !v.is_finite() => Err(RwgError::NonFiniteFaceEntry {
            observer_face,
            source_face,
        }),
        Some(v) => Ok(v),
    }
}

/// Combine the four face pairs touched by a pair of basis functions
fn basis_pair(
    faces: &impl FaceInteractions,
    observer: &RwgBasisFunction,
    source: &RwgBasisFunction,
) -> RwgResult<(c64, c64)> {
    let mut vector = c64::zero();
    let mut scalar = c64::zero();
    for (p, i, sign_o) in observer.sides() {
        for (q, j, sign_s) in source.sides() {
            let sign = sign_o * sign_s;
            vector += checked(faces.vector_entry(p, q, i, j), p, q)? * sign;
            scalar += checked(faces.scalar_entry(p, q), p, q)? * sign;
        }
    }
    Ok((vector, scalar))
}

/// Convert face-pair interactions into interactions of RWG basis functions.
///
/// For observer function `m` with sides `(p+, i+)`, `(p-, i-)` and source
/// function `n` with sides `(q+, j+)`, `(q-, j-)`:
///
/// ```text
/// vector[m, n] = vf[p+, q+, i+, j+] - vf[p+, q-, i+, j-] - vf[p-, q+, i-, j+] + vf[p-, q-, i-, j-]
/// scalar[m, n] = sf[p+, q+] - sf[p+, q-] - sf[p-, q+] + sf[p-, q-]
/// ```
///
/// Columns are computed in parallel. Every face entry that is used must be
/// present and finite.
pub fn face_to_rwg<F: FaceInteractions + Sync>(
    faces: &F,
    observer_basis: &RwgBasis,
    source_basis: &RwgBasis,
    options: &ConverterOptions,
) -> RwgResult<RwgMatrices> {
    check_len(
        "observer faces",
        observer_basis.number_of_triangles(),
        faces.number_of_observer_faces(),
    )?;
    check_len(
        "source faces",
        source_basis.number_of_triangles(),
        faces.number_of_source_faces(),
    )?;

    let nobserver = observer_basis.len();
    let nsource = source_basis.len();
    let mut vector = rlst_dynamic_array2!(c64, [nobserver, nsource]);
    let mut scalar = rlst_dynamic_array2!(c64, [nobserver, nsource]);
    if nobserver == 0 || nsource == 0 {
        return Ok(RwgMatrices { vector, scalar });
    }

    let pool = create_pool(worker_count(options.num_threads))?;
    debug!(
        "Converting face interactions to a {}x{} RWG matrix with {} workers",
        nobserver,
        nsource,
        pool.current_num_threads()
    );

    pool.install(|| {
        vector
            .data_mut()
            .par_chunks_mut(nobserver)
            .zip(scalar.data_mut().par_chunks_mut(nobserver))
            .zip(source_basis.functions().par_iter())
            .try_for_each(|((vector_column, scalar_column), source)| {
                for ((v, s), observer) in vector_column
                    .iter_mut()
                    .zip(scalar_column.iter_mut())
                    .zip(observer_basis.functions())
                {
                    (*v, *s) = basis_pair(faces, observer, source)?;
                }
                Ok::<(), RwgError>(())
            })
    })?;

    Ok(RwgMatrices { vector, scalar })
}
