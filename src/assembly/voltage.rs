//! Parallel assembly of excitation vectors
use crate::assembly::common::{create_pool, worker_count, WorkerScratch};
use crate::assembly::source::source_integral_plane_wave;
use crate::basis::RwgBasis;
use crate::incident::PlaneWave;
use crate::quadrature::TriangleQuadratureRule;
use crate::traits::TriangleGeometry;
use crate::types::{check_index, check_len, RwgError, RwgResult};
use cauchy::c64;
use log::debug;
use num::Zero;
use rayon::prelude::*;
use rayon::ThreadPool;
use rlst::{rlst_dynamic_array1, DynamicArray, RawAccessMut};

/// Options for a voltage assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoltageAssemblerOptions {
    /// Number of triangles handed to a worker at a time
    batch_size: usize,
    /// Number of workers; `None` uses the available hardware parallelism
    num_threads: Option<usize>,
}

impl Default for VoltageAssemblerOptions {
    fn default() -> Self {
        Self {
            batch_size: 128,
            num_threads: None,
        }
    }
}

/// Voltage assembler
///
/// Integrates a plane wave over every triangle in parallel and combines the
/// per-face results into one value per RWG basis function.
#[derive(Debug, Clone)]
pub struct VoltageAssembler {
    rule: TriangleQuadratureRule,
    options: VoltageAssemblerOptions,
}

impl VoltageAssembler {
    /// Create new
    pub fn new(rule: TriangleQuadratureRule) -> Self {
        Self {
            rule,
            options: VoltageAssemblerOptions::default(),
        }
    }

    /// The quadrature rule used on every triangle
    pub fn rule(&self) -> &TriangleQuadratureRule {
        &self.rule
    }

    /// Set the number of triangles handed to a worker at a time
    pub fn batch_size(&mut self, size: usize) {
        self.options.batch_size = size.max(1);
    }

    /// Set the number of workers
    pub fn num_threads(&mut self, num_threads: usize) {
        self.options.num_threads = Some(num_threads);
    }

    /// The current options
    pub fn options(&self) -> &VoltageAssemblerOptions {
        &self.options
    }

    /// Integrate a plane wave over every triangle.
    ///
    /// Entry `p` of the result holds the three vertex integrals of triangle `p`.
    pub fn assemble_face_voltages<G: TriangleGeometry + Sync>(
        &self,
        geometry: &G,
        wave: &PlaneWave,
    ) -> RwgResult<Vec<[c64; 3]>> {
        let pool = create_pool(worker_count(self.options.num_threads))?;
        self.face_voltages_in(&pool, geometry, wave)
    }

    /// Assemble the excitation vector of a plane wave.
    ///
    /// Entry `m` is `V_face[tri_plus][node_plus] - V_face[tri_minus][node_minus]`
    /// for the `m`th basis function.
    pub fn assemble<G: TriangleGeometry + Sync>(
        &self,
        geometry: &G,
        basis: &RwgBasis,
        wave: &PlaneWave,
    ) -> RwgResult<DynamicArray<c64, 1>> {
        let pool = create_pool(worker_count(self.options.num_threads))?;
        self.assemble_in(&pool, geometry, basis, wave)
    }

    /// Assemble the excitation vector with both parallel regions run on `pool`
    fn assemble_in<G: TriangleGeometry + Sync>(
        &self,
        pool: &ThreadPool,
        geometry: &G,
        basis: &RwgBasis,
        wave: &PlaneWave,
    ) -> RwgResult<DynamicArray<c64, 1>> {
        check_len(
            "basis triangles",
            geometry.number_of_triangles(),
            basis.number_of_triangles(),
        )?;
        wave.check();

        let v_face = self.face_voltages_in(pool, geometry, wave)?;

        debug!("Combining face voltages into {} basis functions", basis.len());

        let mut voltages = rlst_dynamic_array1!(c64, [basis.len()]);
        pool.install(|| {
            voltages
                .data_mut()
                .par_iter_mut()
                .zip(basis.functions().par_iter())
                .for_each(|(v, f)| {
                    *v = v_face[f.tri_plus][f.node_plus] - v_face[f.tri_minus][f.node_minus];
                })
        });

        Ok(voltages)
    }

    fn face_voltages_in<G: TriangleGeometry + Sync>(
        &self,
        pool: &ThreadPool,
        geometry: &G,
        wave: &PlaneWave,
    ) -> RwgResult<Vec<[c64; 3]>> {
        check_geometry(geometry)?;

        let ntriangles = geometry.number_of_triangles();
        let mut v_face = vec![[c64::zero(); 3]; ntriangles];

        let nworkers = pool.current_num_threads();
        debug!(
            "Integrating {} triangles with {} workers in batches of {}",
            ntriangles, nworkers, self.options.batch_size
        );

        let scratch = WorkerScratch::new(nworkers, [[0.0; 3]; 3]);
        let batch_size = self.options.batch_size;

        pool.install(|| {
            v_face
                .par_chunks_mut(batch_size)
                .enumerate()
                .try_for_each(|(batch, rows)| {
                    let worker = rayon::current_thread_index().ok_or_else(|| {
                        RwgError::ThreadPool("Batch scheduled outside of the pool".to_string())
                    })?;
                    debug_assert!(worker < scratch.len());

                    for (i, row) in rows.iter_mut().enumerate() {
                        let p = batch * batch_size + i;
                        debug_assert!(p < ntriangles);
                        // Geometry calls may run nested parallel work, so they
                        // finish before the slot is borrowed.
                        let nodes = geometry.triangle(p).map(|n| geometry.node(n));
                        // The slot belongs to this worker and no other task can
                        // run on it until the borrow ends.
                        let vertices = unsafe { scratch.slot(worker) };
                        *vertices = nodes;
                        source_integral_plane_wave(
                            &self.rule,
                            vertices,
                            wave.jk_inc(),
                            wave.e_inc(),
                            row,
                        );
                    }
                    Ok::<(), RwgError>(())
                })
        })?;

        Ok(v_face)
    }
}

/// Check that every triangle of a geometry refers to existing nodes
fn check_geometry(geometry: &impl TriangleGeometry) -> RwgResult<()> {
    let nnodes = geometry.number_of_nodes();
    for t in 0..geometry.number_of_triangles() {
        for n in geometry.triangle(t) {
            check_index("triangle node", n, nnodes)?;
        }
    }
    Ok(())
}

/// Assemble the excitation vector of a plane wave with default options
pub fn voltage_plane_wave<G: TriangleGeometry + Sync>(
    geometry: &G,
    basis: &RwgBasis,
    rule: &TriangleQuadratureRule,
    wave: &PlaneWave,
) -> RwgResult<DynamicArray<c64, 1>> {
    VoltageAssembler::new(rule.clone()).assemble(geometry, basis, wave)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::basis::RwgBasisFunction;
    use crate::grid::{Part, TriangleMesh};
    use crate::helpers::{dot_complex_real, exp_minus};
    use crate::quadrature::triangle_rule;
    use crate::shapes::{regular_sphere, screen_triangles};
    use approx::assert_relative_eq;
    use paste::paste;
    use rlst::{RandomAccessByRef, RawAccess, Shape};

    fn x_polarised(jk: [c64; 3]) -> PlaneWave {
        PlaneWave::new([c64::new(1.0, 0.0), c64::zero(), c64::zero()], jk)
    }

    #[test]
    fn test_square_plate_normal_incidence() {
        let mesh = screen_triangles(1).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let rule = triangle_rule(1).unwrap();
        let wave = x_polarised([c64::zero(), c64::zero(), c64::new(0.0, 1.0)]);

        let v = voltage_plane_wave(&mesh, &basis, &rule, &wave).unwrap();
        assert_eq!(v.shape(), [1]);
        let v0 = *v.get([0]).unwrap();
        assert_relative_eq!(v0.re, -1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(v0.im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_square_plate_grazing_incidence() {
        let mesh = screen_triangles(1).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let rule = triangle_rule(1).unwrap();
        let k0 = 0.8;
        let wave = x_polarised([c64::new(0.0, k0), c64::zero(), c64::zero()]);

        let v = voltage_plane_wave(&mesh, &basis, &rule, &wave).unwrap();
        // The centroids of the two triangles are at x = 2/3 and x = 1/3
        let phase = |x: f64| c64::new(f64::cos(k0 * x), -f64::sin(k0 * x));
        let expected = phase(2.0 / 3.0) * (-1.0 / 6.0) + phase(1.0 / 3.0) * (-1.0 / 6.0);
        let v0 = *v.get([0]).unwrap();
        assert_relative_eq!(v0.re, expected.re, epsilon = 1e-15);
        assert_relative_eq!(v0.im, expected.im, epsilon = 1e-15);
    }

    #[test]
    fn test_face_voltages_of_plate() {
        let mesh = screen_triangles(1).unwrap();
        let assembler = VoltageAssembler::new(triangle_rule(1).unwrap());
        let wave = x_polarised([c64::zero(); 3]);
        let v_face = assembler.assemble_face_voltages(&mesh, &wave).unwrap();
        assert_eq!(v_face.len(), 2);
        // Triangle [0, 1, 3] has centroid (2/3, 1/3); free vertex 1 is (1, 0)
        assert_relative_eq!(v_face[0][1].re, -1.0 / 6.0, epsilon = 1e-15);
        // Triangle [0, 3, 2] has centroid (1/3, 2/3); free vertex 2 is (0, 1)
        assert_relative_eq!(v_face[1][2].re, 1.0 / 6.0, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_field_is_exactly_zero() {
        let mesh = regular_sphere(1).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let wave = PlaneWave::new([c64::zero(); 3], [c64::new(0.0, 2.0); 3]);
        let v = voltage_plane_wave(&mesh, &basis, &triangle_rule(6).unwrap(), &wave).unwrap();
        for value in v.data() {
            assert_eq!(*value, c64::zero());
        }
    }

    #[test]
    fn test_linear_in_field() {
        let mesh = regular_sphere(1).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let rule = triangle_rule(4).unwrap();
        let jk = [c64::zero(), c64::new(0.0, 1.3), c64::zero()];
        let e1 = [c64::new(1.0, 0.0), c64::zero(), c64::new(0.0, 0.5)];
        let e2 = [c64::zero(), c64::new(0.0, -2.0), c64::new(1.0, 1.0)];
        let alpha = c64::new(0.3, -1.2);
        let sum = [0, 1, 2].map(|i| e1[i] * alpha + e2[i]);

        let v1 = voltage_plane_wave(&mesh, &basis, &rule, &PlaneWave::new(e1, jk)).unwrap();
        let v2 = voltage_plane_wave(&mesh, &basis, &rule, &PlaneWave::new(e2, jk)).unwrap();
        let v = voltage_plane_wave(&mesh, &basis, &rule, &PlaneWave::new(sum, jk)).unwrap();
        for ((a, b), c) in v1.data().iter().zip(v2.data()).zip(v.data()) {
            let expected = a * alpha + b;
            assert_relative_eq!(c.re, expected.re, epsilon = 1e-13);
            assert_relative_eq!(c.im, expected.im, epsilon = 1e-13);
        }
    }

    macro_rules! threads_agree {
        ($($nthreads:expr),+) => {
            $(
                paste! {
                    #[test]
                    fn [<test_one_thread_matches_ $nthreads _threads>]() {
                        let mesh = regular_sphere(2).unwrap();
                        let basis = RwgBasis::from_mesh(&mesh).unwrap();
                        let wave = PlaneWave::new(
                            [c64::new(0.0, 1.0), c64::new(1.0, 0.0), c64::zero()],
                            [c64::zero(), c64::zero(), c64::new(0.0, 3.0)],
                        );
                        let mut serial = VoltageAssembler::new(triangle_rule(7).unwrap());
                        serial.num_threads(1);
                        let mut parallel = serial.clone();
                        parallel.num_threads($nthreads);
                        parallel.batch_size(5);

                        let a = serial.assemble(&mesh, &basis, &wave).unwrap();
                        let b = parallel.assemble(&mesh, &basis, &wave).unwrap();
                        assert_eq!(a.data(), b.data());
                    }
                }
            )*
        };
    }

    threads_agree!(2, 3, 8);

    #[test]
    fn test_flip_negates_voltage() {
        let mesh = screen_triangles(3).unwrap();
        let mut basis = RwgBasis::from_mesh(&mesh).unwrap();
        let rule = triangle_rule(3).unwrap();
        let wave = x_polarised([c64::new(0.0, 0.4), c64::new(0.0, 0.2), c64::zero()]);

        let v = voltage_plane_wave(&mesh, &basis, &rule, &wave).unwrap();
        basis.flip(4).unwrap();
        let flipped = voltage_plane_wave(&mesh, &basis, &rule, &wave).unwrap();
        for m in 0..basis.len() {
            let a = *v.get([m]).unwrap();
            let b = *flipped.get([m]).unwrap();
            if m == 4 {
                assert_eq!(a, -b);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_matches_face_transformation() {
        let mesh = regular_sphere(1).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let assembler = VoltageAssembler::new(triangle_rule(3).unwrap());
        let wave = x_polarised([c64::new(0.0, 0.7), c64::zero(), c64::new(0.0, 0.7)]);

        let v_face = assembler.assemble_face_voltages(&mesh, &wave).unwrap();
        let v = assembler.assemble(&mesh, &basis, &wave).unwrap();

        let mut product = vec![c64::zero(); basis.len()];
        for (row, col, value) in basis.face_transformation() {
            product[row] += v_face[col / 3][col % 3] * value;
        }
        for (a, b) in product.iter().zip(v.data()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-15);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_translated_part_picks_up_phase() {
        let mesh = screen_triangles(2).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let rule = triangle_rule(6).unwrap();
        let jk = [c64::new(0.0, 0.9), c64::zero(), c64::new(0.0, 0.4)];
        let wave = PlaneWave::new([c64::zero(), c64::new(1.0, 0.0), c64::zero()], jk);
        let offset = [0.5, 2.0, -1.0];

        let v = voltage_plane_wave(&mesh, &basis, &rule, &wave).unwrap();
        let part = Part::at(&mesh, offset);
        let moved = voltage_plane_wave(&part, &basis, &rule, &wave).unwrap();

        let shift = exp_minus(dot_complex_real(&jk, &offset));
        for (a, b) in v.data().iter().zip(moved.data()) {
            let expected = a * shift;
            assert_relative_eq!(b.re, expected.re, epsilon = 1e-14);
            assert_relative_eq!(b.im, expected.im, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_basis_from_other_mesh_is_rejected() {
        let mesh = screen_triangles(2).unwrap();
        let basis = RwgBasis::from_mesh(&screen_triangles(1).unwrap()).unwrap();
        let wave = x_polarised([c64::zero(); 3]);
        assert_eq!(
            voltage_plane_wave(&mesh, &basis, &triangle_rule(1).unwrap(), &wave).err(),
            Some(RwgError::ShapeMismatch {
                what: "basis triangles",
                expected: 8,
                found: 2
            })
        );
    }

    struct BrokenGeometry;

    impl TriangleGeometry for BrokenGeometry {
        fn number_of_nodes(&self) -> usize {
            3
        }
        fn number_of_triangles(&self) -> usize {
            2
        }
        fn node(&self, index: usize) -> [f64; 3] {
            [index as f64, 0.0, 0.0]
        }
        fn triangle(&self, index: usize) -> [usize; 3] {
            [0, 1, 2 + index]
        }
    }

    #[test]
    fn test_bad_node_index_is_rejected() {
        let basis = RwgBasis::new(vec![RwgBasisFunction::new(0, 1, 2, 2)], 2).unwrap();
        let wave = x_polarised([c64::zero(); 3]);
        let result = voltage_plane_wave(&BrokenGeometry, &basis, &triangle_rule(1).unwrap(), &wave);
        assert_eq!(
            result.err(),
            Some(RwgError::IndexOutOfRange {
                what: "triangle node",
                index: 3,
                bound: 3
            })
        );
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriangleMesh::new(vec![], vec![]).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let wave = x_polarised([c64::zero(); 3]);
        let v = voltage_plane_wave(&mesh, &basis, &triangle_rule(1).unwrap(), &wave).unwrap();
        assert_eq!(v.shape(), [0]);
    }

    #[test]
    fn test_options() {
        let mut assembler = VoltageAssembler::new(triangle_rule(6).unwrap());
        assert_eq!(assembler.rule().number_of_points(), 6);
        assert_eq!(assembler.options(), &VoltageAssemblerOptions::default());
        assembler.batch_size(0);
        assembler.num_threads(2);
        assert_eq!(
            assembler.options(),
            &VoltageAssemblerOptions {
                batch_size: 1,
                num_threads: Some(2)
            }
        );
    }

    #[test]
    fn test_both_regions_use_given_pool() {
        let mesh = regular_sphere(1).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let wave = x_polarised([c64::new(0.0, 0.5), c64::zero(), c64::zero()]);
        let mut assembler = VoltageAssembler::new(triangle_rule(3).unwrap());
        assembler.num_threads(4);

        let pool = create_pool(1).unwrap();
        let in_pool = assembler.assemble_in(&pool, &mesh, &basis, &wave).unwrap();
        let own_pool = assembler.assemble(&mesh, &basis, &wave).unwrap();
        assert_eq!(in_pool.data(), own_pool.data());
    }

    /// A mesh whose node lookup runs nested parallel work on the pool
    struct NestedParallelMesh(TriangleMesh);

    impl TriangleGeometry for NestedParallelMesh {
        fn number_of_nodes(&self) -> usize {
            self.0.number_of_nodes()
        }
        fn number_of_triangles(&self) -> usize {
            self.0.number_of_triangles()
        }
        fn node(&self, index: usize) -> [f64; 3] {
            let zero = (0..64usize).into_par_iter().map(|_| 0.0).sum::<f64>();
            let n = self.0.node(index);
            [n[0] + zero, n[1] + zero, n[2] + zero]
        }
        fn triangle(&self, index: usize) -> [usize; 3] {
            self.0.triangle(index)
        }
    }

    #[test]
    fn test_geometry_with_nested_parallelism() {
        let mesh = regular_sphere(2).unwrap();
        let basis = RwgBasis::from_mesh(&mesh).unwrap();
        let wave = x_polarised([c64::new(0.0, 1.0), c64::new(0.0, 0.5), c64::zero()]);
        let mut assembler = VoltageAssembler::new(triangle_rule(6).unwrap());
        assembler.num_threads(8);
        assembler.batch_size(1);

        let expected = assembler.assemble(&mesh, &basis, &wave).unwrap();
        let nested = NestedParallelMesh(mesh.clone());
        for _ in 0..5 {
            let v = assembler.assemble(&nested, &basis, &wave).unwrap();
            assert_eq!(v.data(), expected.data());
        }
    }
}
