//! Excitation vectors of plane waves on whole meshes
use approx::assert_relative_eq;
use cauchy::c64;
use num::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rlst::{RandomAccessByRef, RawAccess, Shape};
use rwg_mom::assembly::{voltage_plane_wave, VoltageAssembler};
use rwg_mom::basis::RwgBasis;
use rwg_mom::grid::{Part, TriangleMeshBuilder};
use rwg_mom::incident::PlaneWave;
use rwg_mom::quadrature::triangle_rule;
use rwg_mom::shapes::regular_sphere;

extern crate blas_src;
extern crate lapack_src;

fn random_vector(rng: &mut StdRng) -> [c64; 3] {
    [0, 1, 2].map(|_| c64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
}

#[test]
fn test_plate_from_builder() {
    let mut b = TriangleMeshBuilder::new();
    b.add_point(10, [0.0, 0.0, 0.0]);
    b.add_point(11, [1.0, 0.0, 0.0]);
    b.add_point(12, [0.0, 1.0, 0.0]);
    b.add_point(13, [1.0, 1.0, 0.0]);
    b.add_cell(0, [10, 11, 13]);
    b.add_cell(1, [10, 13, 12]);
    let mesh = b.create_mesh().unwrap();

    let basis = RwgBasis::from_mesh(&mesh).unwrap();
    let wave = PlaneWave::new(
        [c64::new(1.0, 0.0), c64::zero(), c64::zero()],
        [c64::zero(), c64::zero(), c64::new(0.0, 1.0)],
    );
    let v = voltage_plane_wave(&mesh, &basis, &triangle_rule(1).unwrap(), &wave).unwrap();
    assert_eq!(v.shape(), [1]);
    assert_relative_eq!(v.get([0]).unwrap().re, -1.0 / 3.0, epsilon = 1e-15);
}

#[test]
fn test_rotated_part_with_rotated_wave() {
    // Rotating both the mesh and the wave leaves every voltage unchanged
    let mesh = regular_sphere(2).unwrap();
    let basis = RwgBasis::from_mesh(&mesh).unwrap();
    let rule = triangle_rule(6).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let e = random_vector(&mut rng);
    let jk = [c64::new(0.0, 0.3), c64::new(0.0, -0.7), c64::new(0.0, 1.1)];

    let mut part = Part::new(&mesh);
    part.rotate([0.0, 0.0, 1.0], 90.0);
    // A quarter turn about z maps (x, y, z) to (-y, x, z)
    let turn = |v: [c64; 3]| [-v[1], v[0], v[2]];

    let v = voltage_plane_wave(&mesh, &basis, &rule, &PlaneWave::new(e, jk)).unwrap();
    let rotated =
        voltage_plane_wave(&part, &basis, &rule, &PlaneWave::new(turn(e), turn(jk))).unwrap();
    for (a, b) in v.data().iter().zip(rotated.data()) {
        assert_relative_eq!(a.re, b.re, epsilon = 1e-13);
        assert_relative_eq!(a.im, b.im, epsilon = 1e-13);
    }
}

#[test]
fn test_quadrature_converges() {
    let mesh = regular_sphere(2).unwrap();
    let basis = RwgBasis::from_mesh(&mesh).unwrap();
    let wave = PlaneWave::from_direction(
        c64::new(0.0, 0.5 * rwg_mom::incident::C0),
        [0.0, 0.6, 0.8],
        [c64::new(1.0, 0.0), c64::zero(), c64::zero()],
    );

    let coarse = voltage_plane_wave(&mesh, &basis, &triangle_rule(7).unwrap(), &wave).unwrap();
    let fine = voltage_plane_wave(&mesh, &basis, &triangle_rule(12).unwrap(), &wave).unwrap();
    let scale = fine.data().iter().map(|v| v.norm()).fold(0.0, f64::max);
    for (a, b) in coarse.data().iter().zip(fine.data()) {
        assert!((a - b).norm() < 1e-4 * scale);
    }
}

#[test]
fn test_superposition_of_waves() {
    let mesh = regular_sphere(1).unwrap();
    let basis = RwgBasis::from_mesh(&mesh).unwrap();
    let mut assembler = VoltageAssembler::new(triangle_rule(4).unwrap());
    assembler.num_threads(3);
    let mut rng = StdRng::seed_from_u64(7);
    let jk = [c64::new(0.0, 1.0), c64::zero(), c64::zero()];
    let e1 = random_vector(&mut rng);
    let e2 = random_vector(&mut rng);
    let e = [0, 1, 2].map(|i| e1[i] + e2[i]);

    let v1 = assembler.assemble(&mesh, &basis, &PlaneWave::new(e1, jk)).unwrap();
    let v2 = assembler.assemble(&mesh, &basis, &PlaneWave::new(e2, jk)).unwrap();
    let v = assembler.assemble(&mesh, &basis, &PlaneWave::new(e, jk)).unwrap();
    for ((a, b), c) in v1.data().iter().zip(v2.data()).zip(v.data()) {
        assert_relative_eq!((a + b).re, c.re, epsilon = 1e-14);
        assert_relative_eq!((a + b).im, c.im, epsilon = 1e-14);
    }
}
