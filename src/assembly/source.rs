//! Testing of an incident plane wave on a single triangle
use crate::helpers::{dot_complex_real, exp_minus, sub3};
use crate::quadrature::TriangleQuadratureRule;
use cauchy::c64;
use num::Zero;

/// Integrate a plane wave against the three vertex test functions of a triangle.
///
/// For every quadrature point `(xi, eta)` with weight `w` the physical point is
/// `r = xi * v0 + eta * v1 + (1 - xi - eta) * v2`. The local field is
/// `e_r = exp(-jk_inc . r) * e_inc` and `out[a]` accumulates
/// `((r - v_a) . e_r) * w` for each vertex `a`.
///
/// `out` is overwritten. The integral is over the reference triangle: no
/// Jacobian or edge-length factor is applied.
pub fn source_integral_plane_wave(
    rule: &TriangleQuadratureRule,
    vertices: &[[f64; 3]; 3],
    jk_inc: &[c64; 3],
    e_inc: &[c64; 3],
    out: &mut [c64; 3],
) {
    debug_assert!(rule.number_of_points() > 0);
    *out = [c64::zero(); 3];

    for ([xi, eta], weight) in rule.iter() {
        let zeta = 1.0 - xi - eta;
        let mut r = [0.0; 3];
        for (k, rk) in r.iter_mut().enumerate() {
            *rk = xi * vertices[0][k] + eta * vertices[1][k] + zeta * vertices[2][k];
        }

        let phase = exp_minus(dot_complex_real(jk_inc, &r));
        let e_r = [phase * e_inc[0], phase * e_inc[1], phase * e_inc[2]];

        for (o, v) in out.iter_mut().zip(vertices) {
            let rho = sub3(&r, v);
            *o += dot_complex_real(&e_r, &rho) * weight;
        }
    }
}
