//! Small vector and complex helpers used by the kernels
use cauchy::c64;

/// Compute `exp(-z)` from real-valued functions only.
///
/// The result is `exp(-Re z) * (cos(-Im z) + i sin(-Im z))`, evaluated with
/// the real `exp`, `cos` and `sin` only.
#[inline]
pub fn exp_minus(z: c64) -> c64 {
    let magnitude = (-z.re).exp();
    let phase = -z.im;
    c64::new(magnitude * phase.cos(), magnitude * phase.sin())
}

/// Dot product of a complex and a real 3-vector.
#[inline]
pub fn dot_complex_real(a: &[c64; 3], b: &[f64; 3]) -> c64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Dot product of two complex 3-vectors, without conjugation.
#[inline]
pub fn dot_complex(a: &[c64; 3], b: &[c64; 3]) -> c64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Difference `a - b` of two points.
#[inline]
pub fn sub3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Cross product of two real 3-vectors.
#[inline]
pub fn cross3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean norm of a real 3-vector.
#[inline]
pub fn norm3(a: &[f64; 3]) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_minus_matches_definition() {
        for (re, im) in [(0.0, 0.0), (0.3, -1.2), (-2.0, 7.5), (1.0e-3, 100.0)] {
            let z = c64::new(re, im);
            let value = exp_minus(z);
            let expected_abs = f64::exp(-re);
            assert_relative_eq!(value.norm(), expected_abs, max_relative = 1e-14);
            assert_relative_eq!(value.re, expected_abs * f64::cos(im), epsilon = 1e-14);
            assert_relative_eq!(value.im, -expected_abs * f64::sin(im), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_exp_minus_of_zero_is_one() {
        assert_eq!(exp_minus(c64::new(0.0, 0.0)), c64::new(1.0, 0.0));
    }

    #[test]
    fn test_cross_product() {
        assert_eq!(cross3(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross3(&[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_dot_products() {
        let a = [c64::new(1.0, 1.0), c64::new(0.0, 2.0), c64::new(-1.0, 0.0)];
        assert_eq!(dot_complex_real(&a, &[1.0, 2.0, 3.0]), c64::new(-2.0, 5.0));
        let b = [c64::new(0.0, 1.0), c64::new(1.0, 0.0), c64::new(0.0, 0.0)];
        assert_eq!(dot_complex(&a, &b), c64::new(-1.0, 3.0));
    }
}
