//! Incident plane waves
use crate::helpers::{dot_complex, dot_complex_real, exp_minus};
use cauchy::c64;
use log::{debug, warn};

/// Speed of light in vacuum, in metres per second
pub const C0: f64 = 299_792_458.0;

/// Relative tolerance used by [`PlaneWave::diagnostics`]
const TRANSVERSE_TOLERANCE: f64 = 1e-10;

/// An incident plane wave `e_inc * exp(-jk_inc . r)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneWave {
    e_inc: [c64; 3],
    jk_inc: [c64; 3],
}

/// Properties of a plane wave that are legal but usually unintended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneWaveDiagnostics {
    /// The field is perpendicular to the propagation vector
    pub transverse: bool,
    /// The propagation vector is purely imaginary
    pub lossless: bool,
}

impl PlaneWave {
    /// Create a plane wave from its field vector and propagation vector.
    ///
    /// `jk_inc` is the wave vector multiplied by the imaginary unit. Neither
    /// vector is checked; see [`PlaneWave::check`].
    pub fn new(e_inc: [c64; 3], jk_inc: [c64; 3]) -> Self {
        Self { e_inc, jk_inc }
    }

    /// Create a plane wave travelling along `k_hat` at complex frequency `s`.
    ///
    /// The propagation vector is `s / C0 * k_hat`, so `s = j * omega` gives a
    /// lossless wave with wavenumber `omega / C0`.
    pub fn from_direction(s: c64, k_hat: [f64; 3], e_inc: [c64; 3]) -> Self {
        let scale = s / C0;
        Self {
            e_inc,
            jk_inc: [scale * k_hat[0], scale * k_hat[1], scale * k_hat[2]],
        }
    }

    /// The field vector
    pub fn e_inc(&self) -> &[c64; 3] {
        &self.e_inc
    }

    /// The propagation vector, multiplied by the imaginary unit
    pub fn jk_inc(&self) -> &[c64; 3] {
        &self.jk_inc
    }

    /// The same wave with its field scaled by `factor`
    pub fn scaled(&self, factor: c64) -> Self {
        Self {
            e_inc: self.e_inc.map(|e| e * factor),
            jk_inc: self.jk_inc,
        }
    }

    /// The field at a point
    pub fn field_at(&self, point: &[f64; 3]) -> [c64; 3] {
        let phase = exp_minus(dot_complex_real(&self.jk_inc, point));
        self.e_inc.map(|e| phase * e)
    }

    /// Check transversality and losslessness
    pub fn diagnostics(&self) -> PlaneWaveDiagnostics {
        let norm = |v: &[c64; 3]| v.iter().map(|x| x.norm_sqr()).sum::<f64>().sqrt();
        let jk_norm = norm(&self.jk_inc);
        let e_norm = norm(&self.e_inc);

        let transverse = dot_complex(&self.jk_inc, &self.e_inc).norm()
            <= TRANSVERSE_TOLERANCE * jk_norm * e_norm;
        let lossless = self
            .jk_inc
            .iter()
            .all(|x| x.re.abs() <= TRANSVERSE_TOLERANCE * jk_norm);

        PlaneWaveDiagnostics {
            transverse,
            lossless,
        }
    }

    /// Log unusual plane waves.
    ///
    /// Non-transverse and lossy waves are accepted by every kernel; this only
    /// reports them.
    pub fn check(&self) -> PlaneWaveDiagnostics {
        let d = self.diagnostics();
        if !d.transverse {
            warn!(
                "Incident field {:?} is not perpendicular to the propagation vector {:?}",
                self.e_inc, self.jk_inc
            );
        }
        if !d.lossless {
            debug!("Incident wave is evaluated at a complex frequency (jk = {:?})", self.jk_inc);
        }
        d
    }
}
