//! Type definitions.
use crate::types::RwgError;

/// Area of the reference triangle with vertices (0, 0), (1, 0), (0, 1).
pub const REFERENCE_TRIANGLE_AREA: f64 = 0.5;

/// Tolerance used when checking quadrature rules
const RULE_TOLERANCE: f64 = 1e-12;

/// Quadrature error
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QuadratureError {
    /// Rule not found
    #[error("No triangle rule with {0} points")]
    RuleNotFound(usize),
    /// A rule without points
    #[error("Quadrature rule has no points")]
    EmptyRule,
    /// Points and weights disagree in length
    #[error("Quadrature rule has {points} points but {weights} weights")]
    LengthMismatch {
        /// Number of points
        points: usize,
        /// Number of weights
        weights: usize,
    },
    /// The weights do not integrate constants exactly
    #[error("Quadrature weights sum to {0} instead of the reference area 0.5")]
    WeightSum(f64),
    /// A point outside the reference triangle
    #[error("Quadrature point {0} lies outside the reference triangle")]
    PointOutside(usize),
}

impl From<QuadratureError> for RwgError {
    fn from(e: QuadratureError) -> Self {
        RwgError::InvalidQuadrature(e.to_string())
    }
}

/// A numerical quadrature rule on the reference triangle.
///
/// Points are barycentric pairs `(xi, eta)`; the third coordinate is
/// `zeta = 1 - xi - eta`. A quadrature point maps to the physical position
/// `xi * v0 + eta * v1 + zeta * v2` on a triangle with vertices `v0, v1, v2`.
/// The weights sum to the area of the reference triangle, so integrating over
/// a physical triangle needs the extra factor `2 * area`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleQuadratureRule {
    /// The order of the quadrature rule.
    order: usize,
    /// The point coordinates of the quadrature rule.
    ///
    /// The vector points stores all points in consecutive order: the first
    /// point is at positions 0 and 1, the second at positions 2 and 3.
    points: Vec<f64>,
    /// The weights of the quadrature rule.
    weights: Vec<f64>,
}

impl TriangleQuadratureRule {
    /// Create a rule from consecutive `(xi, eta)` pairs and weights.
    ///
    /// The rule is checked before it is returned: it must have at least one
    /// point, the same number of points and weights, points inside the
    /// reference triangle and weights summing to [`REFERENCE_TRIANGLE_AREA`].
    pub fn new(order: usize, points: Vec<f64>, weights: Vec<f64>) -> Result<Self, QuadratureError> {
        if weights.is_empty() {
            return Err(QuadratureError::EmptyRule);
        }
        if points.len() != 2 * weights.len() {
            return Err(QuadratureError::LengthMismatch {
                points: points.len() / 2,
                weights: weights.len(),
            });
        }
        for (i, p) in points.chunks_exact(2).enumerate() {
            let zeta = 1.0 - p[0] - p[1];
            if p[0] < -RULE_TOLERANCE || p[1] < -RULE_TOLERANCE || zeta < -RULE_TOLERANCE {
                return Err(QuadratureError::PointOutside(i));
            }
        }
        let total: f64 = weights.iter().sum();
        if (total - REFERENCE_TRIANGLE_AREA).abs() > RULE_TOLERANCE {
            return Err(QuadratureError::WeightSum(total));
        }
        Ok(Self {
            order,
            points,
            weights,
        })
    }

    /// Create a rule from a list of `[xi, eta]` pairs.
    pub fn from_xi_eta(
        order: usize,
        xi_eta: &[[f64; 2]],
        weights: &[f64],
    ) -> Result<Self, QuadratureError> {
        Self::new(
            order,
            xi_eta.iter().flatten().copied().collect(),
            weights.to_vec(),
        )
    }

    /// The polynomial order integrated exactly.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Return the number of quadrature points.
    pub fn number_of_points(&self) -> usize {
        self.weights.len()
    }

    /// The weights of the rule.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The points of the rule, stored as consecutive `(xi, eta)` pairs.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Iterate over `([xi, eta], weight)`.
    pub fn iter(&self) -> impl Iterator<Item = ([f64; 2], f64)> + '_ {
        self.points
            .chunks_exact(2)
            .zip(self.weights.iter())
            .map(|(p, w)| ([p[0], p[1]], *w))
    }
}
