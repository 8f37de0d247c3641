//! Get rules on the reference triangle.

use crate::quadrature::simplex_rule_definitions::TRIANGLE_RULE_DEFINITIONS;
use crate::quadrature::types::{QuadratureError, TriangleQuadratureRule};

/// Return a triangle rule for a given number of points.
///
/// If the rule does not exist `Err(QuadratureError::RuleNotFound)` is returned.
pub fn triangle_rule(npoints: usize) -> Result<TriangleQuadratureRule, QuadratureError> {
    if let Some((order, points, weights)) = TRIANGLE_RULE_DEFINITIONS.get(&npoints) {
        TriangleQuadratureRule::new(*order, points.to_vec(), weights.to_vec())
    } else {
        Err(QuadratureError::RuleNotFound(npoints))
    }
}

/// Return the numbers of points for which triangle rules are available, in increasing order.
pub fn available_rules() -> Vec<usize> {
    let mut rules = TRIANGLE_RULE_DEFINITIONS
        .keys()
        .copied()
        .collect::<Vec<_>>();
    rules.sort_unstable();
    rules
}
