//! Quadrature rules on the reference triangle

mod simplex_rule_definitions;
pub mod simplex_rules;
pub mod types;

pub use simplex_rules::{available_rules, triangle_rule};
pub use types::{QuadratureError, TriangleQuadratureRule, REFERENCE_TRIANGLE_AREA};
