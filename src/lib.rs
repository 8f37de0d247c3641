//! RWG method-of-moments kernels
//!
//! Plane-wave excitation vectors and the conversion of face-pair interaction
//! integrals into Rao-Wilton-Glisson basis interactions, for flat triangle
//! surface meshes.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;

pub mod assembly;
pub mod basis;
pub mod grid;
pub mod helpers;
pub mod incident;
pub mod quadrature;
pub mod shapes;
pub mod traits;
pub mod types;
