//! Assembly of excitation vectors and RWG interaction matrices
pub(crate) mod common;
pub mod face_to_rwg;
pub mod source;
pub mod voltage;

pub use face_to_rwg::{
    face_to_rwg, ConverterOptions, FacePairInteraction, FaceTensors, RwgMatrices,
    SparseFaceTensors,
};
pub use source::source_integral_plane_wave;
pub use voltage::{voltage_plane_wave, VoltageAssembler, VoltageAssemblerOptions};
