//! Implements the uniaxial steel material and its integration algorithms

mod implex_error;
mod introspection;
mod return_mapping;
mod steel1d;
mod steel_state;
mod uniaxial_material;
pub use crate::material::implex_error::*;
pub use crate::material::introspection::*;
pub use crate::material::return_mapping::*;
pub use crate::material::steel1d::*;
pub use crate::material::steel_state::*;
pub use crate::material::uniaxial_material::*;
