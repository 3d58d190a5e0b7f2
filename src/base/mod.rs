//! Implements the base structures: errors, parameters, and constants

mod constants;
mod error;
mod parameters;
mod sample_params;
mod testing;
pub use crate::base::constants::*;
pub use crate::base::error::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
pub use crate::base::testing::*;
