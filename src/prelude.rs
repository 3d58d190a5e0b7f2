//! Makes available common structures needed to run a material point
//!
//! You may write `use steel1d::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{ImplexErrorNorm, MaterialError, ParamSteel, SampleParams, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::material::{ImplexError, Steel1D, SteelState, UniaxialMaterial};
pub use crate::util::{Driver, History, StrainPath};
