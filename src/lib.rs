//! Steel1D: uniaxial steel with two nonlinear kinematic hardening terms
//!
//! The material follows the Chaboche model with two backstresses and may be
//! integrated with an implicit return mapping (Newton iterations on the
//! plastic multiplier) or with the IMPL-EX scheme, which extrapolates the
//! plastic multiplier from the two previous committed steps and reports an
//! error estimate that a host may use to adapt the time increment.
//!
//! # Example
//!
//! ```
//! use steel1d::prelude::*;
//!
//! fn main() -> Result<(), MaterialError> {
//!     let param = ParamSteel::new(200_000.0, 250.0, 1000.0, 5000.0, 10.0, 50.0)?;
//!     let mut steel = Steel1D::new(param)?;
//!     steel.set_trial_strain(0.002, None)?;
//!     steel.commit_state()?;
//!     assert!(steel.stress() < 200_000.0 * 0.002);
//!     assert!(steel.tangent() > 0.0 && steel.tangent() < steel.initial_tangent());
//!     Ok(())
//! }
//! ```

pub mod base;
pub mod material;
pub mod prelude;
pub mod util;
