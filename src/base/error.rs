use thiserror::Error;

/// Defines the errors reported by the material and its utilities
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MaterialError {
    /// A material constant is out of its admissible range
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The local Newton iterations of the return mapping did not converge
    #[error("return mapping failed to converge after {iterations} iterations (residual = {residual:e})")]
    ReturnMappingFailed { iterations: usize, residual: f64 },

    /// The flat buffer given to `recv_self` does not have the expected length
    #[error("buffer size mismatch: expected {expected} values, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A user-defined time increment is required but was not supplied
    #[error("Δt must be supplied when dtime_is_user_defined is true")]
    MissingTimeIncrement,

    /// The supplied time increment is negative or not finite
    #[error("Δt must be finite and ≥ 0 (got {0})")]
    InvalidTimeIncrement(f64),

    /// The material was default-constructed and never restored with `recv_self`
    #[error("material is not initialized; call recv_self first")]
    Uninitialized,

    /// A named parameter or response is not recognized
    #[error("unknown name: {0}")]
    UnknownName(String),

    /// Reading or writing a file failed
    #[error("io error: {0}")]
    Io(String),

    /// Generating a figure failed
    #[error("plot error: {0}")]
    Plot(&'static str),
}

impl MaterialError {
    /// Indicates a numerical failure of the stress update (as opposed to a usage error)
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, MaterialError::ReturnMappingFailed { .. })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
