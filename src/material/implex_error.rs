use crate::base::{ImplexErrorNorm, ParamSteel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the IMPL-EX error measured at the last trial strain and the advice derived from it
///
/// The material never rejects a step; the host decides whether to reduce the time
/// increment based on these values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImplexError {
    /// Normalized difference between the explicit and implicit stresses
    pub error: f64,

    /// Tolerance configured in the parameters
    pub tolerance: f64,

    /// Lower bound of the time reduction factor configured in the parameters
    pub time_reduction_limit: f64,

    /// Factor to multiply the current time increment with (1 if the error is acceptable)
    pub suggested_time_factor: f64,

    /// Smallest time increment the host is advised to use (limit × first Δt)
    pub min_dtime: f64,
}

impl ImplexError {
    /// Returns the values corresponding to a zero error
    pub fn zero(param: &ParamSteel, dtime_0: f64) -> Self {
        ImplexError {
            error: 0.0,
            tolerance: param.implex_error_tolerance,
            time_reduction_limit: param.implex_time_reduction_limit,
            suggested_time_factor: 1.0,
            min_dtime: param.implex_time_reduction_limit * dtime_0,
        }
    }

    /// Measures the error between the explicit and implicit stresses
    ///
    /// ```text
    /// error  = |σ_explicit - σ_implicit| / norm
    /// factor = max(limit, min(1, √(tol / error)))
    /// ```
    ///
    /// The square root reflects the second-order accuracy of the linear extrapolation.
    pub fn measure(param: &ParamSteel, stress_explicit: f64, stress_implicit: f64, dtime_0: f64) -> Self {
        let norm = match param.implex_error_norm {
            ImplexErrorNorm::Absolute => 1.0,
            ImplexErrorNorm::RelativeToYield => param.sy,
            ImplexErrorNorm::RelativeToImplicit => f64::max(f64::abs(stress_implicit), param.sy),
        };
        let error = f64::abs(stress_explicit - stress_implicit) / norm;
        let tol = param.implex_error_tolerance;
        let limit = param.implex_time_reduction_limit;
        let suggested_time_factor = if error <= tol {
            1.0
        } else {
            f64::max(limit, f64::sqrt(tol / error))
        };
        if error > tol {
            tracing::warn!(error, tol, suggested_time_factor, "IMPL-EX error exceeds the tolerance");
        } else {
            tracing::debug!(error, "IMPL-EX error");
        }
        ImplexError {
            error,
            tolerance: tol,
            time_reduction_limit: limit,
            suggested_time_factor,
            min_dtime: limit * dtime_0,
        }
    }

    /// Indicates whether the error is within the tolerance
    pub fn acceptable(&self) -> bool {
        self.error <= self.tolerance
    }

    /// Returns the values as a vector `[error, tolerance, limit, factor, min_dtime]`
    pub fn as_vec(&self) -> Vec<f64> {
        vec![
            self.error,
            self.tolerance,
            self.time_reduction_limit,
            self.suggested_time_factor,
            self.min_dtime,
        ]
    }
}

impl fmt::Display for ImplexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IMPL-EX error = {:?} (tolerance = {:?}), suggested Δt factor = {:?} (min Δt = {:?})",
            self.error, self.tolerance, self.suggested_time_factor, self.min_dtime
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
