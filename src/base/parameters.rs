use super::MaterialError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the normalization of the IMPL-EX error
///
/// ```text
/// error = |σ_explicit - σ_implicit| / norm
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImplexErrorNorm {
    /// norm = 1 (stress units)
    Absolute,

    /// norm = sy
    RelativeToYield,

    /// norm = max(|σ_implicit|, sy)
    RelativeToImplicit,
}

impl ImplexErrorNorm {
    /// Returns the code stored in flat buffers
    pub fn code(&self) -> f64 {
        match self {
            ImplexErrorNorm::Absolute => 0.0,
            ImplexErrorNorm::RelativeToYield => 1.0,
            ImplexErrorNorm::RelativeToImplicit => 2.0,
        }
    }

    /// Returns the normalization from the code stored in flat buffers
    pub fn from_code(code: f64) -> Result<Self, MaterialError> {
        if code == 0.0 {
            Ok(ImplexErrorNorm::Absolute)
        } else if code == 1.0 {
            Ok(ImplexErrorNorm::RelativeToYield)
        } else if code == 2.0 {
            Ok(ImplexErrorNorm::RelativeToImplicit)
        } else {
            Err(MaterialError::InvalidParameter("unknown IMPL-EX error normalization code"))
        }
    }
}

/// Holds the constants of the uniaxial Chaboche steel
///
/// The yield function and the backstress evolution are:
///
/// ```text
/// f = |σ - α1 - α2| - sy
/// dαi = Hi n dλ - γi αi dλ
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSteel {
    /// Young's modulus E
    pub young: f64,

    /// Yield stress sy
    pub sy: f64,

    /// First kinematic hardening modulus H1
    pub hh1: f64,

    /// Second kinematic hardening modulus H2
    pub hh2: f64,

    /// First saturation rate γ1
    pub gamma1: f64,

    /// Second saturation rate γ2
    pub gamma2: f64,

    /// Uses the IMPL-EX (extrapolated) integration instead of the implicit one
    pub implex: bool,

    /// Measures the IMPL-EX error against the implicit solution
    pub implex_control: bool,

    /// Error tolerance consumed by the host to reduce the time step
    pub implex_error_tolerance: f64,

    /// Lower bound of the time reduction factor advised to the host
    pub implex_time_reduction_limit: f64,

    /// The time increment is supplied with each trial strain
    ///
    /// Otherwise, each step advances one unit of pseudo-time.
    pub dtime_is_user_defined: bool,

    /// Normalization of the IMPL-EX error
    pub implex_error_norm: ImplexErrorNorm,
}

impl ParamSteel {
    /// Number of values written to flat buffers
    pub const NDATA: usize = 12;

    /// Allocates a new instance with IMPL-EX disabled
    pub fn new(young: f64, sy: f64, hh1: f64, hh2: f64, gamma1: f64, gamma2: f64) -> Result<Self, MaterialError> {
        let param = ParamSteel {
            young,
            sy,
            hh1,
            hh2,
            gamma1,
            gamma2,
            implex: false,
            implex_control: false,
            implex_error_tolerance: 0.05,
            implex_time_reduction_limit: 0.01,
            dtime_is_user_defined: false,
            implex_error_norm: ImplexErrorNorm::RelativeToYield,
        };
        param.validate()?;
        Ok(param)
    }

    /// Checks the admissible ranges of all constants
    pub fn validate(&self) -> Result<(), MaterialError> {
        let all = [
            self.young,
            self.sy,
            self.hh1,
            self.hh2,
            self.gamma1,
            self.gamma2,
            self.implex_error_tolerance,
            self.implex_time_reduction_limit,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(MaterialError::InvalidParameter("all constants must be finite"));
        }
        if self.young <= 0.0 {
            return Err(MaterialError::InvalidParameter("E must be > 0"));
        }
        if self.sy <= 0.0 {
            return Err(MaterialError::InvalidParameter("sy must be > 0"));
        }
        if self.hh1 < 0.0 || self.hh2 < 0.0 {
            return Err(MaterialError::InvalidParameter("hardening moduli must be ≥ 0"));
        }
        if self.gamma1 < 0.0 || self.gamma2 < 0.0 {
            return Err(MaterialError::InvalidParameter("saturation rates must be ≥ 0"));
        }
        if self.implex_error_tolerance <= 0.0 {
            return Err(MaterialError::InvalidParameter("IMPL-EX error tolerance must be > 0"));
        }
        if self.implex_time_reduction_limit <= 0.0 || self.implex_time_reduction_limit > 1.0 {
            return Err(MaterialError::InvalidParameter(
                "IMPL-EX time reduction limit must satisfy 0 < limit ≤ 1",
            ));
        }
        Ok(())
    }

    /// Enables or disables the IMPL-EX integration
    pub fn set_implex(&mut self, flag: bool) -> Result<&mut Self, MaterialError> {
        self.implex = flag;
        Ok(self)
    }

    /// Enables or disables the IMPL-EX error control
    pub fn set_implex_control(&mut self, flag: bool) -> Result<&mut Self, MaterialError> {
        self.implex_control = flag;
        Ok(self)
    }

    /// Sets the IMPL-EX error tolerance
    pub fn set_implex_error_tolerance(&mut self, value: f64) -> Result<&mut Self, MaterialError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(MaterialError::InvalidParameter("IMPL-EX error tolerance must be > 0"));
        }
        self.implex_error_tolerance = value;
        Ok(self)
    }

    /// Sets the lower bound of the advised time reduction factor
    pub fn set_implex_time_reduction_limit(&mut self, value: f64) -> Result<&mut Self, MaterialError> {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(MaterialError::InvalidParameter(
                "IMPL-EX time reduction limit must satisfy 0 < limit ≤ 1",
            ));
        }
        self.implex_time_reduction_limit = value;
        Ok(self)
    }

    /// Requires (or not) the time increment to be supplied with each trial strain
    pub fn set_dtime_is_user_defined(&mut self, flag: bool) -> Result<&mut Self, MaterialError> {
        self.dtime_is_user_defined = flag;
        Ok(self)
    }

    /// Sets the normalization of the IMPL-EX error
    pub fn set_implex_error_norm(&mut self, norm: ImplexErrorNorm) -> Result<&mut Self, MaterialError> {
        self.implex_error_norm = norm;
        Ok(self)
    }

    /// Writes the constants to a flat buffer
    ///
    /// Order: `E, sy, H1, H2, γ1, γ2, implex, implex_control, implex_error_tolerance,
    /// implex_time_reduction_limit, dtime_is_user_defined, implex_error_norm`
    pub fn pack(&self, data: &mut Vec<f64>) {
        data.push(self.young);
        data.push(self.sy);
        data.push(self.hh1);
        data.push(self.hh2);
        data.push(self.gamma1);
        data.push(self.gamma2);
        data.push(bool_to_f64(self.implex));
        data.push(bool_to_f64(self.implex_control));
        data.push(self.implex_error_tolerance);
        data.push(self.implex_time_reduction_limit);
        data.push(bool_to_f64(self.dtime_is_user_defined));
        data.push(self.implex_error_norm.code());
    }

    /// Reads the constants from a flat buffer written by [ParamSteel::pack]
    pub fn unpack(data: &[f64]) -> Result<Self, MaterialError> {
        if data.len() != ParamSteel::NDATA {
            return Err(MaterialError::BufferSizeMismatch {
                expected: ParamSteel::NDATA,
                actual: data.len(),
            });
        }
        let param = ParamSteel {
            young: data[0],
            sy: data[1],
            hh1: data[2],
            hh2: data[3],
            gamma1: data[4],
            gamma2: data[5],
            implex: f64_to_bool(data[6]),
            implex_control: f64_to_bool(data[7]),
            implex_error_tolerance: data[8],
            implex_time_reduction_limit: data[9],
            dtime_is_user_defined: f64_to_bool(data[10]),
            implex_error_norm: ImplexErrorNorm::from_code(data[11])?,
        };
        param.validate()?;
        Ok(param)
    }
}

/// Converts a flag into a buffer value
#[inline]
pub(crate) fn bool_to_f64(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Converts a buffer value into a flag
#[inline]
pub(crate) fn f64_to_bool(value: f64) -> bool {
    value != 0.0
}

impl fmt::Display for ParamSteel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E = {:?}\n", self.young)?;
        write!(f, "sy = {:?}\n", self.sy)?;
        write!(f, "H1 = {:?}, H2 = {:?}\n", self.hh1, self.hh2)?;
        write!(f, "gamma1 = {:?}, gamma2 = {:?}\n", self.gamma1, self.gamma2)?;
        write!(f, "implex = {}, implex_control = {}\n", self.implex, self.implex_control)?;
        write!(
            f,
            "implex_error_tolerance = {:?}, implex_time_reduction_limit = {:?}\n",
            self.implex_error_tolerance, self.implex_time_reduction_limit
        )?;
        write!(f, "dtime_is_user_defined = {}\n", self.dtime_is_user_defined)?;
        write!(f, "implex_error_norm = {:?}", self.implex_error_norm)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
