use super::{extrapolated_increment, implex_update, implicit_update};
use super::{ImplexError, ParameterId, ResponseId, SteelState, UniaxialMaterial};
use crate::base::{bool_to_f64, f64_to_bool, ImplexErrorNorm, MaterialError, ParamSteel};
use std::fmt;

/// Implements the uniaxial steel with two Chaboche backstresses
///
/// The material holds a trial and a committed [SteelState]. The trial state is
/// always computed from the committed state, so repeated calls to
/// `set_trial_strain` with the same strain give identical results.
///
/// With IMPL-EX, the trial state is extrapolated from the committed history and
/// the implicit solution is computed at commit, so the committed internal
/// variables always satisfy the yield condition.
#[derive(Clone, Debug)]
pub struct Steel1D {
    /// Material constants
    param: ParamSteel,

    /// Current iterate
    trial: SteelState,

    /// Last converged state
    committed: SteelState,

    /// Plastic multiplier before the last commit (for IMPL-EX)
    lambda_commit_old: f64,

    /// Time increment of the current step
    dtime_n: f64,

    /// Time increment of the last committed step
    dtime_n_commit: f64,

    /// Time increment of the first step
    dtime_0: f64,

    /// At least one commit was performed since the virgin state
    commit_done: bool,

    /// Last measured IMPL-EX error (kept after revert so that the host can read it)
    implex_error: ImplexError,

    /// Constants were given by `new` or `recv_self`
    initialized: bool,
}

impl Steel1D {
    /// Number of state values written to flat buffers
    pub const NSTATE: usize = 2 * SteelState::NDATA + 7;

    /// Total number of values written to flat buffers
    pub const NDATA: usize = ParamSteel::NDATA + Steel1D::NSTATE;

    /// Allocates a new instance in the virgin state
    pub fn new(param: ParamSteel) -> Result<Self, MaterialError> {
        param.validate()?;
        let virgin = SteelState::new(param.young);
        Ok(Steel1D {
            param,
            trial: virgin,
            committed: virgin,
            lambda_commit_old: 0.0,
            dtime_n: 0.0,
            dtime_n_commit: 0.0,
            dtime_0: 0.0,
            commit_done: false,
            implex_error: ImplexError::zero(&param, 0.0),
            initialized: true,
        })
    }

    /// Returns the material constants
    pub fn param(&self) -> &ParamSteel {
        &self.param
    }

    /// Returns the trial state
    pub fn trial_state(&self) -> &SteelState {
        &self.trial
    }

    /// Returns the committed state
    pub fn committed_state(&self) -> &SteelState {
        &self.committed
    }

    /// Returns the plastic multiplier before the last commit
    pub fn lambda_commit_old(&self) -> f64 {
        self.lambda_commit_old
    }

    /// Indicates that at least one commit was performed since the virgin state
    pub fn commit_done(&self) -> bool {
        self.commit_done
    }

    /// Returns the IMPL-EX error measured at the last trial strain
    ///
    /// The error is zero if the IMPL-EX control is disabled.
    pub fn implex_error(&self) -> ImplexError {
        self.implex_error
    }

    /// Returns the value of a material constant
    pub fn parameter(&self, id: ParameterId) -> f64 {
        let p = &self.param;
        match id {
            ParameterId::Young => p.young,
            ParameterId::YieldStress => p.sy,
            ParameterId::Hardening1 => p.hh1,
            ParameterId::Hardening2 => p.hh2,
            ParameterId::Saturation1 => p.gamma1,
            ParameterId::Saturation2 => p.gamma2,
            ParameterId::Implex => bool_to_f64(p.implex),
            ParameterId::ImplexControl => bool_to_f64(p.implex_control),
            ParameterId::ImplexErrorTolerance => p.implex_error_tolerance,
            ParameterId::ImplexTimeReductionLimit => p.implex_time_reduction_limit,
        }
    }

    /// Updates a material constant
    ///
    /// The whole set is validated again; the constants are unchanged on error.
    pub fn set_parameter(&mut self, id: ParameterId, value: f64) -> Result<(), MaterialError> {
        let mut p = self.param;
        match id {
            ParameterId::Young => p.young = value,
            ParameterId::YieldStress => p.sy = value,
            ParameterId::Hardening1 => p.hh1 = value,
            ParameterId::Hardening2 => p.hh2 = value,
            ParameterId::Saturation1 => p.gamma1 = value,
            ParameterId::Saturation2 => p.gamma2 = value,
            ParameterId::Implex => p.implex = f64_to_bool(value),
            ParameterId::ImplexControl => p.implex_control = f64_to_bool(value),
            ParameterId::ImplexErrorTolerance => p.implex_error_tolerance = value,
            ParameterId::ImplexTimeReductionLimit => p.implex_time_reduction_limit = value,
        }
        p.validate()?;
        self.param = p;
        Ok(())
    }

    /// Returns a derived output
    pub fn get_response(&self, id: ResponseId) -> Vec<f64> {
        match id {
            ResponseId::Stress => vec![self.trial.stress],
            ResponseId::Strain => vec![self.trial.strain],
            ResponseId::Tangent => vec![self.trial.tangent],
            ResponseId::Energy => vec![self.trial.energy],
            ResponseId::ImplexError => self.implex_error.as_vec(),
            ResponseId::BackStress => vec![self.trial.alpha1, self.trial.alpha2],
            ResponseId::PlasticMultiplier => vec![self.trial.lambda],
        }
    }

    /// Returns an error if the constants were never given
    fn check_initialized(&self) -> Result<(), MaterialError> {
        if self.initialized {
            Ok(())
        } else {
            Err(MaterialError::Uninitialized)
        }
    }

    /// Returns the time increment of the current step
    fn resolve_dtime(&self, dtime: Option<f64>) -> Result<f64, MaterialError> {
        if !self.param.dtime_is_user_defined {
            if let Some(value) = dtime {
                tracing::debug!(dtime = value, "ignoring Δt because it is not user-defined");
            }
            return Ok(1.0);
        }
        match dtime {
            Some(value) => {
                if !value.is_finite() || value < 0.0 {
                    return Err(MaterialError::InvalidTimeIncrement(value));
                }
                Ok(value)
            }
            None => Err(MaterialError::MissingTimeIncrement),
        }
    }
}

impl Default for Steel1D {
    /// Allocates an empty instance to be filled by `recv_self`
    fn default() -> Self {
        let param = ParamSteel {
            young: 0.0,
            sy: 0.0,
            hh1: 0.0,
            hh2: 0.0,
            gamma1: 0.0,
            gamma2: 0.0,
            implex: false,
            implex_control: false,
            implex_error_tolerance: 0.0,
            implex_time_reduction_limit: 0.0,
            dtime_is_user_defined: false,
            implex_error_norm: ImplexErrorNorm::RelativeToYield,
        };
        let virgin = SteelState::new(0.0);
        Steel1D {
            param,
            trial: virgin,
            committed: virgin,
            lambda_commit_old: 0.0,
            dtime_n: 0.0,
            dtime_n_commit: 0.0,
            dtime_0: 0.0,
            commit_done: false,
            implex_error: ImplexError::zero(&param, 0.0),
            initialized: false,
        }
    }
}

impl UniaxialMaterial for Steel1D {
    fn class_type(&self) -> &'static str {
        "Steel1D"
    }

    fn set_trial_strain(&mut self, strain: f64, dtime: Option<f64>) -> Result<(), MaterialError> {
        self.check_initialized()?;

        // time increments
        self.dtime_n = self.resolve_dtime(dtime)?;
        if !self.commit_done {
            self.dtime_0 = self.dtime_n;
            self.dtime_n_commit = self.dtime_n;
        }
        if !(self.param.implex && self.param.implex_control) {
            self.implex_error = ImplexError::zero(&self.param, self.dtime_0);
        }

        // implicit integration
        if !self.param.implex {
            self.trial = implicit_update(&self.param, &self.committed, strain)?;
            return Ok(());
        }

        // explicit (extrapolated) integration
        let dlambda = extrapolated_increment(
            self.committed.lambda,
            self.lambda_commit_old,
            self.dtime_n,
            self.dtime_n_commit,
        );
        let explicit = implex_update(&self.param, &self.committed, strain, dlambda);

        // error control
        if self.param.implex_control {
            let implicit = implicit_update(&self.param, &self.committed, strain)?;
            self.implex_error = ImplexError::measure(&self.param, explicit.stress, implicit.stress, self.dtime_0);
        }
        self.trial = explicit;
        Ok(())
    }

    fn strain(&self) -> f64 {
        self.trial.strain
    }

    fn stress(&self) -> f64 {
        self.trial.stress
    }

    fn tangent(&self) -> f64 {
        self.trial.tangent
    }

    fn initial_tangent(&self) -> f64 {
        self.param.young
    }

    fn energy(&self) -> f64 {
        self.trial.energy
    }

    fn commit_state(&mut self) -> Result<(), MaterialError> {
        self.check_initialized()?;

        // implicit stage of IMPL-EX
        let next = if self.param.implex {
            implicit_update(&self.param, &self.committed, self.trial.strain)?
        } else {
            self.trial
        };

        // shift history
        self.lambda_commit_old = self.committed.lambda;
        self.committed = next;
        self.trial = next;
        self.dtime_n_commit = self.dtime_n;
        self.commit_done = true;
        Ok(())
    }

    fn revert_to_last_commit(&mut self) -> Result<(), MaterialError> {
        self.check_initialized()?;
        self.trial = self.committed;
        self.dtime_n = self.dtime_n_commit;
        Ok(())
    }

    fn revert_to_start(&mut self) -> Result<(), MaterialError> {
        self.check_initialized()?;
        let virgin = SteelState::new(self.param.young);
        self.trial = virgin;
        self.committed = virgin;
        self.lambda_commit_old = 0.0;
        self.dtime_n = 0.0;
        self.dtime_n_commit = 0.0;
        self.dtime_0 = 0.0;
        self.commit_done = false;
        self.implex_error = ImplexError::zero(&self.param, 0.0);
        Ok(())
    }

    /// Writes the parameters and the state to a flat buffer
    ///
    /// Order:
    ///
    /// ```text
    /// [0..12)  parameters (see ParamSteel::pack)
    /// [12..20) trial state (see SteelState::pack)
    /// [20..28) committed state
    /// [28]     λ before the last commit
    /// [29]     Δt of the current step
    /// [30]     Δt of the last committed step
    /// [31]     Δt of the first step
    /// [32]     commit done flag
    /// [33]     IMPL-EX error
    /// [34]     IMPL-EX suggested time factor
    /// ```
    fn send_self(&self) -> Vec<f64> {
        let mut data = Vec::with_capacity(Steel1D::NDATA);
        self.param.pack(&mut data);
        self.trial.pack(&mut data);
        self.committed.pack(&mut data);
        data.push(self.lambda_commit_old);
        data.push(self.dtime_n);
        data.push(self.dtime_n_commit);
        data.push(self.dtime_0);
        data.push(bool_to_f64(self.commit_done));
        data.push(self.implex_error.error);
        data.push(self.implex_error.suggested_time_factor);
        data
    }

    fn recv_self(&mut self, data: &[f64]) -> Result<(), MaterialError> {
        if data.len() != Steel1D::NDATA {
            return Err(MaterialError::BufferSizeMismatch {
                expected: Steel1D::NDATA,
                actual: data.len(),
            });
        }
        let np = ParamSteel::NDATA;
        let ns = SteelState::NDATA;
        let param = ParamSteel::unpack(&data[0..np])?;
        let trial = SteelState::unpack(&data[np..(np + ns)])?;
        let committed = SteelState::unpack(&data[(np + ns)..(np + 2 * ns)])?;
        let rest = &data[(np + 2 * ns)..];
        let dtime_0 = rest[3];
        let mut implex_error = ImplexError::zero(&param, dtime_0);
        implex_error.error = rest[5];
        implex_error.suggested_time_factor = rest[6];
        *self = Steel1D {
            param,
            trial,
            committed,
            lambda_commit_old: rest[0],
            dtime_n: rest[1],
            dtime_n_commit: rest[2],
            dtime_0,
            commit_done: f64_to_bool(rest[4]),
            implex_error,
            initialized: true,
        };
        Ok(())
    }

    fn update_parameter(&mut self, name: &str, value: f64) -> Result<(), MaterialError> {
        let id = ParameterId::from_name(name)?;
        self.set_parameter(id, value)
    }

    fn response(&self, name: &str) -> Result<Vec<f64>, MaterialError> {
        let id = ResponseId::from_name(name)?;
        Ok(self.get_response(id))
    }

    fn boxed_copy(&self) -> Box<dyn UniaxialMaterial> {
        Box::new(self.clone())
    }
}

impl fmt::Display for Steel1D {
    /// Prints the constants and both states
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Steel1D\n=======\n{}\n", self.param)?;
        write!(f, "\nTrial state\n-----------\n{}\n", self.trial)?;
        write!(f, "\nCommitted state\n---------------\n{}\n", self.committed)?;
        write!(f, "\nλ_old = {:?}, commit_done = {}", self.lambda_commit_old, self.commit_done)?;
        if self.param.implex_control {
            write!(f, "\n{}", self.implex_error)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
