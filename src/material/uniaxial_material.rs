use crate::base::MaterialError;

/// Specifies the functions a host analysis engine calls on a uniaxial material point
///
/// Each step consists of zero or more calls to `set_trial_strain` followed by
/// exactly one of `commit_state`, `revert_to_last_commit` or `revert_to_start`.
pub trait UniaxialMaterial: Send {
    /// Returns the name of the material class
    fn class_type(&self) -> &'static str;

    /// Computes the trial state for the given total strain
    ///
    /// `dtime` is the time increment of the step; it is required only if the
    /// material was configured with a user-defined time increment.
    fn set_trial_strain(&mut self, strain: f64, dtime: Option<f64>) -> Result<(), MaterialError>;

    /// Returns the trial strain
    fn strain(&self) -> f64;

    /// Returns the trial stress
    fn stress(&self) -> f64;

    /// Returns the trial tangent dσ/dε
    fn tangent(&self) -> f64;

    /// Returns the elastic tangent
    fn initial_tangent(&self) -> f64;

    /// Returns the accumulated dissipated energy at the trial state
    fn energy(&self) -> f64;

    /// Accepts the trial state as the new committed state
    fn commit_state(&mut self) -> Result<(), MaterialError>;

    /// Discards the trial state
    fn revert_to_last_commit(&mut self) -> Result<(), MaterialError>;

    /// Brings the material back to the virgin state
    fn revert_to_start(&mut self) -> Result<(), MaterialError>;

    /// Writes the parameters and the state to a flat buffer
    fn send_self(&self) -> Vec<f64>;

    /// Reads the parameters and the state from a flat buffer written by `send_self`
    fn recv_self(&mut self, data: &[f64]) -> Result<(), MaterialError>;

    /// Updates a named parameter
    fn update_parameter(&mut self, name: &str, value: f64) -> Result<(), MaterialError>;

    /// Returns a named response
    fn response(&self, name: &str) -> Result<Vec<f64>, MaterialError>;

    /// Returns a copy of this material (with its current state)
    fn boxed_copy(&self) -> Box<dyn UniaxialMaterial>;
}
