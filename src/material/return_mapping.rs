//! Implements the stress update of the uniaxial Chaboche steel
//!
//! All functions are pure: the next trial state is computed from the
//! committed state, the trial strain and the parameters only.
//!
//! With the flow sign n fixed over the step, the backward-Euler update of
//! each Armstrong-Frederick backstress is
//!
//! ```text
//! αi = αi_c + Hi n Δλ - γi αi Δλ
//!    = (αi_c + Hi n Δλ) / (1 + γi Δλ)
//! ```
//!
//! and the stress is corrected by `σ = σ_trial - n E Δλ`.

use crate::base::{MaterialError, ParamSteel};
use crate::base::{RETURN_MAPPING_MIN_DERIVATIVE, RETURN_MAPPING_N_MAX, RETURN_MAPPING_TOL};
use crate::material::SteelState;

/// Returns the sign of ξ or the fallback value if ξ is zero
#[inline]
fn sign_or(xi: f64, fallback: f64) -> f64 {
    if xi > 0.0 {
        1.0
    } else if xi < 0.0 {
        -1.0
    } else {
        fallback
    }
}

/// Calculates one backstress after the increment Δλ
#[inline]
fn backstress(alpha_c: f64, hh: f64, gamma: f64, n: f64, dlambda: f64) -> f64 {
    (alpha_c + hh * n * dlambda) / (1.0 + gamma * dlambda)
}

/// Calculates the hardening slope h = n (dα1/dΔλ + dα2/dΔλ)
///
/// ```text
/// h = Σ (Hi - γi n αi_c) / (1 + γi Δλ)²
/// ```
#[inline]
fn hardening_slope(param: &ParamSteel, committed: &SteelState, n: f64, dlambda: f64) -> f64 {
    let d1 = 1.0 + param.gamma1 * dlambda;
    let d2 = 1.0 + param.gamma2 * dlambda;
    (param.hh1 - param.gamma1 * n * committed.alpha1) / (d1 * d1)
        + (param.hh2 - param.gamma2 * n * committed.alpha2) / (d2 * d2)
}

/// Calculates the elastic trial stress σ_trial = σ_c + E (ε - ε_c)
#[inline]
pub fn trial_stress(param: &ParamSteel, committed: &SteelState, strain: f64) -> f64 {
    committed.stress + param.young * (strain - committed.strain)
}

/// Returns the state after an elastic step
fn elastic_state(param: &ParamSteel, committed: &SteelState, strain: f64, sigma_trial: f64, n: f64) -> SteelState {
    SteelState {
        alpha1: committed.alpha1,
        alpha2: committed.alpha2,
        lambda: committed.lambda,
        flow_sign: n,
        strain,
        stress: sigma_trial,
        tangent: param.young,
        energy: committed.energy,
    }
}

/// Returns the state after a plastic step with a known Δλ
///
/// The tangent is the elastoplastic modulus `C = E h / (E + h)`.
fn plastic_state(
    param: &ParamSteel,
    committed: &SteelState,
    strain: f64,
    sigma_trial: f64,
    n: f64,
    dlambda: f64,
) -> SteelState {
    let young = param.young;
    let stress = sigma_trial - n * young * dlambda;
    let hh = hardening_slope(param, committed, n, dlambda);
    SteelState {
        alpha1: backstress(committed.alpha1, param.hh1, param.gamma1, n, dlambda),
        alpha2: backstress(committed.alpha2, param.hh2, param.gamma2, n, dlambda),
        lambda: committed.lambda + dlambda,
        flow_sign: n,
        strain,
        stress,
        tangent: young * hh / (young + hh),
        energy: committed.energy + 0.5 * (stress + committed.stress) * n * dlambda,
    }
}

/// Performs the implicit return mapping
///
/// Solves the consistency condition for Δλ ≥ 0 with Newton's method:
///
/// ```text
/// r(Δλ) = n (σ_trial - α1(Δλ) - α2(Δλ)) - E Δλ - sy = 0
/// dr/dΔλ = -(E + h(Δλ))
/// ```
///
/// On convergence, the tangent is the consistent tangent `C = E h / (E + h)`.
///
/// # Errors
///
/// Returns [MaterialError::ReturnMappingFailed] if the residual does not drop below
/// the tolerance within the maximum number of iterations.
pub fn implicit_update(param: &ParamSteel, committed: &SteelState, strain: f64) -> Result<SteelState, MaterialError> {
    // elastic predictor
    let sigma_trial = trial_stress(param, committed, strain);
    let xi_trial = sigma_trial - committed.backstress();
    let n = sign_or(xi_trial, committed.flow_sign);
    let f_trial = f64::abs(xi_trial) - param.sy;
    if f_trial <= 0.0 {
        return Ok(elastic_state(param, committed, strain, sigma_trial, n));
    }

    // plastic corrector
    let young = param.young;
    let tol = RETURN_MAPPING_TOL * param.sy;
    let mut dlambda = 0.0;
    let mut residual = f_trial;
    let mut iterations = 0;
    for it in 0..RETURN_MAPPING_N_MAX {
        iterations = it + 1;
        let alpha1 = backstress(committed.alpha1, param.hh1, param.gamma1, n, dlambda);
        let alpha2 = backstress(committed.alpha2, param.hh2, param.gamma2, n, dlambda);
        residual = n * (sigma_trial - alpha1 - alpha2) - young * dlambda - param.sy;
        if f64::abs(residual) <= tol {
            let hh = hardening_slope(param, committed, n, dlambda);
            if young + hh <= 0.0 {
                break;
            }
            tracing::debug!(iterations = it, dlambda, residual, "return mapping converged");
            return Ok(plastic_state(param, committed, strain, sigma_trial, n, dlambda));
        }
        let drdl = -(young + hardening_slope(param, committed, n, dlambda));
        if f64::abs(drdl) < RETURN_MAPPING_MIN_DERIVATIVE {
            break;
        }
        dlambda -= residual / drdl;
        if !dlambda.is_finite() {
            break;
        }
        dlambda = f64::max(dlambda, 0.0);
    }
    tracing::warn!(strain, iterations, residual, "return mapping failed");
    Err(MaterialError::ReturnMappingFailed { iterations, residual })
}

/// Calculates the IMPL-EX extrapolation of the plastic multiplier increment
///
/// ```text
/// Δλ = max(0, (Δt_n / Δt_n_commit) (λ_c - λ_old))
/// ```
///
/// A zero increment is returned if the previous time increment is not positive.
#[inline]
pub fn extrapolated_increment(lambda_commit: f64, lambda_commit_old: f64, dtime_n: f64, dtime_n_commit: f64) -> f64 {
    if dtime_n_commit <= 0.0 {
        return 0.0;
    }
    let ratio = dtime_n / dtime_n_commit;
    f64::max(0.0, ratio * (lambda_commit - lambda_commit_old))
}

/// Performs the explicit (IMPL-EX) update with an extrapolated Δλ
///
/// No iterations are performed: the backstresses and the stress follow the
/// same formulas as the implicit update, with the flow sign frozen at the last
/// commit. The yield condition may be violated by the result.
///
/// The tangent is the elastoplastic modulus evaluated at the extrapolated Δλ
/// (or E if Δλ = 0), which does not depend on the strain over the step.
pub fn implex_update(param: &ParamSteel, committed: &SteelState, strain: f64, dlambda: f64) -> SteelState {
    let sigma_trial = trial_stress(param, committed, strain);
    let n = committed.flow_sign;
    if dlambda <= 0.0 || n == 0.0 {
        return elastic_state(param, committed, strain, sigma_trial, n);
    }
    plastic_state(param, committed, strain, sigma_trial, n, dlambda)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{extrapolated_increment, implex_update, implicit_update, trial_stress};
    use crate::base::{approx_eq, MaterialError, ParamSteel, SampleParams};
    use crate::material::SteelState;

    #[test]
    fn elastic_step_works() {
        let param = SampleParams::param_steel();
        let committed = SteelState::new(param.young);
        let state = implicit_update(&param, &committed, 0.001).unwrap();
        approx_eq(state.stress, 200.0, 1e-12);
        assert_eq!(state.tangent, param.young);
        assert_eq!(state.lambda, 0.0);
        assert_eq!(state.alpha1, 0.0);
        assert_eq!(state.alpha2, 0.0);
        assert_eq!(state.flow_sign, 1.0);
        let state = implicit_update(&param, &committed, -0.001).unwrap();
        assert_eq!(state.flow_sign, -1.0);
        let state = implicit_update(&param, &committed, 0.0).unwrap();
        assert_eq!(state.flow_sign, 0.0);
    }

    #[test]
    fn plastic_step_works() {
        let param = SampleParams::param_steel();
        let committed = SteelState::new(param.young);
        let strain = 0.002;
        let state = implicit_update(&param, &committed, strain).unwrap();

        // yielding
        assert!(state.stress < param.young * strain);
        assert!(state.lambda > 0.0);
        assert_eq!(state.flow_sign, 1.0);

        // consistency
        approx_eq(state.yield_function(param.sy), 0.0, 1e-8);

        // plastic strain
        let eps_p = state.strain - state.stress / param.young;
        approx_eq(eps_p, state.lambda, 1e-15);

        // backstresses
        let dl = state.lambda;
        approx_eq(state.alpha1, param.hh1 * dl / (1.0 + param.gamma1 * dl), 1e-12);
        approx_eq(state.alpha2, param.hh2 * dl / (1.0 + param.gamma2 * dl), 1e-12);

        // consistent tangent
        assert!(state.tangent > 0.0 && state.tangent < param.young);
        let h = param.hh1 / f64::powi(1.0 + param.gamma1 * dl, 2) + param.hh2 / f64::powi(1.0 + param.gamma2 * dl, 2);
        approx_eq(state.tangent, param.young * h / (param.young + h), 1e-9);

        // energy (plastic work)
        approx_eq(state.energy, 0.5 * state.stress * dl, 1e-12);
    }

    #[test]
    fn consistent_tangent_matches_finite_differences() {
        let param = SampleParams::param_steel();
        let committed = implicit_update(&param, &SteelState::new(param.young), 0.003).unwrap();
        let strain = 0.004;
        let state = implicit_update(&param, &committed, strain).unwrap();
        let h = 1e-7;
        let sp = implicit_update(&param, &committed, strain + h).unwrap().stress;
        let sm = implicit_update(&param, &committed, strain - h).unwrap().stress;
        let numerical = (sp - sm) / (2.0 * h);
        approx_eq(state.tangent, numerical, 1e-2);
    }

    #[test]
    fn linear_hardening_gives_closed_form() {
        let param = SampleParams::param_steel_linear_hardening();
        let committed = SteelState::new(param.young);
        let state = implicit_update(&param, &committed, 0.005).unwrap();
        let (ee, hh) = (param.young, param.hh1);
        let sigma_trial = ee * 0.005;
        let dl = (sigma_trial - param.sy) / (ee + hh);
        approx_eq(state.lambda, dl, 1e-15);
        approx_eq(state.stress, sigma_trial - ee * dl, 1e-9);
        approx_eq(state.tangent, ee * hh / (ee + hh), 1e-9);
    }

    #[test]
    fn perfect_plasticity_works() {
        let param = SampleParams::param_steel_perfectly_plastic();
        let committed = SteelState::new(param.young);
        let state = implicit_update(&param, &committed, -0.01).unwrap();
        approx_eq(state.stress, -param.sy, 1e-9);
        assert_eq!(state.flow_sign, -1.0);
        assert_eq!(state.tangent, 0.0);
    }

    #[test]
    fn implicit_update_captures_non_convergence() {
        // a backstress beyond saturation (H/γ = 0) gives h = -E and a vanishing dr/dΔλ
        let param = ParamSteel::new(1000.0, 1.0, 0.0, 0.0, 1.0, 0.0).unwrap();
        let mut committed = SteelState::new(param.young);
        committed.alpha1 = 1000.0;
        committed.stress = 1000.0;
        committed.flow_sign = 1.0;
        let res = implicit_update(&param, &committed, 0.5);
        match res {
            Err(MaterialError::ReturnMappingFailed { iterations, residual }) => {
                assert_eq!(iterations, 1);
                assert_eq!(residual, 499.0);
            }
            _ => panic!("non-convergence must be reported"),
        }
    }

    #[test]
    fn extrapolated_increment_works() {
        assert_eq!(extrapolated_increment(0.3, 0.1, 1.0, 1.0), 0.2);
        approx_eq(extrapolated_increment(0.3, 0.1, 0.5, 1.0), 0.1, 1e-15);
        assert_eq!(extrapolated_increment(0.3, 0.1, 1.0, 0.0), 0.0);
        assert_eq!(extrapolated_increment(0.1, 0.3, 1.0, 1.0), 0.0);
    }

    #[test]
    fn implex_update_works() {
        let param = SampleParams::param_steel_implex();
        let virgin = SteelState::new(param.young);

        // no history: elastic prediction
        let state = implex_update(&param, &virgin, 0.002, 0.0);
        approx_eq(state.stress, trial_stress(&param, &virgin, 0.002), 1e-12);
        assert_eq!(state.tangent, param.young);

        // with the exact increment, the explicit update reproduces the implicit one
        let committed = implicit_update(&param, &virgin, 0.002).unwrap();
        let implicit = implicit_update(&param, &committed, 0.003).unwrap();
        let dl = implicit.lambda - committed.lambda;
        let explicit = implex_update(&param, &committed, 0.003, dl);
        approx_eq(explicit.stress, implicit.stress, 1e-9);
        approx_eq(explicit.alpha1, implicit.alpha1, 1e-12);
        approx_eq(explicit.alpha2, implicit.alpha2, 1e-12);
        approx_eq(explicit.tangent, implicit.tangent, 1e-9);
        assert!(explicit.tangent > 0.0 && explicit.tangent < param.young);
    }
}
