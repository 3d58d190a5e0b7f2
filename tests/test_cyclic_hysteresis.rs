use steel1d::prelude::*;
use steel1d::util::{plot_hysteresis, StepRecord};

// Cyclic test with growing amplitude (implicit return mapping)
//
// TEST GOAL
//
// Verifies that the committed states along a cyclic strain path satisfy
// the yield condition when plastic, that the plastic multiplier never
// decreases, and that each backstress stays within its saturation bound.
//
// PATH
//
// ε: 0 → +a → -a → 0 with a = 0.002, 0.003, 0.004, 0.005
//
// PARAMETERS
//
// E = 200000, sy = 250, H1 = 1000, H2 = 5000, γ1 = 10, γ2 = 50
//
// The saturation bound follows from the backward-Euler update being a
// convex combination of αi_c and n Hi / γi:
//
// |αi| ≤ Hi / γi

const NAME: &str = "test_cyclic_hysteresis";
const SAVE_FIGURE: bool = false;

#[test]
fn test_cyclic_hysteresis() -> Result<(), MaterialError> {
    let param = SampleParams::param_steel();
    let mut steel = Steel1D::new(param)?;
    let path = StrainPath::new_cyclic(0.002, 0.001, 4, 10, 1.0)?;

    let bound1 = param.hh1 / param.gamma1;
    let bound2 = param.hh2 / param.gamma2;
    let tol_yield = 1e-6 * param.sy;

    let mut history = History::new(NAME);
    let mut lambda_prev = 0.0;
    let mut n_plastic = 0;
    let mut n_elastic = 0;
    for (step, strain) in path.strains.iter().enumerate() {
        let before = *steel.committed_state();
        steel.set_trial_strain(*strain, None)?;
        steel.commit_state()?;
        let state = *steel.committed_state();

        // yield condition
        let f = state.yield_function(param.sy);
        assert!(f <= tol_yield, "step {}: f = {:?}", step, f);
        if state.lambda > before.lambda {
            n_plastic += 1;
            assert!(f64::abs(f) <= tol_yield, "step {}: plastic state off the surface", step);
            assert!(state.tangent > 0.0 && state.tangent < param.young);
        } else {
            n_elastic += 1;
            assert_eq!(state.tangent, param.young);
            assert_eq!(state.alpha1, before.alpha1);
            assert_eq!(state.alpha2, before.alpha2);
        }

        // plastic multiplier and backstresses
        assert!(state.lambda >= lambda_prev);
        assert!(f64::abs(state.alpha1) <= bound1 + 1e-12);
        assert!(f64::abs(state.alpha2) <= bound2 + 1e-12);
        lambda_prev = state.lambda;

        history.records.push(StepRecord {
            step,
            time: (step + 1) as f64,
            strain: steel.strain(),
            stress: steel.stress(),
            tangent: steel.tangent(),
            energy: steel.energy(),
            implex_error: 0.0,
        });
    }
    assert!(n_plastic > 0);
    assert!(n_elastic > 0);

    // dissipation after complete cycles
    assert!(steel.energy() > 0.0);

    // the loop closes at zero strain with a residual stress
    assert_eq!(steel.strain(), 0.0);
    assert!(f64::abs(steel.stress()) < param.sy + bound1 + bound2);

    if SAVE_FIGURE {
        plot_hysteresis(&history, &format!("{}/{}.svg", DEFAULT_TEST_DIR, NAME))?;
    }
    Ok(())
}

#[test]
fn test_elastic_unloading() -> Result<(), MaterialError> {
    let param = SampleParams::param_steel();
    let mut steel = Steel1D::new(param)?;

    // load into the plastic range
    steel.set_trial_strain(0.003, None)?;
    steel.commit_state()?;
    let loaded = *steel.committed_state();
    assert!(loaded.lambda > 0.0);

    // unload by 100 MPa (the elastic range is 2 sy = 500 MPa wide)
    steel.set_trial_strain(0.0025, None)?;
    assert_eq!(steel.tangent(), param.young);
    steel.commit_state()?;
    let unloaded = *steel.committed_state();
    assert_eq!(unloaded.lambda, loaded.lambda);
    assert_eq!(unloaded.alpha1, loaded.alpha1);
    assert_eq!(unloaded.alpha2, loaded.alpha2);
    assert_eq!(unloaded.energy, loaded.energy);
    assert_eq!(unloaded.stress, loaded.stress + param.young * (0.0025 - 0.003));
    Ok(())
}

#[test]
fn test_revert_to_start() -> Result<(), MaterialError> {
    let mut steel = Steel1D::new(SampleParams::param_steel_implex())?;
    for strain in [0.002, 0.004, 0.001, -0.003] {
        steel.set_trial_strain(strain, None)?;
        steel.commit_state()?;
    }
    steel.revert_to_start()?;
    assert_eq!(steel.strain(), 0.0);
    assert_eq!(steel.stress(), 0.0);
    assert_eq!(steel.energy(), 0.0);
    assert_eq!(steel.tangent(), steel.initial_tangent());
    assert_eq!(steel.response("backStress")?, &[0.0, 0.0]);
    assert_eq!(steel.response("plasticMultiplier")?, &[0.0]);
    assert_eq!(steel.implex_error().error, 0.0);

    // the material behaves as new
    let mut fresh = Steel1D::new(SampleParams::param_steel_implex())?;
    steel.set_trial_strain(0.002, None)?;
    fresh.set_trial_strain(0.002, None)?;
    assert_eq!(steel.send_self(), fresh.send_self());
    Ok(())
}
