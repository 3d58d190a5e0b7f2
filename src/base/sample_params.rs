use super::{ImplexErrorNorm, ParamSteel};

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns the reference structural steel (MPa) with implicit integration
    pub fn param_steel() -> ParamSteel {
        ParamSteel {
            young: 200_000.0,
            sy: 250.0,
            hh1: 1000.0,
            hh2: 5000.0,
            gamma1: 10.0,
            gamma2: 50.0,
            implex: false,
            implex_control: false,
            implex_error_tolerance: 0.05,
            implex_time_reduction_limit: 0.01,
            dtime_is_user_defined: false,
            implex_error_norm: ImplexErrorNorm::RelativeToYield,
        }
    }

    /// Returns the reference steel with IMPL-EX integration and error control
    pub fn param_steel_implex() -> ParamSteel {
        let mut param = SampleParams::param_steel();
        param.implex = true;
        param.implex_control = true;
        param
    }

    /// Returns an elastic-perfectly plastic steel (no hardening)
    pub fn param_steel_perfectly_plastic() -> ParamSteel {
        let mut param = SampleParams::param_steel();
        param.hh1 = 0.0;
        param.hh2 = 0.0;
        param.gamma1 = 0.0;
        param.gamma2 = 0.0;
        param
    }

    /// Returns a steel with a single linear kinematic hardening term
    pub fn param_steel_linear_hardening() -> ParamSteel {
        let mut param = SampleParams::param_steel();
        param.hh1 = 2000.0;
        param.hh2 = 0.0;
        param.gamma1 = 0.0;
        param.gamma2 = 0.0;
        param
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SampleParams;

    #[test]
    fn sample_params_are_valid() {
        SampleParams::param_steel().validate().unwrap();
        SampleParams::param_steel_implex().validate().unwrap();
        SampleParams::param_steel_perfectly_plastic().validate().unwrap();
        SampleParams::param_steel_linear_hardening().validate().unwrap();
    }
}
