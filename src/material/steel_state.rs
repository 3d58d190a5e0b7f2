use crate::base::MaterialError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds one snapshot of the state at a material point
///
/// The material keeps two snapshots: the trial one (current iterate) and
/// the committed one (last converged step).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SteelState {
    /// First backstress α1
    pub alpha1: f64,

    /// Second backstress α2
    pub alpha2: f64,

    /// Plastic multiplier λ (accumulated equivalent plastic strain)
    pub lambda: f64,

    /// Sign of the plastic flow n ∈ {-1, 0, 1}
    pub flow_sign: f64,

    /// Strain ε
    pub strain: f64,

    /// Stress σ
    pub stress: f64,

    /// Tangent dσ/dε
    pub tangent: f64,

    /// Accumulated plastic work
    pub energy: f64,
}

impl SteelState {
    /// Number of values written to flat buffers
    pub const NDATA: usize = 8;

    /// Returns the virgin state with the elastic tangent
    pub fn new(young: f64) -> Self {
        SteelState {
            alpha1: 0.0,
            alpha2: 0.0,
            lambda: 0.0,
            flow_sign: 0.0,
            strain: 0.0,
            stress: 0.0,
            tangent: young,
            energy: 0.0,
        }
    }

    /// Returns the total backstress α1 + α2
    #[inline]
    pub fn backstress(&self) -> f64 {
        self.alpha1 + self.alpha2
    }

    /// Returns the relative stress ξ = σ - α1 - α2
    #[inline]
    pub fn relative_stress(&self) -> f64 {
        self.stress - self.alpha1 - self.alpha2
    }

    /// Calculates the yield function f = |σ - α1 - α2| - sy
    #[inline]
    pub fn yield_function(&self, sy: f64) -> f64 {
        f64::abs(self.relative_stress()) - sy
    }

    /// Writes the snapshot to a flat buffer
    ///
    /// Order: `α1, α2, λ, n, ε, σ, C, energy`
    pub fn pack(&self, data: &mut Vec<f64>) {
        data.extend_from_slice(&[
            self.alpha1,
            self.alpha2,
            self.lambda,
            self.flow_sign,
            self.strain,
            self.stress,
            self.tangent,
            self.energy,
        ]);
    }

    /// Reads the snapshot from a flat buffer written by [SteelState::pack]
    pub fn unpack(data: &[f64]) -> Result<Self, MaterialError> {
        if data.len() != SteelState::NDATA {
            return Err(MaterialError::BufferSizeMismatch {
                expected: SteelState::NDATA,
                actual: data.len(),
            });
        }
        Ok(SteelState {
            alpha1: data[0],
            alpha2: data[1],
            lambda: data[2],
            flow_sign: data[3],
            strain: data[4],
            stress: data[5],
            tangent: data[6],
            energy: data[7],
        })
    }
}

impl fmt::Display for SteelState {
    /// Returns a nicely formatted string representing the state
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = [
            ("ε", self.strain),
            ("σ", self.stress),
            ("C", self.tangent),
            ("α1", self.alpha1),
            ("α2", self.alpha2),
            ("λ", self.lambda),
            ("n", self.flow_sign),
            ("energy", self.energy),
        ];
        for (i, (key, value)) in values.iter().enumerate() {
            if i > 0 {
                write!(f, "\n")?;
            }
            match f.precision() {
                Some(p) => write!(f, "{} = {:.2$}", key, value, p)?,
                None => write!(f, "{} = {:?}", key, value)?,
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SteelState;
    use crate::base::MaterialError;

    #[test]
    fn new_and_yield_function_work() {
        let mut state = SteelState::new(1000.0);
        assert_eq!(state.tangent, 1000.0);
        assert_eq!(state.yield_function(10.0), -10.0);
        state.stress = 15.0;
        state.alpha1 = 2.0;
        state.alpha2 = 1.0;
        assert_eq!(state.backstress(), 3.0);
        assert_eq!(state.relative_stress(), 12.0);
        assert_eq!(state.yield_function(10.0), 2.0);
    }

    #[test]
    fn pack_and_unpack_work() {
        let state = SteelState {
            alpha1: 1.0,
            alpha2: 2.0,
            lambda: 3.0,
            flow_sign: -1.0,
            strain: 4.0,
            stress: 5.0,
            tangent: 6.0,
            energy: 7.0,
        };
        let mut data = Vec::new();
        state.pack(&mut data);
        assert_eq!(data, &[1.0, 2.0, 3.0, -1.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(SteelState::unpack(&data).unwrap(), state);
        assert_eq!(
            SteelState::unpack(&data[..7]).err(),
            Some(MaterialError::BufferSizeMismatch { expected: 8, actual: 7 })
        );
    }

    #[test]
    fn display_works() {
        let mut state = SteelState::new(2.0);
        state.stress = 1.5;
        assert_eq!(
            format!("{}", state),
            "ε = 0.0\n\
             σ = 1.5\n\
             C = 2.0\n\
             α1 = 0.0\n\
             α2 = 0.0\n\
             λ = 0.0\n\
             n = 0.0\n\
             energy = 0.0"
        );
        assert_eq!(
            format!("{:.2}", state),
            "ε = 0.00\n\
             σ = 1.50\n\
             C = 2.00\n\
             α1 = 0.00\n\
             α2 = 0.00\n\
             λ = 0.00\n\
             n = 0.00\n\
             energy = 0.00"
        );
    }
}
