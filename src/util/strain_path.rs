use crate::base::MaterialError;

/// Holds a sequence of total strains (and time increments) to drive a material point
#[derive(Clone, Debug, PartialEq)]
pub struct StrainPath {
    /// Holds the strain at the end of each step (the initial zero strain is not included)
    pub strains: Vec<f64>,

    /// Holds the time increment of each step
    pub dtimes: Vec<f64>,
}

impl StrainPath {
    /// Allocates an empty path
    pub fn new() -> Self {
        StrainPath {
            strains: Vec::new(),
            dtimes: Vec::new(),
        }
    }

    /// Generates a monotonic ramp from zero to `strain_max` with equal increments
    ///
    /// # Input
    ///
    /// * `strain_max` -- the final strain (may be negative)
    /// * `n_increments` -- number of increments
    /// * `dtime` -- time increment of every step
    pub fn new_monotonic(strain_max: f64, n_increments: usize, dtime: f64) -> Result<Self, MaterialError> {
        if n_increments < 1 {
            return Err(MaterialError::InvalidParameter("n_increments must be ≥ 1"));
        }
        let mut path = StrainPath::new();
        path.push_ramp(strain_max, n_increments, dtime)?;
        Ok(path)
    }

    /// Generates a symmetric cyclic path with linearly growing amplitude
    ///
    /// Each cycle goes `0 → +a → -a → 0` where `a = amplitude_0 + k · amplitude_growth`
    /// for cycle `k`. The quarter of each cycle is split into `n_increments_quarter`
    /// increments, so the strain increment grows with the amplitude.
    ///
    /// # Input
    ///
    /// * `amplitude_0` -- amplitude of the first cycle (> 0)
    /// * `amplitude_growth` -- amplitude increase per cycle (≥ 0)
    /// * `n_cycles` -- number of cycles
    /// * `n_increments_quarter` -- number of increments per quarter cycle
    /// * `dtime` -- time increment of every step
    pub fn new_cyclic(
        amplitude_0: f64,
        amplitude_growth: f64,
        n_cycles: usize,
        n_increments_quarter: usize,
        dtime: f64,
    ) -> Result<Self, MaterialError> {
        if !(amplitude_0 > 0.0) {
            return Err(MaterialError::InvalidParameter("amplitude_0 must be > 0"));
        }
        if !(amplitude_growth >= 0.0) {
            return Err(MaterialError::InvalidParameter("amplitude_growth must be ≥ 0"));
        }
        if n_cycles < 1 {
            return Err(MaterialError::InvalidParameter("n_cycles must be ≥ 1"));
        }
        if n_increments_quarter < 1 {
            return Err(MaterialError::InvalidParameter("n_increments_quarter must be ≥ 1"));
        }
        let mut path = StrainPath::new();
        for k in 0..n_cycles {
            let a = amplitude_0 + (k as f64) * amplitude_growth;
            path.push_ramp(a, n_increments_quarter, dtime)?;
            path.push_ramp(-a, 2 * n_increments_quarter, dtime)?;
            path.push_ramp(0.0, n_increments_quarter, dtime)?;
        }
        Ok(path)
    }

    /// Appends equal increments from the last strain (or zero) to `strain_target`
    pub fn push_ramp(&mut self, strain_target: f64, n_increments: usize, dtime: f64) -> Result<&mut Self, MaterialError> {
        if !strain_target.is_finite() {
            return Err(MaterialError::InvalidParameter("strain must be finite"));
        }
        if !dtime.is_finite() || dtime < 0.0 {
            return Err(MaterialError::InvalidTimeIncrement(dtime));
        }
        let start = self.last_strain();
        let delta = (strain_target - start) / (n_increments as f64);
        for i in 1..=n_increments {
            let strain = if i == n_increments {
                strain_target
            } else {
                start + (i as f64) * delta
            };
            self.strains.push(strain);
            self.dtimes.push(dtime);
        }
        Ok(self)
    }

    /// Returns the last strain or zero if the path is empty
    pub fn last_strain(&self) -> f64 {
        match self.strains.last() {
            Some(v) => *v,
            None => 0.0,
        }
    }

    /// Returns the number of steps
    pub fn len(&self) -> usize {
        self.strains.len()
    }

    /// Indicates that there are no steps
    pub fn is_empty(&self) -> bool {
        self.strains.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::StrainPath;
    use crate::base::{array_approx_eq, MaterialError};

    #[test]
    fn new_monotonic_works() {
        let path = StrainPath::new_monotonic(0.004, 4, 0.5).unwrap();
        array_approx_eq(&path.strains, &[0.001, 0.002, 0.003, 0.004], 1e-15);
        assert_eq!(path.dtimes, &[0.5, 0.5, 0.5, 0.5]);
        assert_eq!(path.len(), 4);
        assert_eq!(path.last_strain(), 0.004);
        assert_eq!(
            StrainPath::new_monotonic(0.004, 0, 1.0).err(),
            Some(MaterialError::InvalidParameter("n_increments must be ≥ 1"))
        );
    }

    #[test]
    fn new_cyclic_works() {
        let path = StrainPath::new_cyclic(0.002, 0.001, 2, 2, 1.0).unwrap();
        assert_eq!(path.len(), 16);
        array_approx_eq(
            &path.strains,
            &[
                0.001, 0.002, 0.001, 0.0, -0.001, -0.002, -0.001, 0.0, // first cycle
                0.0015, 0.003, 0.0015, 0.0, -0.0015, -0.003, -0.0015, 0.0, // second cycle
            ],
            1e-15,
        );
    }

    #[test]
    fn new_cyclic_captures_errors() {
        assert_eq!(
            StrainPath::new_cyclic(0.0, 0.0, 1, 1, 1.0).err(),
            Some(MaterialError::InvalidParameter("amplitude_0 must be > 0"))
        );
        assert_eq!(
            StrainPath::new_cyclic(0.001, -1.0, 1, 1, 1.0).err(),
            Some(MaterialError::InvalidParameter("amplitude_growth must be ≥ 0"))
        );
        assert_eq!(
            StrainPath::new_cyclic(0.001, 0.0, 0, 1, 1.0).err(),
            Some(MaterialError::InvalidParameter("n_cycles must be ≥ 1"))
        );
        assert_eq!(
            StrainPath::new_cyclic(0.001, 0.0, 1, 1, -1.0).err(),
            Some(MaterialError::InvalidTimeIncrement(-1.0))
        );
    }
}
