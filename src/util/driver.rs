use super::StrainPath;
use crate::base::MaterialError;
use crate::material::UniaxialMaterial;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Maximum number of step cuts performed by the adaptive driver within one path step
const MAX_CUTS: usize = 30;

/// Tolerance to decide that a path step is complete
const FRACTION_TOL: f64 = 1e-12;

/// Holds the committed outputs of one (sub)step
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Index of the step in the strain path
    pub step: usize,

    /// Accumulated time at the end of the (sub)step
    pub time: f64,

    pub strain: f64,
    pub stress: f64,
    pub tangent: f64,
    pub energy: f64,

    /// IMPL-EX error measured at the trial strain (zero if not recorded)
    pub implex_error: f64,
}

/// Holds the sequence of committed states along a strain path
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct History {
    pub name: String,              // name of the material / test
    pub records: Vec<StepRecord>, // one record per committed (sub)step
}

impl History {
    /// Allocates an empty history
    pub fn new(name: &str) -> Self {
        History {
            name: name.to_string(),
            records: Vec::new(),
        }
    }

    /// Returns all strains
    pub fn strains(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.strain).collect()
    }

    /// Returns all stresses
    pub fn stresses(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.stress).collect()
    }

    /// Returns the largest recorded IMPL-EX error
    pub fn max_implex_error(&self) -> f64 {
        self.records.iter().fold(0.0, |acc, r| f64::max(acc, r.implex_error))
    }

    /// Reads a JSON file containing the history
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn from<P>(full_path: &P) -> Result<Self, MaterialError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|e| MaterialError::Io(e.to_string()))?;
        let reader = BufReader::new(file);
        let history = serde_json::from_reader(reader).map_err(|e| MaterialError::Io(e.to_string()))?;
        Ok(history)
    }

    /// Writes a JSON file with the history
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write<P>(&self, full_path: &P) -> Result<(), MaterialError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|e| MaterialError::Io(e.to_string()))?;
        }
        let mut file = File::create(&path).map_err(|e| MaterialError::Io(e.to_string()))?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|e| MaterialError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Drives a uniaxial material along a strain path, acting as a minimal host
///
/// With `adaptive`, the driver reads the IMPL-EX error after each trial strain and,
/// if the error exceeds the tolerance, reverts and retries with the suggested
/// (smaller) time increment until the increment reaches the minimum one.
#[derive(Clone, Copy, Debug)]
pub struct Driver {
    /// Passes the path's time increments to the material (otherwise passes None)
    pub dtime_user_defined: bool,

    /// Reads the "implexError" response after each trial strain
    pub record_implex_error: bool,

    /// Cuts the steps according to the IMPL-EX suggested time factor
    pub adaptive: bool,
}

impl Driver {
    /// Allocates a new instance with a material-defined time increment and no error recording
    pub fn new() -> Self {
        Driver {
            dtime_user_defined: false,
            record_implex_error: false,
            adaptive: false,
        }
    }

    /// Runs the material along the path and returns the committed history
    ///
    /// The material is not reset; the path starts from its current committed state.
    pub fn run(
        &self,
        name: &str,
        material: &mut dyn UniaxialMaterial,
        path: &StrainPath,
    ) -> Result<History, MaterialError> {
        let mut history = History::new(name);
        let mut strain_0 = material.strain();
        let mut time = 0.0;
        for (step, (strain_1, dtime)) in path.strains.iter().zip(path.dtimes.iter()).enumerate() {
            if self.adaptive {
                time = self.run_adaptive_step(material, step, strain_0, *strain_1, *dtime, time, &mut history)?;
            } else {
                let dt = if self.dtime_user_defined { Some(*dtime) } else { None };
                material.set_trial_strain(*strain_1, dt)?;
                let implex_error = self.read_implex_error(material)?;
                material.commit_state()?;
                time += dtime;
                history.records.push(record(material, step, time, implex_error));
            }
            strain_0 = *strain_1;
        }
        Ok(history)
    }

    /// Runs one path step split into substeps; returns the updated time
    fn run_adaptive_step(
        &self,
        material: &mut dyn UniaxialMaterial,
        step: usize,
        strain_0: f64,
        strain_1: f64,
        dtime: f64,
        time: f64,
        history: &mut History,
    ) -> Result<f64, MaterialError> {
        let mut time = time;
        let mut done = 0.0;
        let mut fraction = 1.0;
        let mut cuts = 0;
        while done < 1.0 - FRACTION_TOL {
            let f = f64::min(fraction, 1.0 - done);
            let last = done + f >= 1.0 - FRACTION_TOL;
            let strain = if last {
                strain_1
            } else {
                strain_0 + (done + f) * (strain_1 - strain_0)
            };
            let dt = f * dtime;
            material.set_trial_strain(strain, if self.dtime_user_defined { Some(dt) } else { None })?;
            let values = material.response("implexError")?;
            if values.len() < 5 {
                return Err(MaterialError::UnknownName("implexError".to_string()));
            }
            let (error, tolerance, factor, min_dtime) = (values[0], values[1], values[3], values[4]);
            if error > tolerance && dt > min_dtime && cuts < MAX_CUTS {
                material.revert_to_last_commit()?;
                fraction = f * factor;
                cuts += 1;
                tracing::debug!(step, cuts, fraction, error, "cutting step");
                continue;
            }
            material.commit_state()?;
            done += f;
            time += dt;
            history.records.push(record(material, step, time, error));
        }
        Ok(time)
    }

    /// Returns the IMPL-EX error if recording is enabled, zero otherwise
    fn read_implex_error(&self, material: &dyn UniaxialMaterial) -> Result<f64, MaterialError> {
        if !self.record_implex_error {
            return Ok(0.0);
        }
        let values = material.response("implexError")?;
        values
            .first()
            .copied()
            .ok_or_else(|| MaterialError::UnknownName("implexError".to_string()))
    }
}

/// Makes a record from the committed material outputs
fn record(material: &dyn UniaxialMaterial, step: usize, time: f64, implex_error: f64) -> StepRecord {
    StepRecord {
        step,
        time,
        strain: material.strain(),
        stress: material.stress(),
        tangent: material.tangent(),
        energy: material.energy(),
        implex_error,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
