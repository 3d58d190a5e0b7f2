/// Defines the directory where the result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/steel1d/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/steel1d/test";

/// Holds the tolerance of the return-mapping residual, relative to the yield stress
pub const RETURN_MAPPING_TOL: f64 = 1e-10;

/// Holds the maximum number of local Newton iterations of the return mapping
pub const RETURN_MAPPING_N_MAX: usize = 50;

/// Holds the smallest admissible magnitude of the residual derivative
pub const RETURN_MAPPING_MIN_DERIVATIVE: f64 = 1e-14;
