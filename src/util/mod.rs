//! Contains tools to drive, record, and plot the material response

mod driver;
mod plot_hysteresis;
mod strain_path;

pub use driver::*;
pub use plot_hysteresis::*;
pub use strain_path::*;
