use super::History;
use crate::base::MaterialError;
use plotpy::{Curve, Plot};
use std::ffi::OsStr;

/// Plots stress versus strain of one or more histories
pub struct HysteresisPlot {
    /// Shows the strains in percent
    pub percentage_strains: bool,

    /// Holds all curves
    curves: Vec<Curve>,
}

impl HysteresisPlot {
    /// Allocates a new instance
    pub fn new() -> Self {
        HysteresisPlot {
            percentage_strains: false,
            curves: Vec::new(),
        }
    }

    /// Draws the stress-strain curve of a history
    ///
    /// # Input
    ///
    /// * `history` -- the committed states
    /// * `config` -- a function `|curve| {}` to configure the curve
    pub fn draw<F>(&mut self, history: &History, mut config: F) -> Result<(), MaterialError>
    where
        F: FnMut(&mut Curve),
    {
        if history.records.is_empty() {
            return Err(MaterialError::Plot("there are no records to plot"));
        }
        let scale = if self.percentage_strains { 100.0 } else { 1.0 };
        let mut x = vec![0.0];
        let mut y = vec![0.0];
        x.extend(history.records.iter().map(|r| scale * r.strain));
        y.extend(history.records.iter().map(|r| r.stress));
        let mut curve = Curve::new();
        curve.set_label(&history.name);
        config(&mut curve);
        curve.draw(&x, &y);
        self.curves.push(curve);
        Ok(())
    }

    /// Saves the figure
    ///
    /// **Note:** Call this function after [HysteresisPlot::draw()].
    ///
    /// # Input
    ///
    /// * `filepath` -- may be a String, &str, or Path
    /// * `extra` -- is a function `|plot, before| {}` to perform some {pre,post}-drawing on the plot area.
    ///   `before` is **true** before the curves are added and **false** just before `save`.
    pub fn save<P, F>(&self, filepath: &P, mut extra: F) -> Result<(), MaterialError>
    where
        P: AsRef<OsStr> + ?Sized,
        F: FnMut(&mut Plot, bool),
    {
        if self.curves.is_empty() {
            return Err(MaterialError::Plot("there are no curves; call draw first"));
        }
        let mut plot = Plot::new();
        extra(&mut plot, true);
        for curve in &self.curves {
            plot.add(curve);
        }
        extra(&mut plot, false);
        let x_label = if self.percentage_strains {
            "strain $\\varepsilon$ [%]"
        } else {
            "strain $\\varepsilon$"
        };
        plot.grid_and_labels(x_label, "stress $\\sigma$")
            .legend()
            .save(filepath)
            .map_err(MaterialError::Plot)
    }
}

/// Saves the stress-strain curve of a single history
pub fn plot_hysteresis<P>(history: &History, filepath: &P) -> Result<(), MaterialError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let mut plot = HysteresisPlot::new();
    plot.draw(history, |curve| {
        curve.set_line_color("#1a5fb4").set_marker_style(".");
    })?;
    plot.save(filepath, |_, _| {})
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
