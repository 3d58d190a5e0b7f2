use steel1d::prelude::*;
use steel1d::util::plot_hysteresis;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "steel1d_cyclic",
    about = "Runs a cyclic strain test on the uniaxial steel and writes the stress-strain history"
)]
struct Options {
    /// Output directory
    #[structopt(long, default_value = "/tmp/steel1d/results")]
    out_dir: String,

    /// Stem of the output files
    #[structopt(long, default_value = "steel1d_cyclic")]
    fn_stem: String,

    /// Amplitude of the first cycle
    #[structopt(long, default_value = "0.002")]
    amplitude: f64,

    /// Amplitude increase per cycle
    #[structopt(long, default_value = "0.001")]
    growth: f64,

    /// Number of cycles
    #[structopt(long, default_value = "4")]
    cycles: usize,

    /// Number of increments per quarter cycle
    #[structopt(long, default_value = "10")]
    increments: usize,

    /// Uses IMPL-EX with error control (instead of the implicit return mapping)
    #[structopt(long)]
    implex: bool,

    /// Cuts the steps according to the IMPL-EX suggested time factor
    #[structopt(long)]
    adaptive: bool,

    /// Also writes an SVG figure
    #[structopt(long)]
    svg: bool,
}

fn main() -> Result<(), MaterialError> {
    // logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // parse options
    let options = Options::from_args();

    // material
    let mut param = SampleParams::param_steel();
    param
        .set_implex(options.implex)?
        .set_implex_control(options.implex)?
        .set_dtime_is_user_defined(options.implex && options.adaptive)?;
    let mut steel = Steel1D::new(param)?;

    // run
    let path = StrainPath::new_cyclic(
        options.amplitude,
        options.growth,
        options.cycles,
        options.increments,
        1.0,
    )?;
    let mut driver = Driver::new();
    driver.record_implex_error = options.implex;
    driver.dtime_user_defined = options.implex && options.adaptive;
    driver.adaptive = options.implex && options.adaptive;
    let history = driver.run(&options.fn_stem, &mut steel, &path)?;

    // write files
    let path_json = format!("{}/{}.json", options.out_dir, options.fn_stem);
    history.write(&path_json)?;
    let path_svg = format!("{}/{}.svg", options.out_dir, options.fn_stem);
    if options.svg {
        plot_hysteresis(&history, &path_svg)?;
    }

    // message
    let thin_line = format!("{:─^1$}", "", path_json.len());
    println!("\n\n{}", thin_line);
    println!("{} steps committed; the history file is:", history.records.len());
    println!("{}", path_json);
    if options.svg {
        println!("{}", path_svg);
    }
    if options.implex {
        println!("max IMPL-EX error = {:?}", history.max_implex_error());
    }
    println!("{}\n\n", thin_line);
    Ok(())
}
