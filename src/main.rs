use std::path::PathBuf;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use izhikevich_neuron_simulation::{
    config::{read_config, SimulationConfig},
    error::SimulationError,
    report::{plot::plot_history, write_history_csv},
    simulation::run_simulation,
};


/// Simulates a single Izhikevich neuron driven by a Poisson spike train and
/// writes its history as csv and an svg plot
#[derive(Parser, Debug)]
#[command(name = "izhikevich_neuron_simulation", version, about)]
struct Args {
    /// TOML configuration file, defaults are used when omitted
    config: Option<PathBuf>,

    /// History csv output path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Plot output path
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Skip rendering the plot
    #[arg(long, default_value_t = false)]
    no_plot: bool,

    /// Seed for the input spike train
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = clap::value_parser!(LevelFilter))]
    log_level: LevelFilter,
}

fn run(args: Args) -> Result<(), SimulationError> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "reading config");
            read_config(path)?
        },
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.parameters.seed = Some(seed);
    }
    if let Some(csv) = args.csv {
        config.output.csv_path = csv;
    }
    if let Some(plot) = args.plot {
        config.output.plot_path = Some(plot);
    }
    if args.no_plot {
        config.output.plot_path = None;
    }

    info!(
        sim_duration = config.parameters.sim_duration,
        dt = config.parameters.dt,
        poisson_rate = config.parameters.poisson_rate,
        seed = ?config.parameters.seed,
        "simulation parameters"
    );

    let history = run_simulation(&config.parameters)?;

    write_history_csv(&history, &config.output.csv_path)?;
    info!(path = %config.output.csv_path.display(), rows = history.len(), "wrote history csv");

    if let Some(plot_path) = &config.output.plot_path {
        plot_history(&history, plot_path)?;
        info!(path = %plot_path.display(), "wrote plot");
    }

    Ok(())
}

fn main() -> Result<(), SimulationError> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .init();

    run(args).map_err(|e| {
        error!("{}", e);
        e
    })
}
