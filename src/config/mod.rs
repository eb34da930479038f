//! Reads simulation settings from a TOML file.
//!
//! ```toml
//! [simulation]
//! sim_duration = 100
//! dt = 1
//! poisson_rate = 0.1
//! a = 0.02
//! b = 0.2
//! c = -65
//! d = 8
//! tau = 10
//! weight = 10
//! threshold = 30
//! reversal_potential = 0
//! seed = 42
//! current_model = "kernel"
//!
//! [output]
//! csv = "history.csv"
//! plot = "history.svg"
//! ```
//!
//! Every key is optional and falls back to [`SimulationParameters::default`].

use std::{fs::read_to_string, path::{Path, PathBuf}};
use toml::Value;
use tracing::warn;
use crate::error::ConfigurationError;
use crate::neuron::synapse::CurrentModel;
use crate::simulation::SimulationParameters;


const SIMULATION_KEYS: [&str; 15] = [
    "sim_duration", "dt", "poisson_rate", "a", "b", "c", "d", "tau", "weight", "threshold",
    "reversal_potential", "v_init", "u_init", "seed", "current_model",
];

/// Where the simulation output is written
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// History csv path
    pub csv_path: PathBuf,
    /// Plot path, `None` skips plotting
    pub plot_path: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            csv_path: PathBuf::from("history.csv"),
            plot_path: Some(PathBuf::from("history.svg")),
        }
    }
}

/// Everything read from a configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationConfig {
    pub parameters: SimulationParameters,
    pub output: OutputSettings,
}

fn cannot_parse(field_name: &str, expected: &'static str) -> ConfigurationError {
    ConfigurationError::CannotParseField { field: String::from(field_name), expected }
}

/// Parses a float, integers are accepted and converted
pub fn parse_f64(value: &Value, field_name: &str) -> Result<f64, ConfigurationError> {
    match value {
        Value::Float(float) => Ok(*float),
        Value::Integer(integer) => Ok(*integer as f64),
        _ => Err(cannot_parse(field_name, "float")),
    }
}

pub fn parse_u64(value: &Value, field_name: &str) -> Result<u64, ConfigurationError> {
    value
        .as_integer()
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| cannot_parse(field_name, "unsigned integer"))
}

pub fn parse_string(value: &Value, field_name: &str) -> Result<String, ConfigurationError> {
    value
        .as_str()
        .ok_or_else(|| cannot_parse(field_name, "string"))
        .map(String::from)
}

/// Parses `key` from the table with the given parser or returns `default` if absent
pub fn parse_value_with_default<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigurationError>,
    default: T,
) -> Result<T, ConfigurationError> {
    table
        .get(key)
        .map_or(Ok(default), |value| parser(value, key))
}

fn get_parameters(table: &Value) -> Result<SimulationParameters, ConfigurationError> {
    if let Some(keys) = table.as_table() {
        for key in keys.keys().filter(|key| !SIMULATION_KEYS.contains(&key.as_str())) {
            warn!(key = key.as_str(), "ignoring unrecognized simulation key");
        }
    }

    let defaults = SimulationParameters::default();
    let mut params = defaults;

    params.sim_duration = parse_value_with_default(table, "sim_duration", parse_f64, defaults.sim_duration)?;
    params.dt = parse_value_with_default(table, "dt", parse_f64, defaults.dt)?;
    params.poisson_rate = parse_value_with_default(table, "poisson_rate", parse_f64, defaults.poisson_rate)?;
    params.threshold = parse_value_with_default(table, "threshold", parse_f64, defaults.threshold)?;
    params.v_init = parse_value_with_default(table, "v_init", parse_f64, defaults.v_init)?;
    params.u_init = parse_value_with_default(table, "u_init", parse_f64, defaults.u_init)?;

    params.neuron.a = parse_value_with_default(table, "a", parse_f64, defaults.neuron.a)?;
    params.neuron.b = parse_value_with_default(table, "b", parse_f64, defaults.neuron.b)?;
    params.neuron.c = parse_value_with_default(table, "c", parse_f64, defaults.neuron.c)?;
    params.neuron.d = parse_value_with_default(table, "d", parse_f64, defaults.neuron.d)?;

    params.synapse.tau = parse_value_with_default(table, "tau", parse_f64, defaults.synapse.tau)?;
    params.synapse.weight = parse_value_with_default(table, "weight", parse_f64, defaults.synapse.weight)?;
    params.synapse.reversal_potential = parse_value_with_default(
        table, "reversal_potential", parse_f64, defaults.synapse.reversal_potential
    )?;

    params.seed = match table.get("seed") {
        Some(value) => Some(parse_u64(value, "seed")?),
        None => None,
    };

    let current_model = parse_value_with_default(
        table, "current_model", parse_string, String::from(defaults.current_model.as_str())
    )?;
    params.current_model = current_model.parse::<CurrentModel>()?;

    Ok(params)
}

fn get_output(table: &Value) -> Result<OutputSettings, ConfigurationError> {
    let defaults = OutputSettings::default();

    let csv_path = match table.get("csv") {
        Some(value) => PathBuf::from(parse_string(value, "csv")?),
        None => defaults.csv_path,
    };

    // `plot = false` turns plotting off, `plot = true` keeps the default path
    let plot_path = match table.get("plot") {
        Some(Value::Boolean(false)) => None,
        Some(Value::Boolean(true)) | None => defaults.plot_path,
        Some(value) => Some(PathBuf::from(parse_string(value, "plot")?)),
    };

    Ok(OutputSettings { csv_path, plot_path })
}

/// Parses a configuration from TOML text, missing tables or keys take their
/// defaults and the resulting parameters are validated, including the number
/// of timesteps they span
pub fn parse_config(toml_content: &str) -> Result<SimulationConfig, ConfigurationError> {
    let config: Value = toml::from_str(toml_content)
        .map_err(|e| ConfigurationError::InvalidToml(e.to_string()))?;

    let parameters = match config.get("simulation") {
        Some(table) => get_parameters(table)?,
        None => SimulationParameters::default(),
    };
    parameters.num_steps()?;

    let output = match config.get("output") {
        Some(table) => get_output(table)?,
        None => OutputSettings::default(),
    };

    Ok(SimulationConfig { parameters, output })
}

/// Reads and parses a configuration file
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, ConfigurationError> {
    let toml_content = read_to_string(path.as_ref())
        .map_err(|e| ConfigurationError::CannotReadFile(format!("{}: {}", path.as_ref().display(), e)))?;

    parse_config(&toml_content)
}
