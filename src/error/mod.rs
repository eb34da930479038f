use std::fmt::{Display, Debug, Formatter, Result};


/// Error set for invalid simulation settings, all of these are raised
/// before any timestep is iterated
pub enum ConfigurationError {
    /// Simulation duration must be positive and finite, and span a
    /// number of timesteps that can be held in memory
    InvalidSimulationLength,
    /// Timestep (`dt`) must be positive and finite
    NonPositiveTimestep,
    /// Synaptic decay constant (`tau`) must be positive and finite
    NonPositiveTau,
    /// Poisson rate must be finite and at least `0`
    NegativePoissonRate,
    /// Spike train does not cover every timestep of the simulation
    SpikeTrainLengthMismatch { expected: usize, found: usize },
    /// Configuration file could not be read
    CannotReadFile(String),
    /// Configuration file is not valid TOML
    InvalidToml(String),
    /// A field is present but has the wrong type or value
    CannotParseField { field: String, expected: &'static str },
    /// Current model name is not one of the known models
    UnknownCurrentModel(String),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ConfigurationError::InvalidSimulationLength => write!(
                f, "Simulation duration must be positive and span between one and {} timesteps",
                crate::simulation::MAX_STEPS
            ),
            ConfigurationError::NonPositiveTimestep => write!(f, "Timestep (dt) must be positive"),
            ConfigurationError::NonPositiveTau => write!(f, "Synaptic time constant (tau) must be positive"),
            ConfigurationError::NegativePoissonRate => write!(f, "Poisson rate must be non-negative"),
            ConfigurationError::SpikeTrainLengthMismatch { expected, found } => write!(
                f, "Spike train has {} entries but the simulation has {} timesteps", found, expected
            ),
            ConfigurationError::CannotReadFile(msg) => write!(f, "Cannot read file: {}", msg),
            ConfigurationError::InvalidToml(msg) => write!(f, "Cannot read config: {}", msg),
            ConfigurationError::CannotParseField { field, expected } => write!(
                f, "Cannot parse '{}' as {}", field, expected
            ),
            ConfigurationError::UnknownCurrentModel(name) => write!(
                f, "Unknown current model '{}' (expected kernel, accumulator or parallel)", name
            ),
        }
    }
}

impl Debug for ConfigurationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for driving the simulation state machine incorrectly
pub enum SimulationStateError {
    /// Every timestep has already been iterated
    AlreadyCompleted,
}

impl Display for SimulationStateError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let err_msg = match self {
            SimulationStateError::AlreadyCompleted => "Simulation has already completed every timestep",
        };

        write!(f, "{}", err_msg)
    }
}

impl Debug for SimulationStateError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for writing or reading simulation output
pub enum ReportError {
    /// History could not be written as csv
    CsvWriteError(String),
    /// History csv could not be read back
    CsvReadError(String),
    /// Plot could not be rendered
    PlotError(String),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ReportError::CsvWriteError(msg) => write!(f, "Could not write history csv: {}", msg),
            ReportError::CsvReadError(msg) => write!(f, "Could not read history csv: {}", msg),
            ReportError::PlotError(msg) => write!(f, "Could not render plot: {}", msg),
        }
    }
}

impl Debug for ReportError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors that may occur when using the library
pub enum SimulationError {
    /// Errors related to simulation settings
    ConfigurationRelatedError(ConfigurationError),
    /// Errors related to stepping the simulation
    StateRelatedError(SimulationStateError),
    /// Errors related to csv and plot output
    ReportRelatedError(ReportError),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            SimulationError::ConfigurationRelatedError(err) => write!(f, "{}", err),
            SimulationError::StateRelatedError(err) => write!(f, "{}", err),
            SimulationError::ReportRelatedError(err) => write!(f, "{}", err),
        }
    }
}

impl Debug for SimulationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl std::error::Error for SimulationError {}

impl From<ConfigurationError> for SimulationError {
    fn from(err: ConfigurationError) -> SimulationError {
        SimulationError::ConfigurationRelatedError(err)
    }
}

impl From<SimulationStateError> for SimulationError {
    fn from(err: SimulationStateError) -> SimulationError {
        SimulationError::StateRelatedError(err)
    }
}

impl From<ReportError> for SimulationError {
    fn from(err: ReportError) -> SimulationError {
        SimulationError::ReportRelatedError(err)
    }
}
