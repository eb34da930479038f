//! Input spike trains that are generated once, before the simulation starts,
//! and then read by index for every timestep.

use rand::Rng;
use crate::distribution::poisson_events;
use crate::error::ConfigurationError;


/// Produces a binary spike train covering a given number of timesteps
pub trait SpikeTrain {
    /// Generates `length` spike indicators, drawing from `rng` if the train is stochastic
    fn generate<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Result<Vec<bool>, ConfigurationError>;
}

/// A Poisson spike train, each timestep independently draws a Poisson count
/// with mean `rate` and spikes if that count is above zero, so the chance of
/// spiking at a timestep is `1 - exp(-rate)`
#[derive(Debug, Clone, Copy)]
pub struct PoissonSpikeTrain {
    /// Mean number of events per timestep
    pub rate: f64,
}

impl Default for PoissonSpikeTrain {
    fn default() -> Self {
        PoissonSpikeTrain { rate: 0.1 }
    }
}

impl PoissonSpikeTrain {
    /// Probability that any given timestep contains a spike
    pub fn spike_probability(&self) -> f64 {
        1. - (-self.rate).exp()
    }
}

impl SpikeTrain for PoissonSpikeTrain {
    fn generate<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Result<Vec<bool>, ConfigurationError> {
        if length == 0 {
            return Err(ConfigurationError::InvalidSimulationLength);
        }

        poisson_events(length, self.rate, rng)
    }
}

/// A preset spike train that replays a fixed set of spikes, one entry per timestep
#[derive(Debug, Clone, Default)]
pub struct PresetSpikeTrain {
    /// Whether each timestep spikes
    pub spikes: Vec<bool>,
}

impl PresetSpikeTrain {
    /// Builds a preset train from `0`/`1` style values, anything non-zero is a spike
    pub fn from_binary(values: &[u8]) -> Self {
        PresetSpikeTrain {
            spikes: values.iter().map(|i| *i != 0).collect(),
        }
    }
}

impl SpikeTrain for PresetSpikeTrain {
    fn generate<R: Rng + ?Sized>(&self, length: usize, _rng: &mut R) -> Result<Vec<bool>, ConfigurationError> {
        if length == 0 {
            return Err(ConfigurationError::InvalidSimulationLength);
        }
        if length != self.spikes.len() {
            return Err(ConfigurationError::SpikeTrainLengthMismatch {
                expected: length,
                found: self.spikes.len(),
            });
        }

        Ok(self.spikes.clone())
    }
}

/// Generates a Poisson spike train of the given length with mean `rate` events
/// per timestep, see [`PoissonSpikeTrain`]
pub fn poisson_spike_train<R: Rng + ?Sized>(
    length: usize,
    rate: f64,
    rng: &mut R
) -> Result<Vec<bool>, ConfigurationError> {
    PoissonSpikeTrain { rate }.generate(length, rng)
}
