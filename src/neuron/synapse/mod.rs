//! Synaptic response current models that turn an input spike train into
//! the current driving the neuron, every model uses an exponentially decaying
//! kernel over past spikes.

use std::str::FromStr;
use rayon::prelude::*;
use crate::error::ConfigurationError;


/// Parameters of an exponential current based synapse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynapseParameters {
    /// Decay time constant of the synaptic response (ms)
    pub tau: f64,
    /// Weight of the input synapse
    pub weight: f64,
    /// Reversal potential (mV), carried for a conductance based synapse
    /// but not used by the current based models
    pub reversal_potential: f64,
}

impl Default for SynapseParameters {
    fn default() -> Self {
        SynapseParameters {
            tau: 10.,
            weight: 10.,
            reversal_potential: 0.,
        }
    }
}

impl SynapseParameters {
    /// Checks that the decay constant is usable
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.tau.is_finite() || self.tau <= 0. {
            return Err(ConfigurationError::NonPositiveTau);
        }

        Ok(())
    }
}

/// Calculates the synaptic response current at time `t` given every spike time
/// observed at or before `t`, `weight * sum(exp(-(t - t_spike) / tau))`,
/// with no spikes the current is `0.`
pub fn current_at(t: f64, spike_times: &[f64], tau: f64, weight: f64) -> f64 {
    spike_times.iter()
        .map(|spike_time| weight * (-(t - spike_time) / tau).exp())
        .sum()
}

/// Handles the synaptic current over the course of a simulation
pub trait SynapticCurrent: Send {
    /// Returns the current at `time`, `is_spiking` marks an input spike at that
    /// same time which contributes to the returned value, must be called once
    /// per timestep in increasing time order
    fn next_current(&mut self, time: f64, is_spiking: bool) -> f64;
}

/// Keeps the full spike history and re-sums the kernel over it every timestep
#[derive(Debug, Clone)]
pub struct ExponentialKernel {
    pub params: SynapseParameters,
    /// Every input spike time seen so far
    pub spike_times: Vec<f64>,
}

impl ExponentialKernel {
    pub fn new(params: SynapseParameters) -> Self {
        ExponentialKernel { params, spike_times: Vec::new() }
    }
}

impl SynapticCurrent for ExponentialKernel {
    fn next_current(&mut self, time: f64, is_spiking: bool) -> f64 {
        if is_spiking {
            self.spike_times.push(time);
        }

        current_at(time, &self.spike_times, self.params.tau, self.params.weight)
    }
}

/// Keeps a single running current that decays by `exp(-dt / tau)` between
/// timesteps and jumps by the weight on every input spike
#[derive(Debug, Clone)]
pub struct DecayingAccumulator {
    pub params: SynapseParameters,
    /// Current as of `last_time`
    pub current: f64,
    /// Time of the last update
    pub last_time: Option<f64>,
}

impl DecayingAccumulator {
    pub fn new(params: SynapseParameters) -> Self {
        DecayingAccumulator { params, current: 0., last_time: None }
    }
}

impl SynapticCurrent for DecayingAccumulator {
    fn next_current(&mut self, time: f64, is_spiking: bool) -> f64 {
        if let Some(last_time) = self.last_time {
            self.current *= (-(time - last_time) / self.params.tau).exp();
        }
        if is_spiking {
            self.current += self.params.weight;
        }
        self.last_time = Some(time);

        self.current
    }
}

/// Calculates the current for every timestep of the grid in parallel, the current
/// does not depend on the neuron state so every timestep is independent,
/// values are identical to those of [`ExponentialKernel`]
pub fn precompute_currents(times: &[f64], spikes: &[bool], params: &SynapseParameters) -> Vec<f64> {
    let spike_times: Vec<f64> = times.iter()
        .zip(spikes.iter())
        .filter(|(_, is_spiking)| **is_spiking)
        .map(|(time, _)| *time)
        .collect();

    times.par_iter()
        .map(|t| {
            // spike times are sorted since the grid is increasing
            let seen = spike_times.partition_point(|spike_time| spike_time <= t);

            current_at(*t, &spike_times[..seen], params.tau, params.weight)
        })
        .collect()
}

/// Replays a current trace computed ahead of time by [`precompute_currents`]
#[derive(Debug, Clone)]
pub struct PrecomputedCurrent {
    pub currents: Vec<f64>,
    /// Index of the next value to return
    pub counter: usize,
}

impl PrecomputedCurrent {
    pub fn new(times: &[f64], spikes: &[bool], params: &SynapseParameters) -> Self {
        PrecomputedCurrent {
            currents: precompute_currents(times, spikes, params),
            counter: 0,
        }
    }
}

impl SynapticCurrent for PrecomputedCurrent {
    fn next_current(&mut self, _time: f64, _is_spiking: bool) -> f64 {
        let current = self.currents.get(self.counter).copied().unwrap_or(0.);
        self.counter += 1;

        current
    }
}

/// Which synaptic current model drives the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentModel {
    /// [`ExponentialKernel`]
    #[default]
    Kernel,
    /// [`DecayingAccumulator`]
    Accumulator,
    /// [`PrecomputedCurrent`]
    Parallel,
}

impl FromStr for CurrentModel {
    type Err = ConfigurationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.trim().to_ascii_lowercase().as_str() {
            "kernel" | "naive" => Ok(CurrentModel::Kernel),
            "accumulator" | "accumulated" => Ok(CurrentModel::Accumulator),
            "parallel" => Ok(CurrentModel::Parallel),
            _ => Err(ConfigurationError::UnknownCurrentModel(String::from(string))),
        }
    }
}

impl CurrentModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentModel::Kernel => "kernel",
            CurrentModel::Accumulator => "accumulator",
            CurrentModel::Parallel => "parallel",
        }
    }

    /// Builds the model for a given time grid and input spike train
    pub fn build(
        &self,
        params: SynapseParameters,
        times: &[f64],
        spikes: &[bool]
    ) -> Box<dyn SynapticCurrent> {
        match self {
            CurrentModel::Kernel => Box::new(ExponentialKernel::new(params)),
            CurrentModel::Accumulator => Box::new(DecayingAccumulator::new(params)),
            CurrentModel::Parallel => Box::new(PrecomputedCurrent::new(times, spikes, &params)),
        }
    }
}
