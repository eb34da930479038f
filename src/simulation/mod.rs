//! The fixed step simulation loop driving a single Izhikevich neuron from an
//! input spike train through a synapse, and the history it produces.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use crate::error::{ConfigurationError, SimulationError, SimulationStateError};
use crate::neuron::{
    LastFiringTime, IterateAndSpike,
    izhikevich::{IzhikevichNeuron, IzhikevichParameters},
    spike_train::{PoissonSpikeTrain, SpikeTrain},
    synapse::{CurrentModel, SynapseParameters, SynapticCurrent},
};


/// Largest number of timesteps a single run may span, every timestep keeps
/// seven history entries in memory
pub const MAX_STEPS: usize = 50_000_000;

/// Every constant of a simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Total simulated time (ms)
    pub sim_duration: f64,
    /// Timestep (ms)
    pub dt: f64,
    /// Mean number of Poisson events per timestep for the input spike train
    pub poisson_rate: f64,
    /// Spike threshold for the membrane potential (mV)
    pub threshold: f64,
    /// Membrane potential before the first timestep (mV)
    pub v_init: f64,
    /// Recovery variable before the first timestep
    pub u_init: f64,
    /// Izhikevich parameters
    pub neuron: IzhikevichParameters,
    /// Synapse parameters
    pub synapse: SynapseParameters,
    /// Synaptic current model to use
    pub current_model: CurrentModel,
    /// Seed for the input spike train, `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            sim_duration: 100.,
            dt: 1.,
            poisson_rate: 0.1,
            threshold: 30.,
            v_init: 0.,
            u_init: 0.,
            neuron: IzhikevichParameters::default(),
            synapse: SynapseParameters::default(),
            current_model: CurrentModel::default(),
            seed: None,
        }
    }
}

impl SimulationParameters {
    /// Checks every parameter that could make the run meaningless
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.dt.is_finite() || self.dt <= 0. {
            return Err(ConfigurationError::NonPositiveTimestep);
        }
        if !self.sim_duration.is_finite() || self.sim_duration <= 0. {
            return Err(ConfigurationError::InvalidSimulationLength);
        }
        if !self.poisson_rate.is_finite() || self.poisson_rate < 0. {
            return Err(ConfigurationError::NegativePoissonRate);
        }

        self.synapse.validate()
    }

    /// Number of timesteps, `ceil(sim_duration / dt)` with ratios within
    /// rounding error of a whole number taken as that number, runs longer
    /// than [`MAX_STEPS`] are rejected
    pub fn num_steps(&self) -> Result<usize, ConfigurationError> {
        self.validate()?;

        let ratio = self.sim_duration / self.dt;
        if !ratio.is_finite() {
            return Err(ConfigurationError::InvalidSimulationLength);
        }

        let steps = if (ratio - ratio.round()).abs() <= 1e-9 * ratio.max(1.) {
            ratio.round()
        } else {
            ratio.ceil()
        };

        if steps < 1. || steps > MAX_STEPS as f64 {
            return Err(ConfigurationError::InvalidSimulationLength);
        }

        Ok(steps as usize)
    }

    /// Time of every timestep, starting at `1` and spaced by `dt`
    pub fn time_grid(&self) -> Result<Vec<f64>, ConfigurationError> {
        let steps = self.num_steps()?;

        Ok((0..steps).map(|i| 1. + i as f64 * self.dt).collect())
    }
}

/// Where the simulation is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// No timestep has been iterated
    NotStarted,
    /// `step` timesteps have been iterated
    Running { step: usize },
    /// Every timestep has been iterated
    Completed,
}

/// Index aligned time series of a finished simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationHistory {
    /// Time of each timestep (ms)
    pub time: Vec<f64>,
    /// Input spikes
    pub s_in: Vec<bool>,
    /// Synaptic response current
    pub i_t: Vec<f64>,
    /// Recovery variable
    pub u_t: Vec<f64>,
    /// Membrane potential (mV)
    pub v_t: Vec<f64>,
    /// Output spikes
    pub s_out: Vec<bool>,
    /// Total simulated time (ms)
    pub sim_duration: f64,
    /// First timestep where the potential or recovery stopped being finite
    pub diverged_at: Option<usize>,
    /// Last timestep with an output spike
    pub last_firing_time: Option<usize>,
}

impl SimulationHistory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn input_spike_count(&self) -> usize {
        self.s_in.iter().filter(|i| **i).count()
    }

    pub fn output_spike_count(&self) -> usize {
        self.s_out.iter().filter(|i| **i).count()
    }

    /// Indices of the timesteps with an output spike
    pub fn output_spike_indices(&self) -> Vec<usize> {
        self.s_out.iter()
            .enumerate()
            .filter(|(_, is_spiking)| **is_spiking)
            .map(|(n, _)| n)
            .collect()
    }
}

/// A single neuron simulation, owns every time series while it runs
pub struct Simulation {
    params: SimulationParameters,
    neuron: IzhikevichNeuron,
    synapse: Box<dyn SynapticCurrent>,
    state: SimulationState,
    time: Vec<f64>,
    s_in: Vec<bool>,
    i_t: Vec<f64>,
    u_t: Vec<f64>,
    v_t: Vec<f64>,
    s_out: Vec<bool>,
    diverged_at: Option<usize>,
}

impl Simulation {
    /// Sets up a simulation over a given input spike train, which must have one
    /// entry per timestep, parameters are validated here so an invalid
    /// configuration never iterates
    pub fn new(params: SimulationParameters, input_spikes: Vec<bool>) -> Result<Self, SimulationError> {
        let time = params.time_grid()?;
        let steps = time.len();

        if input_spikes.len() != steps {
            return Err(
                ConfigurationError::SpikeTrainLengthMismatch {
                    expected: steps,
                    found: input_spikes.len(),
                }.into()
            );
        }

        let synapse = params.current_model.build(params.synapse, &time, &input_spikes);
        let neuron = IzhikevichNeuron::new(
            params.neuron, params.threshold, params.dt, params.v_init, params.u_init,
        );

        Ok(
            Simulation {
                params,
                neuron,
                synapse,
                state: SimulationState::NotStarted,
                time,
                s_in: input_spikes,
                i_t: vec![0.; steps],
                u_t: vec![0.; steps],
                v_t: vec![0.; steps],
                s_out: vec![false; steps],
                diverged_at: None,
            }
        )
    }

    /// Generates the input spike train with the given spike train and random source,
    /// then sets up the simulation over it
    pub fn from_spike_train<T: SpikeTrain, R: Rng + ?Sized>(
        params: SimulationParameters,
        spike_train: &T,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let steps = params.num_steps()?;
        let input_spikes = spike_train.generate(steps, rng)?;

        Simulation::new(params, input_spikes)
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn input_spikes(&self) -> &[bool] {
        &self.s_in
    }

    pub fn num_steps(&self) -> usize {
        self.time.len()
    }

    /// Iterates one timestep: calculates the synaptic current including any input
    /// spike at this timestep, integrates the neuron from the previous state, and
    /// resets the neuron in place if it crossed the threshold
    pub fn iterate(&mut self) -> Result<SimulationState, SimulationError> {
        let i = match self.state {
            SimulationState::NotStarted => {
                info!(
                    steps = self.num_steps(),
                    dt = self.params.dt,
                    current_model = self.params.current_model.as_str(),
                    "starting simulation"
                );

                0
            },
            SimulationState::Running { step } => step,
            SimulationState::Completed => return Err(SimulationStateError::AlreadyCompleted.into()),
        };

        let time = self.time[i];
        let current = self.synapse.next_current(time, self.s_in[i]);
        self.i_t[i] = current;

        let is_spiking = self.neuron.iterate_and_spike(current);
        if is_spiking {
            self.s_out[i] = true;
            self.neuron.set_last_firing_time(Some(i));
            debug!(step = i, time, "output spike");
        }

        self.v_t[i] = self.neuron.current_voltage;
        self.u_t[i] = self.neuron.recovery;

        if self.diverged_at.is_none() && !(self.v_t[i].is_finite() && self.u_t[i].is_finite()) {
            self.diverged_at = Some(i);
            warn!(step = i, time, "membrane potential diverged, consider a smaller dt");
        }

        self.state = if i + 1 == self.num_steps() {
            SimulationState::Completed
        } else {
            SimulationState::Running { step: i + 1 }
        };

        Ok(self.state)
    }

    /// Iterates every remaining timestep and returns the finished history
    pub fn run(mut self) -> Result<SimulationHistory, SimulationError> {
        while self.state != SimulationState::Completed {
            self.iterate()?;
        }

        let history = SimulationHistory {
            time: self.time,
            s_in: self.s_in,
            i_t: self.i_t,
            u_t: self.u_t,
            v_t: self.v_t,
            s_out: self.s_out,
            sim_duration: self.params.sim_duration,
            diverged_at: self.diverged_at,
            last_firing_time: self.neuron.get_last_firing_time(),
        };

        info!(
            input_spikes = history.input_spike_count(),
            output_spikes = history.output_spike_count(),
            "simulation finished"
        );

        Ok(history)
    }
}

/// Builds the random source for the input spike train, seeded if a seed is given
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Draws a Poisson input spike train at `params.poisson_rate` and runs the
/// full simulation over it
pub fn run_simulation(params: &SimulationParameters) -> Result<SimulationHistory, SimulationError> {
    params.validate()?;

    let mut rng = seeded_rng(params.seed);
    let spike_train = PoissonSpikeTrain { rate: params.poisson_rate };

    Simulation::from_spike_train(*params, &spike_train, &mut rng)?.run()
}
