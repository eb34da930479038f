//! # Izhikevich Neuron Simulation
//!
//! `izhikevich_neuron_simulation` simulates a single Izhikevich neuron driven by
//! a Poisson input spike train. Input spikes are turned into a synaptic response
//! current through an exponentially decaying kernel, the neuron's membrane potential
//! and recovery variable are integrated with forward Euler at a fixed timestep, and
//! output spikes are detected with a threshold and reset rule. The finished time
//! series can be written as a csv and rendered as a stacked plot.
//!
//! ## Example Code
//!
//! ### Running a seeded simulation
//!
//! ```rust
//! use izhikevich_neuron_simulation::{
//!     error::SimulationError,
//!     simulation::{run_simulation, SimulationParameters},
//! };
//!
//! fn main() -> Result<(), SimulationError> {
//!     let params = SimulationParameters {
//!         sim_duration: 200.,
//!         poisson_rate: 0.2,
//!         seed: Some(7),
//!         ..SimulationParameters::default()
//!     };
//!
//!     let history = run_simulation(&params)?;
//!
//!     assert_eq!(history.len(), 200);
//!     // every spike resets the potential to `c`
//!     for i in history.output_spike_indices() {
//!         assert_eq!(history.v_t[i], params.neuron.c);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Driving the neuron from a preset spike train
//!
//! ```rust
//! use izhikevich_neuron_simulation::{
//!     error::SimulationError,
//!     neuron::{spike_train::PresetSpikeTrain, synapse::CurrentModel},
//!     simulation::{seeded_rng, Simulation, SimulationParameters, SimulationState},
//! };
//!
//! fn main() -> Result<(), SimulationError> {
//!     let params = SimulationParameters {
//!         sim_duration: 5.,
//!         dt: 1.,
//!         current_model: CurrentModel::Accumulator,
//!         ..SimulationParameters::default()
//!     };
//!     let spike_train = PresetSpikeTrain::from_binary(&[0, 1, 0, 0, 0]);
//!
//!     let mut simulation = Simulation::from_spike_train(params, &spike_train, &mut seeded_rng(None))?;
//!     assert_eq!(simulation.iterate()?, SimulationState::Running { step: 1 });
//!
//!     let history = simulation.run()?;
//!     assert_eq!(history.i_t[1], 10.);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod neuron;
pub mod report;
pub mod simulation;
