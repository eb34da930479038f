//! Neuron dynamics, input spike trains and the synaptic currents connecting them.

pub mod izhikevich;
pub mod spike_train;
pub mod synapse;


/// Gets the current voltage of the model (mV)
pub trait CurrentVoltage {
    fn get_current_voltage(&self) -> f64;
}

/// Gets whether the model is currently spiking
pub trait IsSpiking {
    fn is_spiking(&self) -> bool;
}

/// Handles the last timestep the model has fired at
pub trait LastFiringTime {
    /// Sets the last firing time
    fn set_last_firing_time(&mut self, timestep: Option<usize>);
    /// Gets the last firing time
    fn get_last_firing_time(&self) -> Option<usize>;
}

/// Handles the neuronal dynamics of a single timestep
pub trait IterateAndSpike: CurrentVoltage + IsSpiking + LastFiringTime {
    /// Takes in an input current and returns whether the model is spiking
    /// after the membrane potential is updated, any after spike reset has
    /// already been applied when this returns
    fn iterate_and_spike(&mut self, input_current: f64) -> bool;
}

/// Takes in a static current as an input and iterates the given
/// neuron for a given duration, returns the voltages from the neuron over time
pub fn run_static_input<T: IterateAndSpike>(
    cell: &mut T,
    input: f64,
    iterations: usize
) -> Vec<f64> {
    let mut voltages: Vec<f64> = vec![];

    for timestep in 0..iterations {
        let is_spiking = cell.iterate_and_spike(input);
        if is_spiking {
            cell.set_last_firing_time(Some(timestep));
        }

        voltages.push(cell.get_current_voltage());
    }

    voltages
}
