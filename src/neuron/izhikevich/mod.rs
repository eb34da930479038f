//! The Izhikevich neuron model integrated with forward Euler,
//! along with threshold based spike detection and the after spike reset.

use super::{CurrentVoltage, IsSpiking, IterateAndSpike, LastFiringTime};


/// Izhikevich parameters `(a, b, c, d)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IzhikevichParameters {
    /// Controls speed of the recovery variable
    pub a: f64,
    /// Controls sensitivity of the recovery variable to the membrane potential
    pub b: f64,
    /// After spike reset value for voltage (mV)
    pub c: f64,
    /// After spike increment for the recovery variable
    pub d: f64,
}

impl Default for IzhikevichParameters {
    fn default() -> Self {
        IzhikevichParameters {
            a: 0.02,
            b: 0.2,
            c: -65.,
            d: 8.,
        }
    }
}

/// Calculates the change in voltage given the state and an input current
pub fn izhikevich_get_dv_change(v: f64, u: f64, i: f64, dt: f64) -> f64 {
    (0.04 * v.powf(2.0) + 5. * v + 140. - u + i) * dt
}

/// Calculates the change in the recovery variable given the state
pub fn izhikevich_get_du_change(v: f64, u: f64, dt: f64, params: &IzhikevichParameters) -> f64 {
    (params.a * (params.b * v - u)) * dt
}

/// Advances the state by one forward Euler step of size `dt` given the input
/// current `i`, both changes are computed from the previous state, returns
/// `(v_new, u_new)`, no clamping is done so large `dt` or `i` may diverge
pub fn izhikevich_step(u_prev: f64, v_prev: f64, dt: f64, i: f64, params: &IzhikevichParameters) -> (f64, f64) {
    let dv = izhikevich_get_dv_change(v_prev, u_prev, i, dt);
    let du = izhikevich_get_du_change(v_prev, u_prev, dt, params);

    (v_prev + dv, u_prev + du)
}

/// Whether the potential has reached the threshold, only `v` decides,
/// `u` and the reset parameters are accepted so other detectors can use them
pub fn has_spiked(v: f64, _u: f64, _params: &IzhikevichParameters, v_th: f64) -> bool {
    v >= v_th
}

/// Applies the after spike reset, voltage is set to `c` and
/// the recovery variable is incremented by `d`, returns `(v, u)`
pub fn reset_after_spike(u: f64, params: &IzhikevichParameters) -> (f64, f64) {
    (params.c, u + params.d)
}

/// An Izhikevich neuron
#[derive(Debug, Clone)]
pub struct IzhikevichNeuron {
    /// Membrane potential (mV)
    pub current_voltage: f64,
    /// Recovery variable
    pub recovery: f64,
    /// Voltage threshold (mV)
    pub v_th: f64,
    /// Voltage initialization value (mV)
    pub v_init: f64,
    /// Recovery variable initialization value
    pub u_init: f64,
    /// Model parameters
    pub params: IzhikevichParameters,
    /// Time step (ms)
    pub dt: f64,
    /// Whether the neuron is spiking
    pub is_spiking: bool,
    /// Last timestep the neuron has spiked
    pub last_firing_time: Option<usize>,
}

impl Default for IzhikevichNeuron {
    fn default() -> Self {
        IzhikevichNeuron {
            current_voltage: 0.,
            recovery: 0.,
            v_th: 30., // spike threshold (mV)
            v_init: 0., // initial potential (mV)
            u_init: 0., // initial recovery value
            params: IzhikevichParameters::default(),
            dt: 1., // simulation time step (ms)
            is_spiking: false,
            last_firing_time: None,
        }
    }
}

impl IzhikevichNeuron {
    /// Builds a neuron at the given initial state
    pub fn new(params: IzhikevichParameters, v_th: f64, dt: f64, v_init: f64, u_init: f64) -> Self {
        IzhikevichNeuron {
            current_voltage: v_init,
            recovery: u_init,
            v_th,
            v_init,
            u_init,
            params,
            dt,
            ..IzhikevichNeuron::default()
        }
    }

    /// Returns the neuron to its initial state
    pub fn initialize(&mut self) {
        self.current_voltage = self.v_init;
        self.recovery = self.u_init;
        self.is_spiking = false;
        self.last_firing_time = None;
    }

    /// Determines whether the neuron is spiking, resets the voltage and
    /// updates the recovery value if spiking
    pub fn izhikevich_handle_spiking(&mut self) -> bool {
        let is_spiking = has_spiked(self.current_voltage, self.recovery, &self.params, self.v_th);

        if is_spiking {
            (self.current_voltage, self.recovery) = reset_after_spike(self.recovery, &self.params);
        }

        self.is_spiking = is_spiking;

        is_spiking
    }
}

impl CurrentVoltage for IzhikevichNeuron {
    fn get_current_voltage(&self) -> f64 {
        self.current_voltage
    }
}

impl IsSpiking for IzhikevichNeuron {
    fn is_spiking(&self) -> bool {
        self.is_spiking
    }
}

impl LastFiringTime for IzhikevichNeuron {
    fn set_last_firing_time(&mut self, timestep: Option<usize>) {
        self.last_firing_time = timestep;
    }

    fn get_last_firing_time(&self) -> Option<usize> {
        self.last_firing_time
    }
}

impl IterateAndSpike for IzhikevichNeuron {
    fn iterate_and_spike(&mut self, input_current: f64) -> bool {
        (self.current_voltage, self.recovery) = izhikevich_step(
            self.recovery,
            self.current_voltage,
            self.dt,
            input_current,
            &self.params,
        );

        self.izhikevich_handle_spiking()
    }
}
