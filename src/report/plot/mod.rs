//! Renders a history as five stacked panels sharing a time axis: input spikes,
//! synaptic current, recovery variable, membrane potential and output spikes.

use std::{fmt::Display, ops::Range, path::Path};
use plotters::{coord::Shift, prelude::*};
use crate::error::ReportError;
use crate::simulation::SimulationHistory;


/// Upper display bound of the membrane potential, spikes are drawn up to this value
pub const POTENTIAL_DISPLAY_MAX: f64 = 30.;
/// Fixed y range of the membrane potential panel
pub const POTENTIAL_RANGE: Range<f64> = -80.0..35.0;

fn plot_error<E: Display>(err: E) -> ReportError {
    ReportError::PlotError(err.to_string())
}

// pads flat traces so the axis range is never empty
fn value_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values.iter()
        .filter(|i| i.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), i| (min.min(*i), max.max(*i)));

    if min > max {
        return -1.0..1.0;
    }

    let padding = ((max - min) * 0.05).max(1.);

    (min - padding)..(max + padding)
}

fn draw_raster<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    x_range: Range<f64>,
    time: &[f64],
    spikes: &[bool],
) -> Result<(), ReportError> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, 0.0..1.0)
        .map_err(plot_error)?;

    chart.configure_mesh()
        .disable_y_mesh()
        .y_labels(2)
        .x_desc("t")
        .draw()
        .map_err(plot_error)?;

    chart.draw_series(
        time.iter()
            .zip(spikes.iter())
            .filter(|(_, is_spiking)| **is_spiking)
            .map(|(t, _)| PathElement::new(vec![(*t, 0.), (*t, 1.)], BLACK))
    ).map_err(plot_error)?;

    Ok(())
}

fn draw_trace<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    x_range: Range<f64>,
    y_range: Range<f64>,
    points: Vec<(f64, f64)>,
) -> Result<(), ReportError> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart.configure_mesh()
        .x_desc("t")
        .y_desc(y_desc)
        .draw()
        .map_err(plot_error)?;

    chart.draw_series(LineSeries::new(points, &BLUE))
        .map_err(plot_error)?;

    Ok(())
}

/// Draws the five panels of a history onto a drawing area
pub fn draw_history<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    history: &SimulationHistory,
) -> Result<(), ReportError> {
    root.fill(&WHITE).map_err(plot_error)?;

    let last_time = history.time.last().copied().unwrap_or(1.);
    let x_end = history.sim_duration.max(last_time);
    let x_range = if x_end > 1. { 1.0..x_end } else { 1.0..2.0 };

    let trace = |values: &[f64], clip: f64| -> Vec<(f64, f64)> {
        history.time.iter()
            .zip(values.iter())
            .filter(|(_, i)| i.is_finite())
            .map(|(t, i)| (*t, i.min(clip)))
            .collect()
    };

    let panels = root.split_evenly((5, 1));

    draw_raster(&panels[0], "Input Spikes", x_range.clone(), &history.time, &history.s_in)?;
    draw_trace(
        &panels[1],
        "Synaptic Response Current",
        "I(t)",
        x_range.clone(),
        value_range(&history.i_t),
        trace(&history.i_t, f64::INFINITY),
    )?;
    draw_trace(
        &panels[2],
        "Izhikevich Neuron Membrane Recovery",
        "u(t)",
        x_range.clone(),
        value_range(&history.u_t),
        trace(&history.u_t, f64::INFINITY),
    )?;
    draw_trace(
        &panels[3],
        "Izhikevich Neuron Membrane Potential",
        "v(t)",
        x_range.clone(),
        POTENTIAL_RANGE,
        trace(&history.v_t, POTENTIAL_DISPLAY_MAX),
    )?;
    draw_raster(&panels[4], "Output Spikes", x_range, &history.time, &history.s_out)?;

    root.present().map_err(plot_error)
}

/// Renders the history to an svg file at `path`
pub fn plot_history<P: AsRef<Path>>(history: &SimulationHistory, path: P) -> Result<(), ReportError> {
    let root = SVGBackend::new(path.as_ref(), (1000, 1500)).into_drawing_area();

    draw_history(&root, history)
}
