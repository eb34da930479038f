//! Output of a finished [`SimulationHistory`], a csv with one row per
//! timestep and a stacked plot in [`plot`].

use std::{fs::File, io::{Read, Write}, path::Path};
use csv::{Reader, WriterBuilder};
use serde::{Deserialize, Serialize};
use crate::error::ReportError;
use crate::simulation::SimulationHistory;

pub mod plot;


/// Columns of the history csv, in order
pub const HISTORY_HEADER: [&str; 7] = ["index", "time", "s_in", "I_t", "u_t", "v_t", "s_out"];

/// A single row of the history csv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub index: usize,
    pub time: f64,
    pub s_in: u8,
    #[serde(rename = "I_t")]
    pub i_t: f64,
    pub u_t: f64,
    pub v_t: f64,
    pub s_out: u8,
}

/// Flattens the history into csv rows
pub fn history_records(history: &SimulationHistory) -> Vec<HistoryRecord> {
    (0..history.len())
        .map(|i| HistoryRecord {
            index: i,
            time: history.time[i],
            s_in: history.s_in[i] as u8,
            i_t: history.i_t[i],
            u_t: history.u_t[i],
            v_t: history.v_t[i],
            s_out: history.s_out[i] as u8,
        })
        .collect()
}

/// Writes the history as csv to any writer, the header is always written
/// even if the history is empty
pub fn write_history<W: Write>(history: &SimulationHistory, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HISTORY_HEADER)
        .map_err(|e| ReportError::CsvWriteError(e.to_string()))?;

    for record in history_records(history) {
        csv_writer.serialize(record)
            .map_err(|e| ReportError::CsvWriteError(e.to_string()))?;
    }

    csv_writer.flush()
        .map_err(|e| ReportError::CsvWriteError(e.to_string()))
}

/// Writes the history as csv to the given file, replacing it if it exists
pub fn write_history_csv<P: AsRef<Path>>(history: &SimulationHistory, path: P) -> Result<(), ReportError> {
    let file = File::create(path.as_ref())
        .map_err(|e| ReportError::CsvWriteError(format!("{}: {}", path.as_ref().display(), e)))?;

    write_history(history, file)
}

/// Reads history rows back from any reader, the header must match [`HISTORY_HEADER`]
pub fn read_history<R: Read>(reader: R) -> Result<Vec<HistoryRecord>, ReportError> {
    let mut csv_reader = Reader::from_reader(reader);

    let headers = csv_reader.headers()
        .map_err(|e| ReportError::CsvReadError(e.to_string()))?;
    if headers.iter().ne(HISTORY_HEADER.iter().copied()) {
        return Err(
            ReportError::CsvReadError(format!("Unexpected header: {}", headers.iter().collect::<Vec<&str>>().join(",")))
        );
    }

    csv_reader.deserialize()
        .map(|record| record.map_err(|e| ReportError::CsvReadError(e.to_string())))
        .collect()
}

/// Reads history rows back from a csv file written by [`write_history_csv`]
pub fn read_history_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HistoryRecord>, ReportError> {
    let file = File::open(path.as_ref())
        .map_err(|e| ReportError::CsvReadError(format!("{}: {}", path.as_ref().display(), e)))?;

    read_history(file)
}
