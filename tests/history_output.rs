#[cfg(test)]
mod test {
    use std::fs::read_to_string;
    use tempfile::tempdir;
    use izhikevich_neuron_simulation::{
        error::{ReportError, SimulationError},
        report::{
            history_records, plot::plot_history, read_history, read_history_csv,
            write_history, write_history_csv, HISTORY_HEADER,
        },
        simulation::{run_simulation, SimulationHistory, SimulationParameters},
    };


    fn seeded_history(sim_duration: f64, dt: f64) -> Result<SimulationHistory, SimulationError> {
        let params = SimulationParameters {
            sim_duration,
            dt,
            poisson_rate: 0.2,
            seed: Some(7),
            ..SimulationParameters::default()
        };

        run_simulation(&params)
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_step() -> Result<(), SimulationError> {
        let history = seeded_history(50., 0.5)?;

        let mut buffer = Vec::new();
        write_history(&history, &mut buffer)?;
        let contents = String::from_utf8_lossy(&buffer);
        let mut lines = contents.lines();

        assert_eq!(lines.next(), Some("index,time,s_in,I_t,u_t,v_t,s_out"));
        assert_eq!(lines.count(), history.len());
        assert_eq!(history.len(), 100);

        Ok(())
    }

    #[test]
    fn test_csv_reads_back_exactly() -> Result<(), SimulationError> {
        let history = seeded_history(200., 1.)?;
        let dir = tempdir().map_err(|e| ReportError::CsvWriteError(e.to_string()))?;
        let path = dir.path().join("history.csv");

        write_history_csv(&history, &path)?;
        let records = read_history_csv(&path)?;

        assert_eq!(records, history_records(&history));

        for (n, record) in records.iter().enumerate() {
            assert_eq!(record.index, n);
            assert_eq!(record.time, history.time[n]);
            assert_eq!(record.i_t, history.i_t[n]);
            assert_eq!(record.u_t, history.u_t[n]);
            assert_eq!(record.v_t, history.v_t[n]);
            assert!(record.s_in <= 1 && record.s_out <= 1);
            assert_eq!(record.s_in == 1, history.s_in[n]);
            assert_eq!(record.s_out == 1, history.s_out[n]);
        }

        Ok(())
    }

    #[test]
    fn test_spike_columns_are_zero_or_one() -> Result<(), SimulationError> {
        let history = seeded_history(100., 1.)?;

        let mut buffer = Vec::new();
        write_history(&history, &mut buffer)?;
        let contents = String::from_utf8_lossy(&buffer);

        for line in contents.lines().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();

            assert_eq!(fields.len(), HISTORY_HEADER.len());
            assert!(fields[2] == "0" || fields[2] == "1");
            assert!(fields[6] == "0" || fields[6] == "1");
        }

        Ok(())
    }

    #[test]
    fn test_unexpected_header_is_rejected() {
        let contents = "step,time,s_in,I_t,u_t,v_t,s_out\n0,1.0,0,0.0,8.0,-65.0,1\n";

        assert!(matches!(
            read_history(contents.as_bytes()),
            Err(ReportError::CsvReadError(_))
        ));
    }

    #[test]
    fn test_missing_directory_is_a_write_error() -> Result<(), SimulationError> {
        let history = seeded_history(10., 1.)?;
        let dir = tempdir().map_err(|e| ReportError::CsvWriteError(e.to_string()))?;

        let result = write_history_csv(&history, dir.path().join("missing").join("history.csv"));

        assert!(matches!(result, Err(ReportError::CsvWriteError(_))));

        Ok(())
    }

    #[test]
    fn test_plot_is_written() -> Result<(), SimulationError> {
        let history = seeded_history(100., 1.)?;
        let dir = tempdir().map_err(|e| ReportError::PlotError(e.to_string()))?;
        let path = dir.path().join("history.svg");

        plot_history(&history, &path)?;

        let contents = read_to_string(&path).map_err(|e| ReportError::PlotError(e.to_string()))?;

        assert!(contents.contains("<svg"));
        for title in [
            "Input Spikes",
            "Synaptic Response Current",
            "Izhikevich Neuron Membrane Recovery",
            "Izhikevich Neuron Membrane Potential",
            "Output Spikes",
        ] {
            assert!(contents.contains(title), "plot is missing the {} panel", title);
        }

        Ok(())
    }

    #[test]
    fn test_plot_handles_a_single_step() -> Result<(), SimulationError> {
        let history = seeded_history(1., 1.)?;
        let dir = tempdir().map_err(|e| ReportError::PlotError(e.to_string()))?;
        let path = dir.path().join("single.svg");

        plot_history(&history, &path)?;

        assert!(path.exists());

        Ok(())
    }
}
