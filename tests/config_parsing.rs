#[cfg(test)]
mod test {
    use std::{fs::write, path::PathBuf};
    use tempfile::tempdir;
    use izhikevich_neuron_simulation::{
        config::{parse_config, read_config, OutputSettings, SimulationConfig},
        error::ConfigurationError,
        neuron::synapse::CurrentModel,
        simulation::SimulationParameters,
    };


    #[test]
    fn test_empty_config_is_default() -> Result<(), ConfigurationError> {
        assert_eq!(parse_config("")?, SimulationConfig::default());
        assert_eq!(parse_config("[simulation]\n[output]\n")?, SimulationConfig::default());

        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<(), ConfigurationError> {
        let config = parse_config(r#"
            [simulation]
            sim_duration = 250
            dt = 0.25
            poisson_rate = 0.3
            a = 0.1
            b = 0.25
            c = -60
            d = 2
            tau = 5.5
            weight = 12
            threshold = 25
            reversal_potential = -70
            v_init = -70
            u_init = -14
            seed = 42
            current_model = "accumulator"

            [output]
            csv = "out/run.csv"
            plot = "out/run.svg"
        "#)?;

        let params = config.parameters;
        assert_eq!(params.sim_duration, 250.);
        assert_eq!(params.dt, 0.25);
        assert_eq!(params.poisson_rate, 0.3);
        assert_eq!(params.neuron.a, 0.1);
        assert_eq!(params.neuron.b, 0.25);
        assert_eq!(params.neuron.c, -60.);
        assert_eq!(params.neuron.d, 2.);
        assert_eq!(params.synapse.tau, 5.5);
        assert_eq!(params.synapse.weight, 12.);
        assert_eq!(params.synapse.reversal_potential, -70.);
        assert_eq!(params.threshold, 25.);
        assert_eq!(params.v_init, -70.);
        assert_eq!(params.u_init, -14.);
        assert_eq!(params.seed, Some(42));
        assert_eq!(params.current_model, CurrentModel::Accumulator);

        assert_eq!(config.output.csv_path, PathBuf::from("out/run.csv"));
        assert_eq!(config.output.plot_path, Some(PathBuf::from("out/run.svg")));

        Ok(())
    }

    #[test]
    fn test_partial_config_keeps_defaults() -> Result<(), ConfigurationError> {
        let config = parse_config("[simulation]\ndt = 0.1\n")?;

        assert_eq!(
            config.parameters,
            SimulationParameters { dt: 0.1, ..SimulationParameters::default() }
        );
        assert_eq!(config.output, OutputSettings::default());

        Ok(())
    }

    #[test]
    fn test_plot_can_be_turned_off() -> Result<(), ConfigurationError> {
        let off = parse_config("[output]\nplot = false\n")?;
        let on = parse_config("[output]\nplot = true\n")?;

        assert_eq!(off.output.plot_path, None);
        assert_eq!(on.output.plot_path, OutputSettings::default().plot_path);

        Ok(())
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let cases = [
            ("[simulation]\ndt = \"fast\"\n", "dt"),
            ("[simulation]\nseed = -1\n", "seed"),
            ("[simulation]\nseed = 1.5\n", "seed"),
            ("[simulation]\ncurrent_model = 3\n", "current_model"),
            ("[output]\ncsv = 1\n", "csv"),
        ];

        for (contents, key) in cases {
            match parse_config(contents) {
                Err(ConfigurationError::CannotParseField { field, .. }) => assert_eq!(field, key),
                other => panic!("{} was not rejected: {:?}", key, other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(matches!(
            parse_config("[simulation\ndt = 1"),
            Err(ConfigurationError::InvalidToml(_))
        ));
    }

    #[test]
    fn test_unknown_current_model_is_rejected() {
        assert!(matches!(
            parse_config("[simulation]\ncurrent_model = \"conductance\"\n"),
            Err(ConfigurationError::UnknownCurrentModel(_))
        ));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        assert!(matches!(
            parse_config("[simulation]\ndt = 0\n"),
            Err(ConfigurationError::NonPositiveTimestep)
        ));
        assert!(matches!(
            parse_config("[simulation]\ntau = -2\n"),
            Err(ConfigurationError::NonPositiveTau)
        ));
        assert!(matches!(
            parse_config("[simulation]\nsim_duration = 0\n"),
            Err(ConfigurationError::InvalidSimulationLength)
        ));
        assert!(matches!(
            parse_config("[simulation]\npoisson_rate = -0.1\n"),
            Err(ConfigurationError::NegativePoissonRate)
        ));
        assert!(matches!(
            parse_config("[simulation]\nsim_duration = 1e300\ndt = 1e-300\n"),
            Err(ConfigurationError::InvalidSimulationLength)
        ));
    }

    #[test]
    fn test_read_config_from_file() -> Result<(), ConfigurationError> {
        let dir = tempdir().map_err(|e| ConfigurationError::CannotReadFile(e.to_string()))?;
        let path = dir.path().join("simulation.toml");
        write(&path, "[simulation]\nseed = 9\n")
            .map_err(|e| ConfigurationError::CannotReadFile(e.to_string()))?;

        assert_eq!(read_config(&path)?.parameters.seed, Some(9));
        assert!(matches!(
            read_config(dir.path().join("missing.toml")),
            Err(ConfigurationError::CannotReadFile(_))
        ));

        Ok(())
    }
}
