#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use izhikevich_neuron_simulation::{
        error::ConfigurationError,
        neuron::spike_train::{poisson_spike_train, PoissonSpikeTrain, PresetSpikeTrain, SpikeTrain},
    };


    const ITERATIONS: usize = 100_000;

    #[test]
    fn test_expected_rate() -> Result<(), ConfigurationError> {
        let rates = [0., 0.05, 0.1, 0.5, 2.];

        for rate in rates {
            let mut rng = ChaCha8Rng::seed_from_u64(1234);
            let spike_train = PoissonSpikeTrain { rate };

            let spikes = spike_train.generate(ITERATIONS, &mut rng)?
                .iter()
                .filter(|i| **i)
                .count();

            if rate == 0. {
                assert_eq!(spikes, 0);
            } else {
                let expected = spike_train.spike_probability() * ITERATIONS as f64;
                // well over 5 standard deviations of a binomial count
                let tolerance = 6. * expected.sqrt();

                assert!(
                    (spikes as f64 - expected).abs() <= tolerance,
                    "rate {}: {} spikes, expected about {}", rate, spikes, expected,
                );
            }
        }

        Ok(())
    }

    #[test]
    fn test_length_matches_request() -> Result<(), ConfigurationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for length in [1, 2, 100, 1001] {
            assert_eq!(poisson_spike_train(length, 0.1, &mut rng)?.len(), length);
        }

        Ok(())
    }

    #[test]
    fn test_seeded_trains_are_identical() -> Result<(), ConfigurationError> {
        let first = poisson_spike_train(5000, 0.1, &mut ChaCha8Rng::seed_from_u64(99))?;
        let second = poisson_spike_train(5000, 0.1, &mut ChaCha8Rng::seed_from_u64(99))?;
        let other = poisson_spike_train(5000, 0.1, &mut ChaCha8Rng::seed_from_u64(100))?;

        assert_eq!(first, second);
        assert_ne!(first, other);

        Ok(())
    }

    #[test]
    fn test_invalid_requests() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(matches!(
            poisson_spike_train(10, -0.1, &mut rng),
            Err(ConfigurationError::NegativePoissonRate)
        ));
        assert!(matches!(
            poisson_spike_train(10, f64::NAN, &mut rng),
            Err(ConfigurationError::NegativePoissonRate)
        ));
        assert!(matches!(
            poisson_spike_train(0, 0.1, &mut rng),
            Err(ConfigurationError::InvalidSimulationLength)
        ));
    }

    #[test]
    fn test_preset_spike_train() -> Result<(), ConfigurationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let spike_train = PresetSpikeTrain::from_binary(&[0, 1, 0, 0, 2]);

        assert_eq!(spike_train.generate(5, &mut rng)?, vec![false, true, false, false, true]);
        assert!(matches!(
            spike_train.generate(6, &mut rng),
            Err(ConfigurationError::SpikeTrainLengthMismatch { expected: 6, found: 5 })
        ));

        Ok(())
    }
}
