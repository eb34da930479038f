//! A tool to draw Poisson counts and collapse them into event indicators.

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use crate::error::ConfigurationError;


/// Draws `length` independent counts from a Poisson distribution with mean `rate`
/// and reports whether any event occurred at each draw, a `rate` of `0.` never
/// produces an event and no entropy is consumed
pub fn poisson_events<R: Rng + ?Sized>(
    length: usize,
    rate: f64,
    rng: &mut R
) -> Result<Vec<bool>, ConfigurationError> {
    if !rate.is_finite() || rate < 0. {
        return Err(ConfigurationError::NegativePoissonRate);
    }
    if rate == 0. {
        return Ok(vec![false; length]);
    }

    let poisson = Poisson::new(rate).map_err(|_| ConfigurationError::NegativePoissonRate)?;

    Ok(
        (0..length)
            .map(|_| poisson.sample(rng) > 0.)
            .collect()
    )
}
