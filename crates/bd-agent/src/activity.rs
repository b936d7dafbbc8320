//! Poisson sampling of per-round post and read counts.

use bd_core::{ActivityRates, CoreError, CoreResult};
use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Pre-built Poisson distributions for λ_post and λ_read.
///
/// A rate of zero has no `Poisson` (the distribution requires λ > 0) and
/// always yields zero.
#[derive(Clone, Debug)]
pub struct ActivitySampler {
    post: Option<Poisson<f64>>,
    read: Option<Poisson<f64>>,
}

impl ActivitySampler {
    pub fn new(rates: ActivityRates) -> CoreResult<Self> {
        rates.validate()?;
        Ok(Self {
            post: poisson(rates.post)?,
            read: poisson(rates.read)?,
        })
    }

    /// Draw a `posts_per_round` value.
    #[inline]
    pub fn posts<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        draw(self.post.as_ref(), rng)
    }

    /// Draw a `reads_per_round` value.
    #[inline]
    pub fn reads<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        draw(self.read.as_ref(), rng)
    }
}

fn poisson(lambda: f64) -> CoreResult<Option<Poisson<f64>>> {
    if lambda == 0.0 {
        return Ok(None);
    }
    Poisson::new(lambda)
        .map(Some)
        .map_err(|e| CoreError::InvalidParameter(format!("Poisson rate {lambda}: {e}")))
}

fn draw<R: Rng + ?Sized>(dist: Option<&Poisson<f64>>, rng: &mut R) -> u32 {
    match dist {
        Some(d) => d.sample(rng) as u32,
        None => 0,
    }
}
