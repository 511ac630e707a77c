//! Normal distribution utilities.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use yj_core::{Error, Result};

/// Natural log of `sqrt(2π)`.
///
/// `ln(sqrt(2π)) = 0.5*ln(2π)` (precomputed to keep this crate const-friendly).
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Log-PDF of a Normal distribution `N(mu, sigma)` at `x`.
///
/// `log p(x) = -0.5 * ((x-mu)/sigma)^2 - ln(sigma) - ln(sqrt(2π))`
pub fn logpdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::Validation(format!("sigma must be finite and > 0, got {}", sigma)));
    }
    let z = (x - mu) / sigma;
    Ok(-0.5 * z * z - sigma.ln() - LN_SQRT_2PI)
}

/// Normal distribution with parameters validated once at construction.
#[derive(Debug, Clone, Copy)]
pub struct Normal {
    loc: f64,
    scale: f64,
}

impl Normal {
    /// Create `N(loc, scale)`. Requires finite `loc` and finite `scale > 0`.
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        if !loc.is_finite() {
            return Err(Error::Validation(format!("loc must be finite, got {}", loc)));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::Validation(format!("scale must be finite and > 0, got {}", scale)));
        }
        Ok(Self { loc, scale })
    }

    /// Location parameter.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Log-density at `x`. Non-finite `x` propagates.
    pub fn log_prob(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        -0.5 * z * z - self.scale.ln() - LN_SQRT_2PI
    }
}

impl Distribution<f64> for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        self.loc + self.scale * z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_at_zero() {
        let lp = logpdf(0.0, 0.0, 1.0).unwrap();
        assert!((lp + LN_SQRT_2PI).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let lp1 = logpdf(1.3, 0.0, 2.0).unwrap();
        let lp2 = logpdf(-1.3, 0.0, 2.0).unwrap();
        assert!((lp1 - lp2).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_sigma() {
        assert!(logpdf(0.0, 0.0, 0.0).is_err());
        assert!(logpdf(0.0, 0.0, -1.0).is_err());
    }

    #[test]
    fn test_struct_matches_free_fn() {
        let n = Normal::new(-1.2, 0.7).unwrap();
        for x in [-3.0, -1.2, 0.0, 0.4, 5.0] {
            let lp = logpdf(x, -1.2, 0.7).unwrap();
            assert!((n.log_prob(x) - lp).abs() < 1e-15, "x={}", x);
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        assert!(Normal::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_sample_moments() {
        let n = Normal::new(2.0, 0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<f64> = (0..50_000).map(|_| n.sample(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>()
            / (draws.len() - 1) as f64;
        assert!((mean - 2.0).abs() < 0.01, "mean={}", mean);
        assert!((var.sqrt() - 0.5).abs() < 0.01, "std={}", var.sqrt());
    }

    #[test]
    fn test_nan_propagates() {
        let n = Normal::new(0.0, 1.0).unwrap();
        assert!(n.log_prob(f64::NAN).is_nan());
    }
}
