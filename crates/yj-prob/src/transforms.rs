//! Bijective transforms (bijectors) for the Yeo-Johnson family.
//!
//! A bijector is fully characterized by its forward map, closed-form inverse,
//! and the log absolute determinant of its Jacobian. Chaining bijectors
//! composes forward maps left-to-right, inverses right-to-left, and sums
//! Jacobian terms (chain rule), which is exactly what a transformed density
//! needs.

use yj_core::{Error, Result};

/// A bijective transform `y = f(x)` on (a sub-interval of) the real line.
pub trait Bijector: Send + Sync {
    /// Forward map: `y = forward(x)`
    fn forward(&self, x: f64) -> f64;
    /// Inverse map: `x = inverse(y)`
    fn inverse(&self, y: f64) -> f64;
    /// Log absolute determinant of Jacobian: `log|dy/dx|`
    fn log_abs_det_jacobian(&self, x: f64) -> f64;
    /// Jacobian element: `dy/dx`
    fn jacobian(&self, x: f64) -> f64;

    /// Elementwise forward over a slice, preserving order.
    fn forward_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.forward(x)).collect()
    }

    /// Elementwise inverse over a slice, preserving order.
    fn inverse_many(&self, ys: &[f64]) -> Vec<f64> {
        ys.iter().map(|&y| self.inverse(y)).collect()
    }

    /// Elementwise `log|dy/dx|` over a slice, preserving order.
    fn log_abs_det_jacobian_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.log_abs_det_jacobian(x)).collect()
    }
}

/// Affine: `y = loc + scale * x`, `log|J| = ln|scale|` (constant in x).
#[derive(Debug, Clone, Copy)]
pub struct AffineBijector {
    loc: f64,
    scale: f64,
    log_abs_scale: f64,
}

impl AffineBijector {
    /// Create `y = loc + scale * x`. Requires finite parameters and `scale != 0`.
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        if !loc.is_finite() || !scale.is_finite() {
            return Err(Error::Validation(format!(
                "affine parameters must be finite, got loc={}, scale={}",
                loc, scale
            )));
        }
        if scale == 0.0 {
            return Err(Error::Validation(format!("affine scale must be nonzero, got {}", scale)));
        }
        Ok(Self { loc, scale, log_abs_scale: scale.abs().ln() })
    }

    /// Location parameter.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Bijector for AffineBijector {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        self.loc + self.scale * x
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        (y - self.loc) / self.scale
    }
    #[inline]
    fn log_abs_det_jacobian(&self, _x: f64) -> f64 {
        self.log_abs_scale
    }
    #[inline]
    fn jacobian(&self, _x: f64) -> f64 {
        self.scale
    }
}

/// Power: `y = x^p` on `x > 0`, `log|J| = ln|p| + (p-1) ln x`.
#[derive(Debug, Clone, Copy)]
pub struct PowerBijector {
    exponent: f64,
    log_abs_exponent: f64,
}

impl PowerBijector {
    /// Create `y = x^p`. Requires finite `p != 0` (`p = 0` is not invertible).
    pub fn new(exponent: f64) -> Result<Self> {
        if !exponent.is_finite() || exponent == 0.0 {
            return Err(Error::Validation(format!(
                "power exponent must be finite and nonzero, got {}",
                exponent
            )));
        }
        Ok(Self { exponent, log_abs_exponent: exponent.abs().ln() })
    }

    /// Exponent parameter.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl Bijector for PowerBijector {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        x.powf(self.exponent)
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        y.powf(1.0 / self.exponent)
    }
    #[inline]
    fn log_abs_det_jacobian(&self, x: f64) -> f64 {
        self.log_abs_exponent + (self.exponent - 1.0) * x.ln()
    }
    #[inline]
    fn jacobian(&self, x: f64) -> f64 {
        self.exponent * x.powf(self.exponent - 1.0)
    }
}

/// Log: `y = ln x` on `x > 0`, inverse `exp`, `log|J| = -ln x`.
#[derive(Debug, Clone, Copy)]
pub struct LogBijector;

impl Bijector for LogBijector {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        x.ln()
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        y.exp()
    }
    #[inline]
    fn log_abs_det_jacobian(&self, x: f64) -> f64 {
        -x.ln()
    }
    #[inline]
    fn jacobian(&self, x: f64) -> f64 {
        x.recip()
    }
}

/// Composition of bijectors, applied left-to-right on the forward pass.
///
/// The inverse applies each step's inverse right-to-left. `log|J|`
/// contributions are evaluated at each step's own input and summed.
pub struct ChainBijector {
    steps: Vec<Box<dyn Bijector>>,
}

impl ChainBijector {
    /// Compose `steps` in forward order.
    pub fn new(steps: Vec<Box<dyn Bijector>>) -> Self {
        Self { steps }
    }

    /// Number of elementary steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain is empty (the identity map).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Bijector for ChainBijector {
    fn forward(&self, x: f64) -> f64 {
        self.steps.iter().fold(x, |v, step| step.forward(v))
    }

    fn inverse(&self, y: f64) -> f64 {
        self.steps.iter().rev().fold(y, |v, step| step.inverse(v))
    }

    fn log_abs_det_jacobian(&self, x: f64) -> f64 {
        let mut v = x;
        let mut acc = 0.0;
        for step in &self.steps {
            acc += step.log_abs_det_jacobian(v);
            v = step.forward(v);
        }
        acc
    }

    fn jacobian(&self, x: f64) -> f64 {
        let mut v = x;
        let mut acc = 1.0;
        for step in &self.steps {
            acc *= step.jacobian(v);
            v = step.forward(v);
        }
        acc
    }
}

/// Yeo-Johnson power transform `f_lambda: R -> R`.
///
/// Piecewise by sign of the input (0 counts as nonnegative):
///
/// - `x >= 0`: `((1+x)^lambda - 1) / lambda`, or `ln(1+x)` when `lambda = 0`
/// - `x < 0`: `-((1-x)^(2-lambda) - 1) / (2-lambda)`, or `-ln(1-x)` when
///   `lambda = 2`
///
/// Each branch is precomputed at construction as a chain of elementary
/// bijectors. The logarithmic form is selected by exact equality with the
/// branch's singular power, never by a tolerance comparison: the singular
/// values are valid inputs with their own closed form, not approximation
/// targets.
///
/// The transform preserves sign, so the inverse dispatches on the sign of
/// its argument. Non-finite inputs propagate through either branch.
pub struct YeoJohnson {
    lambda: f64,
    nonnegative: ChainBijector,
    negative: ChainBijector,
}

impl YeoJohnson {
    /// Build the transform for power `lambda`. Requires finite `lambda`.
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() {
            return Err(Error::Validation(format!("lambda must be finite, got {}", lambda)));
        }

        // Nonnegative branch operates on u = 1 + x, which is always >= 1.
        let nonnegative = if lambda == 0.0 {
            ChainBijector::new(vec![
                Box::new(AffineBijector::new(1.0, 1.0)?),
                Box::new(LogBijector),
            ])
        } else {
            ChainBijector::new(vec![
                Box::new(AffineBijector::new(1.0, 1.0)?),
                Box::new(PowerBijector::new(lambda)?),
                Box::new(AffineBijector::new(-1.0, 1.0)?),
                Box::new(AffineBijector::new(0.0, 1.0 / lambda)?),
            ])
        };

        // Negative branch operates on u = 1 - x, which is always > 1.
        let negative = if lambda == 2.0 {
            ChainBijector::new(vec![
                Box::new(AffineBijector::new(1.0, -1.0)?),
                Box::new(LogBijector),
                Box::new(AffineBijector::new(0.0, -1.0)?),
            ])
        } else {
            ChainBijector::new(vec![
                Box::new(AffineBijector::new(1.0, -1.0)?),
                Box::new(PowerBijector::new(2.0 - lambda)?),
                Box::new(AffineBijector::new(-1.0, 1.0)?),
                Box::new(AffineBijector::new(0.0, -1.0 / (2.0 - lambda))?),
            ])
        };

        Ok(Self { lambda, nonnegative, negative })
    }

    /// Power parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Bijector for YeoJohnson {
    fn forward(&self, x: f64) -> f64 {
        if x >= 0.0 {
            self.nonnegative.forward(x)
        } else {
            self.negative.forward(x)
        }
    }

    fn inverse(&self, y: f64) -> f64 {
        // Forward preserves sign, so the sign of y selects the branch.
        if y >= 0.0 {
            self.nonnegative.inverse(y)
        } else {
            self.negative.inverse(y)
        }
    }

    fn log_abs_det_jacobian(&self, x: f64) -> f64 {
        if x >= 0.0 {
            self.nonnegative.log_abs_det_jacobian(x)
        } else {
            self.negative.log_abs_det_jacobian(x)
        }
    }

    fn jacobian(&self, x: f64) -> f64 {
        if x >= 0.0 {
            self.nonnegative.jacobian(x)
        } else {
            self.negative.jacobian(x)
        }
    }
}
