//! Common data types for yjnorm

use serde::{Deserialize, Serialize};

/// Parameter bundle for a Yeo-Johnson transformed Normal distribution.
///
/// This is the hand-off format an external fitting routine produces: the
/// base Normal location/scale, the transform power, and the affine rescale
/// applied after the transform. Values are validated when a distribution is
/// constructed from them, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YeoJohnsonParams {
    /// Base Normal location
    pub loc: f64,

    /// Base Normal scale (must be > 0 at construction)
    pub scale: f64,

    /// Yeo-Johnson power
    pub lambda: f64,

    /// Rescale location
    pub tloc: f64,

    /// Rescale scale (must be nonzero at construction)
    pub tscale: f64,
}

impl YeoJohnsonParams {
    /// Create a parameter bundle
    pub fn new(loc: f64, scale: f64, lambda: f64, tloc: f64, tscale: f64) -> Self {
        Self { loc, scale, lambda, tloc, tscale }
    }

    /// Bundle with an identity rescale (`tloc = 0`, `tscale = 1`)
    pub fn with_identity_rescale(loc: f64, scale: f64, lambda: f64) -> Self {
        Self::new(loc, scale, lambda, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rescale() {
        let p = YeoJohnsonParams::with_identity_rescale(0.5, 1.5, 0.7);
        assert_eq!(p.tloc, 0.0);
        assert_eq!(p.tscale, 1.0);
        assert_eq!(p.lambda, 0.7);
    }

    #[test]
    fn test_json_roundtrip() {
        let p = YeoJohnsonParams::new(-5.0, 0.5, 1.3, 2.0, 0.8);
        let json = serde_json::to_string(&p).unwrap();
        let back: YeoJohnsonParams = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
