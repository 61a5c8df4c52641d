use serde::{Deserialize, Serialize};

pub const MIN_PX_PER_SEC: f64 = 10.0;
pub const MAX_PX_PER_SEC: f64 = 500.0;
pub const DEFAULT_PX_PER_SEC: f64 = 80.0;

/// Horizontal waveform scale in pixels per second, always within
/// [`MIN_PX_PER_SEC`, `MAX_PX_PER_SEC`].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ZoomDensity(f64);

impl ZoomDensity {
    /// Clamp `px_per_sec` into range. NaN falls back to the default.
    pub fn new(px_per_sec: f64) -> Self {
        if px_per_sec.is_nan() {
            return Self::default();
        }
        Self(px_per_sec.clamp(MIN_PX_PER_SEC, MAX_PX_PER_SEC))
    }

    pub fn px_per_sec(self) -> f64 {
        self.0
    }

    /// Multiply by `factor` and clamp. Non-finite or non-positive factors
    /// leave the density unchanged.
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        Self::new(self.0 * factor)
    }

    /// Integer readout for the UI.
    pub fn readout(self) -> u32 {
        self.0.round() as u32
    }
}

impl Default for ZoomDensity {
    fn default() -> Self {
        Self(DEFAULT_PX_PER_SEC)
    }
}

impl From<f64> for ZoomDensity {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<ZoomDensity> for f64 {
    fn from(z: ZoomDensity) -> f64 {
        z.0
    }
}
