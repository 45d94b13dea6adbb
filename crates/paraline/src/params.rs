//! Paraline parameter set and generator limits.
//!
//! Purpose
//! - Replace the host's dynamic property bag with an explicit struct holding the
//!   three named parameters and their defaults.
//! - Validate once at construction so the generator can assume sane inputs.
//!
//! Field names follow Rust conventions; deserialization also accepts the host
//! property names (`H`, `ExtrudeHeight`, `Resolution`) so parameter files
//! exported from a CAD document load unchanged.

use serde::{Deserialize, Serialize};

use crate::error::ParalineError;
use crate::profile::checked_steps;

pub const DEFAULT_H: f64 = 30.0;
pub const DEFAULT_EXTRUDE_HEIGHT: f64 = 10.0;
pub const DEFAULT_RESOLUTION: f64 = 0.05;

/// Generator limits (caller-configurable).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenCfg {
    /// Upper bound on the number of samples; guards against tiny resolutions.
    pub max_steps: usize,
}

impl Default for GenCfg {
    fn default() -> Self {
        Self { max_steps: 100_001 }
    }
}

/// Inputs of one Paraline evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParalineParams {
    /// Height parameter `H`; the profile spans `y ∈ [-H, H]`.
    #[serde(alias = "H")]
    pub h: f64,
    /// Extrusion distance along +Z (negative extrudes along -Z).
    #[serde(alias = "ExtrudeHeight")]
    pub extrude_height: f64,
    /// Sample spacing on `[-1, 1]`; `num_steps = floor(2 / resolution) + 1`.
    #[serde(alias = "Resolution")]
    pub resolution: f64,
}

impl Default for ParalineParams {
    fn default() -> Self {
        Self {
            h: DEFAULT_H,
            extrude_height: DEFAULT_EXTRUDE_HEIGHT,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl ParalineParams {
    /// Build and validate against the default limits.
    pub fn new(h: f64, extrude_height: f64, resolution: f64) -> Result<Self, ParalineError> {
        let params = Self {
            h,
            extrude_height,
            resolution,
        };
        params.validate(&GenCfg::default())?;
        Ok(params)
    }

    /// Check all three parameters; returns the sample count on success.
    pub fn validate(&self, cfg: &GenCfg) -> Result<usize, ParalineError> {
        if !self.h.is_finite() || self.h <= 0.0 {
            return Err(ParalineError::invalid(format!(
                "H must be positive and finite, got {}",
                self.h
            )));
        }
        if !self.extrude_height.is_finite() {
            return Err(ParalineError::invalid(format!(
                "extrude height must be finite, got {}",
                self.extrude_height
            )));
        }
        checked_steps(self.resolution, cfg)
    }
}
