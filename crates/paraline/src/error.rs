//! Error taxonomy shared by the generator, the kernel seam and the feature.
//!
//! - `InvalidParameter`: inputs that make sampling or the triangle formula
//!   undefined. Always surfaced to the caller.
//! - `DegenerateGeometry`: too few usable points, or an open wire.
//! - `FaceConstruction`: the kernel refused to build a face or a solid from a
//!   well-formed wire. `ParalineFeature::execute` recovers from this.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParalineError {
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },
    #[error("face construction failed: {reason}")]
    FaceConstruction { reason: String },
}

impl ParalineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn face(reason: impl Into<String>) -> Self {
        Self::FaceConstruction {
            reason: reason.into(),
        }
    }

    /// True for errors the feature pipeline recovers from with a wire fallback.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidParameter { .. })
    }
}
