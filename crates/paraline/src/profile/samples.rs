use crate::error::ParalineError;
use crate::params::GenCfg;

/// Sample count for a resolution: `floor(2 / resolution) + 1`.
///
/// Fails for non-finite or non-positive resolutions. Does not enforce the
/// `>= 2` lower bound; see `generate_samples`.
pub fn num_steps(resolution: f64) -> Result<usize, ParalineError> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(ParalineError::invalid(format!(
            "resolution must be positive and finite, got {resolution}"
        )));
    }
    // `as` saturates for huge quotients; the max_steps check rejects those.
    let whole = (2.0 / resolution).floor() as usize;
    Ok(whole.saturating_add(1))
}

/// `num_steps` plus the bounds the generator needs: at least two samples and
/// at most `cfg.max_steps`.
pub(crate) fn checked_steps(resolution: f64, cfg: &GenCfg) -> Result<usize, ParalineError> {
    let steps = num_steps(resolution)?;
    if steps < 2 {
        return Err(ParalineError::invalid(format!(
            "resolution {resolution} yields {steps} sample(s); need at least 2 (resolution <= 2)"
        )));
    }
    if steps > cfg.max_steps {
        return Err(ParalineError::invalid(format!(
            "resolution {resolution} yields {steps} samples, above the limit of {}",
            cfg.max_steps
        )));
    }
    Ok(steps)
}

/// Uniform samples of `[-h, h]`, ascending, endpoints included.
pub fn generate_samples(h: f64, resolution: f64) -> Result<Vec<f64>, ParalineError> {
    generate_samples_with(h, resolution, &GenCfg::default())
}

/// As `generate_samples`, with explicit limits.
pub fn generate_samples_with(
    h: f64,
    resolution: f64,
    cfg: &GenCfg,
) -> Result<Vec<f64>, ParalineError> {
    let steps = checked_steps(resolution, cfg)?;
    Ok(samples_for_steps(h, steps))
}

/// Pre: `steps >= 2`.
pub(crate) fn samples_for_steps(h: f64, steps: usize) -> Vec<f64> {
    let last = (steps - 1) as f64;
    (0..steps)
        .map(|i| h * (i as f64 / last * 2.0 - 1.0))
        .collect()
}
