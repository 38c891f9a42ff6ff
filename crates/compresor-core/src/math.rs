//! Mathematical utility functions for dynamics processing.
//!
//! Level conversions, input level detection, and output limiting — the
//! stateless pieces of the compression pipeline. All functions are
//! allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Detection & Limiting
//!
//! - [`detect_level_db`] - Instantaneous sample level in dB, bounded for safety
//! - [`soft_limit`] - Smooth output amplitude bounding (tanh saturation)

use libm::{expf, logf, tanhf};

/// Floor applied to `|sample|` before taking the logarithm.
///
/// Prevents `log(0)` from producing -Inf when the input is silent.
pub const LEVEL_EPSILON: f32 = 1e-10;

/// Lower bound of the detected level in dB.
pub const LEVEL_FLOOR_DB: f32 = -120.0;

/// Upper bound of the detected level in dB.
///
/// Real program material never exceeds +20 dBFS; anything above this is a
/// numeric fault upstream and must not reach the gain computer unbounded.
pub const LEVEL_CEILING_DB: f32 = 20.0;

/// Amplitude above which the soft limiter engages.
pub const SOFT_LIMIT_THRESHOLD: f32 = 0.95;

/// Saturation drive of the soft limiter's tanh stage.
pub const SOFT_LIMIT_DRIVE: f32 = 0.5;

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use compresor_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below [`LEVEL_EPSILON`] are floored before the logarithm,
/// so the result is always finite.
///
/// # Example
/// ```rust
/// use compresor_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(LEVEL_EPSILON)) * FACTOR
}

/// Instantaneous level of a sample in dB, bounded to a safe range.
///
/// Rectifies the sample, floors it at [`LEVEL_EPSILON`] to keep the
/// logarithm finite, and clamps the result into
/// [[`LEVEL_FLOOR_DB`], [`LEVEL_CEILING_DB`]] so that pathological inputs
/// cannot push extreme values into the gain computer.
///
/// # Example
/// ```rust
/// use compresor_core::detect_level_db;
///
/// // 0.5 amplitude is about -6 dBFS, sign is irrelevant
/// assert!((detect_level_db(0.5) - (-6.02)).abs() < 0.01);
/// assert!((detect_level_db(-0.5) - (-6.02)).abs() < 0.01);
/// // Silence clamps to the floor instead of -Inf
/// assert_eq!(detect_level_db(0.0), -120.0);
/// ```
#[inline]
pub fn detect_level_db(sample: f32) -> f32 {
    let rectified = sample.abs().max(LEVEL_EPSILON);
    linear_to_db(rectified).clamp(LEVEL_FLOOR_DB, LEVEL_CEILING_DB)
}

/// Soft limiter: smooth amplitude bounding as an alternative to hard clipping.
///
/// Samples whose magnitude stays at or below [`SOFT_LIMIT_THRESHOLD`] pass
/// through untouched. Above it, the sample is replaced with
/// `tanh(x * SOFT_LIMIT_DRIVE) * SOFT_LIMIT_THRESHOLD`, which bounds the
/// output magnitude below the threshold without the flat-top harmonics of a
/// hard clip. Stateless; applied as the last stage of the pipeline.
///
/// # Example
/// ```rust
/// use compresor_core::soft_limit;
///
/// // In-range samples are untouched
/// assert_eq!(soft_limit(0.5), 0.5);
/// // Extreme samples are bounded
/// assert!(soft_limit(10.0).abs() < 0.95);
/// assert!(soft_limit(-10.0).abs() < 0.95);
/// ```
#[inline]
pub fn soft_limit(sample: f32) -> f32 {
    if sample.abs() > SOFT_LIMIT_THRESHOLD {
        tanhf(sample * SOFT_LIMIT_DRIVE) * SOFT_LIMIT_THRESHOLD
    } else {
        sample
    }
}

/// Convert milliseconds to samples.
///
/// # Arguments
/// * `ms` - Time in milliseconds
/// * `sample_rate` - Sample rate in Hz
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * 0.001 * sample_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let db = linear_to_db(original);
        let back = db_to_linear(db);
        assert!(
            (original - back).abs() < 1e-5,
            "Roundtrip failed: {} -> {} -> {}",
            original,
            db,
            back
        );
    }

    #[test]
    fn test_db_known_values() {
        // 0 dB = 1.0 linear
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        // -6 dB ≈ 0.5 linear
        assert!((db_to_linear(-6.0206) - 0.5).abs() < 0.001);
        // +6 dB ≈ 2.0 linear
        assert!((db_to_linear(6.0206) - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_detect_level_rectifies() {
        assert_eq!(detect_level_db(0.5), detect_level_db(-0.5));
    }

    #[test]
    fn test_detect_level_silence_is_floored() {
        assert_eq!(detect_level_db(0.0), LEVEL_FLOOR_DB);
        // Tiny but nonzero input also hits the floor rather than -Inf
        assert_eq!(detect_level_db(1e-30), LEVEL_FLOOR_DB);
    }

    #[test]
    fn test_detect_level_ceiling() {
        // An absurdly hot sample clamps to the ceiling
        assert_eq!(detect_level_db(1e6), LEVEL_CEILING_DB);
    }

    #[test]
    fn test_soft_limit_passthrough() {
        assert_eq!(soft_limit(0.0), 0.0);
        assert_eq!(soft_limit(0.95), 0.95);
        assert_eq!(soft_limit(-0.95), -0.95);
    }

    #[test]
    fn test_soft_limit_bounds() {
        for &x in &[0.951, 1.0, 2.0, 100.0] {
            let y = soft_limit(x);
            assert!(y > 0.0 && y < SOFT_LIMIT_THRESHOLD, "limit({x}) = {y}");
            let y_neg = soft_limit(-x);
            assert!((y + y_neg).abs() < 1e-6, "limiter should be odd-symmetric");
        }
    }

    #[test]
    fn test_soft_limit_pinned_transfer() {
        // The transfer above threshold is tanh(x * 0.5) * 0.95 exactly.
        let x = 1.5;
        let expected = libm::tanhf(x * SOFT_LIMIT_DRIVE) * SOFT_LIMIT_THRESHOLD;
        assert_eq!(soft_limit(x), expected);
    }

    #[test]
    fn test_ms_to_samples() {
        assert_eq!(ms_to_samples(10.0, 48000.0), 480.0);
        assert_eq!(ms_to_samples(1000.0, 44100.0), 44100.0);
    }
}
