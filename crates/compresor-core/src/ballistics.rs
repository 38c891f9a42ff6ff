//! Attack/release coefficient derivation for envelope smoothing.
//!
//! Converts millisecond time constants and a sample rate into the per-sample
//! coefficients of a one-pole smoother. The mapping is
//!
//! ```text
//! T     = time_ms * 0.001 * sample_rate        (floored at 1 sample)
//! coeff = 1 - exp(-K / T)
//! ```
//!
//! with `K = 2.2`, the classic analog-ballistics convention: after `time_ms`
//! the smoother has covered ~90% of a step (settled to within 10%). The
//! resulting coefficients are clamped into a safe band so that extreme time
//! settings can never destabilize the envelope.
//!
//! # Reference
//!
//! Giannoulis, Massberg & Reiss, "Digital Dynamic Range Compressor Design —
//! A Tutorial and Analysis", JAES vol. 60 no. 6, 2012. Section IV discusses
//! the time-constant conventions for attack/release ballistics.

use libm::expf;

use crate::math::ms_to_samples;

/// Settling convention: `1 - exp(-2.2)` ≈ 0.9, so a step settles to within
/// 10% of its target after the nominal attack/release time.
pub const SETTLING_FACTOR: f32 = 2.2;

/// Minimum time constant in samples. Floors near-zero attack/release times
/// so the exponent stays bounded.
pub const MIN_TIME_SAMPLES: f32 = 1.0;

/// Lower bound of a smoothing coefficient. Keeps glacial time settings from
/// freezing the envelope entirely.
pub const COEFF_FLOOR: f32 = 0.001;

/// Upper bound of a smoothing coefficient. Keeps near-zero time settings
/// away from the degenerate single-sample step.
pub const COEFF_CEILING: f32 = 0.95;

/// Per-sample smoothing coefficients for the two envelope directions.
///
/// Both fields are guaranteed to lie in [[`COEFF_FLOOR`], [`COEFF_CEILING`]].
///
/// # Example
///
/// ```rust
/// use compresor_core::Ballistics;
///
/// let b = Ballistics::from_times(10.0, 100.0, 48000.0).unwrap();
/// assert!(b.attack > b.release); // shorter time = faster coefficient
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    /// Coefficient applied while gain reduction is rising.
    pub attack: f32,
    /// Coefficient applied while gain reduction is falling.
    pub release: f32,
}

impl Ballistics {
    /// Derive coefficients from attack/release times and a sample rate.
    ///
    /// Returns `None` when `sample_rate` is zero, negative, or non-finite,
    /// or when either time is non-finite — the caller keeps its previous
    /// coefficients instead of receiving NaN/Inf. Valid times are floored
    /// at [`MIN_TIME_SAMPLES`] worth of milliseconds, and the resulting
    /// coefficients are clamped into the safe band.
    pub fn from_times(attack_ms: f32, release_ms: f32, sample_rate: f32) -> Option<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0)
            || !attack_ms.is_finite()
            || !release_ms.is_finite()
        {
            return None;
        }

        Some(Self {
            attack: coeff_for(attack_ms, sample_rate),
            release: coeff_for(release_ms, sample_rate),
        })
    }

    /// Slowest valid coefficients. Used as the fallback when a follower is
    /// constructed before a valid sample rate is known.
    pub const SLOWEST: Self = Self {
        attack: COEFF_FLOOR,
        release: COEFF_FLOOR,
    };
}

/// One-time-constant coefficient for a single direction.
#[inline]
fn coeff_for(time_ms: f32, sample_rate: f32) -> f32 {
    let time_samples = ms_to_samples(time_ms, sample_rate).max(MIN_TIME_SAMPLES);
    let coeff = 1.0 - expf(-SETTLING_FACTOR / time_samples);
    coeff.clamp(COEFF_FLOOR, COEFF_CEILING)
}
