//! Gain-reduction envelope follower.
//!
//! The smoothing stage between the gain computer and the gain stage of a
//! dynamics processor. Tracks a *target* gain reduction (in dB, always
//! non-negative) with a one-pole IIR smoother whose time constant differs by
//! direction: the attack coefficient applies while reduction is rising, the
//! release coefficient while it is falling. That asymmetry is the defining
//! characteristic of attack/release compressors.

use crate::ballistics::Ballistics;

/// Upper bound of the tracked envelope in dB of gain reduction.
///
/// Shared with the gain computer's reduction cap: nothing downstream ever
/// sees more than 60 dB of reduction.
pub const MAX_REDUCTION_DB: f32 = 60.0;

/// Window below the target, in dB, inside which the release slows down.
///
/// When the envelope is this close to its target in the release direction,
/// the release coefficient is scaled by [`CHATTER_RELEASE_SCALE`]. Without
/// this, low-level program material sitting near the threshold modulates the
/// gain audibly (chatter).
pub const CHATTER_WINDOW_DB: f32 = 0.1;

/// Scale applied to the release coefficient inside [`CHATTER_WINDOW_DB`].
pub const CHATTER_RELEASE_SCALE: f32 = 0.25;

/// One-pole smoother for gain reduction with independent attack and release.
///
/// State machine with two modes selected per sample by comparison, not by a
/// stored flag: **attack** when the target exceeds the envelope (reduction
/// must rise), **release** otherwise.
///
/// # Example
///
/// ```rust
/// use compresor_core::ReductionEnvelope;
///
/// let mut env = ReductionEnvelope::new(48000.0);
/// env.set_attack_ms(10.0);
/// env.set_release_ms(100.0);
///
/// // Track 12 dB of target reduction for a while
/// for _ in 0..4800 {
///     env.track(12.0);
/// }
/// assert!((env.current_db() - 12.0).abs() < 0.1);
///
/// env.reset();
/// assert_eq!(env.current_db(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ReductionEnvelope {
    /// Current smoothed gain reduction in dB, always in [0, 60].
    envelope_db: f32,
    /// Per-sample smoothing coefficients.
    ballistics: Ballistics,
    /// Sample rate in Hz (for recalculation).
    sample_rate: f32,
    /// Attack time in ms (for recalculation).
    attack_ms: f32,
    /// Release time in ms (for recalculation).
    release_ms: f32,
}

impl ReductionEnvelope {
    /// Create a follower with default ballistics (attack 10 ms, release 100 ms).
    pub fn new(sample_rate: f32) -> Self {
        let mut follower = Self {
            envelope_db: 0.0,
            ballistics: Ballistics::SLOWEST,
            sample_rate,
            attack_ms: 10.0,
            release_ms: 100.0,
        };
        follower.recalculate();
        follower
    }

    /// Set the attack time in milliseconds.
    ///
    /// Attack is how quickly reduction engages when the level rises.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms;
        self.recalculate();
    }

    /// Current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set the release time in milliseconds.
    ///
    /// Release is how quickly reduction backs off when the level falls.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms;
        self.recalculate();
    }

    /// Current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Update the sample rate and recalculate coefficients.
    ///
    /// An invalid rate (≤ 0 or non-finite) leaves the previous coefficients
    /// in place rather than corrupting them.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    /// Advance one sample toward `target_db` and return the new envelope.
    ///
    /// `target_db` is the instantaneous gain reduction requested by the gain
    /// computer. The envelope moves toward it with the attack coefficient
    /// when rising and the release coefficient when falling; within
    /// [`CHATTER_WINDOW_DB`] of the target the release slows by
    /// [`CHATTER_RELEASE_SCALE`]. The result is clamped to
    /// [0, [`MAX_REDUCTION_DB`]].
    #[inline]
    pub fn track(&mut self, target_db: f32) -> f32 {
        let diff = target_db - self.envelope_db;

        let coeff = if diff > 0.0 {
            self.ballistics.attack
        } else if -diff < CHATTER_WINDOW_DB {
            self.ballistics.release * CHATTER_RELEASE_SCALE
        } else {
            self.ballistics.release
        };

        self.envelope_db += coeff * diff;
        self.envelope_db = self.envelope_db.clamp(0.0, MAX_REDUCTION_DB);
        self.envelope_db
    }

    /// Current gain reduction in dB without advancing.
    pub fn current_db(&self) -> f32 {
        self.envelope_db
    }

    /// The active smoothing coefficients.
    pub fn ballistics(&self) -> Ballistics {
        self.ballistics
    }

    /// Reset the envelope to zero reduction.
    ///
    /// Called on transport stop/restart so stale gain reduction is not
    /// carried across discontinuous audio. Coefficients survive.
    pub fn reset(&mut self) {
        self.envelope_db = 0.0;
    }

    fn recalculate(&mut self) {
        match Ballistics::from_times(self.attack_ms, self.release_ms, self.sample_rate) {
            Some(b) => self.ballistics = b,
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "envelope: invalid sample rate {}, keeping previous coefficients",
                    self.sample_rate
                );
            }
        }
    }
}

impl Default for ReductionEnvelope {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
