//! Gain computer: the static transfer curve of the compressor.
//!
//! Maps an instantaneous input level (dB) to a target gain reduction (dB)
//! given threshold and ratio. Pure and stateless — determinism here is what
//! makes the compression curve testable independently of the envelope
//! ballistics.

use compresor_core::MAX_REDUCTION_DB;

/// Static compression curve above a hard knee.
///
/// For levels above the threshold, the output rises at `1/ratio` of the
/// input rate; the difference is the gain reduction handed to the envelope
/// follower:
///
/// ```text
/// over      = level_db - threshold_db
/// reduction = over - over / ratio        (0 below threshold)
/// ```
///
/// The ratio is floored at 1.0 (1:1 = no compression, and values below 1
/// would turn the compressor into an expander while destabilizing the
/// division). The reduction is capped at [`MAX_REDUCTION_DB`].
///
/// # Example
///
/// ```rust
/// use compresor_dynamics::GainComputer;
///
/// let computer = GainComputer::new(-20.0, 4.0);
/// // 14 dB over threshold at 4:1 → 10.5 dB of reduction
/// assert!((computer.target_reduction_db(-6.0) - 10.5).abs() < 1e-4);
/// // At or below threshold → no reduction
/// assert_eq!(computer.target_reduction_db(-20.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GainComputer {
    threshold_db: f32,
    ratio: f32,
}

impl GainComputer {
    /// Create a gain computer with the given threshold and ratio.
    ///
    /// The ratio is floored at 1.0.
    pub fn new(threshold_db: f32, ratio: f32) -> Self {
        Self {
            threshold_db,
            ratio: ratio.max(1.0),
        }
    }

    /// Threshold in dB above which compression engages.
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    /// Set the threshold in dB.
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        self.threshold_db = threshold_db;
    }

    /// Compression ratio (always ≥ 1).
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Set the compression ratio, floored at 1.0.
    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.max(1.0);
    }

    /// Target gain reduction in dB for an input level in dB.
    ///
    /// Always ≥ 0 and ≤ [`MAX_REDUCTION_DB`]. Pure function of its inputs.
    #[inline]
    pub fn target_reduction_db(&self, level_db: f32) -> f32 {
        if level_db <= self.threshold_db {
            return 0.0;
        }

        let over = level_db - self.threshold_db;
        let reduction = over - over / self.ratio;
        reduction.min(MAX_REDUCTION_DB)
    }
}
