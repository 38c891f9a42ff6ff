//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between a DSP processor and its host:
//! per-sample and block processing, sample-rate updates, and state reset.
//! It is object-safe so hosts can hold `dyn Effect`, while static dispatch
//! remains available for maximum performance.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: single `f32` input/output per call. Multi-channel
//!   hosts drive one call per channel sample (shared detector) or one
//!   processor per channel.
//! - **No allocations**: all methods are designed to be called from a
//!   real-time audio callback with zero heap allocations.

/// Core trait for audio processors.
///
/// # Example
///
/// ```rust
/// use compresor_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {
///         // Gain doesn't depend on sample rate
///     }
///
///     fn reset(&mut self) {
///         // Gain has no internal state to reset
///     }
/// }
/// ```
pub trait Effect {
    /// Process a single sample.
    ///
    /// For effects with internal state this advances the state by one
    /// sample.
    ///
    /// # Arguments
    /// * `input` - Input sample, typically in range [-1.0, 1.0]
    ///
    /// # Returns
    /// Processed output sample
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample. Effects
    /// may override this for more efficient block processing.
    ///
    /// # Panics
    /// Default implementation debug-asserts `input.len() == output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    ///
    /// Convenience method for when input and output are the same buffer.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate.
    ///
    /// Called when the sample rate changes. Effects should recalculate any
    /// sample-rate-dependent coefficients.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state.
    ///
    /// Clears all internal state without changing parameters. Called when
    /// playback stops/starts to prevent artifacts from stale state.
    fn reset(&mut self);
}
