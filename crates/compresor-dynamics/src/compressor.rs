//! Dynamics compressor engine.
//!
//! A feed-forward compressor that reduces dynamic range by attenuating
//! signals above a threshold, with makeup gain restoring overall loudness.
//!
//! # Signal Flow
//!
//! ```text
//! Input → Level Detector (dB) → Gain Computer → Envelope Follower
//!                                                      ↓
//! Output ← Soft Limiter ← Multiply ← Makeup − Envelope (dB → linear)
//! ```
//!
//! # Parameters
//!
//! | Parameter | Range | Description |
//! |-----------|-------|-------------|
//! | Threshold | -60 to 0 dB | Level where compression begins |
//! | Ratio | 1:1 to 20:1 | Compression strength (20:1 ≈ limiting) |
//! | Attack | 0.1-1000 ms | How fast gain reduction engages |
//! | Release | 1-5000 ms | How fast gain reduction releases |
//! | Makeup | 0-24 dB | Output level compensation |
//!
//! # Safety
//!
//! Every stage of the pipeline is bounded: non-finite input samples become
//! silence, the detected level, envelope, and combined gain are all clamped
//! to documented ranges, and the soft limiter bounds the final amplitude.
//! `process_sample` returns a finite value for *any* input — a single
//! NaN/Inf reaching an audio buffer corrupts playback irrecoverably, so
//! faults degrade to momentary amplitude changes instead.

use compresor_core::{
    Effect, ParamDescriptor, ParamId, ParameterInfo, ReductionEnvelope, db_to_linear,
    detect_level_db, soft_limit,
};

use crate::gain_computer::GainComputer;
use crate::presets;

/// Lower clamp of the combined (makeup − envelope) gain in dB.
pub const GAIN_DB_FLOOR: f32 = -60.0;

/// Upper clamp of the combined gain in dB, preventing extreme amplification.
pub const GAIN_DB_CEILING: f32 = 20.0;

/// Lower clamp of the linear gain factor.
pub const LINEAR_GAIN_FLOOR: f32 = 0.001;

/// Upper clamp of the linear gain factor.
pub const LINEAR_GAIN_CEILING: f32 = 10.0;

/// Threshold domain in dB.
pub const THRESHOLD_RANGE_DB: (f32, f32) = (-60.0, 0.0);

/// Ratio domain.
pub const RATIO_RANGE: (f32, f32) = (1.0, 20.0);

/// Attack domain in ms.
pub const ATTACK_RANGE_MS: (f32, f32) = (0.1, 1000.0);

/// Release domain in ms.
pub const RELEASE_RANGE_MS: (f32, f32) = (1.0, 5000.0);

/// Makeup gain domain in dB for the engineering-unit setter.
pub const MAKEUP_RANGE_DB: (f32, f32) = (0.0, 24.0);

/// Host-facing normalized parameter spans: the affine images of [0, 1].
///
/// These differ deliberately from the engineering domains — the host mapping
/// exposes a narrower, musical attack/release range and a bipolar makeup
/// range. The constants are part of the host contract and are pinned by
/// round-trip tests.
pub const NORMALIZED_THRESHOLD_DB: (f32, f32) = (-60.0, 0.0);
/// Normalized ratio span.
pub const NORMALIZED_RATIO: (f32, f32) = (1.0, 20.0);
/// Normalized attack span in ms.
pub const NORMALIZED_ATTACK_MS: (f32, f32) = (0.1, 400.0);
/// Normalized release span in ms.
pub const NORMALIZED_RELEASE_MS: (f32, f32) = (1.0, 400.0);
/// Normalized makeup span in dB.
pub const NORMALIZED_MAKEUP_DB: (f32, f32) = (-30.0, 30.0);

/// Dynamic-range compressor engine.
///
/// Owns the parameters, derived coefficients, and envelope state for one
/// detector. All channels processed through one instance share gain
/// reduction (mono-linked detection); construct one engine per channel for
/// independent compression.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Threshold | -60.0–0.0 dB | -20.0 |
/// | 1 | Ratio | 1.0–20.0 | 4.0 |
/// | 2 | Attack | 0.1–1000.0 ms | 10.0 |
/// | 3 | Release | 1.0–5000.0 ms | 100.0 |
/// | 4 | Makeup Gain | 0.0–24.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use compresor_dynamics::Compressor;
///
/// let mut comp = Compressor::new(44100.0);
/// comp.set_threshold_db(-20.0);
/// comp.set_ratio(4.0);
/// comp.set_attack_ms(5.0);
/// comp.set_release_ms(50.0);
///
/// let output = comp.process_sample(0.5);
/// assert!(output.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Compressor {
    gain_computer: GainComputer,
    envelope: ReductionEnvelope,
    makeup_db: f32,
    sample_rate: f32,
}

impl Compressor {
    /// Create a compressor with default settings at the given sample rate.
    ///
    /// Defaults: threshold -20 dB, ratio 4:1, attack 10 ms, release 100 ms,
    /// makeup 0 dB.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            gain_computer: GainComputer::new(-20.0, 4.0),
            envelope: ReductionEnvelope::new(sample_rate),
            makeup_db: 0.0,
            sample_rate,
        }
    }

    /// Prepare for playback: set the sample rate, recompute coefficients,
    /// and clear the envelope.
    ///
    /// Must be called before processing. Calling it mid-stream is a clean
    /// restart — equivalent to stop and start with the same parameters.
    pub fn prepare(&mut self, sample_rate: f32) {
        #[cfg(feature = "tracing")]
        tracing::debug!("compressor: prepare at {sample_rate} Hz");
        self.set_sample_rate(sample_rate);
        self.reset();
    }

    /// Set threshold in dB, clamped to [-60, 0]. NaN is ignored.
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        if threshold_db.is_nan() {
            return;
        }
        self.gain_computer
            .set_threshold_db(threshold_db.clamp(THRESHOLD_RANGE_DB.0, THRESHOLD_RANGE_DB.1));
    }

    /// Current threshold in dB.
    pub fn threshold_db(&self) -> f32 {
        self.gain_computer.threshold_db()
    }

    /// Set compression ratio, clamped to [1, 20]. NaN is ignored.
    pub fn set_ratio(&mut self, ratio: f32) {
        if ratio.is_nan() {
            return;
        }
        self.gain_computer
            .set_ratio(ratio.clamp(RATIO_RANGE.0, RATIO_RANGE.1));
    }

    /// Current compression ratio.
    pub fn ratio(&self) -> f32 {
        self.gain_computer.ratio()
    }

    /// Set attack time in milliseconds, clamped to [0.1, 1000]. NaN is
    /// ignored.
    ///
    /// Triggers coefficient recomputation.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        if attack_ms.is_nan() {
            return;
        }
        self.envelope
            .set_attack_ms(attack_ms.clamp(ATTACK_RANGE_MS.0, ATTACK_RANGE_MS.1));
    }

    /// Current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.envelope.attack_ms()
    }

    /// Set release time in milliseconds, clamped to [1, 5000]. NaN is
    /// ignored.
    ///
    /// Triggers coefficient recomputation.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        if release_ms.is_nan() {
            return;
        }
        self.envelope
            .set_release_ms(release_ms.clamp(RELEASE_RANGE_MS.0, RELEASE_RANGE_MS.1));
    }

    /// Current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.envelope.release_ms()
    }

    /// Set makeup gain in dB, clamped to [0, 24]. NaN is ignored.
    pub fn set_makeup_db(&mut self, makeup_db: f32) {
        if makeup_db.is_nan() {
            return;
        }
        self.makeup_db = makeup_db.clamp(MAKEUP_RANGE_DB.0, MAKEUP_RANGE_DB.1);
    }

    /// Current makeup gain in dB.
    pub fn makeup_db(&self) -> f32 {
        self.makeup_db
    }

    /// Set all five parameters at once.
    ///
    /// Each value is clamped into its domain; coefficients are recomputed
    /// before this call returns, so the audio thread never observes a
    /// parameter set whose coefficients belong to older times.
    pub fn set_parameters(
        &mut self,
        threshold_db: f32,
        ratio: f32,
        attack_ms: f32,
        release_ms: f32,
        makeup_db: f32,
    ) {
        self.set_threshold_db(threshold_db);
        self.set_ratio(ratio);
        self.set_attack_ms(attack_ms);
        self.set_release_ms(release_ms);
        self.set_makeup_db(makeup_db);
    }

    /// Set all parameters from normalized [0, 1] host values.
    ///
    /// Each input is clamped to [0, 1] and mapped affinely onto the
    /// `NORMALIZED_*` spans. The mapping constants are part of the host
    /// contract; note that makeup spans [-30, +30] dB here, wider than the
    /// engineering setter's [0, 24].
    pub fn set_parameters_normalized(
        &mut self,
        threshold: f32,
        ratio: f32,
        attack: f32,
        release: f32,
        makeup: f32,
    ) {
        self.set_threshold_db(map_normalized(threshold, NORMALIZED_THRESHOLD_DB));
        self.set_ratio(map_normalized(ratio, NORMALIZED_RATIO));
        self.set_attack_ms(map_normalized(attack, NORMALIZED_ATTACK_MS));
        self.set_release_ms(map_normalized(release, NORMALIZED_RELEASE_MS));
        // Bypasses the engineering clamp (the host mapping is bipolar), so
        // the NaN guard must be repeated here.
        if !makeup.is_nan() {
            self.makeup_db = map_normalized(makeup, NORMALIZED_MAKEUP_DB);
        }
    }

    /// Set the ratio from a preset detent index.
    ///
    /// Invalid indices are ignored.
    pub fn set_ratio_preset(&mut self, index: usize) {
        if let Some(ratio) = presets::preset_ratio(index) {
            self.set_ratio(ratio);
        }
    }

    /// Preset detent index matching the current ratio (4:1 fallback).
    pub fn ratio_preset_index(&self) -> usize {
        presets::preset_index_for_ratio(self.ratio())
    }

    /// Process one sample through the full compression pipeline.
    ///
    /// Non-finite input returns 0. The returned value is always finite.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        if !input.is_finite() {
            return 0.0;
        }

        let level_db = detect_level_db(input);
        let target_db = self.gain_computer.target_reduction_db(level_db);
        let envelope_db = self.envelope.track(target_db);

        let gain_db = (self.makeup_db - envelope_db).clamp(GAIN_DB_FLOOR, GAIN_DB_CEILING);
        let mut gain = db_to_linear(gain_db);
        if !gain.is_finite() {
            gain = 1.0;
        }
        let gain = gain.clamp(LINEAR_GAIN_FLOOR, LINEAR_GAIN_CEILING);

        let output = input * gain;
        if !output.is_finite() {
            return 0.0;
        }

        soft_limit(output)
    }

    /// Process every sample of every channel in place.
    ///
    /// All channels run through the same detector state in channel order,
    /// so simultaneous channels share gain reduction (mono-linked
    /// behavior). Samples within a channel are processed in order.
    pub fn process_channels(&mut self, channels: &mut [&mut [f32]]) {
        for channel in channels.iter_mut() {
            self.process_block_inplace(channel);
        }
    }

    /// Current gain reduction in dB for metering — zero or negative
    /// (−6.0 means the signal is being reduced by 6 dB).
    pub fn gain_reduction_db(&self) -> f32 {
        -self.envelope.current_db()
    }

    /// Current envelope value in dB of reduction — zero or positive.
    pub fn envelope_db(&self) -> f32 {
        self.envelope.current_db()
    }

    /// Sample rate the engine was prepared with.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

impl Effect for Compressor {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.process_sample(input)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.envelope.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.envelope.reset();
    }
}

impl ParameterInfo for Compressor {
    fn param_count(&self) -> usize {
        5
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::gain_db("Threshold", "Thresh", -60.0, 0.0, -20.0)
                    .with_id(ParamId(100), "comp_thresh"),
            ),
            1 => Some(ParamDescriptor::ratio(1.0, 20.0, 4.0).with_id(ParamId(101), "comp_ratio")),
            2 => Some(
                ParamDescriptor::time_ms("Attack", "Attack", 0.1, 1000.0, 10.0)
                    .with_id(ParamId(102), "comp_attack"),
            ),
            3 => Some(
                ParamDescriptor::time_ms("Release", "Release", 1.0, 5000.0, 100.0)
                    .with_id(ParamId(103), "comp_release"),
            ),
            4 => Some(
                ParamDescriptor::gain_db("Makeup Gain", "Makeup", 0.0, 24.0, 0.0)
                    .with_id(ParamId(104), "comp_makeup"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.threshold_db(),
            1 => self.ratio(),
            2 => self.attack_ms(),
            3 => self.release_ms(),
            4 => self.makeup_db(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_threshold_db(value),
            1 => self.set_ratio(value),
            2 => self.set_attack_ms(value),
            3 => self.set_release_ms(value),
            4 => self.set_makeup_db(value),
            _ => {}
        }
    }
}

/// Affine map from a normalized [0, 1] value onto `(min, max)`.
#[inline]
fn map_normalized(normalized: f32, range: (f32, f32)) -> f32 {
    range.0 + normalized.clamp(0.0, 1.0) * (range.1 - range.0)
}
