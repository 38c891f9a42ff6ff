//! End-to-end scenarios for the compressor engine.
//!
//! Steady-state behavior against the pure transfer curve, clean-restart
//! semantics, and multi-channel buffer processing.

use compresor_core::{db_to_linear, detect_level_db};
use compresor_dynamics::{Compressor, GainComputer, SharedParams};

const SAMPLE_RATE: f32 = 44100.0;

/// Sustained -6 dBFS tone through the reference settings: the envelope must
/// converge to the gain computer's static answer, and the output amplitude
/// to the matching compressed level (≈ 0.149).
#[test]
fn sustained_tone_reaches_static_curve() {
    let mut comp = Compressor::new(SAMPLE_RATE);
    comp.prepare(SAMPLE_RATE);
    comp.set_parameters(-20.0, 4.0, 10.0, 100.0, 0.0);

    let input = 0.5f32;
    let mut output = 0.0;
    // Two seconds of DC at 0.5 — far past the attack time constant.
    for _ in 0..(2.0 * SAMPLE_RATE) as usize {
        output = comp.process_sample(input);
    }

    // Static answer from the pure pipeline stages.
    let expected_reduction =
        GainComputer::new(-20.0, 4.0).target_reduction_db(detect_level_db(input));
    assert!(
        (expected_reduction - 10.4845).abs() < 1e-3,
        "static curve sanity check failed: {expected_reduction}"
    );

    assert!(
        (comp.envelope_db() - expected_reduction).abs() < 0.01,
        "envelope {} did not converge to static reduction {expected_reduction}",
        comp.envelope_db()
    );

    let expected_output = input * db_to_linear(-expected_reduction);
    assert!(
        (output - expected_output).abs() < 1e-3,
        "output {output} did not converge to {expected_output}"
    );
    // The headline number: 0.5 in, ~10.5 dB of reduction, ~0.149 out.
    assert!((output - 0.149).abs() < 1e-3);
}

/// Input below threshold passes through untouched with zero metering.
#[test]
fn below_threshold_is_transparent() {
    let mut comp = Compressor::new(SAMPLE_RATE);
    comp.prepare(SAMPLE_RATE);
    comp.set_parameters(-20.0, 4.0, 10.0, 100.0, 0.0);

    // 0.01 ≈ -40 dBFS, 20 dB under the threshold.
    for _ in 0..(SAMPLE_RATE as usize) {
        let output = comp.process_sample(0.01);
        assert!((output - 0.01).abs() < 1e-7);
    }
    assert_eq!(comp.gain_reduction_db(), 0.0);
    assert_eq!(comp.envelope_db(), 0.0);
}

/// Full-scale DC converges the envelope to the static curve within the
/// documented tolerance — the steady-state correctness of the follower.
#[test]
fn full_scale_dc_converges() {
    let mut comp = Compressor::new(SAMPLE_RATE);
    comp.prepare(SAMPLE_RATE);
    comp.set_parameters(-20.0, 4.0, 10.0, 100.0, 0.0);

    for _ in 0..(SAMPLE_RATE as usize) {
        comp.process_sample(1.0);
    }

    // level(1.0) = 0 dB, 20 dB over threshold at 4:1 → 15 dB reduction.
    let expected = GainComputer::new(-20.0, 4.0).target_reduction_db(0.0);
    assert_eq!(expected, 15.0);
    assert!(
        (comp.envelope_db() - expected).abs() < 0.01,
        "envelope {} vs expected {expected}",
        comp.envelope_db()
    );
}

/// `prepare` mid-stream behaves exactly like a freshly constructed engine
/// with the same parameters.
#[test]
fn prepare_mid_stream_equals_fresh_engine() {
    let mut comp = Compressor::new(SAMPLE_RATE);
    comp.prepare(SAMPLE_RATE);
    comp.set_parameters(-25.0, 6.0, 2.0, 80.0, 3.0);

    // Build up arbitrary envelope state.
    for i in 0..4096 {
        comp.process_sample((i as f32 * 0.01).sin() * 0.8);
    }

    comp.prepare(SAMPLE_RATE);

    let mut fresh = Compressor::new(SAMPLE_RATE);
    fresh.prepare(SAMPLE_RATE);
    fresh.set_parameters(-25.0, 6.0, 2.0, 80.0, 3.0);

    for i in 0..2048 {
        let sample = (i as f32 * 0.013).sin() * 0.7;
        let a = comp.process_sample(sample);
        let b = fresh.process_sample(sample);
        assert_eq!(
            a.to_bits(),
            b.to_bits(),
            "restarted engine diverged from fresh engine at sample {i}"
        );
    }
}

/// A stereo buffer processed in place stays finite and bounded, and the
/// shared detector links gain across channels.
#[test]
fn stereo_buffer_in_place() {
    let mut comp = Compressor::new(SAMPLE_RATE);
    comp.prepare(SAMPLE_RATE);
    comp.set_parameters(-20.0, 8.0, 1.0, 50.0, 0.0);

    let n = 1024;
    let mut left: Vec<f32> = (0..n).map(|i| (i as f32 * 0.05).sin() * 0.9).collect();
    let mut right: Vec<f32> = (0..n).map(|i| (i as f32 * 0.07).cos() * 0.9).collect();
    let dry_left = left.clone();

    {
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        comp.process_channels(&mut channels);
    }

    for (i, sample) in left.iter().chain(right.iter()).enumerate() {
        assert!(sample.is_finite(), "non-finite at {i}");
        assert!(sample.abs() <= 0.95);
    }

    // Loud material got compressed.
    let dry_peak = dry_left.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    let wet_peak = left.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(wet_peak < dry_peak, "peak {wet_peak} not below dry {dry_peak}");

    // Metering reflects the accumulated reduction.
    assert!(comp.gain_reduction_db() < 0.0);
}

/// UI-thread writes become visible to the engine through `apply_to`
/// without tearing the parameter set.
#[test]
fn shared_params_roundtrip_through_engine() {
    let mut comp = Compressor::new(SAMPLE_RATE);
    comp.prepare(SAMPLE_RATE);
    let shared = SharedParams::new(&comp);

    // Simulated automation gesture.
    shared.set_normalized(0, 0.25); // threshold -45 dB
    shared.set_value(1, 12.0);
    shared.set_value(2, 0.5);
    shared.set_value(3, 120.0);
    shared.set_value(4, 6.0);

    shared.apply_to(&mut comp);

    assert_eq!(comp.threshold_db(), -45.0);
    assert_eq!(comp.ratio(), 12.0);
    assert_eq!(comp.attack_ms(), 0.5);
    assert_eq!(comp.release_ms(), 120.0);
    assert_eq!(comp.makeup_db(), 6.0);

    // Engine remains well-behaved immediately after the update.
    for _ in 0..256 {
        assert!(comp.process_sample(0.8).is_finite());
    }
}
