//! Thread-safe shared parameter store.
//!
//! The compressor itself is single-threaded state owned by the audio
//! thread. Hosts and GUIs live on other threads, so parameter handoff goes
//! through `SharedParams`: one atomic `u32` (f32 bit-cast) per parameter,
//! written by the UI/automation thread and drained by the audio thread at
//! block boundaries. Lock-free in both directions — the audio callback must
//! never block, and a stalled GUI must never stall audio.
//!
//! Torn coefficient sets cannot occur: the audio thread reads a snapshot of
//! all five values and applies them through one
//! [`Compressor::set_parameters`] call, so attack/release coefficients are
//! recomputed together from one consistent parameter set.

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{sync::Arc, vec::Vec};
#[cfg(feature = "std")]
use std::sync::Arc;

use core::sync::atomic::{AtomicU32, Ordering};

use compresor_core::{ParamDescriptor, ParameterInfo};

use crate::compressor::Compressor;

/// Inner storage, held behind an `Arc` so `SharedParams` clones cheaply
/// into `'static + Send` GUI closures.
struct SharedParamsData {
    /// Parameter descriptors, indexed by parameter position.
    descriptors: Vec<ParamDescriptor>,
    /// Current parameter values as f32 bit-cast to u32 for atomic access.
    values: Vec<AtomicU32>,
}

/// Shared parameter state accessible from all threads.
///
/// Descriptors are immutable after construction; values are independent
/// atomics. The UI thread writes values; the audio thread reads them and
/// syncs the engine with [`apply_to`](SharedParams::apply_to).
///
/// # Example
///
/// ```rust
/// use compresor_dynamics::{Compressor, SharedParams};
///
/// let mut comp = Compressor::new(48000.0);
/// let shared = SharedParams::new(&comp);
///
/// // UI thread:
/// shared.set_value(0, -30.0); // threshold
///
/// // Audio thread, at the top of a block:
/// shared.apply_to(&mut comp);
/// assert_eq!(comp.threshold_db(), -30.0);
/// ```
#[derive(Clone)]
pub struct SharedParams {
    inner: Arc<SharedParamsData>,
}

impl SharedParams {
    /// Create a store mirroring the given engine's parameters.
    ///
    /// Values start at the engine's current settings.
    pub fn new(engine: &Compressor) -> Self {
        let count = engine.param_count();
        let mut descriptors = Vec::with_capacity(count);
        let mut values = Vec::with_capacity(count);

        for i in 0..count {
            if let Some(desc) = engine.param_info(i) {
                values.push(AtomicU32::new(engine.get_param(i).to_bits()));
                descriptors.push(desc);
            }
        }

        Self {
            inner: Arc::new(SharedParamsData {
                descriptors,
                values,
            }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        self.inner.descriptors.len()
    }

    /// Parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&ParamDescriptor> {
        self.inner.descriptors.get(index)
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.inner.descriptors
    }

    /// Find a parameter index by stable numeric ID.
    pub fn index_by_id(&self, id: u32) -> Option<usize> {
        self.inner.descriptors.iter().position(|d| d.id.0 == id)
    }

    /// Read the current value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self
            .inner
            .values
            .get(index)
            .zip(self.inner.descriptors.get(index))
        {
            let clamped = value.clamp(desc.min, desc.max);
            atomic.store(clamped.to_bits(), Ordering::Release);
        }
    }

    /// Write a parameter from a normalized [0, 1] host value.
    ///
    /// Denormalized through the descriptor's affine mapping.
    pub fn set_normalized(&self, index: usize, normalized: f32) {
        if let Some(desc) = self.inner.descriptors.get(index) {
            self.set_value(index, desc.denormalize(normalized));
        }
    }

    /// Sync all current values into the engine in one step.
    ///
    /// Called by the audio thread at block boundaries. Reads a snapshot of
    /// all five atomics, then applies them with a single
    /// [`Compressor::set_parameters`] call so the derived coefficients are
    /// never torn between old and new time constants.
    pub fn apply_to(&self, engine: &mut Compressor) {
        let read = |i: usize| self.get_value(i).unwrap_or(0.0);
        engine.set_parameters(read(0), read(1), read(2), read(3), read(4));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mirrors_engine_defaults() {
        let comp = Compressor::new(48000.0);
        let shared = SharedParams::new(&comp);

        assert_eq!(shared.param_count(), 5);
        for (i, desc) in shared.descriptors().iter().enumerate() {
            let value = shared.get_value(i).unwrap();
            assert_eq!(
                value, desc.default,
                "param {i} ({}) should start at default",
                desc.name
            );
        }
    }

    #[test]
    fn test_set_value_clamps() {
        let comp = Compressor::new(48000.0);
        let shared = SharedParams::new(&comp);
        let desc = *shared.descriptor(0).unwrap();

        shared.set_value(0, desc.max + 100.0);
        assert_eq!(shared.get_value(0).unwrap(), desc.max);

        shared.set_value(0, desc.min - 100.0);
        assert_eq!(shared.get_value(0).unwrap(), desc.min);
    }

    #[test]
    fn test_apply_to_syncs_engine() {
        let mut comp = Compressor::new(48000.0);
        let shared = SharedParams::new(&comp);

        shared.set_value(0, -35.0);
        shared.set_value(1, 10.0);
        shared.set_value(2, 2.0);
        shared.set_value(3, 250.0);
        shared.set_value(4, 3.0);

        shared.apply_to(&mut comp);
        assert_eq!(comp.threshold_db(), -35.0);
        assert_eq!(comp.ratio(), 10.0);
        assert_eq!(comp.attack_ms(), 2.0);
        assert_eq!(comp.release_ms(), 250.0);
        assert_eq!(comp.makeup_db(), 3.0);
    }

    #[test]
    fn test_set_normalized_uses_descriptor_mapping() {
        let comp = Compressor::new(48000.0);
        let shared = SharedParams::new(&comp);

        // Threshold descriptor spans [-60, 0].
        shared.set_normalized(0, 0.5);
        assert_eq!(shared.get_value(0).unwrap(), -30.0);
    }

    #[test]
    fn test_index_by_id() {
        let comp = Compressor::new(48000.0);
        let shared = SharedParams::new(&comp);
        assert_eq!(shared.index_by_id(100), Some(0));
        assert_eq!(shared.index_by_id(104), Some(4));
        assert_eq!(shared.index_by_id(999), None);
    }

    #[test]
    fn test_out_of_range_safe() {
        let comp = Compressor::new(48000.0);
        let shared = SharedParams::new(&comp);
        assert_eq!(shared.get_value(999), None);
        assert!(shared.descriptor(999).is_none());
        // Should not panic.
        shared.set_value(999, 1.0);
        shared.set_normalized(999, 0.5);
    }

    #[test]
    fn test_clone_shares_storage() {
        let comp = Compressor::new(48000.0);
        let shared = SharedParams::new(&comp);
        let clone = shared.clone();

        shared.set_value(1, 12.0);
        assert_eq!(clone.get_value(1).unwrap(), 12.0);
    }
}
