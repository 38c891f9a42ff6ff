//! Compresor Dynamics - the compressor engine
//!
//! This crate provides the dynamic-range compressor built on
//! compresor-core:
//!
//! - [`Compressor`] - The engine: parameters, coefficients, envelope state,
//!   per-sample and per-buffer processing, metering
//! - [`GainComputer`] - The static transfer curve (level dB → reduction dB)
//! - [`SharedParams`] - Lock-free parameter handoff between the UI/host
//!   thread and the audio thread
//! - [`presets`] - Read-only ratio detent table
//!
//! ## Example
//!
//! ```rust
//! use compresor_dynamics::Compressor;
//!
//! let mut comp = Compressor::new(48000.0);
//! comp.prepare(48000.0);
//! comp.set_parameters(-20.0, 4.0, 10.0, 100.0, 0.0);
//!
//! let mut buffer = [0.5f32; 256];
//! let mut channels: [&mut [f32]; 1] = [&mut buffer];
//! comp.process_channels(&mut channels);
//!
//! // Metering for a UI refresh loop
//! let reduction_db = comp.gain_reduction_db();
//! assert!(reduction_db <= 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod compressor;
pub mod gain_computer;
pub mod presets;
pub mod shared;

// Re-export main types at crate root
pub use compressor::Compressor;
pub use gain_computer::GainComputer;
pub use shared::SharedParams;
