//! Compresor Core - DSP primitives for dynamics processing
//!
//! This crate provides the foundational building blocks for a dynamic-range
//! compressor, designed for real-time audio with zero allocation in the
//! audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for audio processors
//!
//! ## Dynamics Primitives
//!
//! - [`Ballistics`] - Attack/release time constants → one-pole coefficients
//! - [`ReductionEnvelope`] - Smoothed gain-reduction follower
//!
//! ## Parameter Introspection
//!
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Discoverable parameters with
//!   normalized [0, 1] mapping for host automation
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`detect_level_db`],
//!   [`soft_limit`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! compresor-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Never panic, never NaN**: Numeric edge cases are clamped or rejected
//!   at the boundary, not propagated

#![cfg_attr(not(feature = "std"), no_std)]

pub mod ballistics;
pub mod effect;
pub mod envelope;
pub mod math;
pub mod param_info;

// Re-export main types at crate root
pub use ballistics::{Ballistics, COEFF_CEILING, COEFF_FLOOR, SETTLING_FACTOR};
pub use effect::Effect;
pub use envelope::{
    CHATTER_RELEASE_SCALE, CHATTER_WINDOW_DB, MAX_REDUCTION_DB, ReductionEnvelope,
};
pub use math::{
    LEVEL_CEILING_DB, LEVEL_FLOOR_DB, SOFT_LIMIT_DRIVE, SOFT_LIMIT_THRESHOLD, db_to_linear,
    detect_level_db, linear_to_db, ms_to_samples, soft_limit,
};
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
