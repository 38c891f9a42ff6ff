//! Read-only ratio preset table.
//!
//! Classic front-panel ratio detents (1:1 through 20:1) for hosts and GUIs
//! that prefer stepped ratio selection over a continuous knob. Pure lookup
//! data, no lifecycle.

/// Ratio values for the preset detents, ascending.
pub const RATIO_PRESETS: [f32; 8] = [1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 10.0, 20.0];

/// Display labels matching [`RATIO_PRESETS`] by index.
pub const RATIO_PRESET_LABELS: [&str; 8] = [
    "1:1", "2:1", "3:1", "4:1", "6:1", "8:1", "10:1", "20:1",
];

/// Index of the 4:1 entry, the fallback when no preset matches.
pub const DEFAULT_PRESET_INDEX: usize = 3;

/// Tolerance for matching a continuous ratio to a preset detent.
const MATCH_TOLERANCE: f32 = 0.1;

/// Ratio value for a preset index, if the index is valid.
///
/// # Example
///
/// ```rust
/// use compresor_dynamics::presets;
///
/// assert_eq!(presets::preset_ratio(3), Some(4.0));
/// assert_eq!(presets::preset_ratio(99), None);
/// ```
pub fn preset_ratio(index: usize) -> Option<f32> {
    RATIO_PRESETS.get(index).copied()
}

/// Label for a preset index, if the index is valid.
pub fn preset_label(index: usize) -> Option<&'static str> {
    RATIO_PRESET_LABELS.get(index).copied()
}

/// Preset index whose ratio matches `ratio` within tolerance.
///
/// Falls back to [`DEFAULT_PRESET_INDEX`] (4:1) when the ratio sits between
/// detents, mirroring hardware units that park the switch on the nearest
/// musical setting.
///
/// # Example
///
/// ```rust
/// use compresor_dynamics::presets;
///
/// assert_eq!(presets::preset_index_for_ratio(2.05), 1);
/// assert_eq!(presets::preset_index_for_ratio(5.0), presets::DEFAULT_PRESET_INDEX);
/// ```
pub fn preset_index_for_ratio(ratio: f32) -> usize {
    RATIO_PRESETS
        .iter()
        .position(|&preset| (ratio - preset).abs() < MATCH_TOLERANCE)
        .unwrap_or(DEFAULT_PRESET_INDEX)
}
