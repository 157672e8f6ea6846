//! Engine-wide constants
//!
//! This module contains the magic numbers shared across the engine,
//! providing a single source of truth for constant values.

/// Domain percentage bounds (canonical, non-inverted)
pub mod percent {
    /// Fully open cover position
    pub const OPEN: u8 = 100;

    /// Fully closed cover position
    pub const CLOSED: u8 = 0;
}

/// Cover feature bits, as reported by the host's supported-feature bitmask
pub mod feature {
    pub const OPEN: u16 = 0b0000_0001;
    pub const CLOSE: u16 = 0b0000_0010;
    pub const SET_POSITION: u16 = 0b0000_0100;
    pub const STOP: u16 = 0b0000_1000;
    pub const OPEN_TILT: u16 = 0b0001_0000;
    pub const CLOSE_TILT: u16 = 0b0010_0000;
    pub const STOP_TILT: u16 = 0b0100_0000;
    pub const SET_TILT_POSITION: u16 = 0b1000_0000;

    /// All features, tilt included
    pub const ALL: u16 = 0b1111_1111;

    /// Fallback when the host omits the bitmask entirely
    pub const NO_TILT: u16 = 0b0000_1111;
}

/// Window resize limits applied during configuration resolution
pub mod resize {
    /// Minimum resize percentage for either axis
    pub const MIN_PCT: f64 = 20.0;

    /// Maximum resize percentage for either axis
    pub const MAX_PCT: f64 = 500.0;
}

/// Builtin configuration defaults
pub mod defaults {
    /// Base (unscaled) window width in pixels
    pub const BASE_WIDTH_PX: f64 = 150.0;

    /// Base (unscaled) window height in pixels
    pub const BASE_HEIGHT_PX: f64 = 150.0;

    /// Resize percentage applied to the base dimensions
    pub const RESIZE_PCT: f64 = 100.0;

    /// Extra hit-region overlap of the draggable picker, in pixels
    pub const PICKER_OVERLAP_PX: f64 = 20.0;

    /// Idle time after which an unreleased drag is abandoned
    pub const DRAG_TIMEOUT_MS: u64 = 30_000;
}
