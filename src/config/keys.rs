//! Raw configuration key names
//!
//! Key spelling matches the host card configuration; several names are
//! historical (`top_offset_pct` is the opened-side offset).

pub const ENTITY: &str = "entity";
pub const NAME: &str = "name";
pub const PASSIVE_MODE: &str = "passive_mode";
pub const SHUTTER_PRESET: &str = "shutter_preset";

pub const CLOSING_DIRECTION: &str = "closing_direction";
pub const INVERT_PERCENTAGE: &str = "invert_percentage";
pub const INVERT_OPEN_CLOSE: &str = "invert_open_close";

pub const PARTIAL_CLOSE_PCT: &str = "partial_close_percentage";
/// Visible-range remap threshold ("reported closed" offset)
pub const OFFSET_IS_CLOSED_PCT: &str = "offset_closed_percentage";
/// Dead zone at the opened end of travel
pub const OFFSET_OPENED_PCT: &str = "top_offset_pct";
/// Dead zone at the closed end of travel
pub const OFFSET_CLOSED_PCT: &str = "bottom_offset_pct";

pub const BASE_WIDTH_PX: &str = "base_width_px";
pub const BASE_HEIGHT_PX: &str = "base_height_px";
pub const RESIZE_WIDTH_PCT: &str = "resize_width_pct";
pub const RESIZE_HEIGHT_PCT: &str = "resize_height_pct";
pub const PICKER_OVERLAP_PX: &str = "picker_overlap_px";

pub const ALWAYS_PCT: &str = "always_percentage";
pub const SHOW_TILT: &str = "show_tilt";
pub const BUTTONS_POSITION: &str = "buttons_position";
pub const NAME_POSITION: &str = "name_position";

/// Deprecated in favor of [`SHOW_TILT`]
pub const CAN_TILT: &str = "can_tilt";
/// Removed in favor of [`NAME_POSITION`]
pub const TITLE_POSITION: &str = "title_position";

// Host layout keys, accepted to suppress unknown-key warnings
pub const VIEW_LAYOUT: &str = "view_layout";
pub const GRID_OPTIONS: &str = "grid_options";
