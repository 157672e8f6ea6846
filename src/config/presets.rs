//! Builtin per-type presets
//!
//! A preset sits between the builtin defaults and the per-entity
//! overrides: it pre-shapes the configuration for a cover type without
//! stopping the user from overriding any single key.

use serde_json::{Map, Value, json};

use super::keys;

pub const ROLLER_SHUTTER: &str = "roller-shutter";
pub const AWNING: &str = "awning";
pub const CURTAIN: &str = "curtain";
pub const SHADE: &str = "shade";

pub const PRESET_NAMES: [&str; 4] = [ROLLER_SHUTTER, AWNING, CURTAIN, SHADE];

/// Look up the preset layer for a cover type; `None` for unknown names
pub fn lookup(name: &str) -> Option<Map<String, Value>> {
    let mut preset = Map::new();
    match name {
        ROLLER_SHUTTER | SHADE => {}
        AWNING => {
            preset.insert(keys::INVERT_OPEN_CLOSE.into(), json!(true));
            preset.insert(keys::OFFSET_CLOSED_PCT.into(), json!(50));
        }
        CURTAIN => {
            preset.insert(keys::CLOSING_DIRECTION.into(), json!("right"));
        }
        _ => return None,
    }
    Some(preset)
}
