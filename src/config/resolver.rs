//! Three-layer raw configuration merge
//!
//! Precedence is override > preset > builtin default. A key set to the
//! literal `null` (or the string `"null"`) counts as "not provided" and
//! falls through to the next layer. Resolution never fails: unknown,
//! deprecated and removed keys produce diagnostics and the merge carries
//! on with the surviving value.

use serde_json::{Map, Value, json};

use super::keys;
use super::messages::{DiagnosticLog, Severity};
use super::presets;
use crate::constants::defaults;

pub type RawConfig = Map<String, Value>;

/// Deprecated key -> suggested replacement (warning)
const DEPRECATED: [(&str, &str); 1] = [(keys::CAN_TILT, keys::SHOW_TILT)];

/// Removed key -> suggested replacement (error-level, still non-fatal)
const REMOVED: [(&str, &str); 1] = [(keys::TITLE_POSITION, keys::NAME_POSITION)];

/// The builtin default layer; every resolvable key appears here
pub fn builtin_defaults() -> RawConfig {
    let mut map = Map::new();
    map.insert(keys::ENTITY.into(), Value::Null);
    map.insert(keys::NAME.into(), Value::Null);
    map.insert(keys::PASSIVE_MODE.into(), json!(false));
    map.insert(keys::SHUTTER_PRESET.into(), json!(presets::ROLLER_SHUTTER));

    map.insert(keys::CLOSING_DIRECTION.into(), json!("down"));
    map.insert(keys::INVERT_PERCENTAGE.into(), json!(false));
    map.insert(keys::INVERT_OPEN_CLOSE.into(), json!(false));

    map.insert(keys::PARTIAL_CLOSE_PCT.into(), json!(0));
    map.insert(keys::OFFSET_IS_CLOSED_PCT.into(), json!(0));
    map.insert(keys::OFFSET_OPENED_PCT.into(), json!(0));
    map.insert(keys::OFFSET_CLOSED_PCT.into(), json!(0));

    map.insert(keys::BASE_WIDTH_PX.into(), json!(defaults::BASE_WIDTH_PX));
    map.insert(keys::BASE_HEIGHT_PX.into(), json!(defaults::BASE_HEIGHT_PX));
    map.insert(keys::RESIZE_WIDTH_PCT.into(), json!(defaults::RESIZE_PCT));
    map.insert(keys::RESIZE_HEIGHT_PCT.into(), json!(defaults::RESIZE_PCT));
    map.insert(
        keys::PICKER_OVERLAP_PX.into(),
        json!(defaults::PICKER_OVERLAP_PX),
    );

    map.insert(keys::ALWAYS_PCT.into(), json!(false));
    map.insert(keys::SHOW_TILT.into(), json!(true));
    map.insert(keys::BUTTONS_POSITION.into(), json!("left"));
    map.insert(keys::NAME_POSITION.into(), json!("top"));

    map.insert(keys::CAN_TILT.into(), Value::Null);
    map.insert(keys::TITLE_POSITION.into(), Value::Null);

    map.insert(keys::VIEW_LAYOUT.into(), Value::Null);
    map.insert(keys::GRID_OPTIONS.into(), Value::Null);
    map
}

/// "Not provided" sentinel: absent, `null`, or the string `"null"`
fn is_unset(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s == "null",
        Some(_) => false,
    }
}

/// Normalize an entity entry: a bare string is shorthand for `{entity: ...}`
pub fn normalize_entry(entry: &Value) -> RawConfig {
    match entry {
        Value::Object(map) => map.clone(),
        Value::String(id) => {
            let mut map = Map::new();
            map.insert(keys::ENTITY.into(), json!(id));
            map
        }
        other => {
            let mut map = Map::new();
            map.insert(keys::ENTITY.into(), other.clone());
            map
        }
    }
}

fn entity_label(overrides: &RawConfig) -> String {
    overrides
        .get(keys::ENTITY)
        .and_then(Value::as_str)
        .unwrap_or("general")
        .to_string()
}

/// Merge the three layers into a map that is total over the default key set
pub fn merge_layers(
    base: &RawConfig,
    preset: Option<&RawConfig>,
    overrides: &RawConfig,
    entity: &str,
    log: &mut DiagnosticLog,
) -> RawConfig {
    for key in overrides.keys() {
        if !base.contains_key(key.as_str()) {
            log.push(
                Severity::Warning,
                entity,
                format!("unknown keyword [{key}], check your input"),
            );
        }
    }

    let mut resolved = Map::new();
    for (key, default_value) in base {
        if let Some((_, replacement)) = DEPRECATED.iter().find(|(old, _)| old == key)
            && !is_unset(overrides.get(key.as_str()))
        {
            log.push(
                Severity::Warning,
                entity,
                format!("deprecated keyword [{key}], use '{replacement}'"),
            );
        }
        if let Some((_, replacement)) = REMOVED.iter().find(|(old, _)| old == key)
            && !is_unset(overrides.get(key.as_str()))
        {
            log.push(
                Severity::Error,
                entity,
                format!("removed keyword [{key}], use '{replacement}'"),
            );
        }

        let value = if !is_unset(overrides.get(key.as_str())) {
            overrides[key.as_str()].clone()
        } else if let Some(v) = preset.and_then(|p| p.get(key.as_str()))
            && !is_unset(Some(v))
        {
            v.clone()
        } else {
            default_value.clone()
        };
        resolved.insert(key.clone(), value);
    }
    resolved
}

/// Resolve one entity entry against a base layer (card-level or builtin)
///
/// The preset is picked from the entry itself, falling back to the base
/// layer's `shutter_preset`.
pub fn resolve_entry(base: &RawConfig, entry: &Value, log: &mut DiagnosticLog) -> RawConfig {
    let overrides = normalize_entry(entry);
    let entity = entity_label(&overrides);

    let preset_name = overrides
        .get(keys::SHUTTER_PRESET)
        .or_else(|| base.get(keys::SHUTTER_PRESET))
        .and_then(Value::as_str)
        .unwrap_or(presets::ROLLER_SHUTTER)
        .to_string();
    let preset = presets::lookup(&preset_name);
    if preset.is_none() {
        log.push(
            Severity::Warning,
            &entity,
            format!("unknown shutter preset [{preset_name}], using defaults"),
        );
    }

    merge_layers(base, preset.as_ref(), &overrides, &entity, log)
}

/// Resolve one entity entry against the builtin defaults only
pub fn resolve(entry: &Value, log: &mut DiagnosticLog) -> RawConfig {
    resolve_entry(&builtin_defaults(), entry, log)
}
