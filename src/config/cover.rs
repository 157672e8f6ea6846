//! Resolved per-entity cover configuration
//!
//! Built once from the raw key/value map and immutable afterwards; the
//! engine rebuilds it only when the host hands over a changed raw map.
//! Out-of-range values are clamped with a warning, never rejected.

use serde::Serialize;
use serde_json::Value;

use super::keys;
use super::messages::{DiagnosticLog, Severity};
use super::resolver::{self, RawConfig};
use crate::constants::{defaults, percent, resize};
use crate::geometry::{Quarter, Vec2};
use crate::viewport::ButtonPosition;

/// Direction the cover moves when closing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosingDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ClosingDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Rotation that maps local "downward travel" onto the screen direction
    pub fn close_angle(self) -> Quarter {
        match self {
            Self::Down => Quarter::Deg0,
            Self::Left => Quarter::Deg90,
            Self::Up => Quarter::Deg180,
            Self::Right => Quarter::Deg270,
        }
    }

    /// Whether the movement axis is vertical in screen space
    pub fn vertical_movement(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// `right` and `up` run against the default `down` convention
    pub fn reversed(self) -> bool {
        matches!(self, Self::Right | Self::Up)
    }
}

/// Clamp `value` into the range spanned by `a` and `b`, order-independent
pub(crate) fn boundary(value: f64, a: f64, b: f64) -> f64 {
    let min = a.min(b);
    let max = a.max(b);
    value.clamp(min, max)
}

/// Immutable per-entity configuration, resolved from the raw map
#[derive(Debug, Clone, Serialize)]
pub struct CoverConfig {
    pub entity_id: String,
    pub name: Option<String>,
    pub passive_mode: bool,

    pub closing_direction: ClosingDirection,
    pub invert_percentage: bool,
    pub invert_open_close: bool,

    /// Dead zone at the opened end of travel, percent of the axis
    pub offset_opened_pct: f64,
    /// Dead zone at the closed end of travel, percent of the axis
    pub offset_closed_pct: f64,
    /// Visible-range remap threshold, canonical (non-inverted) percent
    pub offset_is_closed_pct: u8,
    /// Partial-open target, canonical percent; collapsed at 0/100
    pub partial_close_pct: Option<u8>,

    pub window_width_px: f64,
    pub window_height_px: f64,
    pub picker_overlap_px: f64,

    pub always_percentage: bool,
    pub show_tilt: bool,
    pub buttons_position: ButtonPosition,
}

impl CoverConfig {
    /// Resolve a raw entity entry (map or id shorthand) end to end
    pub fn resolve(entry: &Value, log: &mut DiagnosticLog) -> Self {
        let resolved = resolver::resolve(entry, log);
        Self::from_resolved(&resolved, log)
    }

    /// Build the typed config from an already-merged raw map
    pub fn from_resolved(raw: &RawConfig, log: &mut DiagnosticLog) -> Self {
        let entity_id = raw
            .get(keys::ENTITY)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let entity = if entity_id.is_empty() {
            "general"
        } else {
            entity_id.as_str()
        };

        let closing_direction = match raw.get(keys::CLOSING_DIRECTION).and_then(Value::as_str) {
            Some(s) => ClosingDirection::parse(s).unwrap_or_else(|| {
                log.push(
                    Severity::Error,
                    entity,
                    format!("closing_direction must be up/down/left/right, got [{s}]"),
                );
                ClosingDirection::Down
            }),
            None => ClosingDirection::Down,
        };

        let invert_percentage = bool_key(raw, keys::INVERT_PERCENTAGE);
        let invert_open_close = bool_key(raw, keys::INVERT_OPEN_CLOSE);

        let invert = |p: f64| {
            if invert_percentage { 100.0 - p } else { p }
        };

        let offset_opened_pct = clamped_pct(raw, keys::OFFSET_OPENED_PCT, entity, log);
        let offset_closed_pct = clamped_pct(raw, keys::OFFSET_CLOSED_PCT, entity, log);

        // Stored in canonical form; a zero threshold means "no remap" and
        // is deliberately not inverted.
        let raw_offset = clamped_pct(raw, keys::OFFSET_IS_CLOSED_PCT, entity, log);
        let offset_is_closed_pct = if raw_offset != 0.0 {
            invert(raw_offset).round() as u8
        } else {
            0
        };

        // Partial target is entered in the user's percentage convention
        // and stored canonically; 0 and 100 mean "no partial target".
        let raw_partial = invert(clamped_pct(raw, keys::PARTIAL_CLOSE_PCT, entity, log)).round();
        let partial_close_pct = match raw_partial as u8 {
            p if p == percent::CLOSED || p == percent::OPEN => None,
            p => Some(p),
        };

        let window_width_px = window_px(
            raw,
            keys::BASE_WIDTH_PX,
            keys::RESIZE_WIDTH_PCT,
            defaults::BASE_WIDTH_PX,
            entity,
            log,
        );
        let window_height_px = window_px(
            raw,
            keys::BASE_HEIGHT_PX,
            keys::RESIZE_HEIGHT_PCT,
            defaults::BASE_HEIGHT_PX,
            entity,
            log,
        );

        let buttons_position = match raw.get(keys::BUTTONS_POSITION).and_then(Value::as_str) {
            Some(s) => ButtonPosition::parse(s).unwrap_or_else(|| {
                log.push(
                    Severity::Warning,
                    entity,
                    format!("unknown buttons_position [{s}], using 'left'"),
                );
                ButtonPosition::Left
            }),
            None => ButtonPosition::Left,
        };

        // can_tilt is deprecated but still honored: either flag enables tilt
        let show_tilt = bool_key(raw, keys::SHOW_TILT) || bool_key(raw, keys::CAN_TILT);

        Self {
            entity_id,
            name: raw
                .get(keys::NAME)
                .and_then(Value::as_str)
                .map(str::to_string),
            passive_mode: bool_key(raw, keys::PASSIVE_MODE),
            closing_direction,
            invert_percentage,
            invert_open_close,
            offset_opened_pct,
            offset_closed_pct,
            offset_is_closed_pct,
            partial_close_pct,
            window_width_px,
            window_height_px,
            picker_overlap_px: f64_key(raw, keys::PICKER_OVERLAP_PX)
                .unwrap_or(defaults::PICKER_OVERLAP_PX),
            always_percentage: bool_key(raw, keys::ALWAYS_PCT),
            show_tilt,
            buttons_position,
        }
    }

    /// Apply the percentage inversion at the presentation/command boundary
    pub fn invert_pct(&self, pct: u8) -> u8 {
        if self.invert_percentage {
            percent::OPEN - pct
        } else {
            pct
        }
    }

    /// Configured window size in global (screen) coordinates
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width_px, self.window_height_px)
    }

    /// Length of the movement axis for the configured window size
    pub fn axis_length_px(&self) -> f64 {
        self.close_angle().switch_axis(self.window_size()).y
    }

    pub fn close_angle(&self) -> Quarter {
        self.closing_direction.close_angle()
    }
}

fn bool_key(raw: &RawConfig, key: &str) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn f64_key(raw: &RawConfig, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

/// Percentage-like field: clamp into [0,100], warning when out of range
fn clamped_pct(raw: &RawConfig, key: &str, entity: &str, log: &mut DiagnosticLog) -> f64 {
    let value = f64_key(raw, key).unwrap_or(0.0);
    let clamped = boundary(value, 0.0, 100.0);
    if clamped != value {
        log.push(
            Severity::Warning,
            entity,
            format!("{key} = {value} out of range, clamping to {clamped}"),
        );
    }
    clamped
}

fn window_px(
    raw: &RawConfig,
    base_key: &str,
    resize_key: &str,
    base_default: f64,
    entity: &str,
    log: &mut DiagnosticLog,
) -> f64 {
    let base = f64_key(raw, base_key).unwrap_or(base_default);
    let resize = f64_key(raw, resize_key).unwrap_or(defaults::RESIZE_PCT);
    let clamped = boundary(resize, resize::MIN_PCT, resize::MAX_PCT);
    if clamped != resize {
        log.push(
            Severity::Warning,
            entity,
            format!("{resize_key} = {resize} out of range, clamping to {clamped}"),
        );
    }
    (clamped / 100.0 * base).round()
}
