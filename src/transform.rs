//! Placement transform composition
//!
//! Every rendered layer (slide, picker, partial marker, movement
//! overlay) is positioned the same way: translate to the window
//! mid-point, rotate onto the movement axis, optionally rescale, then
//! translate along the local axis to the screen position. The ops are
//! pure data; the host turns them into CSS transforms in order.

use serde::Serialize;

use crate::config::CoverConfig;
use crate::geometry::Vec2;
use crate::position::PositionModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    /// Translation in pixels
    Translate { x: f64, y: f64 },
    /// Translation relative to the element's own size, in percent
    TranslatePct { x: f64, y: f64 },
    /// Clockwise rotation in degrees
    Rotate { deg: i32 },
    Scale { x: f64, y: f64 },
}

impl TransformOp {
    /// Render as a CSS transform function
    pub fn css(&self) -> String {
        match *self {
            Self::Translate { x, y } => format!("translate({x}px,{y}px)"),
            Self::TranslatePct { x, y } => format!("translate({x}%,{y}%)"),
            Self::Rotate { deg } => format!("rotate({deg}deg)"),
            Self::Scale { x, y } => format!("scale({x},{y})"),
        }
    }
}

/// Join an op list into one CSS transform value
pub fn to_css(ops: &[TransformOp]) -> String {
    ops.iter()
        .map(TransformOp::css)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Aspect correction for elements laid out on the rotated axis
///
/// Vertical movement needs none; horizontal movement swaps the axes, so
/// the element is squeezed back to the window's aspect ratio.
fn aspect_scale(cfg: &CoverConfig, size_global: Vec2, both_axes: bool) -> Option<TransformOp> {
    if cfg.closing_direction.vertical_movement() {
        return None;
    }
    let x = size_global.y / size_global.x;
    let y = if both_axes {
        size_global.x / size_global.y
    } else {
        1.0
    };
    Some(TransformOp::Scale { x, y })
}

fn placement(
    cfg: &CoverConfig,
    size_global: Vec2,
    scale: Option<TransformOp>,
    screen_position_px: f64,
) -> Vec<TransformOp> {
    let local = cfg.close_angle().switch_axis(size_global);
    let mut ops = vec![
        TransformOp::Translate {
            x: size_global.x / 2.0,
            y: size_global.y / 2.0,
        },
        TransformOp::Rotate {
            deg: cfg.close_angle().degrees(),
        },
    ];
    if let Some(scale) = scale {
        ops.push(scale);
    }
    ops.push(TransformOp::Translate {
        x: 0.0,
        y: -local.y / 2.0 + screen_position_px,
    });
    ops
}

/// Transform for the sliding shutter surface
pub fn slide_ops(cfg: &CoverConfig, size_global: Vec2, screen_position_px: f64) -> Vec<TransformOp> {
    placement(
        cfg,
        size_global,
        aspect_scale(cfg, size_global, false),
        screen_position_px,
    )
}

/// Transform for the draggable picker handle
pub fn picker_ops(
    cfg: &CoverConfig,
    size_global: Vec2,
    screen_position_px: f64,
) -> Vec<TransformOp> {
    placement(
        cfg,
        size_global,
        aspect_scale(cfg, size_global, false),
        screen_position_px,
    )
}

/// Transform for the partial-open target marker
///
/// `None` when no partial target is configured.
pub fn partial_marker_ops(
    cfg: &CoverConfig,
    size_global: Vec2,
    model: &PositionModel,
) -> Option<Vec<TransformOp>> {
    let partial = cfg.partial_close_pct?;
    Some(placement(
        cfg,
        size_global,
        aspect_scale(cfg, size_global, true),
        model.screen_from_domain(partial),
    ))
}

/// Transform for the opening/closing indicator overlay, centered on the
/// travel midpoint
pub fn movement_overlay_ops(
    cfg: &CoverConfig,
    size_global: Vec2,
    model: &PositionModel,
) -> Vec<TransformOp> {
    let position = model.cover_opened_px() + model.travel_px() / 2.0;
    let mut ops = vec![TransformOp::TranslatePct { x: -50.0, y: -50.0 }];
    ops.extend(placement(cfg, size_global, None, position));
    ops
}
