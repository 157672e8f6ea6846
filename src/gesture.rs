//! Drag gesture tracking
//!
//! One tracker per entity, never shared. A gesture anchors the pointer
//! position and the shutter's screen position at pointer-down; every
//! later sample is resolved against that anchor only, so move events
//! are idempotent and order-tolerant. A second pointer-down during an
//! active drag is ignored instead of silently re-anchoring, and a drag
//! whose release event never arrives expires after an idle timeout.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::CoverConfig;
use crate::config::cover::boundary;
use crate::constants::defaults;
use crate::geometry::Vec2;
use crate::position::PositionModel;

/// One pointer event in global (page) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub at_ms: u64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, at_ms: u64) -> Self {
        Self { x, y, at_ms }
    }

    fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Where a drag is resolved from: the pointer-down point and the
/// shutter's screen position at that moment
#[derive(Debug, Clone, Copy)]
struct Anchor {
    point: Vec2,
    screen_position_px: f64,
    last_seen_ms: u64,
}

/// Result of resolving one pointer sample against the drag anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragUpdate {
    pub screen_position_px: f64,
    pub domain_pct: u8,
}

#[derive(Debug)]
pub struct GestureTracker {
    anchor: Option<Anchor>,
    timeout_ms: u64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::with_timeout(defaults::DRAG_TIMEOUT_MS)
    }

    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            anchor: None,
            timeout_ms,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Anchor a new drag at the current shutter position
    ///
    /// Ignored while a drag is already active; re-anchoring mid-drag
    /// would make the shutter jump under the pointer.
    pub fn begin(&mut self, sample: PointerSample, model: &PositionModel, domain_pct: u8) {
        self.expire_if_idle(sample.at_ms);
        if self.anchor.is_some() {
            debug!("pointer-down during active drag ignored");
            return;
        }
        self.anchor = Some(Anchor {
            point: sample.point(),
            screen_position_px: model.screen_from_domain(domain_pct),
            last_seen_ms: sample.at_ms,
        });
    }

    /// Resolve a move sample; `None` when no drag is active
    pub fn movement(
        &mut self,
        sample: PointerSample,
        cfg: &CoverConfig,
        model: &PositionModel,
    ) -> Option<DragUpdate> {
        self.expire_if_idle(sample.at_ms);
        let anchor = self.anchor.as_mut()?;
        anchor.last_seen_ms = sample.at_ms;
        let anchor = *anchor;
        Some(resolve(anchor, sample, cfg, model))
    }

    /// Resolve the release sample and end the drag
    pub fn release(
        &mut self,
        sample: PointerSample,
        cfg: &CoverConfig,
        model: &PositionModel,
    ) -> Option<DragUpdate> {
        self.expire_if_idle(sample.at_ms);
        let anchor = self.anchor.take()?;
        Some(resolve(anchor, sample, cfg, model))
    }

    /// Abandon the current drag without resolving a position
    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    fn expire_if_idle(&mut self, now_ms: u64) {
        if let Some(anchor) = &self.anchor
            && now_ms.saturating_sub(anchor.last_seen_ms) > self.timeout_ms
        {
            warn!("abandoning drag after {}ms without events", self.timeout_ms);
            self.anchor = None;
        }
    }
}

/// Apply the pointer delta along the local movement axis, clamped to
/// the picker stops
fn resolve(
    anchor: Anchor,
    sample: PointerSample,
    cfg: &CoverConfig,
    model: &PositionModel,
) -> DragUpdate {
    let delta = sample.point() - anchor.point;
    let delta_local = cfg.close_angle().rotate_back(delta);
    let screen_position_px = boundary(
        anchor.screen_position_px + delta_local.y,
        model.cover_opened_px(),
        model.cover_closed_px(),
    )
    .round();
    DragUpdate {
        screen_position_px,
        domain_pct: model.domain_from_screen(screen_position_px),
    }
}
