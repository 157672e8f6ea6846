//! Position mapping between domain percent and screen pixels
//!
//! All math runs on the local movement axis: 0 px is the fully-open edge
//! and the axis grows toward the closed edge. Rotation into screen
//! coordinates happens later, in the transform composer.

use crate::config::CoverConfig;
use crate::config::cover::boundary;
use crate::constants::percent;

/// Remap a canonical position into the visible range
///
/// With a nonzero "reported closed" threshold the slice `[0, offset]`
/// renders as fully closed and the rest stretches over the full travel.
pub fn visible_position(domain_pct: u8, offset_is_closed_pct: u8) -> u8 {
    if offset_is_closed_pct == 0 {
        return domain_pct;
    }
    if offset_is_closed_pct >= percent::OPEN {
        // degenerate threshold pins the visible range shut
        return percent::CLOSED;
    }
    let p = f64::from(domain_pct);
    let offset = f64::from(offset_is_closed_pct);
    let visible = ((p - offset) / (100.0 - offset) * 100.0).round();
    visible.max(0.0) as u8
}

/// Pixel mapping for one cover at a measured axis length
///
/// Rebuilt whenever the host re-measures its surface; cheap enough to
/// construct per interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionModel {
    axis_length_px: f64,
    offset_opened_px: f64,
    offset_closed_px: f64,
    offset_is_closed_pct: u8,
}

impl PositionModel {
    pub fn new(cfg: &CoverConfig, axis_length_px: f64) -> Self {
        Self {
            axis_length_px,
            offset_opened_px: (cfg.offset_opened_pct / 100.0 * axis_length_px).round(),
            offset_closed_px: (cfg.offset_closed_pct / 100.0 * axis_length_px).round(),
            offset_is_closed_pct: cfg.offset_is_closed_pct,
        }
    }

    /// Axis coordinate of the fully-open picker stop
    pub fn cover_opened_px(&self) -> f64 {
        self.offset_opened_px
    }

    /// Axis coordinate of the fully-closed picker stop
    pub fn cover_closed_px(&self) -> f64 {
        self.axis_length_px - self.offset_closed_px
    }

    /// Usable travel between the two stops
    pub fn travel_px(&self) -> f64 {
        self.cover_closed_px() - self.cover_opened_px()
    }

    pub fn visible_position(&self, domain_pct: u8) -> u8 {
        visible_position(domain_pct, self.offset_is_closed_pct)
    }

    /// Screen-axis coordinate for a canonical position
    pub fn screen_from_domain(&self, domain_pct: u8) -> f64 {
        let visible = f64::from(self.visible_position(domain_pct));
        self.cover_opened_px() + self.travel_px() * (100.0 - visible) / 100.0
    }

    /// Canonical position for a screen-axis coordinate
    ///
    /// The input is clamped to the picker stops first, so positions fed
    /// back from a drag can never leave `[0, 100]`.
    pub fn domain_from_screen(&self, screen_px: f64) -> u8 {
        let travel = self.travel_px();
        if travel <= 0.0 {
            // zero travel collapses the mapping; report open
            return percent::OPEN;
        }
        let screen = boundary(screen_px, self.cover_opened_px(), self.cover_closed_px());
        let offset = f64::from(self.offset_is_closed_pct);
        let pct = 100.0 - ((screen - self.cover_opened_px()) * (100.0 - offset) / travel).round();
        boundary(pct, 0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagnosticLog;
    use serde_json::json;

    fn model(entry: serde_json::Value, axis_length_px: f64) -> PositionModel {
        let mut log = DiagnosticLog::new();
        let cfg = CoverConfig::resolve(&entry, &mut log);
        PositionModel::new(&cfg, axis_length_px)
    }

    #[test]
    fn test_endpoints_without_offsets() {
        let m = model(json!({"entity": "cover.a"}), 200.0);
        // fully closed sits at the far end of the axis, fully open at 0
        assert_eq!(m.screen_from_domain(0), 200.0);
        assert_eq!(m.screen_from_domain(100), 0.0);
    }

    #[test]
    fn test_round_trip_without_visible_offset() {
        let m = model(json!({"entity": "cover.a"}), 173.0);
        for pct in 0..=100u8 {
            assert_eq!(m.domain_from_screen(m.screen_from_domain(pct)), pct);
        }
    }

    #[test]
    fn test_out_of_range_screen_clamps_to_endpoints() {
        let m = model(
            json!({"entity": "cover.a", "top_offset_pct": 10, "bottom_offset_pct": 20}),
            200.0,
        );
        assert_eq!(m.cover_opened_px(), 20.0);
        assert_eq!(m.cover_closed_px(), 160.0);
        assert_eq!(m.domain_from_screen(-50.0), 100);
        assert_eq!(m.domain_from_screen(500.0), 0);
    }

    #[test]
    fn test_visible_position_remap() {
        // threshold 40: everything at or below renders closed
        assert_eq!(visible_position(40, 40), 0);
        assert_eq!(visible_position(10, 40), 0);
        assert_eq!(visible_position(100, 40), 100);
        assert_eq!(visible_position(70, 40), 50);
        // no threshold: identity
        assert_eq!(visible_position(33, 0), 33);
    }

    #[test]
    fn test_visible_position_monotonic() {
        let mut last = 0;
        for pct in 0..=100u8 {
            let v = visible_position(pct, 25);
            assert!(v >= last, "not monotonic at {pct}");
            last = v;
        }
    }

    #[test]
    fn test_screen_monotonic_decreasing_in_domain() {
        let m = model(json!({"entity": "cover.a", "offset_closed_percentage": 25}), 300.0);
        let mut last = f64::MAX;
        for pct in 0..=100u8 {
            let s = m.screen_from_domain(pct);
            assert!(s <= last, "screen position rose at {pct}");
            last = s;
        }
    }

    #[test]
    fn test_dead_zones_shrink_travel() {
        let m = model(
            json!({"entity": "cover.a", "top_offset_pct": 10, "bottom_offset_pct": 10}),
            200.0,
        );
        assert_eq!(m.travel_px(), 160.0);
        assert_eq!(m.screen_from_domain(100), 20.0);
        assert_eq!(m.screen_from_domain(0), 180.0);
    }
}
