//! Per-entity engine facade
//!
//! Owns the resolved configuration, the latest entity snapshot and the
//! gesture tracker for one cover, and ties the position model, state
//! classifier and command boundary together. One instance per entity,
//! driven single-threaded by the host's event loop.

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use crate::config::CoverConfig;
use crate::constants::feature;
use crate::dispatch::{CommandSink, CoverCommand};
use crate::entity::CoverSnapshot;
use crate::gesture::{DragUpdate, GestureTracker, PointerSample};
use crate::position::{PositionModel, visible_position};
use crate::state::{ShutterState, classify};

/// Localization key for a display label; the host owns the strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKey {
    Open,
    Closed,
    Opening,
    Closing,
    Unavailable,
}

impl TextKey {
    /// Fallback labels for hosts without a translation table
    pub fn english(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Opening => "Opening",
            Self::Closing => "Closing",
            Self::Unavailable => "Unavailable",
        }
    }
}

/// `None` for partial positions, which have no label and render as a
/// percentage instead
fn text_key(state: ShutterState) -> Option<TextKey> {
    match state {
        ShutterState::Open => Some(TextKey::Open),
        ShutterState::Closed => Some(TextKey::Closed),
        ShutterState::Opening => Some(TextKey::Opening),
        ShutterState::Closing => Some(TextKey::Closing),
        ShutterState::Unavailable => Some(TextKey::Unavailable),
        ShutterState::PartialOpen => None,
    }
}

pub struct ShutterEngine {
    cfg: CoverConfig,
    snapshot: CoverSnapshot,
    tracker: GestureTracker,
}

impl ShutterEngine {
    pub fn new(cfg: CoverConfig) -> Self {
        Self {
            cfg,
            snapshot: CoverSnapshot::missing(),
            tracker: GestureTracker::new(),
        }
    }

    pub fn config(&self) -> &CoverConfig {
        &self.cfg
    }

    pub fn snapshot(&self) -> &CoverSnapshot {
        &self.snapshot
    }

    /// Replace the entity snapshot on a host state update
    pub fn update_snapshot(&mut self, snapshot: CoverSnapshot) {
        self.snapshot = snapshot;
    }

    /// Current position in canonical percent
    pub fn current_position(&self) -> u8 {
        self.snapshot.current_position(&self.cfg)
    }

    /// Pixel mapping for a measured movement-axis length
    ///
    /// Falls back to the configured window size when the host has not
    /// measured its surface yet.
    pub fn position_model(&self, measured_axis_px: Option<f64>) -> PositionModel {
        let axis = measured_axis_px.unwrap_or_else(|| self.cfg.axis_length_px());
        PositionModel::new(&self.cfg, axis)
    }

    pub fn current_screen_position(&self, model: &PositionModel) -> f64 {
        model.screen_from_domain(self.current_position())
    }

    pub fn shutter_state(&self) -> ShutterState {
        classify(self.snapshot.state, self.current_position(), &self.cfg)
    }

    /// Partial-open target, only when the cover can actually seek to it
    pub fn partial_target(&self) -> Option<u8> {
        self.cfg
            .partial_close_pct
            .filter(|_| self.snapshot.features.has(feature::SET_POSITION))
    }

    /// Display text for the current position
    pub fn position_text(&self, localize: &dyn Fn(TextKey) -> String) -> String {
        self.position_text_at(self.current_position(), localize)
    }

    /// Display text for an arbitrary canonical position (live drag feedback)
    pub fn position_text_at(&self, domain_pct: u8, localize: &dyn Fn(TextKey) -> String) -> String {
        if !self.snapshot.state.is_known() {
            return localize(TextKey::Unavailable);
        }
        let display = self
            .cfg
            .invert_pct(visible_position(domain_pct, self.cfg.offset_is_closed_pct));
        let mut text = self.position_label(display, localize);
        // with a visible-range remap active, show the raw value too
        if self.cfg.offset_is_closed_pct > 0 && self.cfg.offset_is_closed_pct < 100 {
            text.push_str(&format!(" ({}%)", self.cfg.invert_pct(domain_pct)));
        }
        text
    }

    fn position_label(&self, display_pct: u8, localize: &dyn Fn(TextKey) -> String) -> String {
        if self.snapshot.features.has(feature::SET_POSITION) {
            if self.cfg.always_percentage {
                return format!("{display_pct}%");
            }
            let state = classify(self.snapshot.state, self.cfg.invert_pct(display_pct), &self.cfg);
            match text_key(state) {
                Some(key) => localize(key),
                None => format!("{display_pct}%"),
            }
        } else {
            // binary cover: only an open/closed label makes sense
            let mut open = self.cfg.invert_pct(display_pct) > 50;
            if self.cfg.invert_open_close {
                open = !open;
            }
            localize(if open { TextKey::Open } else { TextKey::Closed })
        }
    }

    /// Start a drag; returns whether the host should capture the pointer
    pub fn pointer_down(&mut self, sample: PointerSample, model: &PositionModel) -> bool {
        if self.cfg.passive_mode {
            return false;
        }
        let position = self.current_position();
        self.tracker.begin(sample, model, position);
        true
    }

    pub fn pointer_move(&mut self, sample: PointerSample, model: &PositionModel) -> Option<DragUpdate> {
        self.tracker.movement(sample, &self.cfg, model)
    }

    /// Finish a drag and dispatch the resulting command
    ///
    /// Covers without positioning support get a plain open or close
    /// depending on which half of the travel the drag ended in.
    pub fn pointer_up(
        &mut self,
        sample: PointerSample,
        model: &PositionModel,
        sink: &mut dyn CommandSink,
    ) -> Result<Option<DragUpdate>> {
        let Some(update) = self.tracker.release(sample, &self.cfg, model) else {
            return Ok(None);
        };
        let command = if self.snapshot.features.has(feature::SET_POSITION) {
            CoverCommand::SetPosition {
                position: self.cfg.invert_pct(update.domain_pct),
            }
        } else if update.domain_pct > 50 {
            CoverCommand::Open
        } else {
            CoverCommand::Close
        };
        self.send(sink, command)?;
        Ok(Some(update))
    }

    pub fn cancel_gesture(&mut self) {
        self.tracker.cancel();
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Open button: inverted by the percentage and direction settings
    pub fn press_open(&self, sink: &mut dyn CommandSink) -> Result<()> {
        self.send(sink, self.directional_command(CoverCommand::Open))
    }

    /// Close button: inverted by the percentage and direction settings
    pub fn press_close(&self, sink: &mut dyn CommandSink) -> Result<()> {
        self.send(sink, self.directional_command(CoverCommand::Close))
    }

    pub fn press_stop(&self, sink: &mut dyn CommandSink) -> Result<()> {
        self.send(sink, CoverCommand::Stop)
    }

    pub fn press_open_tilt(&self, sink: &mut dyn CommandSink) -> Result<()> {
        self.send(sink, CoverCommand::OpenTilt)
    }

    pub fn press_close_tilt(&self, sink: &mut dyn CommandSink) -> Result<()> {
        self.send(sink, CoverCommand::CloseTilt)
    }

    /// Seek to the configured partial-open target, when one applies
    pub fn press_partial(&self, sink: &mut dyn CommandSink) -> Result<()> {
        match self.partial_target() {
            Some(target) => self.set_position(target, sink),
            None => Ok(()),
        }
    }

    /// Seek to a canonical position
    pub fn set_position(&self, domain_pct: u8, sink: &mut dyn CommandSink) -> Result<()> {
        self.send(
            sink,
            CoverCommand::SetPosition {
                position: self.cfg.invert_pct(domain_pct),
            },
        )
    }

    fn directional_command(&self, command: CoverCommand) -> CoverCommand {
        let mut command = command;
        if self.cfg.invert_percentage {
            command = command.invert_open_close();
        }
        if self.cfg.closing_direction.reversed() {
            command = command.invert_open_close();
        }
        command
    }

    fn send(&self, sink: &mut dyn CommandSink, command: CoverCommand) -> Result<()> {
        if self.cfg.passive_mode {
            warn!(
                entity = %self.cfg.entity_id,
                action = command.action_name(),
                "passive mode, command suppressed"
            );
            return Ok(());
        }
        sink.dispatch(&self.cfg.entity_id, command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagnosticLog;
    use crate::constants::feature;
    use crate::dispatch::RecordingSink;
    use serde_json::json;

    fn engine(entry: serde_json::Value, snapshot: CoverSnapshot) -> ShutterEngine {
        let mut log = DiagnosticLog::new();
        let mut engine = ShutterEngine::new(CoverConfig::resolve(&entry, &mut log));
        engine.update_snapshot(snapshot);
        engine
    }

    fn english(key: TextKey) -> String {
        key.english().to_string()
    }

    fn drag_to(engine: &mut ShutterEngine, sink: &mut RecordingSink, target_y: f64) {
        let model = engine.position_model(None);
        assert!(engine.pointer_down(PointerSample::new(0.0, 0.0, 0), &model));
        let up = PointerSample::new(0.0, target_y, 100);
        engine.pointer_up(up, &model, sink).unwrap();
    }

    #[test]
    fn test_release_without_set_position_sends_open_or_close() {
        let bits = Some(u32::from(feature::OPEN | feature::CLOSE | feature::STOP));
        // binary cover reported open: picker anchored fully open (0px on
        // a 150px axis); dragging 45px down ends at 70%, 105px at 30%
        let mut engine = engine(
            json!({"entity": "cover.a"}),
            CoverSnapshot::new(Some("open"), None, bits),
        );
        let mut sink = RecordingSink::default();
        drag_to(&mut engine, &mut sink, 45.0);
        drag_to(&mut engine, &mut sink, 105.0);

        assert_eq!(
            sink.sent,
            vec![
                ("cover.a".to_string(), CoverCommand::Open),
                ("cover.a".to_string(), CoverCommand::Close),
            ]
        );
    }

    #[test]
    fn test_release_with_set_position_sends_position() {
        let mut engine = engine(
            json!({"entity": "cover.a"}),
            CoverSnapshot::new(Some("open"), Some(100), None),
        );
        let mut sink = RecordingSink::default();
        drag_to(&mut engine, &mut sink, 45.0);
        assert_eq!(
            sink.sent,
            vec![("cover.a".to_string(), CoverCommand::SetPosition { position: 70 })]
        );
    }

    #[test]
    fn test_set_position_argument_is_re_inverted() {
        let engine = engine(
            json!({"entity": "cover.a", "invert_percentage": true}),
            CoverSnapshot::new(Some("open"), Some(60), None),
        );
        let mut sink = RecordingSink::default();
        engine.set_position(70, &mut sink).unwrap();
        assert_eq!(
            sink.sent,
            vec![("cover.a".to_string(), CoverCommand::SetPosition { position: 30 })]
        );
    }

    #[test]
    fn test_passive_mode_suppresses_all_dispatch() {
        let mut engine = engine(
            json!({"entity": "cover.a", "passive_mode": true}),
            CoverSnapshot::new(Some("open"), Some(80), None),
        );
        let mut sink = RecordingSink::default();
        let model = engine.position_model(None);

        assert!(!engine.pointer_down(PointerSample::new(0.0, 0.0, 0), &model));
        assert_eq!(
            engine
                .pointer_up(PointerSample::new(0.0, 60.0, 50), &model, &mut sink)
                .unwrap(),
            None
        );
        engine.press_open(&mut sink).unwrap();
        engine.press_stop(&mut sink).unwrap();
        engine.press_partial(&mut sink).unwrap();
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn test_open_button_respects_inversion_tables() {
        let snapshot = CoverSnapshot::new(Some("open"), Some(50), None);
        let mut sink = RecordingSink::default();

        engine(json!({"entity": "cover.a"}), snapshot)
            .press_open(&mut sink)
            .unwrap();
        engine(
            json!({"entity": "cover.a", "invert_percentage": true}),
            snapshot,
        )
        .press_open(&mut sink)
        .unwrap();
        engine(
            json!({"entity": "cover.a", "closing_direction": "up"}),
            snapshot,
        )
        .press_open(&mut sink)
        .unwrap();
        // both inversions cancel out
        engine(
            json!({
                "entity": "cover.a",
                "invert_percentage": true,
                "closing_direction": "up",
            }),
            snapshot,
        )
        .press_open(&mut sink)
        .unwrap();

        let commands: Vec<_> = sink.sent.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            commands,
            vec![
                CoverCommand::Open,
                CoverCommand::Close,
                CoverCommand::Close,
                CoverCommand::Open,
            ]
        );
    }

    #[test]
    fn test_partial_press_requires_capability_and_target() {
        let binary = Some(u32::from(feature::OPEN | feature::CLOSE));
        let mut sink = RecordingSink::default();

        // no target configured
        engine(
            json!({"entity": "cover.a"}),
            CoverSnapshot::new(Some("open"), Some(50), None),
        )
        .press_partial(&mut sink)
        .unwrap();
        // target configured but no positioning support
        engine(
            json!({"entity": "cover.a", "partial_close_percentage": 25}),
            CoverSnapshot::new(Some("open"), None, binary),
        )
        .press_partial(&mut sink)
        .unwrap();
        assert!(sink.sent.is_empty());

        engine(
            json!({"entity": "cover.a", "partial_close_percentage": 25}),
            CoverSnapshot::new(Some("open"), Some(50), None),
        )
        .press_partial(&mut sink)
        .unwrap();
        assert_eq!(
            sink.sent,
            vec![("cover.a".to_string(), CoverCommand::SetPosition { position: 25 })]
        );
    }

    #[test]
    fn test_over_reported_position_stays_on_the_axis() {
        let engine = engine(
            json!({"entity": "cover.a"}),
            CoverSnapshot::new(Some("open"), Some(150), None),
        );
        let model = engine.position_model(None);
        // treated as fully open: the picker sits at the opened stop
        assert_eq!(engine.current_position(), 100);
        assert_eq!(engine.current_screen_position(&model), model.cover_opened_px());
    }

    #[test]
    fn test_position_text_unavailable() {
        let engine = engine(json!({"entity": "cover.a"}), CoverSnapshot::missing());
        assert_eq!(engine.position_text(&english), "Unavailable");
    }

    #[test]
    fn test_position_text_labels_and_percentages() {
        let open = engine(
            json!({"entity": "cover.a"}),
            CoverSnapshot::new(Some("open"), Some(100), None),
        );
        assert_eq!(open.position_text(&english), "Open");

        let partial = engine(
            json!({"entity": "cover.a"}),
            CoverSnapshot::new(Some("open"), Some(40), None),
        );
        assert_eq!(partial.position_text(&english), "40%");

        let forced = engine(
            json!({"entity": "cover.a", "always_percentage": true}),
            CoverSnapshot::new(Some("open"), Some(100), None),
        );
        assert_eq!(forced.position_text(&english), "100%");
    }

    #[test]
    fn test_position_text_with_visible_remap_appends_raw() {
        let engine = engine(
            json!({"entity": "cover.a", "offset_closed_percentage": 40}),
            CoverSnapshot::new(Some("open"), Some(70), None),
        );
        // visible 50%, raw 70%
        assert_eq!(engine.position_text(&english), "50% (70%)");
    }

    #[test]
    fn test_binary_cover_text_is_open_or_closed() {
        let bits = Some(u32::from(feature::OPEN | feature::CLOSE));
        let snapshot = CoverSnapshot::new(Some("open"), None, bits);

        let plain = engine(json!({"entity": "cover.a"}), snapshot);
        assert_eq!(plain.position_text(&english), "Open");

        let inverted = engine(
            json!({"entity": "cover.a", "invert_open_close": true}),
            snapshot,
        );
        assert_eq!(inverted.position_text(&english), "Closed");
    }

    #[test]
    fn test_drag_feedback_text_follows_pointer() {
        let engine = engine(
            json!({"entity": "cover.a"}),
            CoverSnapshot::new(Some("open"), Some(100), None),
        );
        assert_eq!(engine.position_text_at(35, &english), "35%");
        assert_eq!(engine.position_text_at(0, &english), "Closed");
    }
}
